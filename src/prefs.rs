// src/prefs.rs
//! Persisted UI preferences. The browser build kept the last-selected
//! language in a single localStorage key; here it is an explicit
//! load-on-init / save-on-change JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::types::Language;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub language: Language,
}

impl Prefs {
    /// Load preferences: stored file first, then the `LANG` environment
    /// variable prefix, then English.
    pub fn load(path: &Path) -> Self {
        if let Ok(content) = std::fs::read_to_string(path) {
            if let Ok(prefs) = serde_json::from_str::<Prefs>(&content) {
                return prefs;
            }
            debug!("ignoring unreadable prefs file at {}", path.display());
        }

        let language = std::env::var("LANG")
            .ok()
            .and_then(|l| l.get(..2).map(str::to_string))
            .map(|l| l.parse().unwrap_or_default())
            .unwrap_or_default();

        Prefs { language }
    }

    /// Persist preferences; called on every language change.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to encode prefs")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write prefs to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let prefs = Prefs {
            language: Language::Th,
        };
        prefs.save(&path).unwrap();

        let loaded = Prefs::load(&path);
        assert_eq!(loaded.language, Language::Th);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();

        // LANG may steer the fallback; it is at worst a valid language.
        let _ = Prefs::load(&path);
    }
}
