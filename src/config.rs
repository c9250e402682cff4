// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Client configuration. `api_base: None` selects mock mode, which is a
/// first-class operating mode (static in-memory dataset), not an error path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_prefs_path")]
    pub prefs_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: ClientConfig,
    production: ClientConfig,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_prefs_path() -> PathBuf {
    PathBuf::from("prefs.json")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            prefs_path: default_prefs_path(),
        }
    }
}

impl ClientConfig {
    /// Load configuration for the current environment.
    ///
    /// Reads `config.yaml` (`local` / `production` sections selected by
    /// `CAREERS_ENV`) when present; a missing file means mock mode defaults.
    /// `CAREERS_API_BASE` overrides the file in either case.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        let mut config = match Self::load_from_file(Path::new("config.yaml"), &environment)? {
            Some(c) => c,
            None => {
                info!("config.yaml not found, using mock-mode defaults");
                Self::default()
            }
        };

        if let Ok(base) = std::env::var("CAREERS_API_BASE") {
            let base = base.trim().trim_end_matches('/').to_string();
            config.api_base = if base.is_empty() { None } else { Some(base) };
        }

        Ok(config)
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;

        info!("Loading configuration for environment: {}", environment);

        let mut config = match environment {
            "production" => file.production,
            _ => file.local,
        };
        if let Some(base) = config.api_base.as_mut() {
            *base = base.trim().trim_end_matches('/').to_string();
            if base.is_empty() {
                config.api_base = None;
            }
        }
        Ok(Some(config))
    }

    fn get_environment() -> String {
        std::env::var("CAREERS_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn is_mock(&self) -> bool {
        self.api_base.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_mock_mode() {
        let c = ClientConfig::default();
        assert!(c.is_mock());
        assert_eq!(c.timeout_secs, 25);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let got =
            ClientConfig::load_from_file(Path::new("/nonexistent/config.yaml"), "local").unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn test_load_from_file_trims_trailing_slash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "local:\n  api_base: \"http://localhost:8000/\"\nproduction:\n  api_base: \"https://api.example.com\"\n  timeout_secs: 40"
        )
        .unwrap();

        let c = ClientConfig::load_from_file(&path, "local").unwrap().unwrap();
        assert_eq!(c.api_base.as_deref(), Some("http://localhost:8000"));
        assert_eq!(c.timeout_secs, 25);
    }
}
