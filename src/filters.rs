// src/filters.rs
//! Canonical filter/search state. In the browser build this lived entirely
//! in the URL query string so searches were shareable and survived
//! back/forward navigation; the same canonical encoding rules apply here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::types::Job;

/// Sentinel meaning "no constraint" for country/department/level.
pub const ALL: &str = "ALL";

/// Debounce window for free-text search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub q: String,
    pub country: String,
    pub department: String,
    pub level: String,
    /// 1-based; page 1 is the implicit default and is omitted when encoded.
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            q: String::new(),
            country: ALL.to_string(),
            department: ALL.to_string(),
            level: ALL.to_string(),
            page: 1,
        }
    }
}

fn is_all(v: &str) -> bool {
    v.is_empty() || v == ALL
}

impl FilterState {
    /// Encode into canonical query pairs. Empty/`ALL` values and `page == 1`
    /// are omitted so equal states always produce equal strings.
    pub fn encode(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.q.trim().is_empty() {
            pairs.push(("q".to_string(), self.q.trim().to_string()));
        }
        for (key, value) in [
            ("country", &self.country),
            ("department", &self.department),
            ("level", &self.level),
        ] {
            if !is_all(value) {
                pairs.push((key.to_string(), value.clone()));
            }
        }
        if self.page > 1 {
            pairs.push(("page".to_string(), self.page.to_string()));
        }
        pairs
    }

    /// Decode from query pairs. Unknown keys are ignored; a malformed page
    /// value falls back to 1.
    pub fn decode<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut state = Self::default();
        for (key, value) in pairs {
            match key {
                "q" => state.q = value.to_string(),
                "country" => state.country = value.to_string(),
                "department" => state.department = value.to_string(),
                "level" => state.level = value.to_string(),
                "page" => state.page = value.parse().unwrap_or(1).max(1),
                _ => {}
            }
        }
        state
    }

    // Changing the result set invalidates any deeper page, so every filter
    // mutation resets to page 1.

    pub fn set_q(&mut self, q: impl Into<String>) {
        self.q = q.into();
        self.page = 1;
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = country.into();
        self.page = 1;
    }

    pub fn set_department(&mut self, department: impl Into<String>) {
        self.department = department.into();
        self.page = 1;
    }

    pub fn set_level(&mut self, level: impl Into<String>) {
        self.level = level.into();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn clear_filters(&mut self) {
        self.country = ALL.to_string();
        self.department = ALL.to_string();
        self.level = ALL.to_string();
        self.page = 1;
    }

    pub fn has_any_filter(&self) -> bool {
        !is_all(&self.country) || !is_all(&self.department) || !is_all(&self.level)
    }
}

/// Selectable filter values, derived from the currently loaded job list so
/// the UI only ever offers values that actually appear in the result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub departments: Vec<String>,
    pub levels: Vec<String>,
}

impl FilterOptions {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        Self {
            countries: distinct(jobs.iter().map(|j| j.country.as_str())),
            departments: distinct(jobs.iter().map(|j| j.department.as_str())),
            levels: distinct(jobs.iter().map(|j| j.level.as_str())),
        }
    }
}

fn distinct<'a, I: Iterator<Item = &'a str>>(values: I) -> Vec<String> {
    let mut out: Vec<String> = values
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "null" && v != "undefined")
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Generation-counter debounce for free-text search: each keystroke starts a
/// new generation, and only the newest pending wait survives its sleep. The
/// browser build did the same with a reset-on-keystroke timer.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait out the debounce window. Returns `true` if no newer keystroke
    /// arrived in the meantime, i.e. the caller should commit the value.
    pub async fn settle(&self, window: Duration) -> bool {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(window).await;
        self.generation.load(Ordering::SeqCst) == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn job(country: &str, department: &str, level: &str) -> Job {
        Job {
            job_id: "X".to_string(),
            country: country.to_string(),
            department: department.to_string(),
            level: level.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_state_encodes_to_nothing() {
        assert!(FilterState::default().encode().is_empty());
    }

    #[test]
    fn test_all_and_empty_values_are_omitted() {
        let mut state = FilterState::default();
        state.set_country("Thailand");
        assert_eq!(
            state.encode(),
            vec![("country".to_string(), "Thailand".to_string())]
        );

        // Round-trip back to ALL removes the key entirely.
        state.set_country(ALL);
        assert!(state.encode().is_empty());
        state.set_country("");
        assert!(state.encode().is_empty());
    }

    #[test]
    fn test_page_one_is_implicit() {
        let mut state = FilterState::default();
        state.set_page(1);
        assert!(state.encode().is_empty());
        state.set_page(3);
        assert_eq!(state.encode(), vec![("page".to_string(), "3".to_string())]);
    }

    #[test]
    fn test_decode_round_trip() {
        let mut state = FilterState::default();
        state.set_q("engineer");
        state.set_department("Operations");
        state.set_page(2);

        let encoded = state.encode();
        let decoded = FilterState::decode(
            encoded
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_decode_ignores_junk() {
        let state = FilterState::decode(vec![("utm_source", "ads"), ("page", "banana")]);
        assert_eq!(state.page, 1);
        assert_eq!(state.country, ALL);
    }

    #[test]
    fn test_every_filter_change_resets_page() {
        let mut state = FilterState::default();
        state.set_page(4);

        state.set_country("Vietnam");
        assert_eq!(state.page, 1);

        state.set_page(4);
        state.set_department("Engineering and Technology");
        assert_eq!(state.page, 1);

        state.set_page(4);
        state.set_level("Senior");
        assert_eq!(state.page, 1);

        state.set_page(4);
        state.set_q("frontend");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_options_are_distinct_sorted_and_cleaned() {
        let jobs = vec![
            job("Thailand", "Operations", "Senior"),
            job("Vietnam", "Operations", "Entry Level"),
            job(" Thailand ", "null", ""),
        ];
        let options = FilterOptions::from_jobs(&jobs);
        assert_eq!(options.countries, vec!["Thailand", "Vietnam"]);
        assert_eq!(options.departments, vec!["Operations"]);
        assert_eq!(options.levels, vec!["Entry Level", "Senior"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_only_newest_commit_survives() {
        let debouncer = Arc::new(Debouncer::new());

        let first = {
            let d = debouncer.clone();
            tokio::spawn(async move { d.settle(SEARCH_DEBOUNCE).await })
        };
        // A "keystroke" shortly after invalidates the first wait.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = {
            let d = debouncer.clone();
            tokio::spawn(async move { d.settle(SEARCH_DEBOUNCE).await })
        };

        assert!(!first.await.unwrap());
        assert!(second.await.unwrap());
    }
}
