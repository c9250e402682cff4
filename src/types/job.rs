// src/types/job.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Th,
    En,
    Zh,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Th => "th",
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    /// Unknown codes fall back to English rather than failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "th" | "th-th" => Language::Th,
            "zh" | "zh-cn" | "zh-tw" => Language::Zh,
            _ => Language::En,
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Published,
    Draft,
    Closed,
    /// The upstream feed occasionally grows new statuses; never reject them.
    #[serde(other)]
    Unknown,
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Unknown
    }
}

/// Canonical job record. The upstream feed is duck-typed, so every display
/// field defaults to empty rather than failing the whole row; `job_id`
/// presence is enforced by the normalizer, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub qualifications: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,

    /// Headcount; the feed sends this as a number or a string.
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub status: JobStatus,
}

impl Job {
    /// Open headcount for display; 0 means a plain "hiring" badge.
    pub fn headcount(&self) -> u32 {
        self.quantity.unwrap_or(0)
    }
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    let parsed = match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Num(n)) if n.is_finite() && n >= 0.0 => Some(n as u32),
        Some(Raw::Num(_)) => None,
        Some(Raw::Text(s)) => s.trim().parse::<u32>().ok(),
    };
    Ok(parsed)
}
