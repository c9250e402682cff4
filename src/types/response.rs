// src/types/response.rs
use serde::{Deserialize, Serialize};

use crate::types::job::Job;

/// Canonical list response every backend shape is normalized into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Result of an application submission. A failed submission is a normal
/// value (`ok: false`), not an error: the form stays editable and shows the
/// message inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

impl SubmitOutcome {
    pub fn success() -> Self {
        Self {
            ok: true,
            message: None,
            application_id: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            application_id: None,
        }
    }
}
