// src/api.rs
//! HTTP client for the careers backend, with an in-memory mock fallback.
//!
//! Listing/detail failures abort a page render, so they surface as errors.
//! Submission failure is a normal branch of the form's result state, so it
//! comes back as `SubmitOutcome { ok: false, .. }` instead.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::filters::{FilterState, ALL};
use crate::form::ApplicationPayload;
use crate::mock::mock_jobs;
use crate::normalize::{normalize_job_detail, normalize_jobs_response};
use crate::types::{Job, JobStatus, JobsResponse, Language, SubmitOutcome};

/// Simulated network latency for mock-mode submissions.
const MOCK_SUBMIT_DELAY: Duration = Duration::from_millis(600);

/// How much raw body text an error message may carry.
const ERROR_SNIPPET_LEN: usize = 200;

/// Query parameters for a listing request.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub lang: Language,
    pub q: String,
    pub country: String,
    pub department: String,
    pub level: String,
}

impl JobQuery {
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            q: String::new(),
            country: ALL.to_string(),
            department: ALL.to_string(),
            level: ALL.to_string(),
        }
    }

    pub fn from_filters(lang: Language, filters: &FilterState) -> Self {
        Self {
            lang,
            q: filters.q.clone(),
            country: filters.country.clone(),
            department: filters.department.clone(),
            level: filters.level.clone(),
        }
    }

    fn constraint(value: &str) -> Option<&str> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Wire query pairs; empty/`ALL` values are omitted entirely.
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("lang", self.lang.code().to_string())];
        if let Some(q) = Self::constraint(&self.q) {
            pairs.push(("q", q.to_string()));
        }
        if let Some(v) = Self::constraint(&self.country) {
            pairs.push(("country", v.to_string()));
        }
        if let Some(v) = Self::constraint(&self.department) {
            pairs.push(("department", v.to_string()));
        }
        if let Some(v) = Self::constraint(&self.level) {
            pairs.push(("level", v.to_string()));
        }
        pairs
    }

    /// Mock-mode predicate: published only, exact facet matches, then a
    /// case-insensitive substring match over the searchable text.
    pub fn matches(&self, job: &Job) -> bool {
        if job.status != JobStatus::Published {
            return false;
        }
        for (want, have) in [
            (&self.country, &job.country),
            (&self.department, &job.department),
            (&self.level, &job.level),
        ] {
            if let Some(want) = Self::constraint(want) {
                if want != have {
                    return false;
                }
            }
        }
        match Self::constraint(&self.q) {
            None => true,
            Some(q) => {
                let haystack = format!(
                    "{} {} {} {}",
                    job.title, job.department, job.level, job.location
                )
                .to_lowercase();
                haystack.contains(&q.to_lowercase())
            }
        }
    }
}

pub struct JobsClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl JobsClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        if config.is_mock() {
            info!("no API base configured, serving from mock dataset");
        }

        Ok(Self {
            client,
            base_url: config.api_base.clone(),
        })
    }

    pub fn is_mock(&self) -> bool {
        self.base_url.is_none()
    }

    /// List jobs matching the query.
    pub async fn list_jobs(&self, query: &JobQuery) -> Result<JobsResponse> {
        let base = match &self.base_url {
            None => {
                let jobs: Vec<Job> = mock_jobs().into_iter().filter(|j| query.matches(j)).collect();
                return Ok(JobsResponse {
                    total: jobs.len(),
                    jobs,
                    version: None,
                });
            }
            Some(base) => base,
        };

        let url = format!("{base}/jobs");
        debug!("GET {} {:?}", url, query.to_pairs());

        let response = self
            .client
            .get(&url)
            .query(&query.to_pairs())
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to reach jobs endpoint")?;

        let status = response.status();
        let (data, text) = read_body(response).await;

        if !status.is_success() {
            warn!("jobs listing failed: {} {}", status, snippet(&text));
            anyhow::bail!(
                "{}",
                body_message(data.as_ref()).unwrap_or_else(|| format!(
                    "Failed to load jobs: {} {}",
                    status.as_u16(),
                    snippet(&text)
                ))
            );
        }

        Ok(normalize_jobs_response(&data.unwrap_or(Value::Null)))
    }

    /// Fetch one job. `Ok(None)` is the defined "not found" result and maps
    /// straight from an HTTP 404.
    pub async fn get_job(&self, job_id: &str, lang: Language) -> Result<Option<Job>> {
        let base = match &self.base_url {
            None => return Ok(mock_jobs().into_iter().find(|j| j.job_id == job_id)),
            Some(base) => base,
        };

        let url = format!("{base}/jobs/{job_id}");
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("lang", lang.code())])
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to reach job detail endpoint")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        let (data, text) = read_body(response).await;

        if !status.is_success() {
            warn!("job detail failed: {} {}", status, snippet(&text));
            anyhow::bail!(
                "{}",
                body_message(data.as_ref()).unwrap_or_else(|| format!(
                    "Failed to load job: {} {}",
                    status.as_u16(),
                    snippet(&text)
                ))
            );
        }

        Ok(normalize_job_detail(&data.unwrap_or(Value::Null)))
    }

    /// Submit an application as multipart form data. HTTP failure is
    /// recovered into a failed outcome; only transport-level breakage (the
    /// request never completing) is an `Err`.
    pub async fn submit_application(
        &self,
        job_id: &str,
        payload: ApplicationPayload,
    ) -> Result<SubmitOutcome> {
        let base = match &self.base_url {
            None => {
                // Mock mode never validates server-side; it just takes a beat.
                tokio::time::sleep(MOCK_SUBMIT_DELAY).await;
                info!("mock submission accepted for {}", job_id);
                return Ok(SubmitOutcome::success());
            }
            Some(base) => base,
        };

        let url = format!("{base}/apply/{job_id}");
        info!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(payload.into_form())
            .send()
            .await
            .context("Failed to reach apply endpoint")?;

        let status = response.status();
        let (data, text) = read_body(response).await;

        if !status.is_success() {
            let message = body_message(data.as_ref())
                .or_else(|| {
                    let t = text.trim();
                    (!t.is_empty()).then(|| t.to_string())
                })
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            warn!("submission rejected: {}", message);
            return Ok(SubmitOutcome::failure(message));
        }

        match data {
            Some(body) if body.is_object() => {
                Ok(serde_json::from_value(body).unwrap_or_else(|_| SubmitOutcome::success()))
            }
            _ => Ok(SubmitOutcome::success()),
        }
    }
}

/// Read the body as text, then parse defensively. A non-JSON body is not an
/// error at this stage; it just means error messages fall back to raw text.
async fn read_body(response: reqwest::Response) -> (Option<Value>, String) {
    let text = response.text().await.unwrap_or_default();
    let data = serde_json::from_str(&text).ok();
    (data, text)
}

/// Most specific message a backend error body carries: `detail`, then
/// `message`.
fn body_message(data: Option<&Value>) -> Option<String> {
    let data = data?;
    for key in ["detail", "message"] {
        if let Some(msg) = data.get(key).and_then(Value::as_str) {
            if !msg.trim().is_empty() {
                return Some(msg.to_string());
            }
        }
    }
    None
}

fn snippet(text: &str) -> &str {
    if text.len() <= ERROR_SNIPPET_LEN {
        return text;
    }
    let mut end = ERROR_SNIPPET_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
