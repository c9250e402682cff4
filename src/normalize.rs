// src/normalize.rs
//! Absorbs backend response-shape skew at the boundary.
//!
//! The jobs backend evolved from `{ jobs, total }` to `{ ok, version, rows,
//! total }`, and the detail endpoint from a bare job object to `{ ok, job }`.
//! Everything downstream sees only the canonical [`JobsResponse`] / [`Job`]
//! model; these functions never fail, they degrade to empty results.

use serde_json::Value;

use crate::types::{Job, JobsResponse};

/// Normalize a parsed list payload into the canonical response.
///
/// Rows missing a non-blank `job_id` are dropped. For the `rows` shape the
/// total is always the post-filter row count; the server-declared `total` is
/// only trusted for the legacy `jobs` shape. Unrecognized payloads yield an
/// empty response.
pub fn normalize_jobs_response(data: &Value) -> JobsResponse {
    // Current backend: { ok, version, rows, total }
    if let Some(rows) = data.get("rows").and_then(Value::as_array) {
        let jobs = decode_rows(rows);
        return JobsResponse {
            total: jobs.len(),
            jobs,
            version: version_of(data),
        };
    }

    // Legacy/demo: { jobs, total }
    if let Some(rows) = data.get("jobs").and_then(Value::as_array) {
        let jobs = decode_rows(rows);
        let total = data
            .get("total")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(jobs.len());
        return JobsResponse {
            jobs,
            total,
            version: version_of(data),
        };
    }

    JobsResponse::default()
}

/// Normalize a parsed detail payload. `None` means "not found" and is
/// rendered the same way as an HTTP 404.
pub fn normalize_job_detail(data: &Value) -> Option<Job> {
    // Current backend: { ok, job: {...} }
    if let Some(inner) = data.get("job") {
        if inner.is_object() {
            return decode_row(inner);
        }
    }
    // Legacy: the job object itself
    decode_row(data)
}

fn decode_rows(rows: &[Value]) -> Vec<Job> {
    rows.iter().filter_map(decode_row).collect()
}

/// Decode one row, requiring a non-blank `job_id`. Rows that fail the typed
/// decode are dropped rather than propagated.
fn decode_row(row: &Value) -> Option<Job> {
    if !row.is_object() {
        return None;
    }
    let id_ok = row
        .get("job_id")
        .and_then(Value::as_str)
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false);
    if !id_ok {
        return None;
    }
    serde_json::from_value(row.clone()).ok()
}

fn version_of(data: &Value) -> Option<String> {
    data.get("version")
        .and_then(Value::as_str)
        .map(str::to_string)
}
