// src/listing.rs
//! Job listing session: filter state, the loaded job list, and derived
//! pagination, with stale-response guarding.
//!
//! The browser build guarded each fetch effect with an `alive` flag checked
//! before committing state; here that is an explicit generation counter. A
//! refresh whose inputs changed mid-flight finds its token stale and
//! discards the result instead of overwriting fresher data. In-flight
//! requests themselves are not aborted, only result application is guarded.

use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::{JobQuery, JobsClient};
use crate::filters::{FilterOptions, FilterState};
use crate::paging::{self, PageItem};
use crate::types::{Job, Language};

/// Monotonic generation counter for async result application.
#[derive(Debug, Default)]
pub struct Epoch(AtomicU64);

impl Epoch {
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

/// Loading state drives which of the three surfaces renders: skeleton
/// placeholders, the job list (possibly with a distinct "no jobs" message),
/// or a page-level error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

pub struct ListingSession {
    pub lang: Language,
    pub filters: FilterState,
    jobs: Vec<Job>,
    total: usize,
    state: LoadState,
    epoch: Epoch,
}

impl ListingSession {
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            filters: FilterState::default(),
            jobs: Vec::new(),
            total: 0,
            state: LoadState::Loading,
            epoch: Epoch::default(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// True once a fetch succeeded with zero results; distinct from the
    /// failed state.
    pub fn is_empty(&self) -> bool {
        self.state == LoadState::Loaded && self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn total_count(&self) -> usize {
        if self.total > 0 {
            self.total
        } else {
            self.jobs.len()
        }
    }

    /// Selectable filter values derived from the loaded list, never from
    /// static configuration.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_jobs(&self.jobs)
    }

    pub fn total_pages(&self) -> u32 {
        paging::total_pages(self.total_count())
    }

    /// The effective page, clamped into range. When this differs from the
    /// stored filter state the caller should rewrite the persisted state
    /// (replace, not push).
    pub fn current_page(&self) -> u32 {
        paging::clamp_page(self.filters.page, self.total_pages())
    }

    pub fn page_jobs(&self) -> &[Job] {
        paging::page_slice(&self.jobs, self.current_page())
    }

    pub fn pagination_items(&self) -> Vec<PageItem> {
        paging::pagination_items(self.current_page(), self.total_pages())
    }

    /// Fetch the listing for the current filters and apply the result if no
    /// newer refresh started in the meantime. An error banner from a
    /// previous attempt is cleared implicitly by the next success.
    pub async fn refresh(&mut self, client: &JobsClient) -> Result<()> {
        let token = self.epoch.begin();
        self.state = LoadState::Loading;

        let query = JobQuery::from_filters(self.lang, &self.filters);
        let result = client.list_jobs(&query).await;

        if !self.epoch.is_current(token) {
            // A newer refresh owns the session now; drop this result.
            return Ok(());
        }

        match result {
            Ok(response) => {
                self.jobs = response.jobs;
                self.total = response.total;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                self.jobs.clear();
                self.total = 0;
                self.state = LoadState::Failed(e.to_string());
            }
        }
        Ok(())
    }

    /// Apply an already-fetched result under a caller-held token. Used when
    /// the fetch runs detached from `&mut self`.
    pub fn apply_if_current(&mut self, token: u64, result: Result<crate::types::JobsResponse>) {
        if !self.epoch.is_current(token) {
            return;
        }
        match result {
            Ok(response) => {
                self.jobs = response.jobs;
                self.total = response.total;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                self.jobs.clear();
                self.total = 0;
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.state = LoadState::Loading;
        self.epoch.begin()
    }
}
