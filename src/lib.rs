//! Client-side core of the careers site: canonical job model, backend
//! response normalization, the jobs HTTP client with its in-memory mock
//! fallback, shareable filter/pagination state, and the application form
//! controller.

pub mod api;
pub mod config;
pub mod filters;
pub mod form;
pub mod listing;
pub mod mock;
pub mod normalize;
pub mod paging;
pub mod prefs;
pub mod types;

pub use api::{JobQuery, JobsClient};
pub use config::ClientConfig;
pub use filters::{FilterOptions, FilterState};
pub use form::{ApplicationForm, FormPhase, FormSession};
pub use listing::ListingSession;
pub use types::{Job, JobStatus, JobsResponse, Language, SubmitOutcome};
