pub mod job;
pub mod response;

pub use job::{Job, JobStatus, Language};
pub use response::{JobsResponse, SubmitOutcome};
