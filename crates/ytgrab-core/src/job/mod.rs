//! Job domain: identity, status machine and errors.

mod errors;
mod id;
mod types;

pub use errors::JobError;
pub use id::{JobId, JobIdGenerator};
pub use types::{Job, JobStatus, JobUpdate};
