//! Core domain for ytgrab.
//!
//! Holds the job model, the ports adapters implement (`JobStore`,
//! `JobLauncher`), the in-memory store and the `JobService` facade used by
//! the HTTP layer. Nothing in here spawns processes or binds sockets.

#![deny(unused_crate_dependencies)]

pub mod job;
pub mod paths;
pub mod ports;
pub mod services;
pub mod store;

// Re-export commonly used types for convenience
pub use job::{Job, JobError, JobId, JobIdGenerator, JobStatus, JobUpdate};
pub use paths::{PathError, ensure_download_dir};
pub use ports::{JobLauncher, JobStore, NoopLauncher};
pub use services::JobService;
pub use store::InMemoryJobStore;

#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
