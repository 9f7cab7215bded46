//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the job domain expects from infrastructure.
//! They use only domain types: no process handles, no HTTP types.

pub mod job_launcher;
pub mod job_store;

pub use job_launcher::{JobLauncher, NoopLauncher};
pub use job_store::JobStore;
