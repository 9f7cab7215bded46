//! Core services.
//!
//! Services orchestrate between ports and the job domain. They do not know
//! about concrete store or launcher implementations.

mod job_service;

pub use job_service::JobService;
