//! Job launcher port.
//!
//! Decouples job submission from the component that actually runs the
//! download, so the service layer never spawns processes itself.

use crate::job::Job;

/// Port for starting background work for a newly created job.
///
/// `launch` must not block: implementations hand the job to a background
/// task and return immediately. The launched work reports progress by
/// calling [`JobStore::transition`](super::JobStore::transition).
pub trait JobLauncher: Send + Sync {
    /// Start processing `job`.
    fn launch(&self, job: &Job);
}

/// A launcher that does nothing, for tests and read-only contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLauncher;

impl NoopLauncher {
    /// Create a new no-op launcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl JobLauncher for NoopLauncher {
    fn launch(&self, _job: &Job) {}
}
