//! Job worker pipeline.
//!
//! The worker operates on a `WorkerJob` value and cloned `WorkerDeps`, with
//! no access back to the supervisor. Cancellation and the timeout are
//! applied with `tokio::select!` around the downloader future; dropping that
//! future kills the yt-dlp child.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use ytgrab_core::{JobId, JobStore, JobUpdate};

use crate::error::DownloadError;
use crate::ytdlp::{DownloadedFile, MediaDownloader};

/// Dependencies shared by all workers.
#[derive(Clone)]
pub(super) struct WorkerDeps {
    pub store: Arc<dyn JobStore>,
    pub downloader: Arc<dyn MediaDownloader>,
    pub permits: Option<Arc<Semaphore>>,
    pub timeout: Option<Duration>,
}

/// A job handed to a worker.
pub(super) struct WorkerJob {
    pub id: JobId,
    pub url: String,
    pub cancel: CancellationToken,
}

/// Run one job to a terminal status.
///
/// A job cancelled before it started (including while waiting for a permit)
/// is left `Initializing`.
pub(super) async fn run_job(job: WorkerJob, deps: WorkerDeps) {
    let Some(_permit) = acquire_permit(&job, deps.permits.as_ref()).await else {
        debug!(target: "ytgrab.jobs", job_id = %job.id, "Job cancelled before start");
        return;
    };

    if let Err(e) = deps.store.transition(&job.id, JobUpdate::Processing).await {
        error!(target: "ytgrab.jobs", job_id = %job.id, error = %e, "Cannot start job");
        return;
    }
    info!(target: "ytgrab.jobs", job_id = %job.id, url = %job.url, "Job processing");

    let update = match execute(&job, &deps).await {
        Ok(file) => {
            info!(target: "ytgrab.jobs", job_id = %job.id, file = %file.filename, "Job complete");
            JobUpdate::Complete {
                filename: file.filename,
                filepath: file.filepath,
            }
        }
        Err(e) => {
            warn!(target: "ytgrab.jobs", job_id = %job.id, error = %e, "Job failed");
            JobUpdate::failed(e.job_message())
        }
    };

    if let Err(e) = deps.store.transition(&job.id, update).await {
        error!(target: "ytgrab.jobs", job_id = %job.id, error = %e, "Cannot record job result");
    }
}

/// `Some` once the job may run (holding a permit when a limit is set),
/// `None` if it was cancelled first.
async fn acquire_permit(
    job: &WorkerJob,
    permits: Option<&Arc<Semaphore>>,
) -> Option<Option<OwnedSemaphorePermit>> {
    if job.cancel.is_cancelled() {
        return None;
    }
    let Some(semaphore) = permits else {
        return Some(None);
    };

    tokio::select! {
        biased;
        () = job.cancel.cancelled() => None,
        permit = Arc::clone(semaphore).acquire_owned() => permit.ok().map(Some),
    }
}

async fn execute(job: &WorkerJob, deps: &WorkerDeps) -> Result<DownloadedFile, DownloadError> {
    let attempt = async {
        if let Err(e) = deps.downloader.update().await {
            warn!(
                target: "ytgrab.download",
                job_id = %job.id,
                error = %e,
                "Update check failed, continuing"
            );
        }
        deps.downloader.download(&job.id, &job.url).await
    };

    let bounded = async {
        match deps.timeout {
            Some(limit) => tokio::time::timeout(limit, attempt)
                .await
                .unwrap_or_else(|_elapsed| Err(DownloadError::TimedOut(limit))),
            None => attempt.await,
        }
    };

    tokio::select! {
        biased;
        () = job.cancel.cancelled() => Err(DownloadError::Cancelled),
        result = bounded => result,
    }
}
