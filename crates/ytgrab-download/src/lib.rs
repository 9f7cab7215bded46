//! Download execution for ytgrab.
//!
//! - `ytdlp` - yt-dlp command construction, output parsing and the process
//!   runner behind the [`MediaDownloader`] port
//! - `supervisor` - [`JobSupervisor`], which runs each job on a tracked,
//!   cancellable task and writes the outcome back into the job store

#![deny(unused_crate_dependencies)]

mod error;
mod supervisor;
pub mod ytdlp;

pub use error::DownloadError;
pub use supervisor::{JobSupervisor, SupervisorConfig};
pub use ytdlp::{DownloadedFile, MediaDownloader, YtDlpConfig, YtDlpDownloader};

#[cfg(test)]
use tempfile as _;
