//! yt-dlp integration.
//!
//! Splits the work the same way every invocation flows:
//! - `args` builds the fixed command lines
//! - `output` turns yt-dlp's stdout (or the download directory) into a path
//! - `runner` spawns the process and ties the two together

mod args;
mod output;
mod runner;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ytgrab_core::JobId;

use crate::error::DownloadError;

pub use args::{
    FORMAT, MERGE_OUTPUT_FORMAT, USER_AGENT, download_args, output_template, update_args,
};
pub use output::{find_output_file, parse_destination};
pub use runner::YtDlpDownloader;

/// A file produced by a finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Base name of the file.
    pub filename: String,
    /// Absolute path of the file.
    pub filepath: PathBuf,
}

impl DownloadedFile {
    /// Build from a path, taking the base name from its last component.
    pub fn from_path(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            filename,
            filepath: path,
        }
    }
}

/// Port for the external media downloader.
///
/// The supervisor owns cancellation and timeouts: it simply drops the
/// `download` future, so implementations must release their process when
/// dropped.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// Ask the tool to update itself.
    async fn update(&self) -> Result<(), DownloadError>;

    /// Download `url` for `job_id` and return the resulting file.
    async fn download(&self, job_id: &JobId, url: &str) -> Result<DownloadedFile, DownloadError>;
}

/// Configuration for [`YtDlpDownloader`].
#[derive(Debug, Clone)]
pub struct YtDlpConfig {
    /// Program to execute, looked up on `PATH` when not absolute.
    pub program: PathBuf,
    /// Directory job outputs are written to.
    pub download_dir: PathBuf,
    /// Skip the `-U` self-update before each download.
    pub skip_update: bool,
}

impl YtDlpConfig {
    /// Default program name.
    pub const DEFAULT_PROGRAM: &'static str = "yt-dlp";

    /// Config writing into `download_dir` with default settings.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from(Self::DEFAULT_PROGRAM),
            download_dir: download_dir.into(),
            skip_update: false,
        }
    }

    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub const fn with_skip_update(mut self, skip: bool) -> Self {
        self.skip_update = skip;
        self
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }
}
