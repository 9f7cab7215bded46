//! yt-dlp process runner.

use std::ffi::OsString;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};
use ytgrab_core::JobId;

use super::args::{download_args, update_args};
use super::output::{find_output_file, parse_destination};
use super::{DownloadedFile, MediaDownloader, YtDlpConfig};
use crate::error::DownloadError;

/// Runs the real yt-dlp binary.
///
/// Each call spawns a fresh process with `kill_on_drop`, so dropping the
/// returned future (cancellation, timeout) also kills the child.
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    config: YtDlpConfig,
}

impl YtDlpDownloader {
    pub const fn new(config: YtDlpConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &YtDlpConfig {
        &self.config
    }

    async fn run(&self, args: Vec<OsString>) -> Result<Output, DownloadError> {
        debug!(
            target: "ytgrab.download",
            program = %self.config.program.display(),
            ?args,
            "Spawning yt-dlp"
        );
        Command::new(&self.config.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| DownloadError::Spawn {
                program: self.config.program.display().to_string(),
                source,
            })
    }
}

#[async_trait]
impl MediaDownloader for YtDlpDownloader {
    async fn update(&self) -> Result<(), DownloadError> {
        if self.config.skip_update {
            debug!(target: "ytgrab.download", "Skipping yt-dlp update check");
            return Ok(());
        }

        let output = self
            .run(update_args())
            .await
            .map_err(|e| DownloadError::UpdateFailed(e.to_string()))?;
        if !output.status.success() {
            return Err(DownloadError::UpdateFailed(stderr_text(&output)));
        }
        debug!(target: "ytgrab.download", "yt-dlp update check finished");
        Ok(())
    }

    async fn download(&self, job_id: &JobId, url: &str) -> Result<DownloadedFile, DownloadError> {
        let dir = self.config.download_dir();
        let output = self.run(download_args(dir, job_id, url)).await?;

        if !output.status.success() {
            return Err(DownloadError::ProcessFailed {
                code: output.status.code(),
                stderr: stderr_text(&output),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = match parse_destination(&stdout)? {
            Some(path) => path,
            None => {
                warn!(
                    target: "ytgrab.download",
                    job_id = %job_id,
                    "No destination in yt-dlp output, scanning download directory"
                );
                find_output_file(dir, job_id)
                    .await?
                    .ok_or(DownloadError::MissingDestination)?
            }
        };
        // Relative paths are relative to the directory yt-dlp was told to use.
        let path = if path.is_relative() { dir.join(path) } else { path };

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(DownloadError::FileNotFound(path));
        }

        info!(
            target: "ytgrab.download",
            job_id = %job_id,
            path = %path.display(),
            "Download finished"
        );
        Ok(DownloadedFile::from_path(path))
    }
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim_end().to_string()
}
