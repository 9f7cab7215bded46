//! Fixed yt-dlp command lines.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ytgrab_core::JobId;

/// Browser user agent sent with every download.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Best video plus best audio, falling back to the best single file.
pub const FORMAT: &str = "bestvideo+bestaudio/best";

/// Container merged streams are written to.
pub const MERGE_OUTPUT_FORMAT: &str = "mp4";

/// Arguments for the self-update check.
pub fn update_args() -> Vec<OsString> {
    vec!["-U".into(), "--no-check-certificates".into()]
}

/// Output template for a job: `<dir>/%(title)s-<job_id>.%(ext)s`.
///
/// The job id suffix is what lets the fallback scan find the file again.
pub fn output_template(download_dir: &Path, job_id: &JobId) -> PathBuf {
    download_dir.join(format!("%(title)s-{job_id}.%(ext)s"))
}

/// Arguments for downloading `url` on behalf of `job_id`.
///
/// The URL follows `--`, so a value starting with `-` is never taken as an
/// option.
pub fn download_args(download_dir: &Path, job_id: &JobId, url: &str) -> Vec<OsString> {
    vec![
        "--no-check-certificates".into(),
        "--no-mtime".into(),
        "--user-agent".into(),
        USER_AGENT.into(),
        "-f".into(),
        FORMAT.into(),
        "--merge-output-format".into(),
        MERGE_OUTPUT_FORMAT.into(),
        "-o".into(),
        output_template(download_dir, job_id).into_os_string(),
        "--".into(),
        url.into(),
    ]
}
