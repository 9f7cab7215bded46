//! Locating the file yt-dlp produced.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::SystemTime;

use regex::Regex;
use ytgrab_core::JobId;

use crate::error::DownloadError;

/// Substrings that mark a stdout line as announcing an output path.
const MARKERS: [&str; 4] = [
    "Destination",
    "Writing video to",
    "Merging formats into",
    "has already been downloaded",
];

/// Extensions of files yt-dlp leaves behind while a download is in flight.
const PARTIAL_EXTENSIONS: [&str; 3] = ["part", "ytdl", "temp"];

// `[download] Destination: /d/a.mp4`, `Writing video to: "/d/a.mp4"`
static LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:Destination|Writing video to):\s*["']?(.+?)["']?\s*$"#)
        .expect("destination pattern is valid")
});

// `[Merger] Merging formats into "/d/a.mp4"`
static MERGED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Merging formats into:?\s*["']?(.+?)["']?\s*$"#)
        .expect("destination pattern is valid")
});

// `[download] /d/a.mp4 has already been downloaded`
static ALREADY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:\[[^\]]*\]\s*)?["']?(.+?)["']?\s+has already been downloaded"#)
        .expect("destination pattern is valid")
});

/// Extract the final output path from yt-dlp's stdout.
///
/// The last marker line that yields a path wins, since yt-dlp announces
/// intermediate format files before the merged result. Marker words can also
/// appear inside titles on unrelated lines, so lines that mention a marker
/// but hold no path are skipped. Returns `Ok(None)` when no line carries a
/// marker and `UnparseableDestination` when none of the marker lines holds a
/// path.
pub fn parse_destination(stdout: &str) -> Result<Option<PathBuf>, DownloadError> {
    let mut saw_marker = false;
    for line in stdout.lines().rev() {
        if !MARKERS.iter().any(|marker| line.contains(marker)) {
            continue;
        }
        saw_marker = true;
        if let Some(path) = extract_path(line) {
            return Ok(Some(path));
        }
    }

    if saw_marker {
        Err(DownloadError::UnparseableDestination)
    } else {
        Ok(None)
    }
}

fn extract_path(line: &str) -> Option<PathBuf> {
    [&*LABELLED, &*MERGED, &*ALREADY]
        .iter()
        .find_map(|re| re.captures(line.trim()))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Find the finished output of `job_id` in `dir` by its template suffix.
///
/// Matches `<anything>-<job_id>.<ext>` with a single extension, so format
/// intermediates (`x-1.f137.mp4`) and partial files (`x-1.mp4.part`,
/// `x-1.part`) are skipped. If several files match, the most recently
/// modified one is returned.
pub async fn find_output_file(dir: &Path, job_id: &JobId) -> io::Result<Option<PathBuf>> {
    let suffix = format!("-{job_id}.");
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut best: Option<(SystemTime, PathBuf)> = None;

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_job_output(name, &suffix) {
            continue;
        }

        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        if best.as_ref().is_none_or(|(seen, _)| modified > *seen) {
            best = Some((modified, entry.path()));
        }
    }

    Ok(best.map(|(_, path)| path))
}

fn is_job_output(name: &str, suffix: &str) -> bool {
    let Some(pos) = name.rfind(suffix) else {
        return false;
    };
    let ext = &name[pos + suffix.len()..];
    !ext.is_empty() && !ext.contains('.') && !PARTIAL_EXTENSIONS.contains(&ext)
}
