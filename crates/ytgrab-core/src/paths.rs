//! Download directory resolution.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while preparing the download directory.
#[derive(Debug, Error)]
pub enum PathError {
    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// A directory is not writable.
    #[error("Directory {path} is not writable: {reason}")]
    NotWritable { path: PathBuf, reason: String },

    /// The path could not be made absolute.
    #[error("Cannot resolve {path}: {reason}")]
    Unresolvable { path: PathBuf, reason: String },
}

/// Create `path` (and parents) if missing, check it is writable and return
/// its absolute form.
///
/// Job output paths are derived from this directory, so it must be absolute
/// for the paths stored on completed jobs to stay valid regardless of the
/// working directory.
pub fn ensure_download_dir(path: &Path) -> Result<PathBuf, PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
    } else {
        fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    verify_writable(path)?;

    fs::canonicalize(path).map_err(|e| PathError::Unresolvable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn verify_writable(path: &Path) -> Result<(), PathError> {
    let probe = path.join(".ytgrab_write_test");
    let not_writable = |e: std::io::Error| PathError::NotWritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe)
        .map_err(not_writable)?;
    file.write_all(b"test").map_err(not_writable)?;
    drop(file);
    let _ = fs::remove_file(&probe);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_directory() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("nested").join("downloads");

        let resolved = ensure_download_dir(&target).unwrap();

        assert!(target.is_dir());
        assert!(resolved.is_absolute());
        assert!(!resolved.join(".ytgrab_write_test").exists());
    }

    #[test]
    fn existing_directory_is_kept() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("keep.mp4"), b"x").unwrap();

        let resolved = ensure_download_dir(temp.path()).unwrap();

        assert!(resolved.join("keep.mp4").exists());
    }

    #[test]
    fn file_in_the_way_is_rejected() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("downloads");
        fs::write(&file, b"not a dir").unwrap();

        let err = ensure_download_dir(&file).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(p) if p == file));
    }
}
