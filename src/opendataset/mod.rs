//! Opendataset loaders
//!
//! Each loader converts one third-party dataset's on-disk layout (images
//! plus annotation text files) into the in-memory [`Dataset`] model. Loaders
//! are one-shot, single-threaded conversion utilities: any missing or
//! malformed input aborts the load with a typed error.
//!
//! [`Dataset`]: crate::dataset::Dataset

pub mod uavdt;

use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::LoaderError;

/// Map an IO error to a loader error carrying the offending path
pub(crate) fn io_error(path: &Path, source: std::io::Error) -> LoaderError {
    LoaderError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Subdirectories of `dir`, sorted by name.
///
/// Sorting is load-bearing: each subdirectory becomes one segment and the
/// segment append order must not depend on filesystem iteration order.
pub(crate) fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>, LoaderError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| io_error(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Files in `dir` with the given extension, sorted by name.
pub(crate) fn sorted_files_with_extension(
    dir: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, LoaderError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| io_error(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case(extension))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Extract a numeric frame id from a file name: the first digit run that
/// does not start with `0` (so `img000123.jpg` yields 123).
pub(crate) fn extract_frame_id(file_name: &str) -> Option<u64> {
    let bytes = file_name.as_bytes();
    let start = bytes.iter().position(|b| (b'1'..=b'9').contains(b))?;
    let digits: String = file_name[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
