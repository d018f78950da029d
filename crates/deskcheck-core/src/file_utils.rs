//! Bounded file reading
//!
//! Desktop entries are read as raw bytes: the validator itself reports
//! encoding problems, so nothing is decoded here. Symlinks are followed
//! (menu directories are full of them), but the final target must be a
//! regular file no larger than the configured limit.

use crate::diagnostics::{LintError, LintResult};
use std::fs;
use std::path::Path;

/// Default maximum file size (1 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Read a file, rejecting non-regular files and files over `max_size` bytes.
///
/// Files at exactly `max_size` bytes are accepted.
///
/// # Errors
///
/// Returns `LintError::FileNotRegular` for directories, FIFOs, sockets and devices.
/// Returns `LintError::FileTooBig` if the file exceeds the size limit.
/// Returns `LintError::FileRead` for other I/O errors.
pub fn safe_read_bytes_with_limit(path: &Path, max_size: u64) -> LintResult<Vec<u8>> {
    let metadata = fs::metadata(path).map_err(|e| LintError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !metadata.is_file() {
        return Err(LintError::FileNotRegular {
            path: path.to_path_buf(),
        });
    }

    let size = metadata.len();
    if size > max_size {
        return Err(LintError::FileTooBig {
            path: path.to_path_buf(),
            size,
            limit: max_size,
        });
    }

    fs::read(path).map_err(|e| LintError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}
