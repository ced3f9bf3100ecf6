//! File deletion for redundant duplicates.
//!
//! # Overview
//!
//! This module removes the files a search marked for removal:
//! - Permanent deletion (default)
//! - Move to system trash (opt-in, recoverable)
//! - Batch operations that never stop on a per-file failure
//!
//! # Safety
//!
//! Only the removals of a [`ResolvedGroup`] are ever handed to deletion; the
//! kept copy of each group is never part of a batch built by [`removal_paths`].
//!
//! # Example
//!
//! ```no_run
//! use deduplicate::actions::delete::{delete_path, DeleteMethod};
//! use std::path::Path;
//!
//! match delete_path(Path::new("/path/to/duplicate.txt"), DeleteMethod::Permanent) {
//!     Ok(result) => println!("Deleted: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::ResolvedGroup;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// Permanent delete operation failed.
    #[error("permanent delete failed for {path}: {message}")]
    PermanentDeleteFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::PermanentDeleteFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_metadata(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// How a file is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMethod {
    /// Remove the file outright.
    #[default]
    Permanent,
    /// Move the file to the system trash.
    Trash,
}

impl DeleteMethod {
    /// Pick the method from a "use trash" preference.
    #[must_use]
    pub fn from_use_trash(use_trash: bool) -> Self {
        if use_trash {
            Self::Trash
        } else {
            Self::Permanent
        }
    }
}

/// Result of a successful deletion operation.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// Whether deletion was permanent (true) or to trash (false).
    pub permanent: bool,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, permanent: bool) -> Self {
        Self {
            path,
            size,
            permanent,
        }
    }
}

/// Results of a batch deletion operation.
#[derive(Debug, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions, in the order they were attempted.
    pub failures: Vec<DeleteError>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Deleted {} file(s), freed {} bytes",
                self.success_count(),
                self.bytes_freed
            )
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {} bytes",
                self.success_count(),
                self.failure_count(),
                self.bytes_freed
            )
        }
    }
}

/// Delete a single file to the system trash.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if the file can't be inspected
/// - `TrashFailed` if the trash operation fails
pub fn delete_to_trash(path: &Path) -> Result<DeleteResult, DeleteError> {
    // Get file size before deletion
    let size = fs::symlink_metadata(path)
        .map_err(|e| DeleteError::from_metadata(path, e))?
        .len();

    // Move to trash
    trash::delete(path).map_err(|e| {
        log::error!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Moved to trash: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size, false))
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if the file can't be inspected
/// - `PermanentDeleteFailed` if the remove operation fails
///
/// # Example
///
/// ```no_run
/// use deduplicate::actions::delete::permanent_delete;
/// use std::path::Path;
///
/// match permanent_delete(Path::new("/path/to/file.txt")) {
///     Ok(result) => println!("Permanently deleted: {}", result.path.display()),
///     Err(e) => eprintln!("Failed: {}", e),
/// }
/// ```
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    // Symlinks are removed as links, never resolved
    let size = fs::symlink_metadata(path)
        .map_err(|e| DeleteError::from_metadata(path, e))?
        .len();

    // Permanently delete
    fs::remove_file(path).map_err(|e| {
        log::error!("Permanent delete failed for {}: {}", path.display(), e);
        DeleteError::PermanentDeleteFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Permanently deleted: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size, true))
}

/// Delete one file with the given method.
///
/// # Errors
///
/// Any error from [`permanent_delete`] or [`delete_to_trash`].
pub fn delete_path(path: &Path, method: DeleteMethod) -> Result<DeleteResult, DeleteError> {
    match method {
        DeleteMethod::Permanent => permanent_delete(path),
        DeleteMethod::Trash => delete_to_trash(path),
    }
}

/// Delete multiple files in batch.
///
/// Every path is attempted; a failure is recorded and the batch moves on.
///
/// # Example
///
/// ```no_run
/// use deduplicate::actions::delete::{delete_batch, DeleteMethod};
/// use std::path::PathBuf;
///
/// let paths = vec![PathBuf::from("/dup1.txt"), PathBuf::from("/dup2.txt")];
/// let result = delete_batch(&paths, DeleteMethod::Permanent);
/// println!("{}", result.summary());
/// ```
pub fn delete_batch(paths: &[PathBuf], method: DeleteMethod) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for path in paths {
        match delete_path(path, method) {
            Ok(deleted) => {
                result.bytes_freed += deleted.size;
                result.successes.push(deleted);
            }
            Err(e) => {
                // Record and keep going; the remaining removals are independent
                log::warn!("Failed to delete {}: {}", path.display(), e);
                result.failures.push(e);
            }
        }
    }

    // Completion summary
    log::info!("{}", result.summary());

    result
}

/// Every removal across `groups`, in report order.
///
/// The kept member of each group is never included.
#[must_use]
pub fn removal_paths(groups: &[ResolvedGroup]) -> Vec<PathBuf> {
    groups
        .iter()
        .flat_map(|group| group.removals().iter().map(PathBuf::from))
        .collect()
}
