//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, the traversal collaborator of
//! the duplicate search. It yields a lazy, finite sequence of [`WalkEntry`]
//! values rooted at one directory.
//!
//! # Features
//!
//! - Children visited in file-name order, so discovery order is deterministic
//! - Symbolic links are reported but never followed
//! - Errors carry the path that failed and do not stop iteration
//! - Graceful shutdown via atomic flag
//!
//! # Example
//!
//! ```no_run
//! use deduplicate::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"));
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(entry) if entry.is_regular_file => println!("{}", entry.path.display()),
//!         Ok(_) => {}
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{ScanError, WalkEntry};

/// Directory walker for sequential file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            root: path.to_path_buf(),
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker stops yielding entries.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    fn walk_dir(&self) -> WalkDir {
        WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
    }

    /// Walk the directory tree, yielding every entry below the root.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration; a directory that cannot be read simply contributes no
    /// children.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkEntry, ScanError>> + '_ {
        self.walk_dir()
            .into_iter()
            .take_while(move |_| {
                if self.is_shutdown_requested() {
                    log::debug!("Walker: Shutdown requested, stopping iteration");
                    false
                } else {
                    true
                }
            })
            .map(move |entry_result| match entry_result {
                Ok(entry) => {
                    let is_regular_file = entry.file_type().is_file();
                    if entry.path_is_symlink() {
                        log::trace!("Not following symlink: {}", entry.path().display());
                    }
                    Ok(WalkEntry::new(entry.into_path(), is_regular_file))
                }
                Err(e) => Err(self.handle_walk_error(e)),
            })
    }

    /// Count regular files below the root.
    ///
    /// Used to size progress reporting; errors are ignored.
    #[must_use]
    pub fn count_files(&self) -> usize {
        self.walk_dir()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .count()
    }

    /// Convert a walkdir error into a [`ScanError`], keeping the failing path.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        let message = error.to_string();

        match error.into_io_error() {
            Some(io) => ScanError::from_io(&path, io),
            // Loop errors carry no I/O error
            None => ScanError::Io {
                path,
                source: std::io::Error::other(message),
            },
        }
    }
}
