//! Duplicate finder: walk, fingerprint, group, rank.
//!
//! # Overview
//!
//! This module orchestrates one duplicate search:
//! 1. **Walk** - Discover regular files under the root in sorted order
//! 2. **Fingerprint** - Hash each file's full content
//! 3. **Record** - Group paths by digest in discovery order
//! 4. **Resolve** - Rank each duplicate group against the priority reference
//!
//! # Error policy
//!
//! By default a file that cannot be walked or read is reported in
//! [`ScanSummary::scan_errors`] and left out of grouping; the search goes on.
//! With [`FinderConfig::with_strict`] the first such error aborts the search.
//!
//! # Example
//!
//! ```no_run
//! use deduplicate::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new("."), "").unwrap();
//!
//! for group in &groups {
//!     println!("keep {}", group.keep());
//!     for path in group.removals() {
//!         println!("  remove {}", path);
//!     }
//! }
//! println!("{} files scanned", summary.total_files);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::groups::ResolvedGroup;
use super::resolver::DuplicateResolver;
use crate::progress::{ProgressCallback, PHASE_COUNTING, PHASE_HASHING};
use crate::scanner::{clean_path, Digest, HashAlgorithm, HashError, Hasher, ScanError, Walker};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Digest algorithm used to fingerprint files.
    pub algorithm: HashAlgorithm,
    /// Abort on the first unreadable file instead of skipping it.
    pub strict: bool,
    /// Number of threads hashing files. 1 hashes each file as it is found.
    pub io_threads: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("algorithm", &self.algorithm)
            .field("strict", &self.strict)
            .field("io_threads", &self.io_threads)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            strict: false,
            io_threads: 1,
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the digest algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Abort on the first I/O error (`true`) or skip and report (`false`).
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the number of hashing threads (at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from a duplicate search.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Regular files considered (hashed or failed)
    pub total_files: usize,
    /// Files fingerprinted successfully
    pub hashed_files: usize,
    /// Files that could not be fingerprinted
    pub failed_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Files marked for removal across all groups
    pub duplicate_files: usize,
    /// Duration of the entire search
    pub scan_duration: Duration,
    /// Per-path errors, in the order they occurred
    pub scan_errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Whether any per-file error was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.scan_errors.is_empty()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The search was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A file could not be walked or read, and the finder is strict.
    #[error(transparent)]
    ScanError(#[from] ScanError),
}

/// Outcome of fingerprinting one file in the parallel path; `None` when
/// shutdown was requested before the file was read.
type HashOutcome = Option<Result<Digest, HashError>>;

/// Duplicate finder that runs a complete search.
///
/// # Example
///
/// ```no_run
/// use deduplicate::duplicates::{DuplicateFinder, FinderConfig};
/// use deduplicate::scanner::HashAlgorithm;
/// use std::path::Path;
///
/// let config = FinderConfig::default()
///     .with_algorithm(HashAlgorithm::Blake3)
///     .with_strict(true);
/// let finder = DuplicateFinder::new(config);
///
/// let (groups, summary) = finder.find_duplicates(Path::new("/some/path"), "/some/path/keep").unwrap();
/// println!("Found {} duplicate groups", summary.duplicate_groups);
/// ```
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::new(config.algorithm);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The configuration this finder runs with.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Find all duplicate files below `root`.
    ///
    /// `priority_reference` is the string every duplicate's path is ranked
    /// against; pass `""` to keep the first file discovered in each group.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist or is not a directory
    /// - The search is interrupted by shutdown signal
    /// - A file cannot be walked or read and the finder is strict
    pub fn find_duplicates(
        &self,
        root: &Path,
        priority_reference: &str,
    ) -> Result<(Vec<ResolvedGroup>, ScanSummary), FinderError> {
        // Validate path
        if !root.exists() {
            return Err(FinderError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }

        log::info!("Starting duplicate search of {}", root.display());

        // Set shutdown flag on walker if available
        let mut walker = Walker::new(root);
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(flag.clone());
        }

        // Phase 0: count files to size the progress bar
        let total = match self.config.progress_callback {
            Some(ref callback) => {
                callback.on_phase_start(PHASE_COUNTING, 0);
                let count = walker.count_files();
                callback.on_phase_end(PHASE_COUNTING);
                count
            }
            None => 0,
        };

        // Only regular files are fingerprinted; walk errors pass through
        let files = walker.walk().filter_map(|entry| match entry {
            Ok(entry) if entry.is_regular_file => Some(Ok(entry.path)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        });

        self.run(files, total, priority_reference)
    }

    /// Find duplicates among caller-supplied paths.
    ///
    /// Every path is treated as a regular file, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `FinderError::Interrupted` on shutdown, or the first
    /// `ScanError` when the finder is strict.
    pub fn find_duplicates_in_paths<I>(
        &self,
        paths: I,
        priority_reference: &str,
    ) -> Result<(Vec<ResolvedGroup>, ScanSummary), FinderError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().collect();
        let total = paths.len();
        self.run(paths.into_iter().map(Ok), total, priority_reference)
    }

    fn run<I>(
        &self,
        files: I,
        total: usize,
        priority_reference: &str,
    ) -> Result<(Vec<ResolvedGroup>, ScanSummary), FinderError>
    where
        I: Iterator<Item = Result<PathBuf, ScanError>>,
    {
        let start_time = Instant::now();
        let mut summary = ScanSummary::default();
        let mut resolver = DuplicateResolver::new();

        // Check for early shutdown
        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(PHASE_HASHING, total);
        }

        // Phase 1: fingerprint and group by digest
        let outcome = if self.config.io_threads > 1 {
            self.record_parallel(files, &mut resolver, &mut summary)
        } else {
            self.record_sequential(files, &mut resolver, &mut summary)
        };

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(PHASE_HASHING);
        }
        outcome?;

        // Check if we were interrupted
        if self.config.is_shutdown_requested() {
            log::info!("Search interrupted by shutdown signal");
            return Err(FinderError::Interrupted);
        }

        log::debug!(
            "Recorded {} files under {} distinct digests",
            resolver.file_count(),
            resolver.len()
        );

        // Phase 2: rank each group against the reference
        let groups = resolver.resolve(priority_reference);

        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(|g| g.removals().len()).sum();
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Search complete: {} files, {} duplicate groups, {} files to remove, {} errors",
            summary.total_files,
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.scan_errors.len()
        );

        Ok((groups, summary))
    }

    /// Hash each file as soon as it is discovered.
    fn record_sequential<I>(
        &self,
        files: I,
        resolver: &mut DuplicateResolver,
        summary: &mut ScanSummary,
    ) -> Result<(), FinderError>
    where
        I: Iterator<Item = Result<PathBuf, ScanError>>,
    {
        for item in files {
            if self.config.is_shutdown_requested() {
                return Err(FinderError::Interrupted);
            }

            let path = match item {
                Ok(path) => path,
                Err(e) => {
                    self.handle_error(e, summary)?;
                    continue;
                }
            };

            summary.total_files += 1;
            // Report progress
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(summary.total_files, &path.to_string_lossy());
            }

            match self.hasher.hash_file(&path) {
                Ok(digest) => {
                    summary.hashed_files += 1;
                    resolver.record(path_key(&path), digest);
                }
                Err(e) => {
                    summary.failed_files += 1;
                    self.handle_error(ScanError::from(e), summary)?;
                }
            }
        }
        Ok(())
    }

    /// Collect the walk, hash its files on a bounded pool, then record every
    /// item in discovery order.
    ///
    /// Walk errors and hash errors go through the error policy in one pass
    /// after the join, so both policies see the same order as the
    /// sequential path.
    fn record_parallel<I>(
        &self,
        files: I,
        resolver: &mut DuplicateResolver,
        summary: &mut ScanSummary,
    ) -> Result<(), FinderError>
    where
        I: Iterator<Item = Result<PathBuf, ScanError>>,
    {
        let items: Vec<Result<PathBuf, ScanError>> = files.collect();
        let paths: Vec<&PathBuf> = items.iter().filter_map(|item| item.as_ref().ok()).collect();

        log::debug!(
            "Hashing {} files on {} threads",
            paths.len(),
            self.config.io_threads
        );

        let completed = AtomicUsize::new(0);
        let hash_all = || -> Vec<HashOutcome> {
            paths
                .par_iter()
                .map(|path| {
                    // Check shutdown flag
                    if self.config.is_shutdown_requested() {
                        return None;
                    }
                    let result = self.hasher.hash_file(path);
                    // Report progress
                    if let Some(ref callback) = self.config.progress_callback {
                        let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                        callback.on_progress(current, &path.to_string_lossy());
                    }
                    Some(result)
                })
                .collect()
        };

        // Build a custom thread pool with limited parallelism for I/O
        let outcomes = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
        {
            Ok(pool) => pool.install(hash_all),
            Err(e) => {
                log::warn!(
                    "Failed to create hashing thread pool ({}), using global pool with {} threads",
                    e,
                    rayon::current_num_threads()
                );
                hash_all()
            }
        };

        // The join above is complete: recording happens on this thread only.
        // `outcomes[k]` belongs to the k-th Ok item.
        let mut outcomes = outcomes.into_iter();
        for item in items {
            let path = match item {
                Ok(path) => path,
                Err(e) => {
                    self.handle_error(e, summary)?;
                    continue;
                }
            };

            let Some(Some(result)) = outcomes.next() else {
                return Err(FinderError::Interrupted);
            };

            summary.total_files += 1;
            match result {
                Ok(digest) => {
                    summary.hashed_files += 1;
                    resolver.record(path_key(&path), digest);
                }
                Err(e) => {
                    summary.failed_files += 1;
                    self.handle_error(ScanError::from(e), summary)?;
                }
            }
        }
        Ok(())
    }

    /// Apply the error policy to one per-file error.
    fn handle_error(&self, error: ScanError, summary: &mut ScanSummary) -> Result<(), FinderError> {
        if self.config.strict {
            log::error!("Aborting search: {}", error);
            return Err(FinderError::ScanError(error));
        }

        log::warn!("Skipping {}: {}", error.path().display(), error);
        summary.scan_errors.push(error);
        Ok(())
    }
}

/// The string a path is grouped and ranked under, cleaned the same way as
/// the priority reference.
fn path_key(path: &Path) -> String {
    clean_path(path).to_string_lossy().into_owned()
}
