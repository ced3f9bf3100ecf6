//! JSON output formatter for duplicate search results.
//!
//! Provides machine-readable output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "algorithm": "sha256",
//!   "priority_reference": "/data/keep",
//!   "groups": [
//!     {
//!       "digest": "2cf24dba...",
//!       "keep": "/data/keep/a.txt",
//!       "remove": ["/data/old/a.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 100,
//!     "hashed_files": 99,
//!     "failed_files": 1,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 10,
//!     "deleted_files": 0,
//!     "scan_duration_ms": 1234,
//!     "exit_code": 3,
//!     "exit_code_name": "DD003"
//!   },
//!   "errors": [
//!     { "path": "/data/locked.bin", "message": "Permission denied: /data/locked.bin" }
//!   ]
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{ResolvedGroup, ScanSummary};
use crate::error::ExitCode;
use crate::scanner::HashAlgorithm;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// Digest as lowercase hexadecimal (64 characters)
    pub digest: String,
    /// The surviving path
    pub keep: String,
    /// Paths marked for removal, in rank order
    pub remove: Vec<String>,
}

impl From<&ResolvedGroup> for JsonGroup {
    fn from(group: &ResolvedGroup) -> Self {
        Self {
            digest: group.digest_hex(),
            keep: group.keep().to_string(),
            remove: group.removals().to_vec(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Regular files considered
    pub total_files: usize,
    /// Files fingerprinted successfully
    pub hashed_files: usize,
    /// Files that could not be fingerprinted
    pub failed_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Files marked for removal
    pub duplicate_files: usize,
    /// Files actually deleted (0 unless deletion was forced)
    pub deleted_files: usize,
    /// Duration of the search in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DD000")
    pub exit_code_name: String,
}

/// A per-path error.
#[derive(Debug, Clone, Serialize)]
pub struct JsonError {
    /// Path the error is attributed to
    pub path: String,
    /// Human-readable message
    pub message: String,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Digest algorithm used
    pub algorithm: HashAlgorithm,
    /// Reference paths were ranked against
    pub priority_reference: String,
    /// Duplicate groups in discovery order
    pub groups: Vec<JsonGroup>,
    /// Search statistics
    pub summary: JsonSummary,
    /// Per-path scan and delete errors
    pub errors: Vec<JsonError>,
}

impl JsonOutput {
    /// Create a new JSON output from resolved groups and the search summary.
    ///
    /// # Example
    ///
    /// ```
    /// use deduplicate::duplicates::{ResolvedGroup, ScanSummary};
    /// use deduplicate::error::ExitCode;
    /// use deduplicate::output::JsonOutput;
    /// use deduplicate::scanner::HashAlgorithm;
    ///
    /// let groups = vec![ResolvedGroup::new(
    ///     [0u8; 32],
    ///     vec!["/keep.txt".to_string(), "/copy.txt".to_string()],
    /// )];
    /// let output = JsonOutput::new(
    ///     HashAlgorithm::Sha256,
    ///     "",
    ///     &groups,
    ///     &ScanSummary::default(),
    ///     ExitCode::Success,
    /// );
    /// assert_eq!(output.groups[0].keep, "/keep.txt");
    /// ```
    #[must_use]
    pub fn new(
        algorithm: HashAlgorithm,
        priority_reference: &str,
        groups: &[ResolvedGroup],
        summary: &ScanSummary,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            algorithm,
            priority_reference: priority_reference.to_string(),
            groups: groups.iter().map(JsonGroup::from).collect(),
            summary: JsonSummary {
                total_files: summary.total_files,
                hashed_files: summary.hashed_files,
                failed_files: summary.failed_files,
                duplicate_groups: summary.duplicate_groups,
                duplicate_files: summary.duplicate_files,
                deleted_files: 0,
                scan_duration_ms: summary.scan_duration.as_millis() as u64,
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
            errors: summary
                .scan_errors
                .iter()
                .map(|e| JsonError {
                    path: e.path().to_string_lossy().into_owned(),
                    message: e.to_string(),
                })
                .collect(),
        }
    }

    /// Record the outcome of a forced deletion.
    #[must_use]
    pub fn with_deletions(mut self, result: &crate::actions::BatchDeleteResult) -> Self {
        self.summary.deleted_files = result.success_count();
        self.errors.extend(result.failures.iter().map(|e| JsonError {
            path: e.path().to_string_lossy().into_owned(),
            message: e.to_string(),
        }));
        self
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
