//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping fingerprinted paths by digest
//! - Ranking each duplicate group against a priority reference
//! - Running a complete search over a directory tree
//!
//! # Architecture
//!
//! - [`groups`]: Group and decision types
//! - [`ranking`]: Survivor ranking strategies
//! - [`resolver`]: Digest arena and survivor selection
//! - [`finder`]: Walk, fingerprint and resolve in one run

pub mod finder;
pub mod groups;
pub mod ranking;
pub mod resolver;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{Action, Decision, DigestGroup, FileEntry, ResolvedGroup};
pub use ranking::{common_prefix_length, CommonPrefix, RankStrategy};
pub use resolver::DuplicateResolver;
