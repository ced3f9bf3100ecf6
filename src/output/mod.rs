//! Output formatters for duplicate search results.
//!
//! This module provides two report formats:
//! - Text, incremental and colored, for people at a terminal
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use deduplicate::duplicates::DuplicateFinder;
//! use deduplicate::error::ExitCode;
//! use deduplicate::output::JsonOutput;
//! use deduplicate::scanner::HashAlgorithm;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new("."), "").unwrap();
//!
//! let output = JsonOutput::new(HashAlgorithm::Sha256, "", &groups, &summary, ExitCode::Success);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
pub use text::TextReport;
