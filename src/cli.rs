//! Command-line interface definitions.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, color, error format) apply to every subcommand.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates below the current directory
//! deduplicate search
//!
//! # Prefer copies under ~/Photos/keep, delete the rest after confirmation
//! deduplicate search -d ~/Photos -p keep -x
//!
//! # JSON output for scripting
//! deduplicate search -d ~/Downloads --output json
//!
//! # Verbose mode for debugging
//! deduplicate -v search -d ~/Downloads
//! ```

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::scanner::HashAlgorithm;

/// Find byte-identical files and decide which copy to keep.
///
/// Files are grouped by a SHA-256 digest of their content. In each group the
/// copy whose path best matches the priority path is kept and the others are
/// marked for removal.
#[derive(Debug, Parser)]
#[command(name = "deduplicate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Print errors as a JSON object on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search a directory for duplicate files
    Search(SearchArgs),
    /// Print version information
    Version,
}

/// Arguments for the search subcommand.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// The root directory to start the deduplication process
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Delete duplicate files (use with caution)
    #[arg(short = 'x', long)]
    pub delete: bool,

    /// Do not prompt for confirmation when deleting files (use with caution)
    #[arg(short, long)]
    pub force: bool,

    /// Path, relative to the directory, whose copies are preferred
    ///
    /// Each duplicate group keeps the file sharing the longest leading
    /// prefix with DIRECTORY/PRIORITY. Without it the first file found is kept.
    #[arg(short, long, value_name = "PATH", default_value = "")]
    pub priority: String,

    /// Digest algorithm (default: sha256, or the config file value)
    #[arg(long, value_enum)]
    pub algorithm: Option<HashAlgorithm>,

    /// Abort on the first unreadable file instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Move deleted files to the system trash instead of removing them
    #[arg(long)]
    pub trash: bool,

    /// Number of threads used for hashing
    ///
    /// 1 hashes each file as it is discovered.
    #[arg(long, value_name = "N", default_value = "1", value_parser = parse_thread_count)]
    pub io_threads: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Output format for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a hashing thread count; must be at least 1.
///
/// # Examples
///
/// ```
/// use deduplicate::cli::parse_thread_count;
///
/// assert_eq!(parse_thread_count("4").unwrap(), 4);
/// assert!(parse_thread_count("0").is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the string is not a positive integer.
pub fn parse_thread_count(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid thread count: '{s}'"))?;
    if n == 0 {
        return Err("Thread count must be at least 1".to_string());
    }
    Ok(n)
}
