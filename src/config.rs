//! Application configuration management.
//!
//! Two layers:
//! - [`Config`]: user defaults persisted as `config.json` in the platform
//!   config directory
//! - [`SearchConfig`]: the immutable settings of one run, built from CLI
//!   arguments layered over [`Config`]

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::actions::DeleteMethod;
use crate::cli::{OutputFormat, SearchArgs};
use crate::duplicates::FinderConfig;
use crate::scanner::{clean_path, HashAlgorithm};

/// User defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digest algorithm used unless `--algorithm` is given.
    pub algorithm: HashAlgorithm,
    /// Abort on the first unreadable file.
    pub strict: bool,
    /// Move deleted files to the trash instead of removing them.
    pub use_trash: bool,
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults if the file is missing or unreadable.
    #[must_use]
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load the configuration from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Get the default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "deduplicate", "deduplicate")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}

/// Settings for one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Directory to search
    pub root: PathBuf,
    /// Priority path relative to `root`; empty for none
    pub priority: String,
    /// Delete removals
    pub delete: bool,
    /// Skip confirmation
    pub force: bool,
    /// Abort on the first unreadable file
    pub strict: bool,
    /// Digest algorithm
    pub algorithm: HashAlgorithm,
    /// Trash instead of permanent removal
    pub use_trash: bool,
    /// Hashing threads
    pub io_threads: usize,
    /// Report format
    pub output: OutputFormat,
    /// Show the progress bar
    pub show_progress: bool,
}

impl SearchConfig {
    /// Layer CLI arguments over user defaults.
    ///
    /// Flags can only switch `strict` and `use_trash` on; `--algorithm`
    /// replaces the configured algorithm.
    #[must_use]
    pub fn from_args(args: &SearchArgs, defaults: &Config) -> Self {
        Self {
            root: args.directory.clone(),
            priority: args.priority.clone(),
            delete: args.delete,
            force: args.force,
            strict: args.strict || defaults.strict,
            algorithm: args.algorithm.unwrap_or(defaults.algorithm),
            use_trash: args.trash || defaults.use_trash,
            io_threads: args.io_threads.max(1),
            output: args.output,
            show_progress: !args.no_progress && args.output == OutputFormat::Text,
        }
    }

    /// The string every duplicate's path is ranked against.
    ///
    /// A non-empty priority is joined onto the root, so an absolute priority
    /// replaces it, and the result is cleaned lexically the same way walked
    /// paths are. An empty priority gives the empty reference, which keeps
    /// the first file discovered in each group.
    ///
    /// ```
    /// use deduplicate::cli::OutputFormat;
    /// use deduplicate::config::SearchConfig;
    /// use deduplicate::scanner::HashAlgorithm;
    /// use std::path::PathBuf;
    ///
    /// let mut config = SearchConfig {
    ///     root: PathBuf::from("/data"),
    ///     priority: "keep".to_string(),
    ///     delete: false,
    ///     force: false,
    ///     strict: false,
    ///     algorithm: HashAlgorithm::Sha256,
    ///     use_trash: false,
    ///     io_threads: 1,
    ///     output: OutputFormat::Text,
    ///     show_progress: false,
    /// };
    /// assert_eq!(config.priority_reference(), "/data/keep");
    ///
    /// config.priority = "./old/../keep".to_string();
    /// assert_eq!(config.priority_reference(), "/data/keep");
    ///
    /// config.priority.clear();
    /// assert_eq!(config.priority_reference(), "");
    /// ```
    #[must_use]
    pub fn priority_reference(&self) -> String {
        if self.priority.is_empty() {
            String::new()
        } else {
            clean_path(&self.root.join(&self.priority))
                .to_string_lossy()
                .into_owned()
        }
    }

    /// Finder settings for this run, without shutdown flag or progress.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_algorithm(self.algorithm)
            .with_strict(self.strict)
            .with_io_threads(self.io_threads)
    }

    /// How removals are deleted.
    #[must_use]
    pub fn delete_method(&self) -> DeleteMethod {
        DeleteMethod::from_use_trash(self.use_trash)
    }
}
