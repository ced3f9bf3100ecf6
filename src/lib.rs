//! Deduplicate - find byte-identical files and decide which copy to keep.
//!
//! Every regular file below a directory is fingerprinted with a
//! cryptographic digest. Files sharing a digest form a duplicate group, and
//! each group's members are ranked by how long a leading prefix their path
//! shares with a priority path. The best match is kept; the others are
//! reported, and optionally deleted.
//!
//! # Example
//!
//! ```no_run
//! use deduplicate::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, _summary) = finder.find_duplicates(Path::new("."), "keep").unwrap();
//! for group in &groups {
//!     println!("{} keeps {}", group.digest_hex(), group.keep());
//! }
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::actions::{delete_batch, delete_path, removal_paths, Confirm};
use crate::cli::{Cli, Commands, OutputFormat, SearchArgs};
use crate::config::{Config, SearchConfig};
use crate::duplicates::{DuplicateFinder, ResolvedGroup};
use crate::error::ExitCode;
use crate::output::{text, JsonOutput, TextReport};
use crate::progress::Progress;
use crate::scanner::HashAlgorithm;
use crate::signal::ShutdownHandler;

/// Run the application for parsed arguments.
///
/// # Errors
///
/// Returns an error if the search fails (including `FinderError::Interrupted`,
/// which callers map to exit code 130) or output cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Search(ref args) => run_search(args, &cli),
        Commands::Version => {
            write_version(&mut io::stdout().lock())?;
            Ok(ExitCode::Success)
        }
    }
}

fn run_search(args: &SearchArgs, cli: &Cli) -> Result<ExitCode> {
    let search = SearchConfig::from_args(args, &Config::load());
    log::debug!("Search configuration: {:?}", search);

    // Setup Ctrl+C handling
    let handler = signal::install_handler().unwrap_or_else(|e| {
        log::warn!("{}; Ctrl+C will not stop the search cleanly", e);
        ShutdownHandler::new()
    });

    let mut finder_config = search.finder_config().with_shutdown_flag(handler.get_flag());
    if search.show_progress && !cli.quiet {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    // Run the search
    let reference = search.priority_reference();
    let finder = DuplicateFinder::new(finder_config);
    let (groups, summary) = finder.find_duplicates(&search.root, &reference)?;

    if summary.has_errors() {
        log::warn!(
            "{} path(s) could not be read and were skipped",
            summary.scan_errors.len()
        );
    }

    match search.output {
        OutputFormat::Text => {
            let color = text::color_enabled(cli.no_color);
            let mut report = TextReport::new(io::stdout(), color);
            let mut confirm = Confirm::new(io::stdin().lock(), io::stdout(), search.force);
            let outcome = write_text_report(
                &groups,
                &search,
                &mut report,
                search.delete.then_some(&mut confirm),
            )
            .context("Failed to write report")?;

            Ok(ExitCode::for_outcome(
                groups.len(),
                summary.has_errors() || outcome.failed > 0,
            ))
        }
        OutputFormat::Json => {
            let mut exit_code = ExitCode::for_outcome(groups.len(), summary.has_errors());
            let mut output = JsonOutput::new(
                search.algorithm,
                &reference,
                &groups,
                &summary,
                exit_code,
            );

            // Nothing prompts in JSON mode, so only --force deletes
            if search.delete && search.force {
                let batch = delete_batch(&removal_paths(&groups), search.delete_method());
                if !batch.all_succeeded() {
                    exit_code = ExitCode::PartialSuccess;
                    output.summary.exit_code = exit_code.as_i32();
                    output.summary.exit_code_name = exit_code.code_prefix().to_string();
                }
                output = output.with_deletions(&batch);
            } else if search.delete {
                log::warn!("JSON output deletes nothing without --force");
            }

            output
                .write_to(&mut io::stdout().lock(), true)
                .context("Failed to write JSON output")?;
            Ok(exit_code)
        }
    }
}

/// What happened while writing a text report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TextOutcome {
    /// Files marked for removal
    pub marked: usize,
    /// Files deleted
    pub deleted: usize,
    /// Deletions that failed
    pub failed: usize,
}

/// Write the text report, deleting confirmed removals along the way.
///
/// Pass `confirm` only when deleting. Each removal line is followed by one
/// confirmation, and the file is deleted right after a yes.
///
/// # Errors
///
/// Returns an error if writing the report fails. Deletion failures are
/// reported inline and counted in [`TextOutcome::failed`].
pub fn write_text_report<W, R, P>(
    groups: &[ResolvedGroup],
    search: &SearchConfig,
    report: &mut TextReport<W>,
    mut confirm: Option<&mut Confirm<R, P>>,
) -> io::Result<TextOutcome>
where
    W: Write,
    R: BufRead,
    P: Write,
{
    let method = search.delete_method();
    let mut outcome = TextOutcome::default();

    for group in groups {
        report.group_header(search.algorithm, &group.digest_hex())?;
        report.keep(group.keep())?;

        for path in group.removals() {
            report.remove(path)?;
            outcome.marked += 1;

            let Some(confirm) = confirm.as_deref_mut() else {
                continue;
            };
            // The prompt shares stdout with the report
            report.flush()?;
            if !confirm.ask() {
                continue;
            }

            match delete_path(Path::new(path), method) {
                Ok(_) => {
                    outcome.deleted += 1;
                    report.deleted(path)?;
                }
                Err(e) => {
                    outcome.failed += 1;
                    report.delete_failed(path, &e)?;
                }
            }
        }

        report.end_group()?;
    }

    if confirm.is_some() {
        report.totals(true, outcome.deleted)?;
    } else {
        report.totals(false, outcome.marked)?;
    }

    Ok(outcome)
}

const BUILD_TIME: Option<&str> = option_env!("DEDUPLICATE_BUILD_TIME");
const GIT_COMMIT: Option<&str> = option_env!("DEDUPLICATE_GIT_COMMIT");

/// Print program name, version, build details, OS and architecture.
///
/// Build time and commit come from `DEDUPLICATE_BUILD_TIME` and
/// `DEDUPLICATE_GIT_COMMIT` at compile time and read `unknown` when unset.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_version<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}:", env!("CARGO_PKG_NAME"))?;
    writeln!(writer, " Version:    {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(writer, " Built:      {}", BUILD_TIME.unwrap_or("unknown"))?;
    writeln!(writer, " Git Commit: {}", GIT_COMMIT.unwrap_or("unknown"))?;
    writeln!(writer, " Algorithm:  {} (default)", HashAlgorithm::default())?;
    writeln!(writer, " Os:         {}", std::env::consts::OS)?;
    writeln!(writer, " Arch:       {}", std::env::consts::ARCH)?;
    Ok(())
}
