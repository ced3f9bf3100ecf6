//! Plain-text report for duplicate search results.
//!
//! # Format
//!
//! ```text
//! Identical files (SHA256: 2cf24dba...):
//! -   ./a.txt
//! x   ./b/a.txt
//!
//! Files to delete: 1
//! ```
//!
//! The kept path is marked `-` (green, bold) and each removal `x` (red,
//! bold). The report is written incrementally so deletion prompts and results
//! can be interleaved with the removal they belong to.

use std::io::{self, Write};

use yansi::{Condition, Paint};

use crate::scanner::HashAlgorithm;

/// Incremental writer for the text report.
pub struct TextReport<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> TextReport<W> {
    /// Create a report writer.
    ///
    /// `color` enables ANSI styling of keep/remove lines.
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    fn condition(&self) -> Condition {
        if self.color {
            Condition::ALWAYS
        } else {
            Condition::NEVER
        }
    }

    /// Start a group: `Identical files (<ALGO>: <hex>):`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn group_header(&mut self, algorithm: HashAlgorithm, digest_hex: &str) -> io::Result<()> {
        writeln!(self.writer, "Identical files ({algorithm}: {digest_hex}):")
    }

    /// Write the kept path.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn keep(&mut self, path: &str) -> io::Result<()> {
        let line = format!("-   {path}");
        let condition = self.condition();
        writeln!(self.writer, "{}", line.green().bold().whenever(condition))
    }

    /// Write a path marked for removal.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn remove(&mut self, path: &str) -> io::Result<()> {
        let line = format!("x   {path}");
        let condition = self.condition();
        writeln!(self.writer, "{}", line.red().bold().whenever(condition))
    }

    /// Report a completed deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn deleted(&mut self, path: &str) -> io::Result<()> {
        writeln!(self.writer, "Deleted: {path}")
    }

    /// Report a failed deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn delete_failed(&mut self, path: &str, error: &dyn std::fmt::Display) -> io::Result<()> {
        writeln!(self.writer, "Error deleting file {path}: {error}")
    }

    /// Close a group with a blank line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn end_group(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Final tally: `Deleted files: N` when deleting, else `Files to delete: N`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub fn totals(&mut self, deleting: bool, count: usize) -> io::Result<()> {
        if deleting {
            writeln!(self.writer, "Deleted files: {count}")?;
        } else {
            writeln!(self.writer, "Files to delete: {count}")?;
        }
        self.writer.flush()
    }

    /// Flush pending output, e.g. before prompting on another stream.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Whether stdout should be colored.
///
/// Disabled by `--no-color`, a non-empty `NO_COLOR`, or a non-terminal stdout.
#[must_use]
pub fn color_enabled(no_color_flag: bool) -> bool {
    use std::io::IsTerminal;

    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    io::stdout().is_terminal()
}
