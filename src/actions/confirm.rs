//! Deletion confirmation prompt.
//!
//! [`Confirm`] asks before each removal unless `force` is set. It reads from
//! any [`BufRead`] and writes the prompt to any [`Write`], so the CLI uses
//! stdin/stdout while tests use in-memory buffers.

use std::io::{BufRead, Write};

/// Prompt shown before a removal.
pub const PROMPT: &str = "Do you want to delete these files? (yes/no): ";

/// Interactive yes/no confirmation.
pub struct Confirm<R, W> {
    input: R,
    output: W,
    force: bool,
}

impl<R: BufRead, W: Write> Confirm<R, W> {
    /// Create a prompt over the given input and output.
    pub fn new(input: R, output: W, force: bool) -> Self {
        Self {
            input,
            output,
            force,
        }
    }

    /// Ask once. Returns `true` only for `y` or `yes`.
    ///
    /// With `force` set nothing is printed or read. Read errors and end of
    /// input count as a decline.
    pub fn ask(&mut self) -> bool {
        if self.force {
            return true;
        }

        if let Err(e) = write!(self.output, "{PROMPT}").and_then(|()| self.output.flush()) {
            log::warn!("Failed to write confirmation prompt: {}", e);
        }

        let mut response = String::new();
        match self.input.read_line(&mut response) {
            Ok(0) => {
                log::debug!("Confirmation input closed, declining");
                false
            }
            Ok(_) => is_affirmative(&response),
            Err(e) => {
                log::warn!("Error reading response: {}", e);
                false
            }
        }
    }

    /// Give back the output writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

fn is_affirmative(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}
