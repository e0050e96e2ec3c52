//! Output formatting and display for scanutils.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Echo of external commands in verbose mode
//! - Error and warning display
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use scanutils::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, true).with_colorized_commands(true);
//! formatter.info("Starting conversion");
//! formatter.command(&["pdfinfo".to_string(), "book.pdf".to_string()]);
//! formatter.success("Conversion completed successfully");
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use std::time::{Duration, Instant};

/// Wall clock timer for reporting how long a tool ran.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    begin: Instant,
}

impl Timer {
    /// Start measuring.
    pub fn start() -> Self {
        Self {
            begin: Instant::now(),
        }
    }

    /// Time elapsed since [`Timer::start`].
    pub fn elapsed(&self) -> Duration {
        self.begin.elapsed()
    }

    /// Elapsed time formatted with one decimal, e.g. `1.3s`.
    pub fn format_elapsed(&self) -> String {
        format_duration(self.elapsed())
    }
}

/// Format a duration with one decimal second, e.g. `1.3s`.
pub fn format_duration(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}
