//! Message formatting and display.
//!
//! This module provides formatted output for different message types
//! with support for quiet and verbose modes, plus the echo of external
//! commands that every tool prints in verbose mode.
//!
//! # Examples
//!
//! ```
//! use scanutils::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Converting images...");
//! formatter.success("Operation completed");
//! formatter.error("Something went wrong");
//! ```

use std::io;
use std::path::Path;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const BLUE: &str = "\x1b[34m";
const WHITE_ON_CYAN: &str = "\x1b[37;46m";
const RESET: &str = "\x1b[0m";

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output (including echoed commands).
    verbose: bool,
    /// Whether stdout supports ANSI colors.
    colored: bool,
    /// Whether echoed commands get their arguments highlighted.
    colorize_commands: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - Suppress non-error output
    /// * `verbose` - Show verbose output
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
            colorize_commands: false,
        }
    }

    /// Highlight flags and existing paths when echoing commands.
    pub fn with_colorized_commands(mut self, colorize: bool) -> Self {
        self.colorize_commands = colorize;
        self
    }

    /// Create a quiet formatter (only errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message.
    ///
    /// Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message.
    ///
    /// Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message.
    ///
    /// Always displayed (even in quiet mode).
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message to stderr.
    ///
    /// Always displayed.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a debug/verbose message.
    ///
    /// Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    /// Print a plain line of program output.
    ///
    /// Results (file lists, converted addresses) go through here so that
    /// they are never decorated and never suppressed.
    pub fn plain(&self, message: &str) {
        println!("{message}");
    }

    /// Echo an external command before it runs.
    ///
    /// Only displayed in verbose mode. With colorized commands enabled,
    /// `--long` options are yellow, `-short` options blue and arguments
    /// naming an existing path white on cyan.
    pub fn command(&self, args: &[String]) {
        if self.verbose {
            println!("{}", self.render_command(args));
        }
    }

    /// Render a command line the way [`OutputFormatter::command`] prints it.
    pub fn render_command(&self, args: &[String]) -> String {
        if !self.colorize_commands {
            return args.join(" ");
        }

        args.iter()
            .map(|arg| {
                if arg.starts_with("--") {
                    format!("{YELLOW}{arg}{RESET}")
                } else if arg.starts_with('-') {
                    format!("{BLUE}{arg}{RESET}")
                } else if Path::new(arg).exists() {
                    format!("{WHITE_ON_CYAN}{arg}{RESET}")
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Print a message with level-appropriate formatting.
    fn print_message(&self, level: MessageLevel, message: &str) {
        let line = self.format_message(level, message);

        if level == MessageLevel::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn format_message(&self, level: MessageLevel, message: &str) -> String {
        let (prefix, color_code) = match level {
            MessageLevel::Info => ("", ""),
            MessageLevel::Success => ("✓ ", GREEN),
            MessageLevel::Warning => ("⚠ ", YELLOW),
            MessageLevel::Error => ("✗ ", RED),
            MessageLevel::Debug => ("→ ", CYAN),
        };

        if self.colored && !color_code.is_empty() {
            format!("{color_code}{prefix}{message}{RESET}")
        } else {
            format!("{prefix}{message}")
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_quiet_formatter() {
        let formatter = OutputFormatter::quiet();
        assert!(formatter.quiet);
        assert!(!formatter.verbose);
        assert!(!formatter.colorize_commands);
    }

    #[test]
    fn test_render_command_plain() {
        let formatter = OutputFormatter::new(false, true);
        let rendered = formatter.render_command(&strings(&["pdftk", "--help", "-x"]));
        assert_eq!(rendered, "pdftk --help -x");
    }

    #[test]
    fn test_render_command_colorized() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().to_string_lossy().to_string();
        let formatter = OutputFormatter::new(false, true).with_colorized_commands(true);

        let rendered = formatter.render_command(&[
            "convert".to_string(),
            "--long".to_string(),
            "-short".to_string(),
            existing.clone(),
        ]);

        assert!(rendered.starts_with("convert "));
        assert!(rendered.contains(&format!("{YELLOW}--long{RESET}")));
        assert!(rendered.contains(&format!("{BLUE}-short{RESET}")));
        assert!(rendered.contains(&format!("{WHITE_ON_CYAN}{existing}{RESET}")));
    }

    #[test]
    fn test_messages_do_not_panic() {
        let formatter = OutputFormatter::quiet();
        formatter.info("This should not appear");
        formatter.warning("Important warning");
        formatter.error("Critical error");
        formatter.debug("Suppressed");
        formatter.command(&strings(&["pdfinfo", "a.pdf"]));
    }

    #[test]
    fn test_format_error_message() {
        let mut formatter = OutputFormatter::quiet();
        formatter.colored = false;
        assert_eq!(
            formatter.format_message(MessageLevel::Error, "Error: File not found: a.pdf"),
            "✗ Error: File not found: a.pdf"
        );
        assert_eq!(formatter.format_message(MessageLevel::Info, "plain"), "plain");

        formatter.colored = true;
        assert_eq!(
            formatter.format_message(MessageLevel::Error, "Error: x"),
            format!("{RED}✗ Error: x{RESET}")
        );
    }

    #[test]
    fn test_message_levels() {
        assert_eq!(MessageLevel::Info, MessageLevel::Info);
        assert_ne!(MessageLevel::Info, MessageLevel::Error);
    }
}
