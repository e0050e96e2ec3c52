//! Error types for scanutils.
//!
//! Every tool reports failures through [`ScanError`]. Errors carry enough
//! context to be printed directly to the user and map to a process exit
//! code via [`ScanError::exit_code`].
//!
//! # Error Categories
//!
//! - **Validation Errors**: invalid arguments, page numbers out of range
//! - **Tool Errors**: missing executables, non-zero exit codes, unparsable
//!   tool output
//! - **I/O Errors**: file not found, permission denied, etc.

use std::io;
use std::path::PathBuf;

/// Result type alias for scanutils operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Main error type for scanutils operations.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A command line argument or argument combination is invalid.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of what's wrong.
        message: String,
    },

    /// A page number does not address an existing page.
    #[error(
        "Page number {page_number} is out of range\n  The PDF has {page_count} page(s). Page numbers must be between 1 and {page_count}"
    )]
    PageOutOfRange {
        /// Requested page number.
        page_number: u32,
        /// Total pages in the PDF.
        page_count: u32,
    },

    /// One or more external executables are not installed.
    #[error("Some commands are not installed: {}", .missing.join(", "))]
    MissingDependencies {
        /// Every missing executable, optionally with its package name.
        missing: Vec<String>,
    },

    /// An external tool exited with a non-zero status.
    #[error("Command failed with exit code {}: {command}", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    ToolFailed {
        /// The command line that failed.
        command: String,
        /// Exit code, `None` if the process was killed by a signal.
        code: Option<i32>,
    },

    /// An external tool could not be started at all.
    #[error("Failed to start command: {command}\n  Reason: {source}")]
    ToolNotStarted {
        /// The command line that could not be started.
        command: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The text output of an external tool did not have the expected format.
    #[error("Unexpected output from {tool}:\n{raw_output}")]
    Parse {
        /// Name of the tool whose output failed to parse.
        tool: String,
        /// The raw output that was received.
        raw_output: String,
    },

    /// A MAC address could not be parsed.
    #[error("Invalid MAC address: {mac}")]
    InvalidMac {
        /// The rejected input.
        mac: String,
    },

    /// An IPv6 network prefix could not be parsed or is unusable.
    #[error("Invalid IPv6 prefix: {prefix}\n  Reason: {reason}")]
    InvalidPrefix {
        /// The rejected input.
        prefix: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A DNS name could not be resolved to an IPv6 address.
    #[error("No IPv6 address found for: {name}")]
    DnsLookup {
        /// The DNS name that was looked up.
        name: String,
    },

    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<walkdir::Error> for ScanError {
    fn from(err: walkdir::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<glob::PatternError> for ScanError {
    fn from(err: glob::PatternError) -> Self {
        Self::invalid_argument(format!("Invalid glob pattern: {err}"))
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl ScanError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a Parse error for the output of `tool`.
    pub fn parse(tool: impl Into<String>, raw_output: impl Into<String>) -> Self {
        Self::Parse {
            tool: tool.into(),
            raw_output: raw_output.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error.
    ///
    /// Argument parsing failures are reported by clap with exit code 2
    /// before any of these errors can occur.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 1,
            Self::PageOutOfRange { .. } => 1,
            Self::InvalidMac { .. } => 1,
            Self::InvalidPrefix { .. } => 1,
            Self::MissingDependencies { .. } => 3,
            Self::ToolFailed { .. } => 4,
            Self::ToolNotStarted { .. } => 4,
            Self::Parse { .. } => 4,
            Self::DnsLookup { .. } => 5,
            Self::FileNotFound { .. } => 2,
            Self::Io(_) => 5,
            Self::Other { .. } => 1,
        }
    }
}
