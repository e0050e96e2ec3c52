//! CLI of `list-files`.

use clap::Parser;

use crate::error::{Result, ScanError};
use crate::listing::doc_examples;

/// List files the way the other tools resolve their inputs.
#[derive(Parser, Debug)]
#[command(name = "list-files")]
#[command(version)]
#[command(about = "List the files a path or glob pattern resolves to", long_about = None)]
#[command(after_help = doc_examples("list-files", "txt", 2, false))]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Files, a directory or a quoted glob
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Only list files of a directory matching this glob
    #[arg(short, long, value_name = "GLOB")]
    pub glob: Option<String>,

    /// Print the list as a JSON array
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Validate CLI arguments before processing.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty `--glob`.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(ScanError::invalid_argument("No input files specified"));
        }
        if self.glob.as_deref() == Some("") {
            return Err(ScanError::invalid_argument("The glob must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let cli = Cli::try_parse_from(["list-files", "--glob", "*.txt", "docs"]).unwrap();
        assert_eq!(cli.inputs, ["docs"]);
        assert_eq!(cli.glob.as_deref(), Some("*.txt"));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_empty_glob() {
        let cli = Cli {
            inputs: vec!["docs".to_string()],
            glob: Some(String::new()),
            json: false,
        };
        assert!(cli.validate().is_err());
    }
}
