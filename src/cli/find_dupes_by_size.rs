//! CLI of `find-dupes-by-size`.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{Result, ScanError};

/// Find duplicate files by size.
#[derive(Parser, Debug)]
#[command(name = "find-dupes-by-size")]
#[command(version)]
#[command(about = "Find duplicate files by size", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// The directory to search recursively
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// Print the duplicate groups as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The path must be an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::FileNotFound`] if it does not exist.
    pub fn validate(&self) -> Result<()> {
        if !self.path.exists() {
            return Err(ScanError::file_not_found(self.path.clone()));
        }
        if !self.path.is_dir() {
            return Err(ScanError::invalid_argument(format!(
                "Not a directory: {}",
                self.path.display()
            )));
        }
        Ok(())
    }
}
