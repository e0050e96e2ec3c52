//! CLI of `extract-pdftext`.

use std::path::PathBuf;

use clap::Parser;

use crate::cli::OutputArgs;
use crate::config::{ExtractConfig, is_pdf};
use crate::error::{Result, ScanError};

/// Extract the text of a PDF file into a text file next to it.
#[derive(Parser, Debug)]
#[command(name = "extract-pdftext")]
#[command(version)]
#[command(about = "Extract the text of a PDF file page by page into <name>.txt", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub output: OutputArgs,

    /// A PDF file containing text
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl Cli {
    /// Convert CLI arguments into an [`ExtractConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if [`Cli::validate`] fails.
    pub fn to_config(&self) -> Result<ExtractConfig> {
        self.validate()?;
        Ok(ExtractConfig {
            pdf: self.file.clone(),
            output: self.output.to_options(),
        })
    }

    /// The file must be a PDF.
    ///
    /// # Errors
    ///
    /// Returns an error for files without a `pdf` extension.
    pub fn validate(&self) -> Result<()> {
        if !is_pdf(&self.file) {
            return Err(ScanError::invalid_argument(format!(
                "Not a PDF file: {}",
                self.file.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_config() {
        let cli = Cli {
            output: OutputArgs::default(),
            file: PathBuf::from("book.pdf"),
        };

        let config = cli.to_config().unwrap();
        assert_eq!(config.pdf, PathBuf::from("book.pdf"));
    }

    #[test]
    fn test_rejects_other_files() {
        let cli = Cli::try_parse_from(["extract-pdftext", "-v", "notes.txt"]).unwrap();
        assert!(cli.output.verbose);
        assert!(cli.validate().is_err());
    }
}
