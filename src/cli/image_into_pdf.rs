//! CLI of `image-into-pdf`.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::cli::OutputArgs;
use crate::config::{ImageIntoPdfConfig, InsertCommand, Position};
use crate::error::{Result, ScanError};

/// Add or replace one page in a PDF file with an image file of the same
/// page size.
#[derive(Parser, Debug)]
#[command(name = "image-into-pdf")]
#[command(version)]
#[command(about = "Add or replace one page in a PDF file with an image file of the same page size", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Only print the commands that would modify files
    ///
    /// The PDF and the image are still probed, so the printed commands
    /// carry the real page numbers and densities.
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of `image-into-pdf`.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add one image to a PDF file
    #[command(visible_aliases = ["ad", "a"])]
    Add(AddArgs),

    /// Convert an image file into a PDF file with the same dimensions
    #[command(visible_aliases = ["cv", "c"])]
    Convert {
        /// The image file to convert to the PDF format
        image: PathBuf,

        /// The main PDF file (to get the dimensions)
        pdf: PathBuf,
    },

    /// Replace one page in a PDF file with an image (or a PDF) file
    #[command(visible_aliases = ["re", "r"])]
    Replace {
        /// The main PDF file
        pdf: PathBuf,

        /// The page number of the PDF page to replace
        number: u32,

        /// An image (or a PDF) file to replace the PDF page with
        image: PathBuf,
    },
}

/// Arguments of `image-into-pdf add`.
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("position").args(["after", "before", "first", "last"])))]
pub struct AddArgs {
    /// Place the image after page PAGE
    #[arg(short, long, value_name = "PAGE")]
    pub after: Option<u32>,

    /// Place the image before page PAGE
    #[arg(short, long, value_name = "PAGE")]
    pub before: Option<u32>,

    /// Place the image at the first position
    #[arg(short, long)]
    pub first: bool,

    /// Place the image at the last position (default)
    #[arg(short, long)]
    pub last: bool,

    /// An image (or a PDF) file to add to the PDF
    pub image: PathBuf,

    /// The PDF file
    pub pdf: PathBuf,
}

impl Cli {
    /// Convert CLI arguments into a validated [`ImageIntoPdfConfig`].
    ///
    /// The position flags are resolved into a single [`Position`] here.
    ///
    /// # Errors
    ///
    /// Returns an error for page number 0, conflicting position flags and
    /// for `convert` with a PDF as image.
    pub fn to_config(&self) -> Result<ImageIntoPdfConfig> {
        let command = match &self.command {
            Command::Add(args) => InsertCommand::Add {
                image: args.image.clone(),
                pdf: args.pdf.clone(),
                position: Position::from_flags(args.after, args.before, args.first, args.last)?,
            },
            Command::Convert { image, pdf } => InsertCommand::Convert {
                image: image.clone(),
                pdf: pdf.clone(),
            },
            Command::Replace { pdf, number, image } => InsertCommand::Replace {
                pdf: pdf.clone(),
                page_number: *number,
                image: image.clone(),
            },
        };

        let config = ImageIntoPdfConfig {
            command,
            dry_run: self.dry_run,
            output: self.output.to_options(),
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Checks what needs no file I/O: page numbers start at 1.
    ///
    /// # Errors
    ///
    /// Returns an error if a page number is 0.
    pub fn validate(&self) -> Result<()> {
        let page_numbers = match &self.command {
            Command::Add(args) => [args.after, args.before],
            Command::Replace { number, .. } => [Some(*number), None],
            Command::Convert { .. } => [None, None],
        };

        if page_numbers.contains(&Some(0)) {
            return Err(ScanError::invalid_argument("Page numbers start at 1"));
        }

        Ok(())
    }
}
