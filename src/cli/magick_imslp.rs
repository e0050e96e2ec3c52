//! CLI of `magick-imslp`.

use clap::{Args, Parser, Subcommand};

use crate::cli::OutputArgs;
use crate::config::{BitmapOptions, ImslpCommand, ImslpConfig, Threshold};
use crate::error::{Result, ScanError};
use crate::listing::doc_examples;

/// A wrapper for ImageMagick to process image files suitable for imslp.org
/// (International Music Score Library Project).
///
/// The target files are monochrome bitmap images at a resolution of 600 dpi
/// and the compression format CCITT group 4.
#[derive(Parser, Debug)]
#[command(name = "magick-imslp")]
#[command(version)]
#[command(about = "Convert scanned sheet music into monochrome bitmaps suitable for imslp.org")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub output: OutputArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of `magick-imslp`.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert images (or the images of one PDF) to monochrome bitmaps
    #[command(after_help = doc_examples("magick-imslp bitmap", "tiff", 2, false))]
    Bitmap(BitmapArgs),

    /// Extract the images of PDF files
    #[command(after_help = doc_examples("magick-imslp extract", "pdf", 2, false))]
    Extract {
        /// Input files, a directory or a quoted glob
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,
    },

    /// Join the input files into a single PDF file
    ///
    /// Input files that are not PDF files are converted into monochrome
    /// CCITT Group 4 compressed PDF files first.
    #[command(after_help = doc_examples("magick-imslp join", "png", 2, false))]
    Join {
        /// Input files, a directory or a quoted glob
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,
    },
}

/// Arguments of `magick-imslp bitmap`.
#[derive(Args, Debug, Clone)]
pub struct BitmapArgs {
    /// Backup original images (add _backup.ext to filename)
    #[arg(short, long)]
    pub backup: bool,

    /// Frame the images with a white border
    #[arg(short = 'B', long)]
    pub border: bool,

    /// Enlighten the border
    #[arg(short, long)]
    pub enlighten_border: bool,

    /// Overwrite the target file even if it seems to be already converted
    #[arg(short, long)]
    pub force: bool,

    /// Join single paged PDF files to one PDF file (implies --pdf)
    #[arg(short, long)]
    pub join: bool,

    /// Don't clean up the temporary files
    #[arg(short = 'N', long)]
    pub no_cleanup: bool,

    /// Convert one file after the other
    #[arg(short, long)]
    pub no_multiprocessing: bool,

    /// Generate a PDF file using CCITT Group 4 compression
    #[arg(short, long)]
    pub pdf: bool,

    /// Resize 200 percent
    #[arg(short, long)]
    pub resize: bool,

    /// Convert the same image with different threshold values to find the
    /// best threshold value
    #[arg(short = 'S', long)]
    pub threshold_series: bool,

    /// Threshold in percent, 0-100
    #[arg(short, long, value_name = "PERCENT", default_value = "50%")]
    pub threshold: Threshold,

    /// Run tesseract on the converted images to get searchable PDFs
    #[arg(long)]
    pub ocr: bool,

    /// Language of the text, e.g. deu (repeatable, requires --ocr)
    #[arg(long, value_name = "LANG")]
    pub ocr_language: Vec<String>,

    /// Input files, a directory or a quoted glob
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,
}

impl BitmapArgs {
    fn to_options(&self) -> BitmapOptions {
        BitmapOptions {
            backup: self.backup,
            border: self.border,
            enlighten_border: self.enlighten_border,
            force: self.force,
            join: self.join,
            no_cleanup: self.no_cleanup,
            no_multiprocessing: self.no_multiprocessing,
            pdf: self.pdf,
            resize: self.resize,
            threshold_series: self.threshold_series,
            threshold: self.threshold,
            ocr: self.ocr,
            ocr_languages: self.ocr_language.clone(),
        }
    }
}

impl Cli {
    /// The raw input arguments of the subcommand.
    pub fn inputs(&self) -> &[String] {
        match &self.command {
            Command::Bitmap(args) => &args.inputs,
            Command::Extract { inputs } | Command::Join { inputs } => inputs,
        }
    }

    /// Convert CLI arguments into a normalized [`ImslpConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if [`Cli::validate`] fails.
    pub fn to_config(&self) -> Result<ImslpConfig> {
        self.validate()?;

        let command = match &self.command {
            Command::Bitmap(args) => ImslpCommand::Bitmap(args.to_options()),
            Command::Extract { .. } => ImslpCommand::Extract,
            Command::Join { .. } => ImslpCommand::Join,
        };

        ImslpConfig {
            command,
            inputs: self.inputs().to_vec(),
            output: self.output.to_options(),
        }
        .normalize()
    }

    /// Validate CLI arguments before processing.
    ///
    /// # Errors
    ///
    /// Returns an error without inputs and for `--ocr-language` without
    /// `--ocr`.
    pub fn validate(&self) -> Result<()> {
        if self.inputs().is_empty() {
            return Err(ScanError::invalid_argument("No input files specified"));
        }

        if let Command::Bitmap(args) = &self.command
            && !args.ocr_language.is_empty()
            && !args.ocr
        {
            return Err(ScanError::invalid_argument("--ocr-language requires --ocr"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap_args(inputs: &[&str]) -> BitmapArgs {
        BitmapArgs {
            backup: false,
            border: false,
            enlighten_border: false,
            force: false,
            join: false,
            no_cleanup: false,
            no_multiprocessing: false,
            pdf: false,
            resize: false,
            threshold_series: false,
            threshold: Threshold::default(),
            ocr: false,
            ocr_language: Vec::new(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn create_test_cli(command: Command) -> Cli {
        Cli {
            output: OutputArgs::default(),
            command,
        }
    }

    #[test]
    fn test_bitmap_to_config() {
        let cli = create_test_cli(Command::Bitmap(bitmap_args(&["a.tif", "b.tif"])));
        let config = cli.to_config().unwrap();

        assert_eq!(config.inputs, ["a.tif", "b.tif"]);
        assert_eq!(config.command, ImslpCommand::Bitmap(BitmapOptions::default()));
    }

    #[test]
    fn test_join_implies_pdf() {
        let mut args = bitmap_args(&["a.tif"]);
        args.join = true;
        let config = create_test_cli(Command::Bitmap(args)).to_config().unwrap();

        let ImslpCommand::Bitmap(options) = config.command else {
            panic!("expected bitmap");
        };
        assert!(options.join);
        assert!(options.pdf);
    }

    #[test]
    fn test_ocr_language_requires_ocr() {
        let mut args = bitmap_args(&["a.tif"]);
        args.ocr_language = vec!["deu".to_string()];
        let mut cli = create_test_cli(Command::Bitmap(args));

        assert!(cli.validate().is_err());

        if let Command::Bitmap(args) = &mut cli.command {
            args.ocr = true;
        }
        let config = cli.to_config().unwrap();
        assert!(config.dependencies().iter().any(|dep| dep.executable == "tesseract"));
    }

    #[test]
    fn test_join_and_extract_commands() {
        let join = create_test_cli(Command::Join {
            inputs: vec!["a.png".to_string()],
        });
        assert_eq!(join.to_config().unwrap().command, ImslpCommand::Join);

        let extract = create_test_cli(Command::Extract { inputs: Vec::new() });
        assert!(extract.validate().is_err());
    }

    #[test]
    fn test_parse_threshold() {
        let cli = Cli::try_parse_from(["magick-imslp", "bitmap", "-t", "60", "a.tif"]).unwrap();
        let Command::Bitmap(args) = cli.command else {
            panic!("expected bitmap");
        };
        assert_eq!(args.threshold.percent(), 60);

        let cli = Cli::try_parse_from(["magick-imslp", "bitmap", "a.tif"]).unwrap();
        let Command::Bitmap(args) = cli.command else {
            panic!("expected bitmap");
        };
        assert_eq!(args.threshold, Threshold::default());

        assert!(Cli::try_parse_from(["magick-imslp", "bitmap", "-t", "101", "a.tif"]).is_err());
    }

    #[test]
    fn test_parse_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["magick-imslp", "join", "-v", "a.pdf", "b.pdf"]).unwrap();
        assert!(cli.output.verbose);
        assert_eq!(cli.inputs(), ["a.pdf", "b.pdf"]);
    }
}
