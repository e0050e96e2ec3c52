//! Configuration module for scanutils.
//!
//! This module holds the validated, normalized configuration that each CLI
//! produces from its arguments. It handles:
//! - Values with a grammar of their own ([`Threshold`])
//! - Resolution of mutually exclusive flags ([`Position`])
//! - Implied options (`--join` implies `--pdf`)
//! - The external executables each tool depends on

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::assemble::Side;
use crate::error::{Result, ScanError};
use crate::exec::Dependency;
use crate::output::OutputFormatter;

/// Where a new page goes when adding it to a PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Behind the given page.
    After(u32),
    /// In front of the given page.
    Before(u32),
    /// In front of the first page.
    First,
    /// Behind the last page.
    #[default]
    Last,
}

impl Position {
    /// Resolve the `--after`/`--before`/`--first`/`--last` flags.
    ///
    /// Without any flag the page is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if more than one flag is given or a page number is
    /// zero.
    pub fn from_flags(
        after: Option<u32>,
        before: Option<u32>,
        first: bool,
        last: bool,
    ) -> Result<Self> {
        let given = usize::from(after.is_some())
            + usize::from(before.is_some())
            + usize::from(first)
            + usize::from(last);
        if given > 1 {
            return Err(ScanError::invalid_argument(
                "--after, --before, --first and --last are mutually exclusive",
            ));
        }

        let position = match (after, before) {
            (Some(page), _) => Self::After(page),
            (_, Some(page)) => Self::Before(page),
            _ if first => Self::First,
            _ => Self::Last,
        };

        if let Self::After(0) | Self::Before(0) = position {
            return Err(ScanError::invalid_argument("Page numbers start at 1"));
        }

        Ok(position)
    }

    /// Target page number and side for a document with `page_count` pages.
    pub fn resolve(&self, page_count: u32) -> (u32, Side) {
        match *self {
            Self::After(page) => (page, Side::After),
            Self::Before(page) => (page, Side::Before),
            Self::First => (1, Side::Before),
            Self::Last => (page_count, Side::After),
        }
    }
}

/// A threshold percentage for monochrome conversion, 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u8);

impl Threshold {
    /// Thresholds tried by the threshold series: 40, 45, ..., 95.
    pub fn series() -> impl Iterator<Item = Threshold> {
        (40..100).step_by(5).map(Threshold)
    }

    /// Create a threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if `percent` is greater than 100.
    pub fn new(percent: u8) -> Result<Self> {
        if percent > 100 {
            return Err(ScanError::invalid_argument(format!(
                "{percent} is an invalid threshold. Should be 0-100"
            )));
        }
        Ok(Self(percent))
    }

    /// The percentage without the `%` sign.
    pub fn percent(&self) -> u8 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(50)
    }
}

impl FromStr for Threshold {
    type Err = ScanError;

    /// Parse `"60"` or `"60%"`.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim().strip_suffix('%').unwrap_or(s.trim());
        let percent: u16 = digits.parse().map_err(|_| {
            ScanError::invalid_argument(format!("Invalid threshold: {s}. Should be 0-100"))
        })?;
        let percent = u8::try_from(percent).map_err(|_| {
            ScanError::invalid_argument(format!("{percent} is an invalid threshold. Should be 0-100"))
        })?;
        Self::new(percent)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Verbosity flags shared by all tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputOptions {
    /// Echo external commands.
    pub verbose: bool,
    /// Suppress informational messages.
    pub quiet: bool,
    /// Colorize echoed commands.
    pub colorize: bool,
}

impl OutputOptions {
    /// Build the formatter for these options.
    pub fn formatter(&self) -> OutputFormatter {
        OutputFormatter::new(self.quiet, self.verbose).with_colorized_commands(self.colorize)
    }
}

/// The operation of `image-into-pdf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertCommand {
    /// Add an image (or single page PDF) to a PDF.
    Add {
        /// The image or PDF to add.
        image: PathBuf,
        /// The main PDF.
        pdf: PathBuf,
        /// Where to add it.
        position: Position,
    },
    /// Convert an image to a PDF page sized like the main PDF.
    Convert {
        /// The image to convert.
        image: PathBuf,
        /// The main PDF, only used for its dimensions.
        pdf: PathBuf,
    },
    /// Replace one page of a PDF.
    Replace {
        /// The main PDF.
        pdf: PathBuf,
        /// The page to replace.
        page_number: u32,
        /// The image or PDF replacing it.
        image: PathBuf,
    },
}

impl InsertCommand {
    /// The image argument.
    pub fn image(&self) -> &PathBuf {
        match self {
            Self::Add { image, .. } | Self::Convert { image, .. } | Self::Replace { image, .. } => {
                image
            }
        }
    }

    /// The main PDF argument.
    pub fn pdf(&self) -> &PathBuf {
        match self {
            Self::Add { pdf, .. } | Self::Convert { pdf, .. } | Self::Replace { pdf, .. } => pdf,
        }
    }
}

/// Configuration of `image-into-pdf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageIntoPdfConfig {
    /// What to do.
    pub command: InsertCommand,
    /// Only print the commands that would modify files.
    pub dry_run: bool,
    /// Output flags.
    pub output: OutputOptions,
}

impl ImageIntoPdfConfig {
    /// Executables this tool needs.
    pub const DEPENDENCIES: &'static [Dependency] = &[
        Dependency::from_package("pdfinfo", "poppler"),
        Dependency::bin("pdftk"),
        Dependency::from_package("convert", "imagemagick"),
    ];

    /// Validate what can be checked without probing the PDF.
    ///
    /// # Errors
    ///
    /// Fails for page number 0 and for `convert` with a PDF as image.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            InsertCommand::Replace { page_number: 0, .. } => {
                Err(ScanError::invalid_argument("Page numbers start at 1"))
            }
            InsertCommand::Convert { image, .. } if is_pdf(image) => Err(
                ScanError::invalid_argument("Specify an image file, not a PDF file."),
            ),
            _ => Ok(()),
        }
    }
}

/// Options of `magick-imslp bitmap`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitmapOptions {
    /// Copy an image to `_backup` before overwriting it.
    pub backup: bool,
    /// Frame the images with a white border.
    pub border: bool,
    /// Lighten the four border regions.
    pub enlighten_border: bool,
    /// Convert even if the target looks converted already.
    pub force: bool,
    /// Join the resulting PDFs into one file.
    pub join: bool,
    /// Keep temporary files.
    pub no_cleanup: bool,
    /// Convert one file after the other.
    pub no_multiprocessing: bool,
    /// Produce Group 4 compressed PDFs instead of PNGs.
    pub pdf: bool,
    /// Resize by 200 percent.
    pub resize: bool,
    /// Render one image with every threshold of [`Threshold::series`].
    pub threshold_series: bool,
    /// Threshold for the monochrome conversion.
    pub threshold: Threshold,
    /// Run OCR on the converted images.
    pub ocr: bool,
    /// OCR languages, joined with `+` for tesseract.
    pub ocr_languages: Vec<String>,
}

/// The operation of `magick-imslp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImslpCommand {
    /// Convert images to monochrome bitmaps.
    Bitmap(BitmapOptions),
    /// Extract the images of PDF files.
    Extract,
    /// Join images and PDFs into one PDF.
    Join,
}

/// Configuration of `magick-imslp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImslpConfig {
    /// What to do.
    pub command: ImslpCommand,
    /// Input arguments as given; resolved with [`crate::listing::list_files`].
    pub inputs: Vec<String>,
    /// Output flags.
    pub output: OutputOptions,
}

impl ImslpConfig {
    /// Executables this configuration needs.
    pub fn dependencies(&self) -> Vec<Dependency> {
        let mut dependencies = vec![
            Dependency::from_package("convert", "imagemagick"),
            Dependency::from_package("identify", "imagemagick"),
            Dependency::from_package("pdfimages", "poppler"),
            Dependency::from_package("pdfinfo", "poppler"),
            Dependency::bin("pdftk"),
        ];
        if let ImslpCommand::Bitmap(options) = &self.command
            && options.ocr
        {
            dependencies.push(Dependency::bin("tesseract"));
        }
        dependencies
    }

    /// Apply implied options and check the inputs.
    ///
    /// # Errors
    ///
    /// Fails without inputs or for OCR languages without `--ocr`.
    pub fn normalize(mut self) -> Result<Self> {
        if self.inputs.is_empty() {
            return Err(ScanError::invalid_argument("No input files specified"));
        }

        if let ImslpCommand::Bitmap(options) = &mut self.command {
            if options.join {
                options.pdf = true;
            }
            if !options.ocr_languages.is_empty() && !options.ocr {
                return Err(ScanError::invalid_argument(
                    "--ocr-language requires --ocr",
                ));
            }
        }

        Ok(self)
    }
}

/// Configuration of `extract-pdftext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// The PDF to extract text from.
    pub pdf: PathBuf,
    /// Output flags.
    pub output: OutputOptions,
}

impl ExtractConfig {
    /// Executables this tool needs.
    pub const DEPENDENCIES: &'static [Dependency] = &[
        Dependency::from_package("pdftotext", "poppler"),
        Dependency::from_package("pdfinfo", "poppler"),
    ];
}

/// Whether a path has a `pdf` extension, ignoring case.
pub fn is_pdf(path: &std::path::Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
