//! Metadata probes backed by external tools.
//!
//! The tools print fixed-format text; the parsers here turn that text into
//! typed values or a [`ScanError::Parse`] carrying the raw output. Nothing
//! is cached: every probe runs the tool again.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{Result, ScanError};
use crate::exec::{CommandRunner, ToolCommand};

static PAGES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Pages:\s*(\d+)").unwrap());

static PAGE_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Page size:\s*([\d.]+) x ([\d.]+)\s*pts").unwrap());

static IDENTIFY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"w: ([\d.]+) h: ([\d.]+) x: ([\d.]+) y: ([\d.]+)").unwrap());

/// Format string passed to `magick identify` for [`ImageDimensions`].
pub const IDENTIFY_FORMAT: &str = "w: %w h: %h x: %x y: %y\n";

/// Page count and page size of a PDF as reported by `pdfinfo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfInfo {
    /// Page width in points, exactly as printed (e.g. `"658.8"`).
    pub width: String,
    /// Page height in points, exactly as printed.
    pub height: String,
    /// Number of pages, always positive.
    pub page_count: u32,
}

impl PdfInfo {
    /// Parse the output of `pdfinfo`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Parse`] if the page count or the page size is
    /// missing, or if the page count is zero.
    pub fn parse(output: &str) -> Result<Self> {
        let page_count = parse_page_count(output)?;

        let size = PAGE_SIZE_RE
            .captures(output)
            .ok_or_else(|| ScanError::parse("pdfinfo", output))?;

        Ok(Self {
            width: size[1].to_string(),
            height: size[2].to_string(),
            page_count,
        })
    }

    /// Page width in points.
    pub fn width_pts(&self) -> Result<f64> {
        parse_float(&self.width)
    }

    /// Page height in points.
    pub fn height_pts(&self) -> Result<f64> {
        parse_float(&self.height)
    }
}

fn parse_float(value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| ScanError::parse("pdfinfo", value))
}

/// Extract only the page count from `pdfinfo` output.
///
/// # Errors
///
/// Returns [`ScanError::Parse`] if there is no positive page count.
pub fn parse_page_count(output: &str) -> Result<u32> {
    PAGES_RE
        .captures(output)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|count| *count > 0)
        .ok_or_else(|| ScanError::parse("pdfinfo", output))
}

/// The `pdfinfo <pdf>` command.
pub fn pdfinfo_command(pdf: &Path) -> ToolCommand {
    ToolCommand::new("pdfinfo").arg(pdf.to_string_lossy())
}

/// Run `pdfinfo` on `pdf` and parse its output.
pub async fn pdf_info<R: CommandRunner>(runner: &R, pdf: &Path) -> Result<PdfInfo> {
    let output = runner.output(&pdfinfo_command(pdf)).await?;
    PdfInfo::parse(&output)
}

/// Run `pdfinfo` on `pdf` and return the page count.
pub async fn pdf_page_count<R: CommandRunner>(runner: &R, pdf: &Path) -> Result<u32> {
    let output = runner.output(&pdfinfo_command(pdf)).await?;
    parse_page_count(&output)
}

/// Size and resolution of an image (or of the first page of a PDF) as
/// reported by `magick identify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Horizontal resolution.
    pub x: u32,
    /// Vertical resolution.
    pub y: u32,
}

impl ImageDimensions {
    /// Parse output produced with [`IDENTIFY_FORMAT`]. Values are rounded
    /// to the nearest integer.
    pub fn parse(output: &str) -> Result<Self> {
        let caps = IDENTIFY_RE
            .captures(output)
            .ok_or_else(|| ScanError::parse("magick identify", output))?;

        let number = |index: usize| -> Result<u32> {
            caps[index]
                .parse::<f64>()
                .map(|value| value.round() as u32)
                .map_err(|_| ScanError::parse("magick identify", output))
        };

        Ok(Self {
            width: number(1)?,
            height: number(2)?,
            x: number(3)?,
            y: number(4)?,
        })
    }
}

/// The `magick identify -format ...` command for [`ImageDimensions`].
pub fn identify_dimensions_command(path: &Path) -> ToolCommand {
    ToolCommand::new("magick")
        .args(["identify", "-format", IDENTIFY_FORMAT])
        .arg(path.to_string_lossy())
}

/// Run `magick identify` on `path` and parse the dimensions.
pub async fn image_dimensions<R: CommandRunner>(runner: &R, path: &Path) -> Result<ImageDimensions> {
    let output = runner.output(&identify_dimensions_command(path)).await?;
    ImageDimensions::parse(&output)
}

/// Width, height and number of unique colors of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Number of unique colors; a converted bitmap has 2.
    pub unique_colors: u32,
}

/// The `identify -format <format> <path>` command.
pub fn identify_format_command(path: &Path, format: &str) -> ToolCommand {
    ToolCommand::new("identify")
        .args(["-format", format])
        .arg(path.to_string_lossy())
}

/// Query width (`%w`), height (`%h`) and unique colors (`%k`) of an image.
pub async fn image_info<R: CommandRunner>(runner: &R, path: &Path) -> Result<ImageInfo> {
    let mut values = [0u32; 3];

    for (value, format) in values.iter_mut().zip(["%w", "%h", "%k"]) {
        let output = runner.output(&identify_format_command(path, format)).await?;
        *value = output
            .trim()
            .parse()
            .map_err(|_| ScanError::parse("identify", output.as_str()))?;
    }

    Ok(ImageInfo {
        width: values[0],
        height: values[1],
        unique_colors: values[2],
    })
}
