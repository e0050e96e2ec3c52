//! Monochrome conversion of scanned sheet music for imslp.org.
//!
//! The target files are monochrome bitmaps, optionally as CCITT Group 4
//! compressed PDFs. A run works on the files resolved from the command line
//! or on the images extracted from a single PDF. Temporary files of a run
//! carry the run's `tmp_identifier` in their name and live next to the
//! inputs, in the inputs' common directory.
//!
//! Conversions of independent files run concurrently; results keep the
//! order of the inputs.

use std::path::PathBuf;

use futures::stream::{self, StreamExt};
use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::config::{BitmapOptions, ImslpCommand, ImslpConfig, Threshold};
use crate::error::{Result, ScanError};
use crate::exec::{self, CommandRunner, ToolCommand};
use crate::listing;
use crate::output::{OutputFormatter, Timer};
use crate::path::FilePath;
use crate::probe;

/// Marker of every file name a run creates.
pub const IDENTIFIER: &str = "magick";

/// Extracted images this small are masks or artifacts, not pages.
const MIN_IMAGE_SIZE: u64 = 200;

/// Per invocation state, built once and passed to every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Random part of [`RunContext::tmp_identifier`].
    pub token: String,
    /// `magick_<token>`; every temporary file name contains it.
    pub tmp_identifier: String,
    /// Deepest directory shared by all inputs.
    pub common_path: PathBuf,
    /// The first input file, absolute.
    pub first_input_file: FilePath,
    /// Whether the first input is a PDF.
    pub input_is_pdf: bool,
    /// All input files, absolute.
    pub input_files: Vec<FilePath>,
}

impl RunContext {
    /// Resolve `inputs` and draw a random token.
    ///
    /// # Errors
    ///
    /// Fails if the inputs resolve to no file at all.
    pub fn new<S: AsRef<str>>(inputs: &[S]) -> Result<Self> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(|c| char::from(c).to_ascii_lowercase())
            .collect();
        let files = listing::list_files(inputs, None)?;
        Self::with_token(&files, &token)
    }

    /// Build a context for already resolved files with a fixed token.
    pub fn with_token<S: AsRef<str>>(files: &[S], token: &str) -> Result<Self> {
        let input_files = files
            .iter()
            .map(|file| {
                let file: &str = file.as_ref();
                FilePath::new(file, true)
            })
            .collect::<Result<Vec<_>>>()?;

        let first_input_file = input_files
            .first()
            .cloned()
            .ok_or_else(|| ScanError::invalid_argument("No input files found"))?;

        let common_path = listing::common_path(&input_files)?;

        Ok(Self {
            token: token.to_string(),
            tmp_identifier: format!("{IDENTIFIER}_{token}"),
            common_path,
            input_is_pdf: first_input_file.has_extension("pdf"),
            first_input_file,
            input_files,
        })
    }

    /// Whether `name` belongs to the temporary files of this run.
    pub fn is_temporary(&self, name: &str) -> bool {
        name.contains(&self.tmp_identifier)
    }
}

/// Regions of the four borders as `-region ... -level 0%,30%` arguments.
///
/// The border is 5 percent of the mean of width and height.
pub fn enlighten_border(width: u32, height: u32) -> Vec<String> {
    let border = ((f64::from(width) + f64::from(height)) / 2.0 * 0.05).round() as u32;
    let (w, h, b) = (width, height, border);

    let regions = [
        format!("{}x{}", w.saturating_sub(b), b),
        format!("{}x{}+{}", b, h.saturating_sub(b), w.saturating_sub(b)),
        format!("{}x{}+{}+{}", w.saturating_sub(b), b, b, h.saturating_sub(b)),
        format!("{}x{}+{}+{}", b, h.saturating_sub(b), 0, b),
    ];

    regions
        .into_iter()
        .flat_map(|region| {
            [
                "-region".to_string(),
                region,
                "-level".to_string(),
                "0%,30%".to_string(),
            ]
        })
        .collect()
}

/// The file a source image is converted to.
///
/// OCR reads the PNG and writes the PDF itself. Unless the results are
/// joined (and cleaned up afterwards) the tmp identifier is removed from the
/// name.
pub fn target_path(source: &FilePath, options: &BitmapOptions, ctx: &RunContext) -> FilePath {
    let extension = if options.pdf && !options.ocr { "pdf" } else { "png" };
    if options.join {
        source.derive(Some(extension), "", "")
    } else {
        source.derive(Some(extension), "", &format!("_{}", ctx.tmp_identifier))
    }
}

/// The convert command turning `source` into `target`.
///
/// `dimensions` are required for `--enlighten-border` only.
pub fn magick_command(
    convert: ToolCommand,
    source: &FilePath,
    target: &FilePath,
    options: &BitmapOptions,
    dimensions: Option<(u32, u32)>,
) -> ToolCommand {
    let mut command = convert;

    if options.enlighten_border
        && let Some((width, height)) = dimensions
    {
        command = command.args(enlighten_border(width, height));
    }

    if options.resize {
        command = command.args(["-resize", "200%"]);
    }

    command = command
        .args(["-deskew", "40%", "-threshold"])
        .arg(options.threshold.to_string())
        .args(["-trim", "+repage"]);

    if options.border {
        command = command.args(["-border", "5%", "-bordercolor", "#FFFFFF"]);
    }

    if options.pdf && !options.ocr {
        command = command.args(["-compress", "Group4", "-monochrome"]);
    }

    command.args([source.path(), target.path()])
}

/// `tesseract [-l a+b] <image> <image base> pdf`; tesseract appends the
/// `.pdf` itself.
pub fn tesseract_command(image: &FilePath, languages: &[String]) -> ToolCommand {
    let mut command = ToolCommand::new("tesseract");
    if !languages.is_empty() {
        command = command.arg("-l").arg(languages.join("+"));
    }
    command.args([image.path(), image.base(), "pdf"])
}

/// `pdfimages -tiff [-f N -l N] <pdf> <basename>_<tmp identifier>`, run in
/// the common path.
pub fn pdfimages_command(pdf: &FilePath, ctx: &RunContext, page_number: Option<u32>) -> ToolCommand {
    let mut command = ToolCommand::new("pdfimages").arg("-tiff");
    if let Some(page) = page_number {
        let page = page.to_string();
        command = command.args(["-f", page.as_str(), "-l", page.as_str()]);
    }
    command
        .arg(pdf.path())
        .arg(format!("{}_{}", pdf.basename(), ctx.tmp_identifier))
        .current_dir(&ctx.common_path)
}

/// `pdftk <pdfs> cat output <common path>/<first basename>_magick.pdf`.
pub fn join_command(pdfs: &[FilePath], ctx: &RunContext) -> (ToolCommand, PathBuf) {
    let target = ctx
        .common_path
        .join(format!("{}_{IDENTIFIER}.pdf", ctx.first_input_file.basename()));

    let command = ToolCommand::new("pdftk")
        .args(pdfs.iter().map(FilePath::path))
        .args(["cat", "output"])
        .arg(target.to_string_lossy());

    (command, target)
}

/// The convert command rendering `input` with one threshold of a series,
/// and its target `<base>_threshold-N.png`.
pub fn threshold_command(
    convert: ToolCommand,
    input: &FilePath,
    threshold: Threshold,
    ctx: &RunContext,
) -> (ToolCommand, String) {
    let appendix = format!("_threshold-{}", threshold.percent());
    let target = input
        .derive(Some("png"), &appendix, &ctx.tmp_identifier)
        .path()
        .replace("_-000", "");

    let command = convert
        .arg("-threshold")
        .arg(threshold.to_string())
        .arg(input.path())
        .arg(target.as_str());

    (command, target)
}

/// `convert -compress Group4 -monochrome <source> <source.pdf>`.
pub fn group4_command(convert: ToolCommand, source: &FilePath) -> (ToolCommand, FilePath) {
    let target = source.with_extension("pdf");
    let command = convert
        .args(["-compress", "Group4", "-monochrome"])
        .args([source.path(), target.path()]);
    (command, target)
}

/// The images of this run in the common path, sorted.
pub async fn collect_images(ctx: &RunContext) -> Result<Vec<FilePath>> {
    let mut images = Vec::new();
    let mut entries = tokio::fs::read_dir(&ctx.common_path).await?;

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if !ctx.is_temporary(&name.to_string_lossy()) {
            continue;
        }
        if entry.metadata().await?.len() > MIN_IMAGE_SIZE {
            images.push(entry.path());
        }
    }

    images.sort();
    images
        .iter()
        .map(|image| FilePath::new(image, true))
        .collect()
}

/// Delete every temporary file of this run; returns how many were removed.
pub async fn cleanup(ctx: &RunContext) -> Result<usize> {
    let mut removed = 0;
    let mut entries = tokio::fs::read_dir(&ctx.common_path).await?;

    while let Some(entry) = entries.next_entry().await? {
        if ctx.is_temporary(&entry.file_name().to_string_lossy()) {
            tokio::fs::remove_file(entry.path()).await?;
            removed += 1;
        }
    }

    Ok(removed)
}

/// Number of conversions running at the same time.
fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Executes the steps of a `magick-imslp` run.
pub struct Imslp<'a, R> {
    runner: &'a R,
    formatter: &'a OutputFormatter,
    convert: ToolCommand,
    ctx: RunContext,
}

impl<'a, R: CommandRunner> Imslp<'a, R> {
    /// Create a pipeline for `ctx` with an explicit convert command.
    pub fn new(
        runner: &'a R,
        formatter: &'a OutputFormatter,
        convert: ToolCommand,
        ctx: RunContext,
    ) -> Self {
        Self {
            runner,
            formatter,
            convert,
            ctx,
        }
    }

    /// The run context.
    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    /// Extract the images of `pdf` (or of a single page) into the common
    /// path and return them.
    pub async fn pdf_to_images(&self, pdf: &FilePath, page_number: Option<u32>) -> Result<Vec<FilePath>> {
        self.runner
            .run(&pdfimages_command(pdf, &self.ctx, page_number))
            .await?;
        collect_images(&self.ctx).await
    }

    /// Convert one image; returns the file that ends up in a join.
    pub async fn do_magick(&self, source: &FilePath, options: &BitmapOptions) -> Result<FilePath> {
        let target = target_path(source, options, &self.ctx);

        if source == &target {
            let info = probe::image_info(self.runner, target.as_path()).await?;
            if info.unique_colors == 2 && !options.force {
                self.formatter.warning(&format!(
                    "The target file “{target}” seems to be already converted."
                ));
                return Ok(target);
            }

            if options.backup {
                let backup = source.with_append("_backup");
                tokio::fs::copy(source.as_path(), backup.as_path()).await?;
            }
        }

        let dimensions = if options.enlighten_border {
            let info = probe::image_info(self.runner, source.as_path()).await?;
            Some((info.width, info.height))
        } else {
            None
        };

        self.runner
            .run(&magick_command(
                self.convert.clone(),
                source,
                &target,
                options,
                dimensions,
            ))
            .await?;

        if options.ocr {
            self.runner
                .run(&tesseract_command(&target, &options.ocr_languages))
                .await?;
            return Ok(target.with_extension("pdf"));
        }

        Ok(target)
    }

    /// Convert all `sources`, concurrently unless `--no-multiprocessing`.
    ///
    /// The results are in the order of `sources`.
    pub async fn convert_all(
        &self,
        sources: &[FilePath],
        options: &BitmapOptions,
    ) -> Result<Vec<FilePath>> {
        if options.no_multiprocessing {
            let mut targets = Vec::with_capacity(sources.len());
            for source in sources {
                targets.push(self.do_magick(source, options).await?);
            }
            return Ok(targets);
        }

        let mut results: Vec<(usize, Result<FilePath>)> = stream::iter(sources.iter().enumerate())
            .map(|(index, source)| async move { (index, self.do_magick(source, options).await) })
            .buffer_unordered(worker_count())
            .collect()
            .await;

        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }

    /// Join PDFs into `<first basename>_magick.pdf`.
    pub async fn join(&self, pdfs: &[FilePath]) -> Result<PathBuf> {
        let (command, target) = join_command(pdfs, &self.ctx);
        self.runner.run(&command).await?;
        self.formatter
            .success(&format!("Successfully created: {}", target.display()));
        Ok(target)
    }

    /// Render one image with every threshold of [`Threshold::series`].
    ///
    /// For a PDF a random page is extracted first.
    pub async fn threshold_series(&self) -> Result<Vec<String>> {
        let input = if self.ctx.input_is_pdf {
            let pdf = &self.ctx.first_input_file;
            let page_count = probe::pdf_page_count(self.runner, pdf.as_path()).await?;
            let page_number = rand::thread_rng().gen_range(1..=page_count);
            self.formatter.info(&format!(
                "Used page number {page_number} of {page_count} pages to generate a series of images with different threshold values."
            ));

            self.pdf_to_images(pdf, Some(page_number))
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| ScanError::other(format!("No images found on page {page_number} of {pdf}")))?
        } else {
            self.ctx.first_input_file.clone()
        };

        let mut targets = Vec::new();
        for threshold in Threshold::series() {
            let (command, target) = threshold_command(self.convert.clone(), &input, threshold, &self.ctx);
            self.runner.run(&command).await?;
            targets.push(target);
        }
        Ok(targets)
    }

    /// The `bitmap` subcommand.
    pub async fn bitmap(&self, options: &BitmapOptions) -> Result<Vec<FilePath>> {
        if options.threshold_series {
            self.threshold_series().await?;
            self.cleanup_unless(options.no_cleanup).await?;
            return Ok(Vec::new());
        }

        let sources = if self.ctx.input_is_pdf {
            if self.ctx.input_files.len() > 1 {
                return Err(ScanError::invalid_argument("Specify only one PDF file."));
            }
            self.pdf_to_images(&self.ctx.first_input_file, None).await?
        } else {
            self.ctx.input_files.clone()
        };

        let targets = self.convert_all(&sources, options).await?;

        if options.join {
            self.join(&targets).await?;
        }

        self.cleanup_unless(options.no_cleanup).await?;
        Ok(targets)
    }

    /// The `extract` subcommand: images of every PDF input, kept under
    /// `<basename>-NNN.tif`.
    pub async fn extract(&self) -> Result<Vec<FilePath>> {
        let mut images = Vec::new();

        for pdf in self.ctx.input_files.iter().filter(|f| f.has_extension("pdf")) {
            for image in self.pdf_to_images(pdf, None).await? {
                let kept = image.derive(None, "", &format!("_{}", self.ctx.tmp_identifier));
                tokio::fs::rename(image.as_path(), kept.as_path()).await?;
                images.push(kept);
            }
        }
        cleanup(&self.ctx).await?;

        if images.is_empty() {
            self.formatter.warning("No images extracted.");
        }
        Ok(images)
    }

    /// The `join` subcommand: images are compressed to PDFs first.
    pub async fn join_inputs(&self) -> Result<PathBuf> {
        let mut pdfs = Vec::with_capacity(self.ctx.input_files.len());

        for input in &self.ctx.input_files {
            if input.has_extension("pdf") {
                pdfs.push(input.clone());
            } else {
                let (command, target) = group4_command(self.convert.clone(), input);
                self.runner.run(&command).await?;
                pdfs.push(target);
            }
        }

        self.join(&pdfs).await
    }

    async fn cleanup_unless(&self, no_cleanup: bool) -> Result<()> {
        if !no_cleanup {
            let removed = cleanup(&self.ctx).await?;
            self.formatter
                .debug(&format!("Removed {removed} temporary file(s)"));
        }
        Ok(())
    }
}

/// Run `magick-imslp` as configured.
pub async fn magick_imslp<R: CommandRunner>(
    config: ImslpConfig,
    runner: &R,
    formatter: &OutputFormatter,
) -> Result<()> {
    let timer = Timer::start();
    let config = config.normalize()?;
    exec::check_dependencies(&config.dependencies())?;

    let ctx = RunContext::new(&config.inputs)?;
    let imslp = Imslp::new(runner, formatter, exec::convert_executable(), ctx);

    match &config.command {
        ImslpCommand::Bitmap(options) => {
            imslp.bitmap(options).await?;
        }
        ImslpCommand::Extract => {
            imslp.extract().await?;
        }
        ImslpCommand::Join => {
            imslp.join_inputs().await?;
        }
    }

    formatter.info(&format!("Execution time: {}", timer.format_elapsed()));
    Ok(())
}
