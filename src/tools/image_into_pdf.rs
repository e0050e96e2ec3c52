//! Add or replace one page of a PDF with an image.
//!
//! An image is first turned into a single page PDF whose density makes it
//! as wide as the pages of the main PDF. That page is then inserted with
//! `pdftk` according to an [`AssemblyPlan`].

use std::path::Path;

use crate::assemble::{self, AssemblyPlan, Mode, Side};
use crate::config::{ImageIntoPdfConfig, InsertCommand};
use crate::error::{Result, ScanError};
use crate::exec::{self, CommandRunner, ToolCommand};
use crate::output::OutputFormatter;
use crate::path::FilePath;
use crate::probe;

/// Suffix of the PDF produced by the `convert` subcommand.
pub const INSERT_SUFFIX: &str = "_insert";

/// Density (pixels per inch) at which an image `image_width` pixels wide
/// fills a page `pdf_width` wide, given the page density `pdf_density_x`.
///
/// # Errors
///
/// Fails if the page width is zero.
pub fn density(pdf_density_x: u32, pdf_width: u32, image_width: u32) -> Result<u32> {
    if pdf_width == 0 {
        return Err(ScanError::other("The PDF page has a width of 0"));
    }
    let density = f64::from(pdf_density_x) / f64::from(pdf_width) * f64::from(image_width);
    Ok(density as u32)
}

/// `pdftk <pdf> cat 1 output <target>`.
pub fn first_page_command(pdf: &FilePath, target: &Path) -> ToolCommand {
    ToolCommand::new("pdftk")
        .args([pdf.path(), "cat", "1", "output"])
        .arg(target.to_string_lossy())
}

/// `convert <image> -units PixelsPerInch -density <density> <target>`.
pub fn image_to_pdf_command(
    convert: ToolCommand,
    image: &FilePath,
    density: u32,
    target: &Path,
) -> ToolCommand {
    convert
        .args([image.path(), "-units", "PixelsPerInch", "-density"])
        .arg(density.to_string())
        .arg(target.to_string_lossy())
}

/// Inserts images into PDFs through a [`CommandRunner`].
pub struct PageInserter<'a, R> {
    runner: &'a R,
    formatter: &'a OutputFormatter,
    convert: ToolCommand,
    dry_run: bool,
}

impl<'a, R: CommandRunner> PageInserter<'a, R> {
    /// Create an inserter using the ImageMagick convert command found on
    /// `$PATH`.
    pub fn new(runner: &'a R, formatter: &'a OutputFormatter) -> Self {
        Self::with_convert(runner, formatter, exec::convert_executable())
    }

    /// Create an inserter with an explicit convert command.
    pub fn with_convert(runner: &'a R, formatter: &'a OutputFormatter, convert: ToolCommand) -> Self {
        Self {
            runner,
            formatter,
            convert,
            dry_run: false,
        }
    }

    /// Print instead of performing file operations.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Turn `image` into a one page PDF inside `tmp_dir` matching the page
    /// width of `main_pdf`.
    pub async fn image_to_pdf_page(
        &self,
        main_pdf: &FilePath,
        image: &FilePath,
        tmp_dir: &Path,
    ) -> Result<FilePath> {
        // Identifying a single page is much faster than the whole document.
        let identify_pdf = tmp_dir.join("identify.pdf");
        self.runner
            .output(&first_page_command(main_pdf, &identify_pdf))
            .await?;

        let pdf_dimensions = probe::image_dimensions(self.runner, &identify_pdf).await?;
        let image_dimensions = probe::image_dimensions(self.runner, image.as_path()).await?;

        self.formatter.debug(&format!(
            "image_width {} pdf_width {} pdf_density_x {}",
            image_dimensions.width, pdf_dimensions.width, pdf_dimensions.x
        ));

        let density = density(pdf_dimensions.x, pdf_dimensions.width, image_dimensions.width)?;
        self.formatter.info(&format!(
            "Generate from the image file “{image}” a temporary pdf file with the density of “{density}”"
        ));

        let tmp_pdf = tmp_dir.join("tmp.pdf");
        self.runner
            .run(&image_to_pdf_command(
                self.convert.clone(),
                image,
                density,
                &tmp_pdf,
            ))
            .await?;

        FilePath::new(&tmp_pdf, true)
    }

    /// Insert `insert_pdf` into `main_pdf` and return the joined PDF.
    pub async fn assemble(
        &self,
        main_pdf: &FilePath,
        insert_pdf: &FilePath,
        plan: &AssemblyPlan,
    ) -> Result<FilePath> {
        let joined = assemble::joined_path(main_pdf);
        self.runner
            .run(&plan.command(main_pdf, insert_pdf, &joined))
            .await?;
        Ok(joined)
    }

    /// Run one `image-into-pdf` invocation and return the resulting file.
    pub async fn execute(&self, command: &InsertCommand) -> Result<FilePath> {
        let main_pdf = FilePath::new(command.pdf(), true)?;
        let image = FilePath::new(command.image(), true)?;

        for file in [&main_pdf, &image] {
            if !file.exists() {
                return Err(ScanError::file_not_found(file.as_path()));
            }
        }

        let tmp = tempfile::tempdir()?;

        let insert_pdf = if image.has_extension("pdf") {
            image.clone()
        } else {
            self.image_to_pdf_page(&main_pdf, &image, tmp.path()).await?
        };

        let info = probe::pdf_info(self.runner, main_pdf.as_path()).await?;

        match *command {
            InsertCommand::Add { position, .. } => {
                let (page_number, side) = position.resolve(info.page_count);
                let plan = AssemblyPlan::new(Mode::Add, side, page_number, info.page_count)?;
                let joined = self.assemble(&main_pdf, &insert_pdf, &plan).await?;

                self.formatter.success(&format!(
                    "Successfully added the image “{image}” {side} page {page_number} of the PDF file “{main_pdf}”. Result: “{joined}”"
                ));
                Ok(joined)
            }
            InsertCommand::Convert { .. } => {
                let result = main_pdf.with_append(INSERT_SUFFIX);

                if self.dry_run {
                    self.formatter
                        .plain(&format!("cp {insert_pdf} {result}"));
                } else {
                    // The temporary directory may be on another file system.
                    tokio::fs::copy(insert_pdf.as_path(), result.as_path()).await?;
                }

                self.formatter.success(&format!(
                    "Successfully converted the image “{image}” to the PDF file “{result}” using the dimensions of the PDF “{main_pdf}”."
                ));
                Ok(result)
            }
            InsertCommand::Replace { page_number, .. } => {
                let plan =
                    AssemblyPlan::new(Mode::Replace, Side::Before, page_number, info.page_count)?;
                let joined = self.assemble(&main_pdf, &insert_pdf, &plan).await?;

                self.formatter.success(&format!(
                    "Successfully replaced page {page_number} of the PDF file “{main_pdf}” with the image “{image}”. Result: “{joined}”"
                ));
                Ok(joined)
            }
        }
    }
}

/// Run `image-into-pdf` as configured.
pub async fn image_into_pdf<R: CommandRunner>(
    config: &ImageIntoPdfConfig,
    runner: &R,
    formatter: &OutputFormatter,
) -> Result<FilePath> {
    config.validate()?;
    PageInserter::new(runner, formatter)
        .with_dry_run(config.dry_run)
        .execute(&config.command)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Position;
    use crate::exec::testing::RecordingRunner;
    use std::fs;

    const PDFINFO: &str = "Pages:          5\nPage size:      595.276 x 841.89 pts (A4)\n";

    struct Fixture {
        dir: tempfile::TempDir,
        runner: RecordingRunner,
        formatter: OutputFormatter,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("book.pdf"), "%PDF").unwrap();
            fs::write(dir.path().join("page.pdf"), "%PDF").unwrap();
            fs::write(dir.path().join("scan.png"), "PNG").unwrap();
            Self {
                dir,
                runner: RecordingRunner::new(),
                formatter: OutputFormatter::quiet(),
            }
        }

        fn path(&self, name: &str) -> std::path::PathBuf {
            self.dir.path().join(name)
        }

        fn inserter(&self) -> PageInserter<'_, RecordingRunner> {
            PageInserter::with_convert(&self.runner, &self.formatter, ToolCommand::new("convert"))
        }

        fn line(&self, command: &str) -> String {
            command.replace("{dir}", &self.dir.path().to_string_lossy())
        }
    }

    #[test]
    fn test_density() {
        assert_eq!(density(72, 542, 1024).unwrap(), 136);
        assert_eq!(density(300, 2480, 2480).unwrap(), 300);
        assert!(density(72, 0, 1024).is_err());
    }

    #[tokio::test]
    async fn test_replace_with_pdf_page() {
        let fx = Fixture::new();
        fx.runner.respond("pdfinfo", PDFINFO);

        let result = fx
            .inserter()
            .execute(&InsertCommand::Replace {
                pdf: fx.path("book.pdf"),
                page_number: 2,
                image: fx.path("page.pdf"),
            })
            .await
            .unwrap();

        assert_eq!(result.path(), fx.line("{dir}/book_joined.pdf"));
        assert_eq!(
            fx.runner.command_lines(),
            [
                fx.line("pdfinfo {dir}/book.pdf"),
                fx.line(
                    "pdftk A={dir}/book.pdf B={dir}/page.pdf cat A1 B1 A3-end output {dir}/book_joined.pdf"
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_first() {
        let fx = Fixture::new();
        fx.runner.respond("pdfinfo", PDFINFO);

        fx.inserter()
            .execute(&InsertCommand::Add {
                image: fx.path("page.pdf"),
                pdf: fx.path("book.pdf"),
                position: Position::First,
            })
            .await
            .unwrap();

        assert_eq!(
            fx.runner.command_lines().last().unwrap(),
            &fx.line("pdftk {dir}/page.pdf {dir}/book.pdf cat output {dir}/book_joined.pdf")
        );
    }

    #[tokio::test]
    async fn test_add_image_converts_first() {
        let fx = Fixture::new();
        fx.runner.respond("magick", "w: 595 h: 842 x: 72 y: 72\n");
        fx.runner.respond("magick", "w: 1190 h: 1684 x: 300 y: 300\n");
        fx.runner.respond("pdftk", "");
        fx.runner.respond("pdfinfo", PDFINFO);

        fx.inserter()
            .execute(&InsertCommand::Add {
                image: fx.path("scan.png"),
                pdf: fx.path("book.pdf"),
                position: Position::After(2),
            })
            .await
            .unwrap();

        let commands = fx.runner.commands();
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[0].program(), "pdftk");
        assert_eq!(commands[0].arguments()[1..4], ["cat", "1", "output"]);
        assert_eq!(commands[1].program(), "magick");
        assert_eq!(commands[2].arguments().last().unwrap(), &fx.line("{dir}/scan.png"));

        let convert = &commands[3];
        assert_eq!(convert.program(), "convert");
        assert_eq!(
            convert.arguments()[..5],
            [fx.line("{dir}/scan.png"), "-units".into(), "PixelsPerInch".into(), "-density".into(), "144".into()]
        );
        let tmp_pdf = convert.arguments()[5].clone();
        assert!(tmp_pdf.ends_with("/tmp.pdf"));

        assert_eq!(commands[4].program(), "pdfinfo");
        assert_eq!(
            commands[5].to_string(),
            fx.line(&format!(
                "pdftk A={{dir}}/book.pdf B={tmp_pdf} cat A1-2 B1 A3-end output {{dir}}/book_joined.pdf"
            ))
        );
    }

    #[tokio::test]
    async fn test_page_out_of_range() {
        let fx = Fixture::new();
        fx.runner.respond("pdfinfo", PDFINFO);

        let err = fx
            .inserter()
            .execute(&InsertCommand::Replace {
                pdf: fx.path("book.pdf"),
                page_number: 6,
                image: fx.path("page.pdf"),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScanError::PageOutOfRange {
                page_number: 6,
                page_count: 5
            }
        ));
        assert_eq!(fx.runner.commands().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_main_pdf() {
        let fx = Fixture::new();

        let err = fx
            .inserter()
            .execute(&InsertCommand::Replace {
                pdf: fx.path("missing.pdf"),
                page_number: 1,
                image: fx.path("page.pdf"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ScanError::FileNotFound { .. }));
        assert!(fx.runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_convert_dry_run_leaves_no_file() {
        let fx = Fixture::new();
        fx.runner.respond("magick", "w: 595 h: 842 x: 72 y: 72\n");
        fx.runner.respond("magick", "w: 595 h: 842 x: 72 y: 72\n");
        fx.runner.respond("pdftk", "");
        fx.runner.respond("pdfinfo", PDFINFO);

        let result = fx
            .inserter()
            .with_dry_run(true)
            .execute(&InsertCommand::Convert {
                image: fx.path("scan.png"),
                pdf: fx.path("book.pdf"),
            })
            .await
            .unwrap();

        assert_eq!(result.path(), fx.line("{dir}/book_insert.pdf"));
        assert!(!result.exists());
    }
}
