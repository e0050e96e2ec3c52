//! Plain text export of a PDF, one section per page.
//!
//! The text of every page is extracted with `pdftotext`, reduced to lines
//! that look like running text, stripped of everything but letters, digits
//! and spaces, and wrapped at [`LINE_LENGTH`] columns. The result is written
//! next to the PDF as `<name>.txt` and echoed to stdout.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::config::ExtractConfig;
use crate::error::{Result, ScanError};
use crate::exec::{CommandRunner, ToolCommand};
use crate::output::OutputFormatter;
use crate::path::FilePath;
use crate::probe;

/// Column at which text is wrapped; also the width of the page separator.
pub const LINE_LENGTH: usize = 72;

/// Lines up to this many characters are headers, page numbers and the like.
const MIN_LINE_CHARS: usize = 20;

static DISALLOWED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zäöüA-ZÄÖÜß0-9 ]").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// The `pdftotext` command extracting page `page` into `target`.
pub fn pdftotext_command(pdf: &FilePath, page: u32, target: &Path) -> ToolCommand {
    let page = page.to_string();
    ToolCommand::new("pdftotext")
        .args(["-f", page.as_str(), "-l", page.as_str(), pdf.path()])
        .arg(target.to_string_lossy())
}

/// Reduce raw `pdftotext` output to a single line of clean text.
pub fn clean_page_text(raw: &str) -> String {
    let joined = raw
        .lines()
        .filter(|line| line.chars().count() > MIN_LINE_CHARS)
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\'', "’");

    let stripped = DISALLOWED_RE.replace_all(&joined, "");
    WHITESPACE_RE.replace_all(&stripped, " ").into_owned()
}

/// Greedily wrap `text` at `width` columns.
///
/// Words longer than `width` are split. Leading and trailing whitespace is
/// dropped; empty text yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while !word.is_empty() {
            let space = usize::from(current_len > 0);

            if current_len + space + word.len() <= width {
                if space == 1 {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += space + word.len();
                break;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }

            let rest = word.split_off(width.max(1));
            lines.push(word.iter().collect());
            word = rest;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

/// The lines introducing page `page`.
pub fn page_header(page: u32) -> [String; 5] {
    [
        String::new(),
        "-".repeat(LINE_LENGTH),
        String::new(),
        format!("## Seite {page}"),
        String::new(),
    ]
}

/// The text file being written; every line is echoed as well.
struct TxtFile<'a> {
    writer: BufWriter<tokio::fs::File>,
    formatter: &'a OutputFormatter,
}

impl<'a> TxtFile<'a> {
    async fn create(path: &FilePath, formatter: &'a OutputFormatter) -> Result<Self> {
        let file = tokio::fs::File::create(path.as_path()).await?;
        Ok(Self {
            writer: BufWriter::new(file),
            formatter,
        })
    }

    async fn add_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.formatter.plain(line);
        Ok(())
    }

    async fn finish(mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// Extract the text of every page of `config.pdf` into `<base>.txt`.
///
/// Returns the path of the text file.
pub async fn extract_pdftext<R: CommandRunner>(
    config: &ExtractConfig,
    runner: &R,
    formatter: &OutputFormatter,
) -> Result<FilePath> {
    let pdf = FilePath::new(&config.pdf, true)?;
    if !pdf.exists() {
        return Err(ScanError::file_not_found(pdf.as_path()));
    }

    let txt = pdf.with_extension("txt");
    let page_count = probe::pdf_page_count(runner, pdf.as_path()).await?;
    let tmp = tempfile::tempdir()?;

    let mut txt_file = TxtFile::create(&txt, formatter).await?;
    txt_file.add_line(&format!("# {}", pdf.basename())).await?;

    for page in 1..=page_count {
        for line in page_header(page) {
            txt_file.add_line(&line).await?;
        }

        let page_txt = tmp.path().join(format!("{page}.txt"));
        runner
            .run(&pdftotext_command(&pdf, page, &page_txt))
            .await?;

        let raw = tokio::fs::read(&page_txt).await?;
        for line in wrap(&clean_page_text(&String::from_utf8_lossy(&raw)), LINE_LENGTH) {
            txt_file.add_line(&line).await?;
        }
    }

    txt_file.finish().await?;
    Ok(txt)
}
