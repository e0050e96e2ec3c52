//! scanutils - command line helpers for scanned PDFs and images.
//!
//! The tools of this crate drive ImageMagick, Poppler, pdftk and tesseract.
//! The library holds everything the binaries share:
//!
//! - Insertion and replacement of PDF pages with images ([`assemble`])
//! - Conversion of scans into monochrome, Group 4 compressed PDFs
//!   ([`tools::imslp`])
//! - Glob-aware resolution of input files ([`listing`])
//! - Text export of PDFs, duplicate search and a few IPv6 helpers
//! - Uniform error handling and exit codes ([`error`])
//!
//! # Examples
//!
//! ## Planning a page insertion
//!
//! ```
//! use scanutils::assemble::{AssemblyPlan, Mode, Side};
//!
//! # fn example() -> scanutils::Result<()> {
//! let plan = AssemblyPlan::new(Mode::Add, Side::After, 2, 5)?;
//! assert_eq!(
//!     plan.cat_arguments("main.pdf", "insert.pdf"),
//!     ["A=main.pdf", "B=insert.pdf", "cat", "A1-2", "B1", "A3-end"]
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Running a tool
//!
//! ```no_run
//! use scanutils::config::{ExtractConfig, OutputOptions};
//! use scanutils::exec::ProcessRunner;
//! use scanutils::tools::extract_pdftext;
//! use std::path::PathBuf;
//!
//! # async fn example() -> scanutils::Result<()> {
//! let config = ExtractConfig {
//!     pdf: PathBuf::from("book.pdf"),
//!     output: OutputOptions::default(),
//! };
//! let formatter = config.output.formatter();
//! let runner = ProcessRunner::new(formatter.clone());
//!
//! let txt = extract_pdftext(&config, &runner, &formatter).await?;
//! println!("Wrote {txt}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assemble;
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod listing;
pub mod output;
pub mod path;
pub mod probe;
pub mod tools;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use path::FilePath;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
