//! One module per command line tool.
//!
//! The functions here orchestrate the shared building blocks ([`crate::exec`],
//! [`crate::probe`], [`crate::assemble`], [`crate::listing`]) for a single
//! tool; the binaries in `src/bin` only parse arguments and call them.

pub mod dns;
pub mod dupes;
pub mod eui64;
pub mod extract_text;
pub mod image_into_pdf;
pub mod imslp;

pub use dns::dns_ipv6_prefix;
pub use dupes::{DuplicateReport, find_duplicates};
pub use eui64::mac_to_eui64;
pub use extract_text::extract_pdftext;
pub use image_into_pdf::image_into_pdf;
pub use imslp::magick_imslp;
