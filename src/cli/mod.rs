//! CLI argument parsing for the scanutils tools.
//!
//! Every tool has its own module with a `clap` derived `Cli` struct. Tools
//! that run external programs share the output flags in [`OutputArgs`].
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use scanutils::cli::magick_imslp::Cli;
//!
//! let cli = Cli::parse();
//! let config = cli.to_config().expect("Invalid configuration");
//! ```

pub mod dns_ipv6_prefix;
pub mod extract_pdftext;
pub mod find_dupes_by_size;
pub mod image_into_pdf;
pub mod list_files;
pub mod mac_to_eui64;
pub mod magick_imslp;

use clap::Args;

use crate::config::OutputOptions;

/// Output flags of the tools that run external programs.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Colorize the echoed commands
    #[arg(short, long, global = true)]
    pub colorize: bool,

    /// Echo every external command before running it
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl OutputArgs {
    /// The output options these flags select.
    pub fn to_options(&self) -> OutputOptions {
        OutputOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            colorize: self.colorize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_args_to_options() {
        let args = OutputArgs {
            colorize: true,
            verbose: true,
            quiet: false,
        };
        let options = args.to_options();

        assert!(options.colorize);
        assert!(options.verbose);
        assert!(!options.quiet);
        assert_eq!(OutputArgs::default().to_options(), OutputOptions::default());
    }
}
