//! extract-pdftext - export the text of a PDF page by page.

use clap::Parser;
use std::process;

use scanutils::ScanError;
use scanutils::cli::extract_pdftext::Cli;
use scanutils::config::ExtractConfig;
use scanutils::exec::{ProcessRunner, check_dependencies};
use scanutils::output::OutputFormatter;
use scanutils::tools::extract_pdftext;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let formatter = cli.output.to_options().formatter();

    if let Err(err) = run(cli, &formatter).await {
        formatter.error(&format!("Error: {err}"));
        process::exit(err.exit_code());
    }
}

async fn run(cli: Cli, formatter: &OutputFormatter) -> Result<(), ScanError> {
    let config = cli.to_config()?;
    check_dependencies(ExtractConfig::DEPENDENCIES)?;

    let runner = ProcessRunner::new(formatter.clone());

    let txt = extract_pdftext(&config, &runner, formatter).await?;
    formatter.debug(&format!("Wrote {txt}"));
    Ok(())
}
