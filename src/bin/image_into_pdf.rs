//! image-into-pdf - add or replace one page of a PDF with an image.

use clap::Parser;
use std::process;

use scanutils::ScanError;
use scanutils::cli::image_into_pdf::Cli;
use scanutils::config::ImageIntoPdfConfig;
use scanutils::exec::{ProcessRunner, check_dependencies};
use scanutils::output::OutputFormatter;
use scanutils::tools::image_into_pdf;

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
    cli.validate()?;
    let config = cli.to_config()?;
    check_dependencies(ImageIntoPdfConfig::DEPENDENCIES)?;

    let runner = ProcessRunner::new(formatter.clone()).with_dry_run(config.dry_run);

    image_into_pdf(&config, &runner, formatter).await?;
    Ok(())
}
