//! magick-imslp - convert scanned sheet music into monochrome bitmaps.

use clap::Parser;
use std::process;

use scanutils::ScanError;
use scanutils::cli::magick_imslp::Cli;
use scanutils::exec::ProcessRunner;
use scanutils::output::OutputFormatter;
use scanutils::tools::magick_imslp;

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

    let runner = ProcessRunner::new(formatter.clone());

    magick_imslp(config, &runner, formatter).await
}
