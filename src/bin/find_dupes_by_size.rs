//! find-dupes-by-size - report files of equal size below a directory.

use clap::Parser;
use std::process;

use scanutils::ScanError;
use scanutils::cli::find_dupes_by_size::Cli;
use scanutils::output::OutputFormatter;
use scanutils::tools::find_duplicates;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        OutputFormatter::default().error(&format!("Error: {err}"));
        process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), ScanError> {
    cli.validate()?;
    let report = find_duplicates(&cli.path)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.lines() {
            println!("{line}");
        }
    }

    Ok(())
}
