//! list-files - print the files a path or glob pattern resolves to.

use clap::Parser;
use std::process;

use scanutils::ScanError;
use scanutils::cli::list_files::Cli;
use scanutils::listing::list_files;
use scanutils::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        OutputFormatter::default().error(&format!("Error: {err}"));
        process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), ScanError> {
    cli.validate()?;
    let files = list_files(&cli.inputs, cli.glob.as_deref())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&files)?);
    } else if files.is_empty() {
        println!("Nothing found to list. :-(");
    } else {
        for file in &files {
            println!("{file}");
        }
    }

    Ok(())
}
