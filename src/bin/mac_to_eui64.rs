//! mac-to-eui64 - convert a MAC address to an EUI-64 IPv6 address.

use clap::Parser;
use std::process;

use scanutils::ScanError;
use scanutils::cli::mac_to_eui64::Cli;
use scanutils::output::OutputFormatter;
use scanutils::tools::mac_to_eui64;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        OutputFormatter::default().error(&format!("Error: {err}"));
        process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), ScanError> {
    cli.validate()?;
    println!("{}", mac_to_eui64(&cli.mac, cli.prefix.as_deref())?);
    Ok(())
}
