//! dns-ipv6-prefix - print the IPv6 /64 prefix of a DNS name.

use clap::Parser;
use std::process;

use scanutils::ScanError;
use scanutils::cli::dns_ipv6_prefix::Cli;
use scanutils::output::OutputFormatter;
use scanutils::tools::dns_ipv6_prefix;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        OutputFormatter::default().error(&format!("Error: {err}"));
        process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), ScanError> {
    cli.validate()?;
    println!("{}", dns_ipv6_prefix(cli.dnsname.trim()).await?);
    Ok(())
}
