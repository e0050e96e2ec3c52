//! CLI of `dns-ipv6-prefix`.

use clap::Parser;

use crate::error::{Result, ScanError};

/// Get the IPv6 prefix from a DNS name.
#[derive(Parser, Debug)]
#[command(name = "dns-ipv6-prefix")]
#[command(version)]
#[command(about = "Print the IPv6 /64 prefix of a DNS name", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// The DNS name, e.g. example.org
    pub dnsname: String,
}

impl Cli {
    /// The name must not be blank.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name.
    pub fn validate(&self) -> Result<()> {
        if self.dnsname.trim().is_empty() {
            return Err(ScanError::invalid_argument("The DNS name must not be empty"));
        }
        Ok(())
    }
}
