//! CLI of `mac-to-eui64`.

use clap::Parser;

use crate::error::Result;
use crate::tools::eui64::{Ipv6Prefix, parse_mac};

/// Convert MAC addresses to EUI-64 IPv6 addresses.
#[derive(Parser, Debug)]
#[command(name = "mac-to-eui64")]
#[command(version)]
#[command(about = "Convert MAC addresses to EUI-64 IPv6 addresses", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// The MAC address, e.g. 5c:51:4f:cf:0a:5d
    pub mac: String,

    /// The IPv6 /64 prefix, e.g. 2001:db8::/64
    ///
    /// Without a prefix only the interface identifier is printed.
    pub prefix: Option<String>,
}

impl Cli {
    /// Check both arguments before converting.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScanError::InvalidMac`] or
    /// [`crate::ScanError::InvalidPrefix`].
    pub fn validate(&self) -> Result<()> {
        parse_mac(&self.mac)?;
        if let Some(prefix) = &self.prefix {
            prefix.parse::<Ipv6Prefix>()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;

    #[test]
    fn test_parse() {
        let cli = Cli::try_parse_from(["mac-to-eui64", "5c:51:4f:cf:0a:5d", "2001:db8::/64"]).unwrap();
        assert_eq!(cli.prefix.as_deref(), Some("2001:db8::/64"));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let cli = Cli {
            mac: "5c:51:4f".to_string(),
            prefix: None,
        };
        assert!(matches!(cli.validate(), Err(ScanError::InvalidMac { .. })));

        let cli = Cli {
            mac: "5c:51:4f:cf:0a:5d".to_string(),
            prefix: Some("nonsense".to_string()),
        };
        assert!(matches!(cli.validate(), Err(ScanError::InvalidPrefix { .. })));
    }
}
