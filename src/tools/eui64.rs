//! MAC address to EUI-64 conversion (RFC 4291, section 2.5.1).

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use crate::error::{Result, ScanError};

/// An IPv6 network given as `address/length`.
///
/// Host bits of the address are cleared, so `2001:db8::1/64` is accepted
/// as `2001:db8::/64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Prefix {
    network: Ipv6Addr,
    length: u8,
}

impl Ipv6Prefix {
    /// Build the prefix of `address` with `length` bits.
    ///
    /// # Errors
    ///
    /// Fails if `length` is greater than 128.
    pub fn new(address: Ipv6Addr, length: u8) -> Result<Self> {
        if length > 128 {
            return Err(ScanError::InvalidPrefix {
                prefix: format!("{address}/{length}"),
                reason: "the prefix length must be 0-128".to_string(),
            });
        }

        let mask = u128::MAX.checked_shl(128 - u32::from(length)).unwrap_or(0);
        Ok(Self {
            network: Ipv6Addr::from(u128::from(address) & mask),
            length,
        })
    }

    /// The /64 network containing `address`.
    pub fn slash64(address: Ipv6Addr) -> Self {
        Self {
            network: Ipv6Addr::from(u128::from(address) & (u128::MAX << 64)),
            length: 64,
        }
    }

    /// The network address.
    pub fn network(&self) -> Ipv6Addr {
        self.network
    }

    /// The prefix length in bits.
    pub fn length(&self) -> u8 {
        self.length
    }
}

impl FromStr for Ipv6Prefix {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| ScanError::InvalidPrefix {
            prefix: s.to_string(),
            reason: reason.to_string(),
        };

        let (address, length) = match s.split_once('/') {
            Some((address, length)) => (
                address,
                length
                    .parse::<u8>()
                    .map_err(|_| invalid("the prefix length is not a number"))?,
            ),
            None => (s, 128),
        };

        let address: Ipv6Addr = address
            .parse()
            .map_err(|_| invalid("not an IPv6 address"))?;

        Self::new(address, length).map_err(|_| invalid("the prefix length must be 0-128"))
    }
}

impl fmt::Display for Ipv6Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.length)
    }
}

/// Parse a MAC address written with `:`, `-`, `.` or no separators.
pub fn parse_mac(mac: &str) -> Result<[u8; 6]> {
    let invalid = || ScanError::InvalidMac {
        mac: mac.to_string(),
    };

    let digits: String = mac
        .chars()
        .filter(|c| !matches!(c, '.' | ':' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let mut bytes = [0u8; 6];
    for (index, byte) in bytes.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16).map_err(|_| invalid())?;
    }
    Ok(bytes)
}

/// The modified EUI-64 interface identifier of a MAC address: `ff:fe`
/// inserted in the middle and the universal/local bit flipped.
pub fn interface_id(mac: [u8; 6]) -> u64 {
    let eui = [
        mac[0] ^ 0x02,
        mac[1],
        mac[2],
        0xff,
        0xfe,
        mac[3],
        mac[4],
        mac[5],
    ];
    u64::from_be_bytes(eui)
}

/// Convert a MAC address to its EUI-64 identifier, or to a full IPv6
/// address inside `prefix`.
///
/// Without a prefix the identifier is printed in four groups of four hex
/// digits, e.g. `5e51:4fff:fecf:0a5d`.
///
/// # Errors
///
/// Fails for malformed MAC addresses and prefixes, and for prefixes longer
/// than 64 bits, which leave no room for the identifier.
pub fn mac_to_eui64(mac: &str, prefix: Option<&str>) -> Result<String> {
    let id = interface_id(parse_mac(mac)?);

    let Some(prefix) = prefix else {
        let hex = format!("{id:016x}");
        let groups: Vec<&str> = (0..4).map(|i| &hex[i * 4..i * 4 + 4]).collect();
        return Ok(groups.join(":"));
    };

    let network: Ipv6Prefix = prefix.parse()?;
    if network.length() > 64 {
        return Err(ScanError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: "the prefix must be /64 or shorter".to_string(),
        });
    }

    let address = Ipv6Addr::from(u128::from(network.network()) | u128::from(id));
    Ok(address.to_string())
}
