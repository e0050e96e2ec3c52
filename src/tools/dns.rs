//! IPv6 /64 prefix of a DNS name.

use std::net::{IpAddr, Ipv6Addr};

use crate::error::{Result, ScanError};
use crate::tools::eui64::Ipv6Prefix;

/// Resolve `name` and return its first IPv6 address.
///
/// # Errors
///
/// Returns [`ScanError::DnsLookup`] if the name does not resolve or has no
/// IPv6 address.
pub async fn first_ipv6(name: &str) -> Result<Ipv6Addr> {
    let addresses = tokio::net::lookup_host((name, 0))
        .await
        .map_err(|_| ScanError::DnsLookup {
            name: name.to_string(),
        })?;

    first_v6(addresses.map(|socket| socket.ip())).ok_or_else(|| ScanError::DnsLookup {
        name: name.to_string(),
    })
}

fn first_v6(addresses: impl IntoIterator<Item = IpAddr>) -> Option<Ipv6Addr> {
    addresses.into_iter().find_map(|address| match address {
        IpAddr::V6(v6) => Some(v6),
        IpAddr::V4(_) => None,
    })
}

/// The /64 network containing `address`.
pub fn prefix64(address: Ipv6Addr) -> Ipv6Prefix {
    Ipv6Prefix::slash64(address)
}

/// Resolve `name` and return the /64 prefix of its first IPv6 address.
pub async fn dns_ipv6_prefix(name: &str) -> Result<Ipv6Prefix> {
    Ok(prefix64(first_ipv6(name).await?))
}
