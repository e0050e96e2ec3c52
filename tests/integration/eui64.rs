//! Integration tests for the IPv6 helpers.

use scanutils::ScanError;
use scanutils::tools::dns::prefix64;
use scanutils::tools::eui64::Ipv6Prefix;
use scanutils::tools::mac_to_eui64;

#[test]
fn test_mac_to_eui64_in_prefix_of_dns_answer() {
    let prefix = prefix64("2003:68:4c06:3300:1e98:ecff:fe0f:d330".parse().unwrap());
    assert_eq!(prefix.to_string(), "2003:68:4c06:3300::/64");

    let address = mac_to_eui64("1c:98:ec:0f:d3:30", Some(prefix.to_string().as_str())).unwrap();
    assert_eq!(address, "2003:68:4c06:3300:1e98:ecff:fe0f:d330");
}

#[test]
fn test_prefix_round_trip_through_display() {
    let prefix: Ipv6Prefix = "2001:db8:1:2::/64".parse().unwrap();
    assert_eq!(prefix.to_string().parse::<Ipv6Prefix>().unwrap(), prefix);
}

#[test]
fn test_exit_codes() {
    let err = mac_to_eui64("nope", None).unwrap_err();
    assert!(matches!(err, ScanError::InvalidMac { .. }));
    assert_eq!(err.exit_code(), 1);
}
