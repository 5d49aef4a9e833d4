// IPv4 special-use range classification

use crate::error::{GraphError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AddressClass {
    /// Globally routable, i.e. outside the monitored network
    External,
    /// Special-use address, with the registry entry it falls under
    Reserved(&'static str),
}

impl AddressClass {
    pub fn is_external(&self) -> bool {
        matches!(self, AddressClass::External)
    }
}

const BROADCAST: [u8; 4] = [255, 255, 255, 255];

// (network, prefix length, reason)
const RESERVED_RANGES: &[([u8; 4], u32, &str)] = &[
    ([0, 0, 0, 0], 8, "\"this\" network (RFC 1700)"),
    ([10, 0, 0, 0], 8, "private network (RFC 1918)"),
    ([100, 64, 0, 0], 10, "carrier-grade NAT (RFC 6598)"),
    ([127, 0, 0, 0], 8, "loopback (RFC 990)"),
    ([169, 254, 0, 0], 16, "link-local (RFC 3927)"),
    ([172, 16, 0, 0], 12, "private network (RFC 1918)"),
    ([192, 0, 0, 0], 24, "IANA special purpose (RFC 5736)"),
    ([192, 0, 2, 0], 24, "TEST-NET (RFC 5737)"),
    ([192, 88, 99, 0], 24, "6to4 anycast relay (RFC 3068)"),
    ([192, 168, 0, 0], 16, "private network (RFC 1918)"),
    ([198, 18, 0, 0], 15, "inter-network benchmarking (RFC 2544)"),
    ([198, 51, 100, 0], 24, "TEST-NET-2 (RFC 5737)"),
    ([203, 0, 113, 0], 24, "TEST-NET-3 (RFC 5737)"),
    ([224, 0, 0, 0], 4, "multicast (RFC 5771)"),
    ([240, 0, 0, 0], 4, "reserved for future use (RFC 6890)"),
];

/// Split a dotted quad into four base-10 octets.
pub fn parse_octets(addr: &str) -> Result<[u8; 4]> {
    let parts: Vec<&str> = addr.trim().split('.').collect();
    if parts.len() != 4 {
        return Err(GraphError::InvalidAddress(addr.to_string()));
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts) {
        *octet = part
            .parse::<u8>()
            .map_err(|_| GraphError::InvalidAddress(addr.to_string()))?;
    }
    Ok(octets)
}

pub fn classify_ipv4(addr: &str) -> Result<AddressClass> {
    let octets = parse_octets(addr)?;

    if octets == BROADCAST {
        return Ok(AddressClass::Reserved("limited broadcast (RFC 6890)"));
    }

    let value = u32::from_be_bytes(octets);
    for &(network, prefix, reason) in RESERVED_RANGES {
        let mask = u32::MAX << (32 - prefix);
        if value & mask == u32::from_be_bytes(network) {
            return Ok(AddressClass::Reserved(reason));
        }
    }

    Ok(AddressClass::External)
}

pub fn is_external_address(addr: &str) -> Result<bool> {
    classify_ipv4(addr).map(|class| class.is_external())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_ranges_are_reserved() {
        for addr in ["10.1.2.3", "172.16.0.1", "172.31.255.255", "192.168.63.52"] {
            assert!(!is_external_address(addr).unwrap(), "{} should be reserved", addr);
        }
    }

    #[test]
    fn test_range_boundaries() {
        assert!(is_external_address("172.15.255.255").unwrap());
        assert!(is_external_address("172.32.0.0").unwrap());
        assert!(!is_external_address("100.64.0.0").unwrap());
        assert!(!is_external_address("100.127.255.255").unwrap());
        assert!(is_external_address("100.128.0.0").unwrap());
        assert!(!is_external_address("198.19.255.255").unwrap());
        assert!(is_external_address("198.20.0.0").unwrap());
        assert!(is_external_address("192.0.1.1").unwrap());
    }

    #[test]
    fn test_multicast_and_future_use() {
        assert!(!is_external_address("224.0.0.1").unwrap());
        assert!(!is_external_address("239.255.255.255").unwrap());
        assert!(!is_external_address("240.0.0.1").unwrap());
        assert!(!is_external_address("255.255.255.254").unwrap());
    }

    #[test]
    fn test_broadcast_reason() {
        assert_eq!(
            classify_ipv4("255.255.255.255").unwrap(),
            AddressClass::Reserved("limited broadcast (RFC 6890)")
        );
    }

    #[test]
    fn test_public_addresses_are_external() {
        assert_eq!(classify_ipv4("8.8.8.8").unwrap(), AddressClass::External);
        assert_eq!(classify_ipv4("120.1.10.80").unwrap(), AddressClass::External);
    }

    #[test]
    fn test_invalid_addresses() {
        for addr in ["", "switch01", "10.0.0", "10.0.0.1.5", "10.0.0.256", "a.b.c.d"] {
            assert_eq!(
                classify_ipv4(addr),
                Err(GraphError::InvalidAddress(addr.to_string())),
                "{} should be invalid",
                addr
            );
        }
    }

    #[test]
    fn test_leading_zero_octets_parse() {
        assert_eq!(parse_octets("010.001.000.001").unwrap(), [10, 1, 0, 1]);
    }
}
