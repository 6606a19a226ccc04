//! # Address and Port Ranges
//!
//! Inclusive ranges walked by the scan engine. Both are plain `Copy` values;
//! ordering is checked with `validate()` rather than at construction so that a
//! reversed range can reach the engine and be reported there.

use std::fmt;
use std::net::Ipv4Addr;

use crate::error::RangeError;

/// Represents a continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn single(addr: Ipv4Addr) -> Self {
        Self::new(addr, addr)
    }

    /// Addresses in ascending numeric order. Empty when reversed.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if start > end {
            return 0;
        }
        u64::from(end - start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self) -> Result<(), RangeError> {
        if u32::from(self.start_addr) > u32::from(self.end_addr) {
            return Err(RangeError::ReversedAddresses {
                start: self.start_addr,
                end: self.end_addr,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_addr == self.end_addr {
            return write!(f, "{}", self.start_addr);
        }
        write!(f, "{}-{}", self.start_addr, self.end_addr)
    }
}

/// An inclusive range of TCP ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn single(port: u16) -> Self {
        Self::new(port, port)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u16> + Clone {
        self.start..=self.end
    }

    pub fn len(&self) -> u64 {
        if self.start > self.end {
            return 0;
        }
        u64::from(self.end - self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self) -> Result<(), RangeError> {
        if self.start > self.end {
            return Err(RangeError::ReversedPorts {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            return write!(f, "{}", self.start);
        }
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Creates a range from an IP and a CIDR prefix (e.g., 192.168.1.0/24).
///
/// Returns the range covering the entire network block, network and
/// broadcast addresses included.
pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> Option<Ipv4Range> {
    if prefix > 32 {
        return None;
    }
    let ip_u32 = u32::from(ip);
    let mask = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - prefix)
    };
    let network = ip_u32 & mask;
    let broadcast = network | !mask;
    Some(Ipv4Range::new(
        Ipv4Addr::from(network),
        Ipv4Addr::from(broadcast),
    ))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4range_iter_is_ascending_and_inclusive() {
        let range = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 254), Ipv4Addr::new(10, 0, 1, 1));

        let addrs: Vec<Ipv4Addr> = range.iter().collect();
        assert_eq!(
            addrs,
            vec![
                Ipv4Addr::new(10, 0, 0, 254),
                Ipv4Addr::new(10, 0, 0, 255),
                Ipv4Addr::new(10, 0, 1, 0),
                Ipv4Addr::new(10, 0, 1, 1),
            ]
        );
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn ipv4range_reversed_is_empty_and_invalid() {
        let start = Ipv4Addr::new(10, 0, 0, 5);
        let end = Ipv4Addr::new(10, 0, 0, 1);
        let range = Ipv4Range::new(start, end);

        assert_eq!(range.iter().next(), None);
        assert!(range.is_empty());
        assert_eq!(
            range.validate(),
            Err(RangeError::ReversedAddresses { start, end })
        );
    }

    #[test]
    fn ipv4range_full_space_does_not_overflow() {
        let range = Ipv4Range::new(Ipv4Addr::UNSPECIFIED, Ipv4Addr::BROADCAST);
        assert_eq!(range.len(), 1u64 << 32);
        assert_eq!(range.iter().next_back(), Some(Ipv4Addr::BROADCAST));
    }

    #[test]
    fn ipv4range_single() {
        let addr = Ipv4Addr::new(192, 168, 0, 1);
        let range = Ipv4Range::single(addr);
        assert_eq!(range.len(), 1);
        assert!(range.validate().is_ok());
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![addr]);
    }

    #[test]
    fn port_range_bounds() {
        let full = PortRange::new(0, u16::MAX);
        assert_eq!(full.len(), 65_536);
        assert_eq!(full.iter().next_back(), Some(u16::MAX));

        let reversed = PortRange::new(81, 80);
        assert!(reversed.is_empty());
        assert_eq!(
            reversed.validate(),
            Err(RangeError::ReversedPorts { start: 81, end: 80 })
        );

        assert_eq!(PortRange::single(22).iter().collect::<Vec<_>>(), vec![22]);
    }

    #[test]
    fn ranges_display_compactly() {
        let range = Ipv4Range::new(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 9));
        assert_eq!(range.to_string(), "10.0.0.1-10.0.0.9");
        assert_eq!(Ipv4Range::single(Ipv4Addr::LOCALHOST).to_string(), "127.0.0.1");
        assert_eq!(PortRange::new(1, 1024).to_string(), "1-1024");
        assert_eq!(PortRange::single(443).to_string(), "443");
    }

    #[test]
    fn test_cidr_range() {
        let range = cidr_range(Ipv4Addr::new(192, 168, 1, 100), 24).unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(range.end_addr, Ipv4Addr::new(192, 168, 1, 255));

        let range = cidr_range(Ipv4Addr::new(172, 16, 5, 10), 20).unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(172, 16, 0, 0));
        assert_eq!(range.end_addr, Ipv4Addr::new(172, 16, 15, 255));
    }

    #[test]
    fn test_cidr_range_edges() {
        let all = cidr_range(Ipv4Addr::new(10, 20, 30, 40), 0).unwrap();
        assert_eq!(all, Ipv4Range::new(Ipv4Addr::UNSPECIFIED, Ipv4Addr::BROADCAST));

        let host = Ipv4Addr::new(203, 0, 113, 7);
        assert_eq!(cidr_range(host, 32), Some(Ipv4Range::single(host)));

        assert_eq!(cidr_range(host, 33), None);
    }
}
