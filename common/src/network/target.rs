//! # Scan Target Parsing
//!
//! Turns user input into the ranges the scan engine walks.
//!
//! Address expressions:
//! * A single host (e.g., `192.168.1.5`).
//! * An explicit range (e.g., `192.168.1.1-192.168.1.50`).
//! * An abbreviated range (e.g., `192.168.1.1-50`).
//! * A CIDR block (e.g., `192.168.1.0/24`).
//!
//! Port expressions are a single port (`80`) or a range (`1-1024`).
//!
//! A reversed address range parses fine on purpose: the engine is the one
//! that reports it. A reversed port range is rejected here.

use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::TargetError;
use crate::network::range::{self, Ipv4Range, PortRange};

impl FromStr for Ipv4Range {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(range) = parse_cidr_range(s)? {
            return Ok(range);
        }

        if let Some(range) = parse_ip_range(s)? {
            return Ok(range);
        }

        let addr = parse_addr(s)?;
        Ok(Ipv4Range::single(addr))
    }
}

impl FromStr for PortRange {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let ports = match s.split_once('-') {
            Some((start, end)) => PortRange::new(parse_port(start)?, parse_port(end)?),
            None => PortRange::single(parse_port(s)?),
        };
        ports.validate()?;
        Ok(ports)
    }
}

fn parse_addr(s: &str) -> Result<Ipv4Addr, TargetError> {
    s.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| TargetError::InvalidAddress(s.to_string()))
}

fn parse_port(s: &str) -> Result<u16, TargetError> {
    s.trim()
        .parse::<u16>()
        .map_err(|_| TargetError::InvalidPort(s.to_string()))
}

/// Parses a range string like "1.1.1.1-2.2.2.2" or "1.1.1.1-50".
fn parse_ip_range(s: &str) -> Result<Option<Ipv4Range>, TargetError> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Ok(None);
    };

    let start_addr = parse_addr(start_str)?;
    let end_addr = parse_range_end_addr(end_str.trim(), &start_addr)?;

    Ok(Some(Ipv4Range::new(start_addr, end_addr)))
}

/// Helper to parse the end address of a range.
///
/// Handles abbreviated forms like "192.168.1.1-50" (implies 192.168.1.50)
/// and full forms like "192.168.1.1-192.168.1.255".
fn parse_range_end_addr(end_str: &str, start_addr: &Ipv4Addr) -> Result<Ipv4Addr, TargetError> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }

    let invalid = || TargetError::InvalidRangeEnd(end_str.to_string());

    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| invalid())?;

    if partial_octets.is_empty() || partial_octets.len() > 4 {
        return Err(invalid());
    }

    let mut end_octets = start_addr.octets();
    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr_range(s: &str) -> Result<Option<Ipv4Range>, TargetError> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let ipv4_addr = parse_addr(ip_str)?;
    let invalid_prefix = || TargetError::InvalidPrefix(prefix_str.to_string());

    let prefix = prefix_str.trim().parse::<u8>().map_err(|_| invalid_prefix())?;
    let ipv4_range = range::cidr_range(ipv4_addr, prefix).ok_or_else(invalid_prefix)?;

    Ok(Some(ipv4_range))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
