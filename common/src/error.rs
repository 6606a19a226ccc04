use std::net::Ipv4Addr;

use thiserror::Error;

/// A range whose bounds are in the wrong order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("start IP {start} cannot be greater than end IP {end}")]
    ReversedAddresses { start: Ipv4Addr, end: Ipv4Addr },
    #[error("start port {start} cannot be greater than end port {end}")]
    ReversedPorts { start: u16, end: u16 },
}

/// Failure to turn user input into a range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),
    #[error("invalid end of range '{0}'")]
    InvalidRangeEnd(String),
    #[error("invalid CIDR prefix '{0}'")]
    InvalidPrefix(String),
    #[error("invalid port '{0}'")]
    InvalidPort(String),
    #[error(transparent)]
    Range(#[from] RangeError),
}
