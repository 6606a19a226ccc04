//! Facts about the machine the scanner runs on.

use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};

use anyhow::Context;

pub fn hostname() -> anyhow::Result<String> {
    sys_info::hostname().map_err(|e| anyhow::anyhow!("failed to read the local hostname: {e}"))
}

/// IPv4 addresses the local hostname resolves to, sorted numerically.
///
/// Informational only. The list depends on the resolver configuration and may
/// not include every interface address.
pub fn local_ipv4_addrs() -> anyhow::Result<Vec<Ipv4Addr>> {
    let host = hostname()?;
    let resolved = (host.as_str(), 0)
        .to_socket_addrs()
        .with_context(|| format!("failed to resolve hostname '{host}'"))?;

    Ok(collect_ipv4(resolved))
}

fn collect_ipv4(addrs: impl IntoIterator<Item = SocketAddr>) -> Vec<Ipv4Addr> {
    addrs
        .into_iter()
        .filter_map(|addr| match addr.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .collect::<BTreeSet<Ipv4Addr>>()
        .into_iter()
        .collect()
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
    use std::net::Ipv6Addr;

    #[test]
    fn keeps_unique_ipv4_sorted_numerically() {
        let addrs = vec![
            SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)), 0),
            SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 0),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)), 0),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 3)), 0),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)), 0),
        ];

        assert_eq!(
            collect_ipv4(addrs),
            vec![
                Ipv4Addr::new(10, 0, 0, 9),
                Ipv4Addr::new(192, 168, 1, 3),
                Ipv4Addr::new(192, 168, 1, 20),
            ]
        );
    }

    #[test]
    #[ignore]
    fn local_host_resolves_to_something() {
        let addrs = local_ipv4_addrs().unwrap();
        assert!(!addrs.is_empty());
    }
}
