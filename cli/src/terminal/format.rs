use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use colored::*;

use crate::terminal::colors;

type Detail = (String, ColoredString);

/// Groups open ports by host, keeping discovery order for both.
pub fn group_by_host(open: &[SocketAddrV4]) -> Vec<(Ipv4Addr, Vec<u16>)> {
    let mut hosts: Vec<(Ipv4Addr, Vec<u16>)> = Vec::new();
    for target in open {
        match hosts.last_mut() {
            Some((ip, ports)) if ip == target.ip() => ports.push(target.port()),
            _ => hosts.push((*target.ip(), vec![target.port()])),
        }
    }
    hosts
}

pub fn ports_to_details(ports: &[u16]) -> Vec<Detail> {
    ports
        .iter()
        .map(|port| {
            let value = format!("{port}/tcp").color(colors::OPEN_PORT);
            (String::from("Port"), value)
        })
        .collect()
}

/// `1 h 2 min 3 s`
pub fn hms(total: Duration) -> String {
    let secs = total.as_secs();
    format!("{} h {} min {} s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
