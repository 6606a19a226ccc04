use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::time::Duration;

use tokio::net::TcpListener;

/// Generous enough for a loaded CI machine, still fast on loopback.
pub const LOOPBACK_TIMEOUT: Duration = Duration::from_millis(500);

/// Binds an ephemeral loopback port that stays open while the listener lives.
pub async fn open_port() -> (TcpListener, SocketAddrV4) {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let SocketAddr::V4(addr) = listener.local_addr().unwrap() else {
        panic!("loopback listener bound to a non-IPv4 address");
    };
    (listener, addr)
}

/// An ephemeral loopback port with nothing listening on it.
pub async fn closed_port() -> SocketAddrV4 {
    let (listener, addr) = open_port().await;
    drop(listener);
    addr
}

pub fn temp_csv(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sweepr-{name}-{}.csv", std::process::id()))
}
