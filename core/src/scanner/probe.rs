//! Single-pair connection probes.

use std::net::SocketAddrV4;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpSocket;
use tokio::time::timeout;
use tracing::trace;

/// Classification of one `(address, port)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The connection was accepted.
    Open(SocketAddrV4),
    /// The connect failed or got no answer within the timeout.
    Closed(SocketAddrV4),
    /// No socket could be created for the attempt. Not fatal to the run.
    Error { target: SocketAddrV4, reason: String },
}

/// Strategy for probing one transport-layer port.
///
/// Implementations must release whatever they open before returning; the
/// engine may call this tens of thousands of times in one run.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: SocketAddrV4) -> ProbeResult;
}

/// Full TCP handshake with a bounded wait.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnectProber {
    probe_timeout: Duration,
}

impl TcpConnectProber {
    pub fn new(probe_timeout: Duration) -> Self {
        Self { probe_timeout }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, target: SocketAddrV4) -> ProbeResult {
        let socket = match TcpSocket::new_v4() {
            Ok(socket) => socket,
            Err(e) => {
                trace!(%target, error = %e, "socket creation failed");
                return ProbeResult::Error {
                    target,
                    reason: e.to_string(),
                };
            }
        };

        // Any refusal from the connect itself means closed: refused, reset,
        // unreachable and broadcast targets alike. On timeout the pending
        // connect future is dropped here, which closes its socket.
        match timeout(self.probe_timeout, socket.connect(target.into())).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeResult::Open(target)
            }
            Ok(Err(e)) => {
                trace!(%target, error = %e, "connect failed");
                ProbeResult::Closed(target)
            }
            Err(_elapsed) => ProbeResult::Closed(target),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
