//! The scan **engine**.
//!
//! Walks every `(address, port)` pair of a [`ScanRequest`] in ascending order,
//! probes each one through a [`Prober`], and reports through two injected
//! capabilities: a [`LogSink`] receiving one [`ScanEvent`] per log line and a
//! [`ResultSink`] receiving the final [`ScanOutcome`] exactly once.
//!
//! **Cancellation contract:** the [`CancellationToken`] is polled before every
//! address and before every port. A probe already in flight is never
//! interrupted, so the worst-case latency of a cancel is one probe timeout.
//!
//! Probes run strictly one after another. Responsiveness of the caller comes
//! from running the whole loop on its own task ([`spawn_scan`]), not from
//! fanning probes out.

use std::net::SocketAddrV4;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sweepr_common::error::RangeError;
use sweepr_common::network::range::{Ipv4Range, PortRange};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, debug_span};

mod probe;
mod report;

pub use probe::{ProbeResult, Prober, TcpConnectProber};
pub use report::{LogSink, ResultSink, ScanEvent, ScanOutcome, ScanStatus};

use report::Delivery;

/// Shared stop flag for one scan run.
///
/// The initiator keeps a clone and may call [`cancel`](Self::cancel) from any
/// thread; the engine only reads it. A cancelled token stays cancelled, so a
/// new run needs a new token.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRequest {
    pub addresses: Ipv4Range,
    pub ports: PortRange,
    /// Emit a [`ScanEvent::Closed`] for every closed port too.
    pub verbose: bool,
}

impl ScanRequest {
    pub fn new(addresses: Ipv4Range, ports: PortRange, verbose: bool) -> Self {
        Self {
            addresses,
            ports,
            verbose,
        }
    }

    /// Number of probes a full, uncancelled run performs.
    pub fn probe_count(&self) -> u64 {
        self.addresses.len() * self.ports.len()
    }

    pub fn validate(&self) -> Result<(), RangeError> {
        self.addresses.validate()?;
        self.ports.validate()
    }
}

/// Runs one scan to completion on the current task.
///
/// `done` is called exactly once: after the last probe, after a cancellation,
/// after a rejected request, or (with [`ScanStatus::Aborted`]) when this future
/// is dropped before finishing.
pub async fn scan<P, L, R>(
    request: &ScanRequest,
    prober: &P,
    token: &CancellationToken,
    mut log: L,
    done: R,
) where
    P: Prober + ?Sized,
    L: LogSink,
    R: ResultSink,
{
    let span = debug_span!("scan", addresses = %request.addresses, ports = %request.ports);
    run(request, prober, token, &mut log, Delivery::new(done))
        .instrument(span)
        .await;
}

async fn run<P, L, R>(
    request: &ScanRequest,
    prober: &P,
    token: &CancellationToken,
    log: &mut L,
    mut delivery: Delivery<R>,
) where
    P: Prober + ?Sized,
    L: LogSink,
    R: ResultSink,
{
    if let Err(e) = request.validate() {
        debug!("rejecting scan request: {e}");
        log.log(ScanEvent::Rejected(e));
        delivery.finish(ScanStatus::Rejected);
        return;
    }

    debug!(probes = request.probe_count(), "scan started");

    for addr in request.addresses.iter() {
        if token.is_cancelled() {
            return cancel(log, delivery);
        }

        for port in request.ports.iter() {
            if token.is_cancelled() {
                return cancel(log, delivery);
            }

            match prober.probe(SocketAddrV4::new(addr, port)).await {
                ProbeResult::Open(target) => {
                    delivery.push(target);
                    log.log(ScanEvent::Open(target));
                }
                ProbeResult::Closed(target) => {
                    if request.verbose {
                        log.log(ScanEvent::Closed(target));
                    }
                }
                ProbeResult::Error { target, reason } => {
                    log.log(ScanEvent::ProbeFailed { target, reason });
                }
            }
        }
    }

    debug!(open = delivery.found(), "scan completed");
    delivery.finish(ScanStatus::Completed);
}

fn cancel<L: LogSink, R: ResultSink>(log: &mut L, mut delivery: Delivery<R>) {
    debug!(open = delivery.found(), "scan cancelled");
    log.log(ScanEvent::Cancelled {
        found: delivery.found(),
    });
    delivery.finish(ScanStatus::Cancelled);
}

/// A scan running on its own tokio task.
#[derive(Debug)]
pub struct ScanHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ScanHandle {
    /// Asks the engine to stop before its next probe.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Waits for the task to exit. The outcome itself goes to the result sink.
    pub async fn join(self) -> anyhow::Result<()> {
        self.task.await?;
        Ok(())
    }
}

/// Starts [`scan`] on a new tokio task with a fresh [`CancellationToken`].
pub fn spawn_scan<P, L, R>(request: ScanRequest, prober: Arc<P>, log: L, done: R) -> ScanHandle
where
    P: Prober + ?Sized + 'static,
    L: LogSink + 'static,
    R: ResultSink + 'static,
{
    let token = CancellationToken::new();
    let task_token = token.clone();

    let task = tokio::spawn(async move {
        scan(&request, &*prober, &task_token, log, done).await;
    });

    ScanHandle { token, task }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
