//! The two outward channels of a scan: a stream of [`ScanEvent`]s and one
//! final [`ScanOutcome`].

use std::fmt;
use std::net::SocketAddrV4;

use sweepr_common::error::RangeError;

/// One log line worth of progress.
///
/// `Display` renders the plain English line. Sinks that want glyphs, colors or
/// another language match on the variant instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Open(SocketAddrV4),
    /// Only emitted for verbose scans.
    Closed(SocketAddrV4),
    ProbeFailed { target: SocketAddrV4, reason: String },
    /// Emitted once, right before the partial outcome is delivered.
    Cancelled { found: usize },
    /// The request was refused before any probe ran.
    Rejected(RangeError),
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(t) => write!(f, "OPEN port -> IP: {}, Port: {}", t.ip(), t.port()),
            Self::Closed(t) => write!(f, "CLOSED port -> IP: {}, Port: {}", t.ip(), t.port()),
            Self::ProbeFailed { target, reason } => write!(
                f,
                "ERROR probing IP: {}, Port: {}: {reason}",
                target.ip(),
                target.port()
            ),
            Self::Cancelled { .. } => write!(f, "Scan stopped by user."),
            Self::Rejected(e) => write!(f, "Error: {e}."),
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanStatus {
    Completed,
    Cancelled,
    Rejected,
    /// The engine was dropped or unwound before it could finish.
    Aborted,
}

/// Open ports of one run, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    open: Vec<SocketAddrV4>,
    status: ScanStatus,
}

impl ScanOutcome {
    pub fn new(open: Vec<SocketAddrV4>, status: ScanStatus) -> Self {
        Self { open, status }
    }

    pub fn open_ports(&self) -> &[SocketAddrV4] {
        &self.open
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SocketAddrV4> {
        self.open.iter()
    }
}

impl IntoIterator for ScanOutcome {
    type Item = SocketAddrV4;
    type IntoIter = std::vec::IntoIter<SocketAddrV4>;

    fn into_iter(self) -> Self::IntoIter {
        self.open.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScanOutcome {
    type Item = &'a SocketAddrV4;
    type IntoIter = std::slice::Iter<'a, SocketAddrV4>;

    fn into_iter(self) -> Self::IntoIter {
        self.open.iter()
    }
}

/// Receives progress lines, possibly many per run.
///
/// Called from the engine's task. Sinks that must deliver elsewhere (a UI
/// thread, a socket) are expected to forward, e.g. through a channel.
pub trait LogSink: Send {
    fn log(&mut self, event: ScanEvent);
}

impl<F> LogSink for F
where
    F: FnMut(ScanEvent) + Send,
{
    fn log(&mut self, event: ScanEvent) {
        self(event)
    }
}

/// Receives the outcome of a run. Consumed on delivery.
pub trait ResultSink: Send {
    fn deliver(self, outcome: ScanOutcome);
}

impl<F> ResultSink for F
where
    F: FnOnce(ScanOutcome) + Send,
{
    fn deliver(self, outcome: ScanOutcome) {
        self(outcome)
    }
}

/// Owns the result sink for the duration of a run.
///
/// Whatever path the engine leaves by, including being dropped mid-probe,
/// the sink is called exactly once.
pub(crate) struct Delivery<R: ResultSink> {
    sink: Option<R>,
    open: Vec<SocketAddrV4>,
}

impl<R: ResultSink> Delivery<R> {
    pub(crate) fn new(sink: R) -> Self {
        Self {
            sink: Some(sink),
            open: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, target: SocketAddrV4) {
        self.open.push(target);
    }

    pub(crate) fn found(&self) -> usize {
        self.open.len()
    }

    pub(crate) fn finish(&mut self, status: ScanStatus) {
        if let Some(sink) = self.sink.take() {
            let open = std::mem::take(&mut self.open);
            sink.deliver(ScanOutcome::new(open, status));
        }
    }
}

impl<R: ResultSink> Drop for Delivery<R> {
    fn drop(&mut self) {
        self.finish(ScanStatus::Aborted);
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
