#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use sweepr_common::network::range::{Ipv4Range, PortRange};
use sweepr_core::export;
use sweepr_core::scanner::{
    self, CancellationToken, ScanEvent, ScanOutcome, ScanRequest, ScanStatus, TcpConnectProber,
};
use tokio::sync::oneshot;

use crate::util::{LOOPBACK_TIMEOUT, closed_port, open_port, temp_csv};

async fn run(request: ScanRequest) -> (Vec<ScanEvent>, ScanOutcome) {
    let prober = TcpConnectProber::new(LOOPBACK_TIMEOUT);
    let token = CancellationToken::new();
    let mut events = Vec::new();
    let mut outcome = None;

    scanner::scan(
        &request,
        &prober,
        &token,
        |e: ScanEvent| events.push(e),
        |o: ScanOutcome| outcome = Some(o),
    )
    .await;

    (events, outcome.expect("result sink was never called"))
}

/// A listening loopback port is reported open, a released one is not.
#[tokio::test]
async fn scan_finds_listening_loopback_port() {
    let (_listener, open) = open_port().await;
    let closed = closed_port().await;

    let (events, outcome) = run(ScanRequest::new(
        Ipv4Range::single(Ipv4Addr::LOCALHOST),
        PortRange::single(open.port()),
        false,
    ))
    .await;
    assert_eq!(outcome.status(), ScanStatus::Completed);
    assert_eq!(outcome.open_ports(), &[open]);
    assert_eq!(events, vec![ScanEvent::Open(open)]);

    let (events, outcome) = run(ScanRequest::new(
        Ipv4Range::single(Ipv4Addr::LOCALHOST),
        PortRange::single(closed.port()),
        true,
    ))
    .await;
    assert!(outcome.is_empty());
    assert_eq!(events, vec![ScanEvent::Closed(closed)]);
}

#[tokio::test]
async fn scan_range_only_reports_the_listening_host() {
    let (_listener, open) = open_port().await;

    let (_, outcome) = run(ScanRequest::new(
        Ipv4Range::new(Ipv4Addr::new(127, 0, 0, 1), Ipv4Addr::new(127, 0, 0, 2)),
        PortRange::single(open.port()),
        false,
    ))
    .await;

    assert_eq!(outcome.status(), ScanStatus::Completed);
    assert_eq!(outcome.open_ports(), &[open]);
}

/// Other tests bind listeners concurrently, so only the two known ports are
/// scanned rather than the span between them.
#[tokio::test]
async fn repeated_scans_agree() {
    let (_first, a) = open_port().await;
    let (_second, b) = open_port().await;

    for target in [a, b] {
        let request = ScanRequest::new(
            Ipv4Range::single(*target.ip()),
            PortRange::single(target.port()),
            false,
        );

        let (_, first) = run(request).await;
        let (_, second) = run(request).await;

        assert_eq!(first, second);
        assert_eq!(first.open_ports(), &[target]);
    }
}

#[tokio::test]
async fn spawned_scan_can_be_cancelled() {
    let (_listener, open) = open_port().await;
    let request = ScanRequest::new(
        Ipv4Range::new(Ipv4Addr::new(127, 0, 0, 1), Ipv4Addr::new(127, 0, 0, 255)),
        PortRange::single(open.port()),
        false,
    );
    let events = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = oneshot::channel();

    let sink = Arc::clone(&events);
    let handle = scanner::spawn_scan(
        request,
        Arc::new(TcpConnectProber::new(LOOPBACK_TIMEOUT)),
        move |e: ScanEvent| sink.lock().unwrap().push(e),
        move |o: ScanOutcome| {
            let _ = tx.send(o);
        },
    );
    handle.cancel();

    let outcome = rx.await.unwrap();
    handle.join().await.unwrap();

    assert_eq!(outcome.status(), ScanStatus::Cancelled);
    let events = events.lock().unwrap();
    assert!(matches!(events.last(), Some(ScanEvent::Cancelled { .. })));
}

#[tokio::test]
async fn open_ports_export_to_csv() {
    let (_listener, open) = open_port().await;
    let (_, outcome) = run(ScanRequest::new(
        Ipv4Range::single(Ipv4Addr::LOCALHOST),
        PortRange::single(open.port()),
        false,
    ))
    .await;

    let path = temp_csv("integration");
    export::save_csv(&path, outcome.open_ports()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written, format!("IP,Port\n127.0.0.1,{}\n", open.port()));
}
