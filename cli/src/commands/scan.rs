use std::net::SocketAddrV4;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use colored::*;
use indicatif::ProgressBar;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::commands::ScanArgs;
use crate::mprint;
use crate::terminal::{colors, format, print, spinner::ScanProgress};
use sweepr_common::{config::Config, error, info, success, warn};
use sweepr_core::export;
use sweepr_core::scanner::{
    self, CancellationToken, ProbeResult, Prober, ScanEvent, ScanOutcome, ScanRequest, ScanStatus,
    TcpConnectProber,
};

/// Advances the progress bar once per finished probe.
struct ProgressProber<P> {
    inner: P,
    bar: ProgressBar,
}

#[async_trait]
impl<P: Prober> Prober for ProgressProber<P> {
    async fn probe(&self, target: SocketAddrV4) -> ProbeResult {
        let result = self.inner.probe(target).await;
        self.bar.inc(1);
        result
    }
}

pub async fn scan(args: ScanArgs, cfg: &Config) -> anyhow::Result<()> {
    let request = ScanRequest::new(args.target, args.ports, cfg.verbose);
    print_plan(&request, cfg);

    let progress = ScanProgress::start(request.probe_count(), cfg.quiet > 0);
    progress.set_message(format!("on {}", request.addresses));

    let prober = Arc::new(ProgressProber {
        inner: TcpConnectProber::new(cfg.probe_timeout),
        bar: progress.bar(),
    });

    let quiet = cfg.quiet;
    let (done_tx, done_rx) = oneshot::channel::<ScanOutcome>();

    let start_time = Instant::now();
    let handle = scanner::spawn_scan(
        request,
        prober,
        move |event: ScanEvent| log_event(event, quiet),
        move |outcome: ScanOutcome| {
            let _ = done_tx.send(outcome);
        },
    );
    let watcher = watch_ctrl_c(handle.token().clone());

    let outcome = done_rx.await;
    watcher.abort();
    let joined = handle.join().await;
    drop(progress);

    let outcome = outcome.context("scan task exited without a result")?;
    conclude(&outcome, joined, start_time.elapsed(), args.output.as_deref(), cfg)
}

/// Prints and exports whatever the run delivered, then surfaces a task failure.
fn conclude(
    outcome: &ScanOutcome,
    joined: anyhow::Result<()>,
    total_time: Duration,
    output: Option<&Path>,
    cfg: &Config,
) -> anyhow::Result<()> {
    if outcome.status() == ScanStatus::Rejected {
        anyhow::bail!("nothing was scanned");
    }

    scan_ends(outcome, total_time, cfg);

    if let Some(path) = output {
        save_results(outcome, path)?;
    }

    joined.context("scan task failed")
}

/// Cancels the scan on the first Ctrl-C.
fn watch_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    })
}

fn log_event(event: ScanEvent, quiet: u8) {
    match &event {
        ScanEvent::Rejected(_) => error!("{event}"),
        ScanEvent::Cancelled { .. } => warn!("{event}"),
        _ if quiet > 1 => {}
        ScanEvent::Open(_) => success!("{event}"),
        ScanEvent::Closed(_) => info!("{event}"),
        ScanEvent::ProbeFailed { .. } => warn!("{event}"),
    }
}

fn print_plan(request: &ScanRequest, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    print::set_key_width(&["Targets", "Ports", "Probes", "Timeout"]);
    print::aligned_line("Targets", request.addresses.to_string());
    print::aligned_line("Ports", request.ports.to_string());
    print::aligned_line("Probes", request.probe_count().to_string());
    print::aligned_line("Timeout", format!("{} ms", cfg.probe_timeout.as_millis()));
    mprint!();
}

fn scan_ends(outcome: &ScanOutcome, total_time: Duration, cfg: &Config) {
    if outcome.is_empty() {
        print::header("no open ports found", cfg.quiet);
        if cfg.quiet == 0 {
            print::no_results();
        }
    } else {
        if cfg.quiet > 0 {
            mprint!();
        }
        print::header("open ports", cfg.quiet);
        print_hosts(outcome);
    }

    print_summary(outcome, total_time, cfg);
}

fn print_hosts(outcome: &ScanOutcome) {
    let hosts = format::group_by_host(outcome.open_ports());
    for (idx, (ip, ports)) in hosts.iter().enumerate() {
        print::tree_head(idx, &ip.to_string());
        print::as_tree_one_level(format::ports_to_details(ports));
        if idx + 1 != hosts.len() {
            mprint!();
        }
    }
}

fn print_summary(outcome: &ScanOutcome, total_time: Duration, cfg: &Config) {
    let open_ports: ColoredString = format!("{} open ports", outcome.len()).bold().green();
    let total_time: ColoredString = format::hms(total_time).bold().yellow();
    let verb = match outcome.status() {
        ScanStatus::Completed => "Scan Complete",
        _ => "Scan Interrupted",
    };
    let output: ColoredString =
        format!("{verb}: {open_ports} found in {total_time}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => {
            mprint!();
            success!("{}", output);
        }
    }
}

fn save_results(outcome: &ScanOutcome, path: &Path) -> anyhow::Result<()> {
    if outcome.is_empty() {
        info!("No results to save.");
        return Ok(());
    }

    export::save_csv(path, outcome.open_ports())
        .with_context(|| format!("failed to write {}", path.display()))?;
    success!("Results saved to: {}", path.display());
    Ok(())
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
    use std::net::Ipv4Addr;

    struct AlwaysOpen;

    #[async_trait]
    impl Prober for AlwaysOpen {
        async fn probe(&self, target: SocketAddrV4) -> ProbeResult {
            ProbeResult::Open(target)
        }
    }

    #[tokio::test]
    async fn progress_prober_counts_every_probe() {
        let bar = ProgressBar::hidden();
        let prober = ProgressProber {
            inner: AlwaysOpen,
            bar: bar.clone(),
        };

        for port in 1..=3 {
            let target = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);
            assert_eq!(prober.probe(target).await, ProbeResult::Open(target));
        }
        assert_eq!(bar.position(), 3);
    }

    #[test]
    fn aborted_run_is_exported_before_the_failure_is_reported() {
        let path = std::env::temp_dir().join(format!("sweepr-aborted-{}.csv", std::process::id()));
        let open = SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8080);
        let outcome = ScanOutcome::new(vec![open], ScanStatus::Aborted);
        let cfg = Config {
            quiet: 2,
            ..Config::default()
        };

        let result = conclude(
            &outcome,
            Err(anyhow::anyhow!("task panicked")),
            Duration::from_secs(1),
            Some(&path),
            &cfg,
        );
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());
        assert_eq!(written, "IP,Port\n127.0.0.1,8080\n");
    }

    #[test]
    fn rejected_run_fails_without_output() {
        let path = std::env::temp_dir().join(format!("sweepr-rejected-{}.csv", std::process::id()));
        let outcome = ScanOutcome::new(Vec::new(), ScanStatus::Rejected);

        let result = conclude(&outcome, Ok(()), Duration::ZERO, Some(&path), &Config::default());

        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn empty_results_are_not_saved() {
        let path = std::env::temp_dir().join(format!("sweepr-empty-{}.csv", std::process::id()));
        let outcome = ScanOutcome::new(Vec::new(), ScanStatus::Completed);

        save_results(&outcome, &path).unwrap();
        assert!(!path.exists());
    }
}
