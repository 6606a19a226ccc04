pub mod local;
pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use sweepr_common::config::{Config, DEFAULT_PROBE_TIMEOUT};
use sweepr_common::network::range::{Ipv4Range, PortRange};

#[derive(Parser)]
#[command(name = "sweepr", version)]
#[command(about = "A sequential TCP connect port scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output. Repeat to print results only
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the IPv4 addresses of this machine
    #[command(alias = "l")]
    Local,
    /// Scan a range of addresses for open TCP ports
    #[command(alias = "s")]
    Scan(ScanArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Addresses to scan: 10.0.0.5, 10.0.0.1-10.0.0.50, 10.0.0.1-50 or 10.0.0.0/24
    pub target: Ipv4Range,

    /// Ports to probe on every address: 80 or 1-1024
    #[arg(short, long, default_value = "1-1024")]
    pub ports: PortRange,

    /// Also report closed ports
    #[arg(short, long)]
    pub verbose: bool,

    /// Connect timeout per probe, in milliseconds
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "MS",
        default_value_t = DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Write open ports to this CSV file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let mut cfg = Config {
            quiet: self.quiet,
            no_banner: self.no_banner,
            ..Config::default()
        };

        if let Commands::Scan(args) = &self.command {
            cfg.verbose = args.verbose;
            cfg.probe_timeout = Duration::from_millis(args.timeout_ms);
        }

        cfg
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
