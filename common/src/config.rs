use std::time::Duration;

/// Connect timeout applied to every probe unless overridden.
///
/// Tuned for a local network. Routed or high-latency targets need more.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(5);

#[derive(Debug, Clone)]
pub struct Config {
    /// Report closed ports as well as open ones.
    pub verbose: bool,
    /// How long a single connection attempt may take before the port is
    /// classified as closed.
    pub probe_timeout: Duration,
    /// 0 prints everything, 1 drops decoration, 2 prints results only.
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            quiet: 0,
            no_banner: false,
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
