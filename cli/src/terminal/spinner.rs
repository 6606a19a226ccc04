//! Progress bar for a running scan.
//!
//! Log lines go through [`SpinnerWriter`], which prints them above the bar
//! while one is active and straight to stdout otherwise.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];
const TEMPLATE: &str = "{spinner:.blue} {wide_bar:.blue/bright_black} {pos}/{len} probes {msg}";

static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Live progress of one scan. Cleared from the terminal when dropped.
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    /// Starts a bar of `total` probes. Hidden when `quiet` is set.
    pub fn start(total: u64, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total)
        };

        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_strings(TICKS)
            .progress_chars("━╸ ");
        bar.set_style(style);
        bar.enable_steady_tick(TICK_INTERVAL);

        if let Ok(mut active) = ACTIVE.lock() {
            *active = Some(bar.clone());
        }

        Self { bar }
    }

    /// A handle that can be moved into the scan task.
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.bar.set_message(msg.into());
    }
}

impl Drop for ScanProgress {
    fn drop(&mut self) {
        if let Ok(mut active) = ACTIVE.lock() {
            *active = None;
        }
        self.bar.finish_and_clear();
    }
}

fn active_bar() -> Option<ProgressBar> {
    ACTIVE.lock().ok().and_then(|active| active.clone())
}

pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end();

        match active_bar() {
            Some(bar) if !bar.is_hidden() => bar.println(msg),
            _ => writeln!(io::stdout().lock(), "{msg}")?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
