use sweepr_common::{config::Config, warn};
use sweepr_core::system;

use crate::terminal::print;

pub fn local(cfg: &Config) -> anyhow::Result<()> {
    print::set_key_width(&["Hostname", "IPv4"]);

    match system::hostname() {
        Ok(hostname) => print::aligned_line("Hostname", hostname),
        Err(e) => warn!("{e:#}"),
    }

    match system::local_ipv4_addrs() {
        Ok(addrs) if addrs.is_empty() => warn!("No IPv4 address found for this machine"),
        Ok(addrs) => {
            for addr in addrs {
                print::aligned_line("IPv4", addr.to_string());
            }
        }
        Err(e) => warn!("Failed to retrieve local IPs: {e:#}"),
    }

    if cfg.quiet == 0 {
        print::fat_separator();
    }
    Ok(())
}
