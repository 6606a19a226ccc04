//! CSV export of scan results.
//!
//! Two columns with an `IP,Port` header, one row per open port in discovery
//! order. Neither field can contain a delimiter, so no quoting is needed.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::SocketAddrV4;
use std::path::Path;

pub const CSV_HEADER: &str = "IP,Port";

pub fn write_csv<W: Write>(mut writer: W, open: &[SocketAddrV4]) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for target in open {
        writeln!(writer, "{},{}", target.ip(), target.port())?;
    }
    writer.flush()
}

/// Creates or truncates `path` and writes the results to it.
pub fn save_csv(path: &Path, open: &[SocketAddrV4]) -> io::Result<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), open)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
