//! Logging shorthands used across the workspace.
//!
//! Each macro forwards to `tracing` with a fixed target so the terminal
//! formatter can pick the right status glyph.

pub const SUCCESS_TARGET: &str = "sweepr::success";
pub const PRINT_TARGET: &str = "sweepr::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "sweepr::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!($($arg)*)
    };
}
