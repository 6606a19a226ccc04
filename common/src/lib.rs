//! Shared value types for `sweepr`.
//!
//! Everything in here is plain data plus parsing and validation. No sockets,
//! no terminal, no runtime.

pub mod config;
pub mod error;
pub mod macros;
pub mod network;

#[doc(hidden)]
pub use tracing as __tracing;
