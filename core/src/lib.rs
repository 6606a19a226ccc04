//! Scanning engine and its collaborators.
//!
//! * [`scanner`]: the sequential connect-probe loop, cancellation and reporting.
//! * [`export`]: CSV rendering of an outcome.
//! * [`system`]: facts about the local machine.

pub mod export;
pub mod scanner;
pub mod system;
