//! Logging initialisation for printq
//!
//! All diagnostics go to standard error so they never mix with processor
//! output mirrored on standard output.

pub mod init;

pub use init::{build_filter, init_logging};
