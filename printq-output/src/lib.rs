//! # printq output sinks
//!
//! Lines read from a print processor's standard output and standard error are
//! delivered to an [`OutputSink`]. Sinks are shared between the two reader
//! tasks of a session, so every implementation accepts concurrent appends and
//! writes each line whole.
//!
//! Available destinations:
//!
//! - [`TranscriptSink`]: bounded in-memory history, readable and clearable
//! - [`ChannelSink`]: hands lines to a single consumer over a channel
//! - [`ConsoleSink`]: mirrors lines onto this process's stdout/stderr
//! - [`FileSink`]: appends lines to a log file
//! - [`FanoutSink`]: delivers every line to several sinks in turn

pub mod destinations;
pub mod errors;
pub mod line;
pub mod manager;
pub mod sink;

pub use destinations::{ChannelSink, ConsoleSink, FileSink, TranscriptSink};
pub use errors::SinkError;
pub use line::{Channel, OutputLine};
pub use manager::{build_sinks, FanoutSink};
pub use sink::OutputSink;
