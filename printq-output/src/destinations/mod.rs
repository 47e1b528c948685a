//! Concrete output sinks

pub mod channel;
pub mod console;
pub mod file;
pub mod transcript;

pub use channel::ChannelSink;
pub use console::ConsoleSink;
pub use file::FileSink;
pub use transcript::TranscriptSink;
