//! Sink error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    /// The consumer behind the sink has gone away
    #[error("Sink '{sink}' is closed")]
    Closed { sink: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
