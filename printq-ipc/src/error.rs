//! Wire format error types

use printq_core::ValidationError;
use thiserror::Error;

/// Errors raised while encoding or decoding the batch wire format
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Batches must hold at least one job
    #[error("Batch is empty")]
    EmptyBatch,

    /// Input ended before the announced number of jobs was read
    #[error("Input ended at line {line}: expected {expected} jobs, read {read}")]
    Truncated {
        line: usize,
        expected: usize,
        read: usize,
    },

    /// A line did not hold a decimal integer
    #[error("Line {line}: expected an integer, got '{value}'")]
    InvalidInteger { line: usize, value: String },

    /// A category or priority code is outside 1..=3
    #[error("Line {line}: {source}")]
    InvalidCode {
        line: usize,
        #[source]
        source: ValidationError,
    },

    /// Non-blank content followed the last announced job
    #[error("Unexpected data after the last job at line {line}")]
    TrailingData { line: usize },
}
