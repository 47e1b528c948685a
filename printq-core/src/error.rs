//! Core error types

use thiserror::Error;

/// Errors raised while turning operator input into a [`crate::JobRecord`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be an integer, got '{value}'")]
    NotAnInteger { field: &'static str, value: String },

    #[error("{field} must be one of 1, 2 or 3, got {value}")]
    UnknownCode { field: &'static str, value: i64 },
}

/// Errors raised by [`crate::JobQueue`] mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Selection index does not name a queued job
    #[error("No job at position {index} (queue holds {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Nothing is queued
    #[error("Job queue is empty")]
    Empty,
}
