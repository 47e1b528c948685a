//! Core domain model for printq
//!
//! This crate holds the job description handed to the print processor, the
//! operator-owned queue of pending jobs, and the immutable batch type that a
//! submission carries to a child process.

pub mod batch;
pub mod error;
pub mod job;
pub mod queue;

pub use batch::Batch;
pub use error::{QueueError, ValidationError};
pub use job::{Category, JobRecord, Priority};
pub use queue::JobQueue;
