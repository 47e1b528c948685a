//! Error types for sessions and submissions

use printq_core::QueueError;
use printq_output::Channel;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Failures of a single print processor session
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The executable could not be launched
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The batch could not be delivered to a running child.
    /// Output was still drained and the child reaped.
    #[error("Failed to send batch to session {session_id}: {source}")]
    InputWrite {
        session_id: Uuid,
        exit_code: Option<i32>,
        #[source]
        source: std::io::Error,
    },

    /// One of the child's output streams failed before end of stream.
    /// The child was still reaped.
    #[error("Failed to read {channel} of session {session_id}: {source}")]
    OutputRead {
        session_id: Uuid,
        channel: Channel,
        exit_code: Option<i32>,
        #[source]
        source: std::io::Error,
    },

    /// The child ran past the configured limit and was killed
    #[error("Session {session_id} exceeded {limit:?} and was terminated")]
    Timeout {
        session_id: Uuid,
        limit: Duration,
        stdout_lines: usize,
        stderr_lines: usize,
    },

    #[error("Failed to wait for session {session_id}: {source}")]
    Wait {
        session_id: Uuid,
        #[source]
        source: std::io::Error,
    },
}

impl ExecutionError {
    /// Whether the child was started before the error occurred
    pub fn child_started(&self) -> bool {
        !matches!(self, ExecutionError::Spawn { .. })
    }
}

/// Failures of an operator submission request
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Nothing to submit")]
    EmptySubmission,

    #[error(transparent)]
    InvalidSelection(QueueError),

    #[error("Submission worker has stopped")]
    WorkerUnavailable,
}
