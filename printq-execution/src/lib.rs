//! printq execution engine
//!
//! Runs the print processor as a child process, one [`ProcessSession`] per
//! submission, streaming its output to an [`printq_output::OutputSink`].
//! [`SubmissionWorker`] queues submissions off the control thread and
//! [`Dispatcher`] is the operator-facing entry point tying the job queue to it.

pub mod dispatcher;
pub mod error;
pub mod session;
pub mod stream;
pub mod worker;

pub use dispatcher::Dispatcher;
pub use error::{ExecutionError, SubmitError};
pub use session::{ProcessSession, SessionConfig, SessionReport, SessionState};
pub use worker::{
    Submission, SubmissionEvent, SubmissionHandle, SubmissionPolicy, SubmissionTicket,
    SubmissionWorker,
};
