//! Background submission worker
//!
//! Submissions are handed to the worker over a channel and run off the
//! caller's task, so the operator console keeps accepting commands while a
//! print processor runs. Outcomes come back as [`SubmissionEvent`]s.

use printq_core::Batch;
use printq_output::OutputSink;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ExecutionError, SubmitError};
use crate::session::{ProcessSession, SessionConfig, SessionReport};

/// Whether submissions may overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPolicy {
    /// One session at a time, in submission order
    Serialized,
    /// Every submission starts its session immediately
    Concurrent,
}

impl SubmissionPolicy {
    pub fn from_serialize_flag(serialize: bool) -> Self {
        if serialize {
            SubmissionPolicy::Serialized
        } else {
            SubmissionPolicy::Concurrent
        }
    }
}

/// A batch on its way to a session. The id doubles as the session id.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub batch: Batch,
}

/// Receipt returned to the submitter once the worker has taken a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub id: Uuid,
    pub jobs: usize,
}

#[derive(Debug)]
pub enum SubmissionEvent {
    Started {
        submission_id: Uuid,
        jobs: usize,
    },
    Finished {
        submission_id: Uuid,
        report: SessionReport,
    },
    /// The batch is not re-queued; its jobs are reported here
    Failed {
        submission_id: Uuid,
        batch: Batch,
        error: ExecutionError,
    },
}

impl SubmissionEvent {
    pub fn submission_id(&self) -> Uuid {
        match self {
            SubmissionEvent::Started { submission_id, .. }
            | SubmissionEvent::Finished { submission_id, .. }
            | SubmissionEvent::Failed { submission_id, .. } => *submission_id,
        }
    }
}

/// Sending side of the worker's queue
#[derive(Debug, Clone)]
pub struct SubmissionHandle {
    sender: mpsc::UnboundedSender<Submission>,
}

impl SubmissionHandle {
    /// A handle and the receiving end it feeds, for driving submissions
    /// without a [`SubmissionWorker`]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Submission>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn submit(&self, batch: Batch) -> Result<SubmissionTicket, SubmitError> {
        self.try_submit(batch)
            .map_err(|_| SubmitError::WorkerUnavailable)
    }

    /// Like [`submit`](Self::submit), but hands the batch back when the
    /// worker has stopped
    pub fn try_submit(&self, batch: Batch) -> Result<SubmissionTicket, Batch> {
        let submission = Submission {
            id: Uuid::new_v4(),
            batch,
        };
        let ticket = SubmissionTicket {
            id: submission.id,
            jobs: submission.batch.len(),
        };
        self.sender.send(submission).map_err(|e| e.0.batch)?;
        debug!("Queued submission {} ({} jobs)", ticket.id, ticket.jobs);
        Ok(ticket)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Owns the background task that turns submissions into sessions
pub struct SubmissionWorker {
    handle: SubmissionHandle,
    task: JoinHandle<()>,
}

impl SubmissionWorker {
    /// Start the worker on the current runtime
    pub fn start(
        config: SessionConfig,
        policy: SubmissionPolicy,
        sink: Arc<dyn OutputSink>,
    ) -> (Self, mpsc::UnboundedReceiver<SubmissionEvent>) {
        let (handle, submissions) = SubmissionHandle::channel();
        let (events, event_rx) = mpsc::unbounded_channel();
        info!("Starting submission worker ({:?})", policy);
        let task = tokio::spawn(run_worker(submissions, config, policy, sink, events));
        (Self { handle, task }, event_rx)
    }

    pub fn handle(&self) -> SubmissionHandle {
        self.handle.clone()
    }

    /// Stop taking submissions and wait for queued and running ones to finish.
    /// Handles cloned from this worker must be dropped first.
    pub async fn shutdown(self) {
        drop(self.handle);
        if let Err(e) = self.task.await {
            warn!("Submission worker ended abnormally: {}", e);
        }
        info!("Submission worker stopped");
    }
}

async fn run_worker(
    mut submissions: mpsc::UnboundedReceiver<Submission>,
    config: SessionConfig,
    policy: SubmissionPolicy,
    sink: Arc<dyn OutputSink>,
    events: mpsc::UnboundedSender<SubmissionEvent>,
) {
    let mut in_flight = JoinSet::new();

    while let Some(submission) = submissions.recv().await {
        let run = run_submission(submission, config.clone(), sink.clone(), events.clone());
        match policy {
            SubmissionPolicy::Serialized => run.await,
            SubmissionPolicy::Concurrent => {
                in_flight.spawn(run);
                // reap finished sessions as we go
                while in_flight.try_join_next().is_some() {}
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            warn!("Submission task failed: {}", e);
        }
    }
}

async fn run_submission(
    submission: Submission,
    config: SessionConfig,
    sink: Arc<dyn OutputSink>,
    events: mpsc::UnboundedSender<SubmissionEvent>,
) {
    let Submission { id, batch } = submission;
    // a dropped receiver only means nobody is listening
    let _ = events.send(SubmissionEvent::Started {
        submission_id: id,
        jobs: batch.len(),
    });

    let session = ProcessSession::with_id(id, config, batch.clone());
    let event = match session.run(sink).await {
        Ok(report) => SubmissionEvent::Finished {
            submission_id: id,
            report,
        },
        Err(error) => {
            warn!(session_id = %id, jobs = batch.len(), "Submission failed: {}", error);
            SubmissionEvent::Failed {
                submission_id: id,
                batch,
                error,
            }
        }
    };
    let _ = events.send(event);
}
