//! Operator-facing job operations
//!
//! The dispatcher owns the job queue and is the only thing that mutates it.
//! Submissions take jobs out of the queue and hand them to the submission
//! worker as one batch. A batch the worker refuses goes back where it came
//! from. Once accepted the handoff is one-way: if the session later fails,
//! the jobs are reported in the failure event and are not put back.

use printq_core::{Batch, JobQueue, JobRecord, QueueError, ValidationError};
use tracing::{debug, info, warn};

use crate::error::SubmitError;
use crate::worker::{SubmissionHandle, SubmissionTicket};

pub struct Dispatcher {
    queue: JobQueue,
    submitter: SubmissionHandle,
}

impl Dispatcher {
    pub fn new(submitter: SubmissionHandle) -> Self {
        Self::with_queue(JobQueue::new(), submitter)
    }

    pub fn with_queue(queue: JobQueue, submitter: SubmissionHandle) -> Self {
        Self { queue, submitter }
    }

    /// Validate operator input and append the job
    pub fn add_job(
        &mut self,
        job_id: &str,
        pages: &str,
        category: &str,
        priority: &str,
    ) -> Result<JobRecord, ValidationError> {
        let record = JobRecord::parse(job_id, pages, category, priority)?;
        self.add_record(record);
        Ok(record)
    }

    pub fn add_record(&mut self, record: JobRecord) {
        debug!("Queued job {}", record);
        self.queue.add(record);
    }

    pub fn list_jobs(&self) -> &JobQueue {
        &self.queue
    }

    pub fn remove_job(&mut self, index: usize) -> Result<JobRecord, QueueError> {
        let removed = self.queue.remove_at(index)?;
        debug!("Removed job {} at index {}", removed, index);
        Ok(removed)
    }

    /// Submit the job at `index` on its own
    pub fn submit_one(&mut self, index: usize) -> Result<SubmissionTicket, SubmitError> {
        let batch = self
            .queue
            .take_one(index)
            .map_err(SubmitError::InvalidSelection)?;
        let ticket = self.hand_over(index, batch)?;
        info!("Submitted job at index {} as {}", index, ticket.id);
        Ok(ticket)
    }

    /// Submit every queued job as one batch, emptying the queue
    pub fn submit_all(&mut self) -> Result<SubmissionTicket, SubmitError> {
        let batch = self.queue.drain_all().map_err(|e| match e {
            QueueError::Empty => SubmitError::EmptySubmission,
            other => SubmitError::InvalidSelection(other),
        })?;
        let ticket = self.hand_over(0, batch)?;
        info!("Submitted {} jobs as {}", ticket.jobs, ticket.id);
        Ok(ticket)
    }

    fn hand_over(&mut self, index: usize, batch: Batch) -> Result<SubmissionTicket, SubmitError> {
        self.submitter.try_submit(batch).map_err(|batch| {
            warn!("Submission worker has stopped; returning {} jobs to the queue", batch.len());
            self.queue.restore(index, batch);
            SubmitError::WorkerUnavailable
        })
    }
}
