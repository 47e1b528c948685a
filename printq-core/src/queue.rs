//! Operator-owned queue of pending jobs

use crate::batch::Batch;
use crate::error::QueueError;
use crate::job::JobRecord;

/// Ordered collection of jobs waiting to be submitted.
///
/// The queue has a single owner (the control thread). Jobs leave it only by
/// explicit removal or by being drained into a [`Batch`]; removal never
/// reorders the remaining jobs.
#[derive(Debug, Clone, Default)]
pub struct JobQueue {
    jobs: Vec<JobRecord>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job to the end of the queue
    pub fn add(&mut self, record: JobRecord) {
        self.jobs.push(record);
    }

    /// Remove and return the job at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<JobRecord, QueueError> {
        if index >= self.jobs.len() {
            return Err(QueueError::IndexOutOfBounds {
                index,
                len: self.jobs.len(),
            });
        }
        Ok(self.jobs.remove(index))
    }

    /// Take every queued job as one batch, leaving the queue empty.
    ///
    /// Fails with [`QueueError::Empty`] and leaves the queue untouched when
    /// nothing is queued.
    pub fn drain_all(&mut self) -> Result<Batch, QueueError> {
        if self.jobs.is_empty() {
            return Err(QueueError::Empty);
        }
        let jobs = std::mem::take(&mut self.jobs);
        Batch::new(jobs).ok_or(QueueError::Empty)
    }

    /// Take the job at `index` as a single-job batch
    pub fn take_one(&mut self, index: usize) -> Result<Batch, QueueError> {
        self.remove_at(index).map(Batch::single)
    }

    /// Put a batch's jobs back at `index`, in batch order.
    /// An index past the end appends.
    pub fn restore(&mut self, index: usize, batch: Batch) {
        let index = index.min(self.jobs.len());
        self.jobs.splice(index..index, batch.iter().copied());
    }

    /// Copy of the current contents, in queue order
    pub fn snapshot(&self) -> Vec<JobRecord> {
        self.jobs.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobRecord> {
        self.jobs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&JobRecord> {
        self.jobs.get(index)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
