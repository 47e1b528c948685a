//! Immutable group of jobs handed to one submission

use std::sync::Arc;

use crate::job::JobRecord;

/// A non-empty, ordered, immutable sequence of jobs.
///
/// Cloning is cheap and shares the same underlying jobs; there is no way to
/// mutate a batch once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    jobs: Arc<[JobRecord]>,
}

impl Batch {
    /// Returns `None` for an empty job list
    pub fn new(jobs: Vec<JobRecord>) -> Option<Self> {
        if jobs.is_empty() {
            None
        } else {
            Some(Self { jobs: jobs.into() })
        }
    }

    pub fn single(job: JobRecord) -> Self {
        Self {
            jobs: Arc::from([job]),
        }
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobRecord> {
        self.jobs.iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a JobRecord;
    type IntoIter = std::slice::Iter<'a, JobRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{Category, Priority};

    #[test]
    fn test_empty_batch_rejected() {
        assert!(Batch::new(Vec::new()).is_none());
    }

    #[test]
    fn test_clone_shares_jobs() {
        let job = JobRecord::new(1, 1, Category::Magazine, Priority::Low);
        let batch = Batch::single(job);
        let copy = batch.clone();
        assert_eq!(batch, copy);
        assert_eq!(copy.len(), 1);
    }
}
