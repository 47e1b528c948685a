//! Property tests for queue ordering and drain semantics

use printq_core::{Category, JobQueue, JobRecord, Priority};
use proptest::prelude::*;

fn job_strategy() -> impl Strategy<Value = JobRecord> {
    (any::<i32>(), any::<i32>(), 0usize..3, 0usize..3).prop_map(|(id, pages, c, p)| {
        JobRecord::new(id, pages, Category::all()[c], Priority::all()[p])
    })
}

proptest! {
    #[test]
    fn removals_preserve_insertion_order(
        jobs in prop::collection::vec(job_strategy(), 1..40),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..40),
    ) {
        let mut queue = JobQueue::new();
        // Tag every job with its insertion position so duplicates stay distinguishable
        let mut expected: Vec<(usize, JobRecord)> = jobs.iter().copied().enumerate().collect();
        for job in &jobs {
            queue.add(*job);
        }

        for pick in removals {
            if expected.is_empty() {
                prop_assert!(queue.remove_at(0).is_err());
                continue;
            }
            let index = pick.index(expected.len());
            let removed = queue.remove_at(index).unwrap();
            let (_, want) = expected.remove(index);
            prop_assert_eq!(removed, want);
        }

        let positions: Vec<usize> = expected.iter().map(|(pos, _)| *pos).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let remaining: Vec<JobRecord> = expected.into_iter().map(|(_, j)| j).collect();
        prop_assert_eq!(queue.snapshot(), remaining);
    }

    #[test]
    fn drain_then_add_never_loses_or_duplicates(
        jobs in prop::collection::vec(job_strategy(), 0..20),
        late in job_strategy(),
        add_before_drain in any::<bool>(),
    ) {
        let mut queue = JobQueue::new();
        for job in &jobs {
            queue.add(*job);
        }

        if add_before_drain {
            queue.add(late);
            let batch = queue.drain_all().unwrap();
            let mut expected = jobs.clone();
            expected.push(late);
            prop_assert_eq!(batch.jobs(), expected.as_slice());
            prop_assert!(queue.is_empty());
        } else {
            let drained = queue.drain_all();
            match drained {
                Ok(batch) => prop_assert_eq!(batch.jobs(), jobs.as_slice()),
                Err(_) => prop_assert!(jobs.is_empty()),
            }
            queue.add(late);
            prop_assert_eq!(queue.snapshot(), vec![late]);
        }
    }
}
