//! Encoding must be losslessly decodable for any non-empty batch

use printq_core::{Batch, Category, JobRecord, Priority};
use printq_ipc::{decode, encode, FIELDS_PER_JOB};
use proptest::prelude::*;

fn job_strategy() -> impl Strategy<Value = JobRecord> {
    (any::<i32>(), any::<i32>(), 0usize..3, 0usize..3).prop_map(|(id, pages, c, p)| {
        JobRecord::new(id, pages, Category::all()[c], Priority::all()[p])
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(jobs in prop::collection::vec(job_strategy(), 1..64)) {
        let batch = Batch::new(jobs).unwrap();
        let text = encode(&batch);

        prop_assert!(text.ends_with('\n'));
        prop_assert_eq!(text.lines().count(), 1 + FIELDS_PER_JOB * batch.len());
        prop_assert_eq!(decode(&text).unwrap(), batch);
    }
}

#[test]
fn duplicate_ids_survive_round_trip() {
    let job = JobRecord::new(3, 3, Category::Advertisement, Priority::Medium);
    let batch = Batch::new(vec![job, job, job]).unwrap();
    assert_eq!(decode(&encode(&batch)).unwrap().len(), 3);
}
