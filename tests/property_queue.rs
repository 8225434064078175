// tests/property_queue.rs

use proptest::prelude::*;

use noticer::engine::task_queue;
use noticer::types::{Priority, TaskRequest};

// Requests are tagged with their enqueue index so ordering can be checked
// after the fact.
fn tagged(i: usize) -> TaskRequest {
    TaskRequest::Unrecognized(i.to_string())
}

fn tag_of(request: &TaskRequest) -> usize {
    match request {
        TaskRequest::Unrecognized(tag) => tag.parse().unwrap(),
        other => panic!("unexpected request {other:?}"),
    }
}

proptest! {
    #[test]
    fn dequeue_order_is_priority_then_arrival(priorities in proptest::collection::vec(0u32..5, 0..64)) {
        let (tx, mut rx) = task_queue();
        for (i, p) in priorities.iter().enumerate() {
            tx.enqueue(Priority(*p), tagged(i)).unwrap();
        }

        let mut served = Vec::new();
        while let Some(request) = rx.try_dequeue() {
            served.push(tag_of(&request));
        }

        // Nothing is dropped or merged.
        prop_assert_eq!(served.len(), priorities.len());

        let mut expected: Vec<usize> = (0..priorities.len()).collect();
        expected.sort_by_key(|&i| (priorities[i], i));
        prop_assert_eq!(served, expected);
    }
}
