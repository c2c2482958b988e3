//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations, run them against a
//! queue and against a simple reference model, and check that every observable
//! result matches. The model keeps `(value, priority, sequence)` triples in a
//! vector and always removes the minimum `(priority, sequence)`, which is the
//! exact order the queues promise.

use proptest::prelude::*;
use stable_pqueue::{IndexedPriorityQueue, PriorityQueue, Queue, QueueError};

#[derive(Debug, Clone)]
enum Op {
    Enqueue(i32),
    Dequeue,
    DecreaseKey(usize, i32),
    Peek,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-50i32..50).prop_map(Op::Enqueue),
        2 => Just(Op::Dequeue),
        2 => (0usize..64, -80i32..50).prop_map(|(idx, p)| Op::DecreaseKey(idx, p)),
        1 => Just(Op::Peek),
    ]
}

/// Reference model: unsorted triples, minimum found by scanning
#[derive(Default)]
struct Model {
    live: Vec<(u32, i32, u64)>,
    next_sequence: u64,
}

impl Model {
    fn min_index(&self) -> Option<usize> {
        self.live
            .iter()
            .enumerate()
            .min_by_key(|(_, (_, priority, sequence))| (*priority, *sequence))
            .map(|(i, _)| i)
    }

    fn enqueue(&mut self, value: u32, priority: i32) {
        self.live.push((value, priority, self.next_sequence));
        self.next_sequence += 1;
    }

    fn peek(&self) -> Option<(u32, i32)> {
        self.min_index().map(|i| (self.live[i].0, self.live[i].1))
    }

    fn dequeue(&mut self) -> Option<u32> {
        self.min_index().map(|i| self.live.remove(i).0)
    }

    fn decrease_key(&mut self, value: u32, priority: i32) -> Result<(), QueueError> {
        let entry = self
            .live
            .iter_mut()
            .find(|(v, _, _)| *v == value)
            .ok_or(QueueError::NotFound)?;
        if priority >= entry.1 {
            return Err(QueueError::InvalidPriority);
        }
        entry.1 = priority;
        Ok(())
    }
}

/// Runs `ops` against a queue and the model; values are unique insertion ids
fn check_against_model<Q: Queue<u32, i32>>(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut queue = Q::new();
    let mut model = Model::default();
    let mut next_value = 0u32;

    for op in ops {
        match op {
            Op::Enqueue(priority) => {
                queue.enqueue(next_value, priority);
                model.enqueue(next_value, priority);
                next_value += 1;
            }
            Op::Dequeue => {
                let expected = model.dequeue().ok_or(QueueError::EmptyQueue);
                prop_assert_eq!(queue.dequeue(), expected);
            }
            Op::DecreaseKey(target, priority) => {
                // Targets past the last inserted value exercise NotFound.
                let value = target as u32;
                let expected = model.decrease_key(value, priority);
                prop_assert_eq!(queue.decrease_key(&value, priority), expected);
            }
            Op::Peek => {
                let expected = model.peek();
                prop_assert_eq!(queue.peek().ok().copied(), expected.map(|(v, _)| v));
                prop_assert_eq!(queue.peek_priority().ok(), expected.map(|(_, p)| p));
            }
        }

        prop_assert_eq!(queue.len(), model.live.len());
        for (value, priority, _) in &model.live {
            prop_assert!(queue.contains(value));
            prop_assert_eq!(queue.get_priority(value), Ok(*priority));
        }
    }

    // Draining must reproduce the model's order exactly.
    while let Some(expected) = model.dequeue() {
        prop_assert_eq!(queue.dequeue(), Ok(expected));
    }
    prop_assert_eq!(queue.dequeue(), Err(QueueError::EmptyQueue));

    Ok(())
}

/// Test that a full drain is non-decreasing with ties in insertion order
fn check_round_trip<Q: Queue<usize, f64>>(priorities: Vec<f64>) -> Result<(), TestCaseError> {
    let mut queue = Q::new();
    for (value, priority) in priorities.iter().enumerate() {
        queue.enqueue(value, *priority);
    }

    let mut previous: Option<(f64, usize)> = None;
    while let Ok(priority) = queue.peek_priority() {
        let value = queue.dequeue().map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(priorities[value].to_bits(), priority.to_bits());
        if let Some((last_priority, last_value)) = previous {
            prop_assert!(last_priority.total_cmp(&priority).is_le());
            if last_priority.total_cmp(&priority).is_eq() {
                prop_assert!(last_value < value, "ties must dequeue in insertion order");
            }
        }
        previous = Some((priority, value));
    }
    prop_assert!(queue.is_empty());

    Ok(())
}

/// Test that both queues agree on every result, duplicates included
fn check_queues_agree(ops: Vec<(u8, u8, bool)>) -> Result<(), TestCaseError> {
    let mut scanning: PriorityQueue<u8, u8> = PriorityQueue::new();
    let mut indexed: IndexedPriorityQueue<u8, u8> = IndexedPriorityQueue::new();

    for (value, priority, decrease) in ops {
        if decrease {
            prop_assert_eq!(
                scanning.decrease_key(&value, priority),
                indexed.decrease_key(&value, priority)
            );
        } else if priority % 5 == 0 {
            prop_assert_eq!(scanning.dequeue(), indexed.dequeue());
        } else {
            scanning.enqueue(value, priority);
            indexed.enqueue(value, priority);
        }
        prop_assert_eq!(scanning.get_priority(&value), indexed.get_priority(&value));
        prop_assert_eq!(scanning.len(), indexed.len());
    }

    prop_assert_eq!(scanning.into_sorted_vec(), indexed.into_sorted_vec());
    Ok(())
}

proptest! {
    #[test]
    fn test_priority_queue_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_model::<PriorityQueue<u32, i32>>(ops)?;
    }

    #[test]
    fn test_indexed_queue_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_model::<IndexedPriorityQueue<u32, i32>>(ops)?;
    }

    #[test]
    fn test_priority_queue_round_trip(priorities in prop::collection::vec(-20.0f64..20.0, 0..150)) {
        check_round_trip::<PriorityQueue<usize, f64>>(priorities)?;
    }

    #[test]
    fn test_indexed_queue_round_trip(priorities in prop::collection::vec(-20.0f64..20.0, 0..150)) {
        check_round_trip::<IndexedPriorityQueue<usize, f64>>(priorities)?;
    }

    #[test]
    fn test_round_trip_with_heavy_ties(priorities in prop::collection::vec(prop::sample::select(vec![-1.0f64, 0.0, 2.5]), 0..100)) {
        check_round_trip::<PriorityQueue<usize, f64>>(priorities.clone())?;
        check_round_trip::<IndexedPriorityQueue<usize, f64>>(priorities)?;
    }

    #[test]
    fn test_queues_agree_with_duplicates(ops in prop::collection::vec((0u8..8, any::<u8>(), prop::bool::weighted(0.3)), 0..150)) {
        check_queues_agree(ops)?;
    }
}
