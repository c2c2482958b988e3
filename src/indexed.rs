//! Priority queue with a value→position index
//!
//! [`IndexedPriorityQueue`] has the same semantics as
//! [`PriorityQueue`](crate::priority_queue::PriorityQueue) but keeps an
//! auxiliary hash map from each value to the slots it occupies. The map is
//! updated from every relocation the sift operations report, so value lookups
//! no longer scan the heap.
//!
//! Duplicate values are allowed. Each value maps to all of its live slots and
//! lookups pick the lowest slot, which is exactly the first match a linear
//! scan in heap-array order would find.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity                    |
//! |----------------|-------------------------------|
//! | `enqueue`      | O(log n) amortized            |
//! | `dequeue`      | O(log n)                      |
//! | `peek`         | O(1)                          |
//! | `decrease_key` | O(log n) expected             |
//! | `get_priority` | O(1) expected                 |
//! | `contains`     | O(1) expected                 |
//!
//! Each relocation costs one hash lookup, so `enqueue` and `dequeue` carry a
//! larger constant factor than in the scanning queue.
//!
//! # Example
//!
//! ```rust
//! use stable_pqueue::{IndexedPriorityQueue, Queue};
//!
//! let mut queue: IndexedPriorityQueue<u32, u64> = IndexedPriorityQueue::new();
//! for node in 0..1000 {
//!     queue.enqueue(node, 1_000_000);
//! }
//! queue.decrease_key(&999, 3).unwrap();
//!
//! assert_eq!(queue.get_priority(&999), Ok(3));
//! assert_eq!(queue.dequeue(), Ok(999));
//! assert!(!queue.contains(&999));
//! ```

use crate::storage::{EntryHeap, INITIAL_CAPACITY};
use crate::traits::{Priority, Queue, QueueError};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

/// Slots occupied by one value; almost always a single slot
type Slots = SmallVec<[usize; 1]>;

/// A binary min-heap keyed by `(priority, insertion sequence)` with O(1)
/// expected value lookup
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<T, P = f32>
where
    T: Hash + Eq,
{
    heap: EntryHeap<T, P>,
    positions: FxHashMap<T, Slots>,
}

/// Moves one recorded slot of `value` from `from` to `to`
fn relocate_slot<T: Hash + Eq>(
    positions: &mut FxHashMap<T, Slots>,
    value: &T,
    from: usize,
    to: usize,
) {
    if let Some(slot) = positions
        .get_mut(value)
        .and_then(|slots| slots.iter_mut().find(|slot| **slot == from))
    {
        *slot = to;
    }
}

impl<T, P> IndexedPriorityQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Priority,
{
    /// Returns the first slot holding `value`, in heap-array order
    fn first_slot(&self, value: &T) -> Option<usize> {
        self.positions
            .get(value)
            .and_then(|slots| slots.iter().copied().min())
    }

    /// Forgets the slot of an entry that is leaving the heap
    fn forget_slot(&mut self, value: &T, index: usize) {
        let now_empty = match self.positions.get_mut(value) {
            Some(slots) => {
                if let Some(pos) = slots.iter().position(|slot| *slot == index) {
                    slots.swap_remove(pos);
                }
                slots.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.positions.remove(value);
        }
    }

    fn remove_root(&mut self) -> Option<(T, P)> {
        let root_value = self.heap.peek()?.value.clone();
        self.forget_slot(&root_value, 0);

        let positions = &mut self.positions;
        self.heap
            .pop(|moved: &T, from, to| relocate_slot(positions, moved, from, to))
            .map(|entry| (entry.value, entry.priority))
    }

    /// Returns the minimum value and its priority, or `None` if empty
    pub fn peek_entry(&self) -> Option<(&T, P)> {
        self.heap.peek().map(|entry| (&entry.value, entry.priority))
    }

    /// Removes and returns the minimum value with its priority
    pub fn pop(&mut self) -> Option<(T, P)> {
        self.remove_root()
    }

    /// Removes every entry, keeping the allocated capacity
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    /// Iterates over `(value, priority)` pairs in storage order, not priority order
    pub fn iter(&self) -> impl Iterator<Item = (&T, P)> + '_ {
        self.heap
            .entries()
            .iter()
            .map(|entry| (&entry.value, entry.priority))
    }

    /// Drains the queue into `(value, priority)` pairs in dequeue order
    pub fn into_sorted_vec(mut self) -> Vec<(T, P)> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Some(pair) = self.pop() {
            sorted.push(pair);
        }
        sorted
    }

    /// Checks that every recorded slot holds its value and every entry is recorded
    #[cfg(test)]
    fn index_is_consistent(&self) -> bool {
        let recorded: usize = self.positions.values().map(|slots| slots.len()).sum();
        recorded == self.heap.len()
            && self.positions.iter().all(|(value, slots)| {
                slots
                    .iter()
                    .all(|&slot| self.heap.get(slot).map(|entry| &entry.value) == Some(value))
            })
    }
}

impl<T, P> Queue<T, P> for IndexedPriorityQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Priority,
{
    fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: EntryHeap::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    fn enqueue(&mut self, value: T, priority: P) {
        self.positions
            .entry(value.clone())
            .or_default()
            .push(self.heap.len());

        let positions = &mut self.positions;
        self.heap.push(value, priority, |moved: &T, from, to| {
            relocate_slot(positions, moved, from, to)
        });
    }

    fn peek(&self) -> Result<&T, QueueError> {
        self.heap
            .peek()
            .map(|entry| &entry.value)
            .ok_or(QueueError::EmptyQueue)
    }

    fn peek_priority(&self) -> Result<P, QueueError> {
        self.heap
            .peek()
            .map(|entry| entry.priority)
            .ok_or(QueueError::EmptyQueue)
    }

    fn dequeue(&mut self) -> Result<T, QueueError> {
        self.remove_root()
            .map(|(value, _)| value)
            .ok_or(QueueError::EmptyQueue)
    }

    fn decrease_key(&mut self, value: &T, new_priority: P) -> Result<(), QueueError> {
        let index = self.first_slot(value).ok_or(QueueError::NotFound)?;

        let positions = &mut self.positions;
        let moved_to = self
            .heap
            .decrease_priority(index, new_priority, |moved: &T, from, to| {
                relocate_slot(positions, moved, from, to)
            })?;
        if moved_to != index {
            log::trace!("decrease_key moved entry from slot {} to {}", index, moved_to);
        }
        Ok(())
    }

    fn get_priority(&self, value: &T) -> Result<P, QueueError> {
        self.first_slot(value)
            .and_then(|index| self.heap.get(index))
            .map(|entry| entry.priority)
            .ok_or(QueueError::NotFound)
    }

    fn contains(&self, value: &T) -> bool {
        self.positions.contains_key(value)
    }
}

impl<T, P> Default for IndexedPriorityQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Priority,
{
    fn default() -> Self {
        <Self as Queue<T, P>>::new()
    }
}

impl<T, P> Extend<(T, P)> for IndexedPriorityQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Priority,
{
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.enqueue(value, priority);
        }
    }
}

impl<T, P> FromIterator<(T, P)> for IndexedPriorityQueue<T, P>
where
    T: Hash + Eq + Clone,
    P: Priority,
{
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut queue = <Self as Queue<T, P>>::new();
        queue.extend(iter);
        queue
    }
}
