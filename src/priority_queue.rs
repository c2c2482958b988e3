//! Binary min-heap priority queue with FIFO tie-breaking
//!
//! [`PriorityQueue`] stores `(value, priority)` pairs in a contiguous array
//! laid out as an implicit binary tree. The lowest priority is dequeued
//! first; entries with equal priority are dequeued in insertion order.
//!
//! Values are located by equality with a linear scan, so `decrease_key`,
//! `get_priority` and `contains` are O(n). Use
//! [`IndexedPriorityQueue`](crate::indexed::IndexedPriorityQueue) when those
//! lookups are on a hot path and values are hashable.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity          |
//! |----------------|---------------------|
//! | `enqueue`      | O(log n) amortized  |
//! | `dequeue`      | O(log n)            |
//! | `peek`         | O(1)                |
//! | `decrease_key` | O(n)                |
//! | `get_priority` | O(n)                |
//! | `contains`     | O(n)                |
//!
//! # Example
//!
//! ```rust
//! use stable_pqueue::{PriorityQueue, Queue};
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("b", 2.0);
//! queue.enqueue("a", 1.0);
//! queue.enqueue("c", 2.0);
//!
//! assert_eq!(queue.peek(), Ok(&"a"));
//! assert_eq!(queue.dequeue(), Ok("a"));
//! assert_eq!(queue.dequeue(), Ok("b")); // inserted before "c"
//! assert_eq!(queue.dequeue(), Ok("c"));
//! assert!(queue.dequeue().is_err());
//! ```

use crate::storage::{ignore_relocation, EntryHeap, INITIAL_CAPACITY};
use crate::traits::{Priority, Queue, QueueError};

/// A binary min-heap keyed by `(priority, insertion sequence)`
///
/// `P` defaults to `f32`. Any [`Priority`] type works, including the other
/// float and integer primitives.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, P = f32> {
    heap: EntryHeap<T, P>,
}

impl<T: PartialEq, P: Priority> Queue<T, P> for PriorityQueue<T, P> {
    fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: EntryHeap::with_capacity(capacity),
        }
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    fn enqueue(&mut self, value: T, priority: P) {
        self.heap.push(value, priority, ignore_relocation);
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
        self.heap
            .pop(ignore_relocation)
            .map(|entry| entry.value)
            .ok_or(QueueError::EmptyQueue)
    }

    fn decrease_key(&mut self, value: &T, new_priority: P) -> Result<(), QueueError> {
        let index = self
            .heap
            .position(|candidate| candidate == value)
            .ok_or(QueueError::NotFound)?;
        let moved_to = self
            .heap
            .decrease_priority(index, new_priority, ignore_relocation)?;
        if moved_to != index {
            log::trace!("decrease_key moved entry from slot {} to {}", index, moved_to);
        }
        Ok(())
    }

    fn get_priority(&self, value: &T) -> Result<P, QueueError> {
        self.heap
            .entries()
            .iter()
            .find(|entry| entry.value == *value)
            .map(|entry| entry.priority)
            .ok_or(QueueError::NotFound)
    }

    fn contains(&self, value: &T) -> bool {
        self.heap.position(|candidate| candidate == value).is_some()
    }
}

impl<T, P: Priority> PriorityQueue<T, P> {
    /// Returns the minimum value and its priority, or `None` if empty
    pub fn peek_entry(&self) -> Option<(&T, P)> {
        self.heap.peek().map(|entry| (&entry.value, entry.priority))
    }

    /// Removes and returns the minimum value with its priority
    ///
    /// This is the non-failing counterpart of [`Queue::dequeue`], handy in
    /// `while let` loops.
    pub fn pop(&mut self) -> Option<(T, P)> {
        self.heap
            .pop(ignore_relocation)
            .map(|entry| (entry.value, entry.priority))
    }

    /// Removes every entry, keeping the allocated capacity
    pub fn clear(&mut self) {
        self.heap.clear();
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
}

impl<T: PartialEq, P: Priority> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        <Self as Queue<T, P>>::new()
    }
}

impl<T: PartialEq, P: Priority> Extend<(T, P)> for PriorityQueue<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.enqueue(value, priority);
        }
    }
}

impl<T: PartialEq, P: Priority> FromIterator<(T, P)> for PriorityQueue<T, P> {
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut queue = <Self as Queue<T, P>>::new();
        queue.extend(iter);
        queue
    }
}
