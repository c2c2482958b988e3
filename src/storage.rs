//! Array-backed entry storage shared by the queue implementations
//!
//! [`EntryHeap`] owns the contiguous entry vector, the insertion sequence
//! counter, and the sift operations that maintain heap order. Both queue
//! types are thin layers over it:
//!
//! - [`PriorityQueue`](crate::priority_queue::PriorityQueue) finds values by
//!   scanning the entries
//! - [`IndexedPriorityQueue`](crate::indexed::IndexedPriorityQueue) keeps a
//!   value→position map, which it updates from the relocations reported by the
//!   sift operations
//!
//! # Layout
//!
//! Entries occupy indices `0..len` and form an implicit binary tree: the
//! parent of `i` is `(i - 1) / 2` and its children are `2i + 1` and `2i + 2`.
//!
//! # Ordering
//!
//! Entries compare by the composite key `(priority, sequence)`. The sequence
//! is assigned at insertion and never repeats, so the key is a strict total
//! order and ties in priority resolve first-in first-out.
//!
//! # Relocation reporting
//!
//! Every operation that moves an entry takes a `relocate: FnMut(&T, usize, usize)`
//! callback, invoked as `relocate(value, from, to)` after the entry has moved.

use crate::traits::{Priority, QueueError};
use std::cmp::Ordering;

/// Default backing capacity of a freshly constructed queue
pub const INITIAL_CAPACITY: usize = 16;

/// A value stored in the heap together with its ordering key
#[derive(Debug, Clone)]
pub(crate) struct Entry<T, P> {
    pub(crate) value: T,
    pub(crate) priority: P,
    pub(crate) sequence: u64,
}

impl<T, P: Priority> Entry<T, P> {
    /// Compares by priority, then by insertion sequence
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.priority
            .cmp_priority(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }

    fn precedes(&self, other: &Self) -> bool {
        self.cmp_key(other) == Ordering::Less
    }
}

#[inline]
fn parent(index: usize) -> usize {
    (index - 1) / 2
}

#[inline]
fn left(index: usize) -> usize {
    2 * index + 1
}

#[inline]
fn right(index: usize) -> usize {
    2 * index + 2
}

/// Binary min-heap of entries ordered by `(priority, sequence)`
#[derive(Debug, Clone)]
pub(crate) struct EntryHeap<T, P> {
    entries: Vec<Entry<T, P>>,
    next_sequence: u64,
}

impl<T, P: Priority> EntryHeap<T, P> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub(crate) fn entries(&self) -> &[Entry<T, P>] {
        &self.entries
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Entry<T, P>> {
        self.entries.get(index)
    }

    pub(crate) fn peek(&self) -> Option<&Entry<T, P>> {
        self.entries.first()
    }

    /// Returns the index of the first entry matching `pred`, in array order
    pub(crate) fn position<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.entries.iter().position(|entry| pred(&entry.value))
    }

    /// Drops all entries; the sequence counter keeps running
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Doubles the backing storage when it is full
    fn ensure_capacity(&mut self) {
        let capacity = self.entries.capacity();
        if self.entries.len() < capacity {
            return;
        }
        let additional = capacity.max(1);
        self.entries.reserve_exact(additional);
        log::trace!(
            "grew queue storage from {} to {} entries",
            capacity,
            self.entries.capacity()
        );
    }

    /// Appends an entry with the next sequence number and sifts it up
    ///
    /// The new entry starts at index `len()` (before the call); callers that
    /// track positions register it there before any relocation is reported.
    pub(crate) fn push<F>(&mut self, value: T, priority: P, relocate: F)
    where
        F: FnMut(&T, usize, usize),
    {
        self.ensure_capacity();

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let index = self.entries.len();
        self.entries.push(Entry {
            value,
            priority,
            sequence,
        });
        self.sift_up(index, relocate);
    }

    /// Removes and returns the root entry
    ///
    /// The last entry is moved into the root slot (reported as a relocation
    /// from `len() - 1` to `0`) and sifted down.
    pub(crate) fn pop<F>(&mut self, mut relocate: F) -> Option<Entry<T, P>>
    where
        F: FnMut(&T, usize, usize),
    {
        if self.entries.len() <= 1 {
            return self.entries.pop();
        }

        let last = self.entries.len() - 1;
        let root = self.entries.swap_remove(0);
        relocate(&self.entries[0].value, last, 0);
        self.sift_down(0, relocate);
        Some(root)
    }

    /// Lowers the priority of the entry at `index` and restores heap order
    ///
    /// # Errors
    /// Returns [`QueueError::InvalidPriority`] without modifying anything if
    /// `new_priority` is not strictly lower than the current priority.
    pub(crate) fn decrease_priority<F>(
        &mut self,
        index: usize,
        new_priority: P,
        relocate: F,
    ) -> Result<usize, QueueError>
    where
        F: FnMut(&T, usize, usize),
    {
        let entry = self.entries.get_mut(index).ok_or(QueueError::NotFound)?;
        if new_priority.cmp_priority(&entry.priority) != Ordering::Less {
            return Err(QueueError::InvalidPriority);
        }
        entry.priority = new_priority;
        Ok(self.sift_up(index, relocate))
    }

    /// Swaps two slots and reports both relocations
    fn swap<F>(&mut self, a: usize, b: usize, relocate: &mut F)
    where
        F: FnMut(&T, usize, usize),
    {
        self.entries.swap(a, b);
        relocate(&self.entries[a].value, b, a);
        relocate(&self.entries[b].value, a, b);
    }

    /// Moves the entry at `index` toward the root; returns its final index
    fn sift_up<F>(&mut self, mut index: usize, mut relocate: F) -> usize
    where
        F: FnMut(&T, usize, usize),
    {
        while index > 0 {
            let parent = parent(index);
            if self.entries[index].precedes(&self.entries[parent]) {
                self.swap(index, parent, &mut relocate);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    /// Moves the entry at `index` toward the leaves
    fn sift_down<F>(&mut self, mut index: usize, mut relocate: F)
    where
        F: FnMut(&T, usize, usize),
    {
        let len = self.entries.len();
        loop {
            let left = left(index);
            let right = right(index);
            let mut smallest = index;

            if left < len && self.entries[left].precedes(&self.entries[smallest]) {
                smallest = left;
            }
            if right < len && self.entries[right].precedes(&self.entries[smallest]) {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.swap(index, smallest, &mut relocate);
            index = smallest;
        }
    }

    /// Checks heap order over the composite key for every non-root entry
    #[cfg(test)]
    pub(crate) fn is_heap_ordered(&self) -> bool {
        (1..self.entries.len())
            .all(|i| self.entries[parent(i)].cmp_key(&self.entries[i]) == Ordering::Less)
    }
}

/// A relocation callback for callers that do not track positions
pub(crate) fn ignore_relocation<T>(_: &T, _: usize, _: usize) {}
