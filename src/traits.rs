//! Common traits for the priority queues
//!
//! This module provides the pieces shared by both queue implementations:
//!
//! - [`Priority`]: a total order over numeric priority types, floats included
//! - [`QueueError`]: the failure conditions of queue operations
//! - [`Queue`]: the operation set implemented by
//!   [`PriorityQueue`](crate::priority_queue::PriorityQueue) and
//!   [`IndexedPriorityQueue`](crate::indexed::IndexedPriorityQueue)
//!
//! Generic consumers such as [`dijkstra`](crate::pathfinding::dijkstra) are
//! written against [`Queue`] so either implementation can be plugged in.

use std::cmp::Ordering;
use std::fmt;

/// Error type for queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The operation needs a live entry but the queue is empty
    EmptyQueue,
    /// No live entry compares equal to the requested value
    NotFound,
    /// The new priority is not strictly lower than the current priority
    InvalidPriority,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::EmptyQueue => write!(f, "queue is empty"),
            QueueError::NotFound => write!(f, "value not found in queue"),
            QueueError::InvalidPriority => {
                write!(f, "new priority is not less than current priority")
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// A priority type with a total order
///
/// Floating point types only implement `PartialOrd`, which leaves NaN
/// unordered and would let a single NaN break the heap invariant. This trait
/// fixes a total order for every priority type the queues accept:
///
/// - `f32` / `f64` order by IEEE-754 `totalOrder` (`total_cmp`): `-0.0`
///   sorts before `+0.0` and positive NaN sorts after `+inf`
/// - integer types order by `Ord`
///
/// # Example
///
/// ```rust
/// use std::cmp::Ordering;
/// use stable_pqueue::Priority;
///
/// assert_eq!(1.5f32.cmp_priority(&2.0), Ordering::Less);
/// assert_eq!(f64::NAN.cmp_priority(&f64::INFINITY), Ordering::Greater);
/// assert_eq!(7u32.cmp_priority(&7), Ordering::Equal);
/// ```
pub trait Priority: Copy + fmt::Debug {
    /// Compares two priorities; lower priorities are dequeued first
    fn cmp_priority(&self, other: &Self) -> Ordering;
}

impl Priority for f32 {
    fn cmp_priority(&self, other: &Self) -> Ordering {
        f32::total_cmp(self, other)
    }
}

impl Priority for f64 {
    fn cmp_priority(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }
}

macro_rules! impl_priority_for_ord {
    ($($t:ty),* $(,)?) => {
        $(
            impl Priority for $t {
                fn cmp_priority(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

impl_priority_for_ord!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Operations shared by the priority queues in this crate
///
/// All queues are min-queues over a composite key `(priority, sequence)`:
/// the lowest priority is dequeued first and equal priorities are dequeued
/// in insertion order.
///
/// Value-based operations (`decrease_key`, `get_priority`, `contains`) act
/// on the first live entry that compares equal to the requested value, in
/// heap-array order. Callers that need a specific duplicate should keep
/// values unique.
///
/// # Example
///
/// ```rust
/// use stable_pqueue::{PriorityQueue, Queue, QueueError};
///
/// let mut queue: PriorityQueue<&str> = Queue::new();
/// queue.enqueue("slow", 3.0);
/// queue.enqueue("fast", 1.0);
/// queue.decrease_key(&"slow", 0.5).unwrap();
///
/// assert_eq!(queue.dequeue(), Ok("slow"));
/// assert_eq!(queue.dequeue(), Ok("fast"));
/// assert_eq!(queue.dequeue(), Err(QueueError::EmptyQueue));
/// ```
pub trait Queue<T, P: Priority> {
    /// Creates a new empty queue with the default initial capacity
    fn new() -> Self;

    /// Creates a new empty queue able to hold `capacity` entries before growing
    fn with_capacity(capacity: usize) -> Self;

    /// Returns the number of live entries
    fn len(&self) -> usize;

    /// Returns true if the queue holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries the backing storage holds before growing
    fn capacity(&self) -> usize;

    /// Inserts a value with the given priority
    ///
    /// # Time Complexity
    /// O(log n) amortized; O(n) when the backing storage grows.
    fn enqueue(&mut self, value: T, priority: P);

    /// Returns the value with the minimum key without removing it
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    fn peek(&self) -> Result<&T, QueueError>;

    /// Returns the minimum priority without removing its entry
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    fn peek_priority(&self) -> Result<P, QueueError>;

    /// Removes and returns the value with the minimum key
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    ///
    /// # Time Complexity
    /// O(log n)
    fn dequeue(&mut self) -> Result<T, QueueError>;

    /// Lowers the priority of the first entry equal to `value`
    ///
    /// # Errors
    /// - [`QueueError::NotFound`] if no live entry equals `value`
    /// - [`QueueError::InvalidPriority`] if `new_priority` is not strictly
    ///   lower than the current priority; the queue is left unchanged
    fn decrease_key(&mut self, value: &T, new_priority: P) -> Result<(), QueueError>;

    /// Returns the priority of the first entry equal to `value`
    ///
    /// # Errors
    /// Returns [`QueueError::NotFound`] if no live entry equals `value`.
    fn get_priority(&self, value: &T) -> Result<P, QueueError>;

    /// Returns true if any live entry equals `value`
    fn contains(&self, value: &T) -> bool;
}
