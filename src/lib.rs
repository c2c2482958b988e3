//! Stable binary-heap priority queues for Rust
//!
//! This crate provides an array-backed binary min-heap priority queue with
//! first-in first-out tie-breaking and an explicit, value-keyed
//! `decrease_key` operation.
//!
//! # Features
//!
//! - **PriorityQueue**: O(log n) enqueue and dequeue; O(n) value lookup by equality
//! - **IndexedPriorityQueue**: same semantics, O(1) expected value lookup through a hash index
//! - **Stable ordering**: equal priorities dequeue in insertion order, including after `decrease_key`
//! - **Float priorities**: `f32`/`f64` are totally ordered with `total_cmp`, so NaN cannot corrupt the heap
//! - **Pathfinding**: Dijkstra's shortest path over either queue
//!
//! Operations that need a live entry return [`QueueError`] instead of a
//! default value, so an empty queue is never confused with a stored zero.
//!
//! # Example
//!
//! ```rust
//! use stable_pqueue::{PriorityQueue, Queue, QueueError};
//!
//! let mut queue: PriorityQueue<&str> = PriorityQueue::new();
//! queue.enqueue("render", 2.0);
//! queue.enqueue("input", 1.0);
//! queue.enqueue("audio", 2.0);
//! queue.decrease_key(&"audio", 0.5).unwrap();
//!
//! assert_eq!(queue.dequeue(), Ok("audio"));
//! assert_eq!(queue.dequeue(), Ok("input"));
//! assert_eq!(queue.dequeue(), Ok("render"));
//! assert_eq!(queue.peek(), Err(QueueError::EmptyQueue));
//! ```

pub mod indexed;
pub mod pathfinding;
pub mod priority_queue;
mod storage;
pub mod traits;

pub use indexed::IndexedPriorityQueue;
pub use priority_queue::PriorityQueue;
pub use storage::INITIAL_CAPACITY;
pub use traits::{Priority, Queue, QueueError};
