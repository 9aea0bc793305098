//! `rts-queue`: indexed priority queue shared by routing and simulation.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`heap`]   | `IndexedPriorityQueue<T, C>`, `HeapHandle`, `QueueStats`     |
//! | [`error`]  | `QueueError`, `QueueResult<T>`                               |
//!
//! # Handles
//!
//! `push` returns a [`HeapHandle`] that addresses the same logical element
//! until it leaves the queue (by `pop`, `remove`, `retain` or `clear`),
//! however many sifts move it around the backing array.  Handles come from
//! a monotonically increasing counter and are never reissued, so a stale
//! handle can only ever produce [`QueueError::InvalidHandle`].
//!
//! # Example
//!
//! ```
//! use rts_queue::IndexedPriorityQueue;
//!
//! let mut q = IndexedPriorityQueue::new();
//! let far = q.push(9);
//! q.push(5);
//! q.decrease_key(far, 1).unwrap();
//! assert_eq!(q.pop(), Some(1));
//! assert_eq!(q.pop(), Some(5));
//! ```

pub mod error;
pub mod heap;


pub use error::{QueueError, QueueResult};
pub use heap::{HeapHandle, IndexedPriorityQueue, QueueStats};
