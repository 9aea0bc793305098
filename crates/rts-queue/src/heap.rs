//! Binary array heap with a handle → position side table.
//!
//! # Data layout
//!
//! ```text
//! heap:      [ Entry{item, handle} ; len ]   implicit binary tree, root = min
//! positions: FxHashMap<HeapHandle, usize>    handle → index into `heap`
//! ```
//!
//! Every swap goes through [`IndexedPriorityQueue::swap_entries`], which
//! rewrites the `positions` entry of *both* swapped elements.
//!
//! # Ordering
//!
//! The comparator `C: Fn(&T, &T) -> Ordering` defines priority: `Less` means
//! "pops first".  Elements that compare `Equal` come out in an unspecified
//! order; callers that need FIFO ties must encode a sequence number in the
//! comparator, as the scheduler's event ordering does.

use std::cmp::Ordering;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::{QueueError, QueueResult};

// ── HeapHandle ────────────────────────────────────────────────────────────────

/// Stable address of one queued element.
///
/// Issued by [`IndexedPriorityQueue::push`]; valid until the element leaves
/// the queue.  Handles are unique per queue instance for its whole lifetime.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct HeapHandle(u64);

impl HeapHandle {
    /// The raw counter value.  Only meaningful within the issuing queue.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HeapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeapHandle({})", self.0)
    }
}

// ── QueueStats ────────────────────────────────────────────────────────────────

/// Operation counters, reset only by constructing a new queue.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub pushes:        u64,
    pub pops:          u64,
    pub decrease_keys: u64,
    pub removals:      u64,
    /// Largest `len()` ever observed.
    pub max_len:       usize,
}

// ── IndexedPriorityQueue ──────────────────────────────────────────────────────

struct Entry<T> {
    item:   T,
    handle: HeapHandle,
}

/// Min-heap with stable handles, O(log n) `decrease_key` and `remove`.
///
/// The default comparator type is a plain function pointer so the queue can
/// be stored in struct fields; pass a closure to
/// [`with_comparator`](Self::with_comparator) for local, short-lived queues.
pub struct IndexedPriorityQueue<T, C = fn(&T, &T) -> Ordering> {
    heap:        Vec<Entry<T>>,
    positions:   FxHashMap<HeapHandle, usize>,
    cmp:         C,
    next_handle: u64,
    stats:       QueueStats,
}

impl<T: Ord> IndexedPriorityQueue<T> {
    /// Empty queue ordered by `T`'s natural order (smallest first).
    pub fn new() -> Self {
        Self::with_comparator(<T as Ord>::cmp)
    }
}

impl<T: Ord> Default for IndexedPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> IndexedPriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_capacity_and_comparator(0, cmp)
    }

    /// Pre-allocate for `capacity` elements (e.g. the node count of a graph
    /// about to be searched).
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        let mut positions = FxHashMap::default();
        positions.reserve(capacity);
        Self {
            heap: Vec::with_capacity(capacity),
            positions,
            cmp,
            next_handle: 0,
            stats: QueueStats::default(),
        }
    }

    // ── Size ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn stats(&self) -> QueueStats {
        self.stats
    }

    // ── Insertion & extraction ────────────────────────────────────────────

    /// Insert `item` and return its handle.  O(log n).
    pub fn push(&mut self, item: T) -> HeapHandle {
        let handle = HeapHandle(self.next_handle);
        self.next_handle += 1;

        let pos = self.heap.len();
        self.heap.push(Entry { item, handle });
        self.positions.insert(handle, pos);
        self.sift_up(pos);

        self.stats.pushes += 1;
        self.stats.max_len = self.stats.max_len.max(self.heap.len());
        handle
    }

    /// The minimum element, without removing it.  O(1).
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|e| &e.item)
    }

    /// Handle of the minimum element.
    #[inline]
    pub fn peek_handle(&self) -> Option<HeapHandle> {
        self.heap.first().map(|e| e.handle)
    }

    /// Remove and return the minimum element.  O(log n).
    pub fn pop(&mut self) -> Option<T> {
        self.pop_entry().map(|(_, item)| item)
    }

    /// Like [`pop`](Self::pop), also returning the (now retired) handle.
    pub fn pop_entry(&mut self) -> Option<(HeapHandle, T)> {
        if self.heap.is_empty() {
            return None;
        }
        let entry = self.take_at(0);
        self.stats.pops += 1;
        Some((entry.handle, entry.item))
    }

    /// Like [`pop`](Self::pop) but reports an empty queue as an error.
    pub fn try_pop(&mut self) -> QueueResult<T> {
        self.pop().ok_or(QueueError::EmptyQueue)
    }

    // ── Handle-addressed operations ───────────────────────────────────────

    #[inline]
    pub fn contains(&self, handle: HeapHandle) -> bool {
        self.positions.contains_key(&handle)
    }

    /// Current value of the element behind `handle`.
    pub fn get(&self, handle: HeapHandle) -> Option<&T> {
        self.positions.get(&handle).map(|&pos| &self.heap[pos].item)
    }

    /// Replace the element behind `handle` with `item`, which must compare
    /// strictly less than the current value.  O(log n).
    ///
    /// # Errors
    ///
    /// - [`QueueError::InvalidHandle`] if `handle` was popped, removed, or
    ///   never issued by this queue.
    /// - [`QueueError::PriorityNotDecreased`] if `item` is not strictly less.
    ///
    /// On error the queue is unchanged.
    pub fn decrease_key(&mut self, handle: HeapHandle, item: T) -> QueueResult<()> {
        let pos = *self
            .positions
            .get(&handle)
            .ok_or(QueueError::InvalidHandle(handle))?;

        if (self.cmp)(&item, &self.heap[pos].item) != Ordering::Less {
            return Err(QueueError::PriorityNotDecreased(handle));
        }

        self.heap[pos].item = item;
        self.sift_up(pos);
        self.stats.decrease_keys += 1;
        Ok(())
    }

    /// Remove the element behind `handle` wherever it sits.  O(log n).
    pub fn remove(&mut self, handle: HeapHandle) -> QueueResult<T> {
        let pos = *self
            .positions
            .get(&handle)
            .ok_or(QueueError::InvalidHandle(handle))?;
        let entry = self.take_at(pos);
        self.stats.removals += 1;
        Ok(entry.item)
    }

    /// Keep only the elements for which `keep` returns `true`.
    ///
    /// Surviving handles stay valid; removed handles are retired.  O(n):
    /// the array is filtered in place and re-heapified bottom-up.
    /// Returns the number of removed elements.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.heap.len();
        self.heap.retain(|e| keep(&e.item));
        let removed = before - self.heap.len();
        if removed == 0 {
            return 0;
        }

        self.positions.clear();
        for (pos, entry) in self.heap.iter().enumerate() {
            self.positions.insert(entry.handle, pos);
        }
        for pos in (0..self.heap.len() / 2).rev() {
            self.sift_down(pos);
        }
        self.stats.removals += removed as u64;
        removed
    }

    /// Drop every element.  All outstanding handles become invalid; the
    /// handle counter keeps running so they are never reissued.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    /// Iterate `(handle, &item)` in heap-array order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (HeapHandle, &T)> + '_ {
        self.heap.iter().map(|e| (e.handle, &e.item))
    }

    /// Check the heap property and the handle table.  O(n); intended for
    /// tests and debug assertions.
    pub fn validate(&self) -> bool {
        if self.positions.len() != self.heap.len() {
            return false;
        }
        for (pos, entry) in self.heap.iter().enumerate() {
            if self.positions.get(&entry.handle) != Some(&pos) {
                return false;
            }
            if pos > 0 {
                let parent = (pos - 1) / 2;
                if (self.cmp)(&entry.item, &self.heap[parent].item) == Ordering::Less {
                    return false;
                }
            }
        }
        true
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Detach the entry at `pos`, refilling the hole with the last element
    /// and restoring heap order around it.
    fn take_at(&mut self, pos: usize) -> Entry<T> {
        let last = self.heap.len() - 1;
        if pos != last {
            self.swap_entries(pos, last);
        }
        // Non-empty: `pos` was a valid index.
        let entry = match self.heap.pop() {
            Some(e) => e,
            None => unreachable!("take_at on empty heap"),
        };
        self.positions.remove(&entry.handle);

        if pos < self.heap.len() {
            let settled = self.sift_up(pos);
            if settled == pos {
                self.sift_down(pos);
            }
        }
        entry
    }

    #[inline]
    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].handle, a);
        self.positions.insert(self.heap[b].handle, b);
    }

    /// Move the element at `pos` towards the root; returns its final index.
    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if (self.cmp)(&self.heap[pos].item, &self.heap[parent].item) != Ordering::Less {
                break;
            }
            self.swap_entries(pos, parent);
            pos = parent;
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;

            if left < len
                && (self.cmp)(&self.heap[left].item, &self.heap[smallest].item) == Ordering::Less
            {
                smallest = left;
            }
            if right < len
                && (self.cmp)(&self.heap[right].item, &self.heap[smallest].item) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap_entries(pos, smallest);
            pos = smallest;
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for IndexedPriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedPriorityQueue")
            .field("len", &self.heap.len())
            .field("min", &self.heap.first().map(|e| &e.item))
            .field("next_handle", &self.next_handle)
            .finish()
    }
}
