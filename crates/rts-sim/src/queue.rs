//! Pending-event queue and logical clock.
//!
//! Built on [`IndexedPriorityQueue`]: every pending event keeps its
//! [`HeapHandle`], so cancelling by id is a single O(log n) removal rather
//! than a rebuild.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use rts_core::{EventId, SimTime};
use rts_queue::{HeapHandle, IndexedPriorityQueue};

use crate::event::event_order;
use crate::{Event, SimError, SimResult};

type EventOrder<P> = fn(&Event<P>, &Event<P>) -> Ordering;

/// Counters kept by an [`EventQueue`] over its lifetime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub scheduled: u64,
    /// Events whose payload ran, successfully or not.
    pub processed: u64,
    /// Processed events whose payload returned an error.
    pub failed:    u64,
    pub cancelled: u64,
    pub pending:   usize,
}

/// Time-ordered queue of future events.
pub struct EventQueue<P> {
    heap:           IndexedPriorityQueue<Event<P>, EventOrder<P>>,
    handles:        FxHashMap<EventId, HeapHandle>,
    now:            SimTime,
    next_id:        u32,
    next_seq:       u64,
    stop_requested: bool,
    stats:          SchedulerStats,
}

impl<P> EventQueue<P> {
    pub fn new() -> Self {
        Self::starting_at(SimTime::ZERO)
    }

    /// Empty queue whose clock reads `start`.
    pub fn starting_at(start: SimTime) -> Self {
        Self {
            heap:           IndexedPriorityQueue::with_comparator(event_order::<P> as EventOrder<P>),
            handles:        FxHashMap::default(),
            now:            start,
            next_id:        0,
            next_seq:       0,
            stop_requested: false,
            stats:          SchedulerStats::default(),
        }
    }

    // ── Scheduling ────────────────────────────────────────────────────────

    /// Queue `payload` to run at `time`.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidTime`] for a non-finite time and
    /// [`SimError::PastScheduling`] if `time` is before the clock.  Exactly
    /// `now` is allowed.
    pub fn schedule(
        &mut self,
        time: impl Into<SimTime>,
        priority: i32,
        payload: P,
    ) -> SimResult<EventId> {
        let time = time.into();
        if !time.is_valid() {
            return Err(SimError::InvalidTime(time.0));
        }
        if time < self.now {
            return Err(SimError::PastScheduling { time, now: self.now });
        }

        let id = EventId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        if self.next_id == EventId::INVALID.0 {
            self.next_id = 0;
        }
        let seq = self.next_seq;
        self.next_seq += 1;

        let handle = self.heap.push(Event { time, priority, id, seq, payload });
        self.handles.insert(id, handle);
        self.stats.scheduled += 1;
        Ok(id)
    }

    /// Queue `payload` to run `delay` units after the clock.
    pub fn schedule_after(&mut self, delay: f64, priority: i32, payload: P) -> SimResult<EventId> {
        self.schedule(self.now.offset(delay), priority, payload)
    }

    // ── Cancellation ──────────────────────────────────────────────────────

    /// Remove the pending event `id` and hand it back.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownEvent`] if `id` already ran, was cancelled, or was
    /// never issued by this queue.
    pub fn cancel_event(&mut self, id: EventId) -> SimResult<Event<P>> {
        let handle = self.handles.remove(&id).ok_or(SimError::UnknownEvent(id))?;
        let event = self.heap.remove(handle)?;
        self.stats.cancelled += 1;
        Ok(event)
    }

    /// `true` if a pending event was removed.
    pub fn cancel(&mut self, id: EventId) -> bool {
        self.cancel_event(id).is_ok()
    }

    /// Drop every pending event for which `pred` returns `true`.  Returns
    /// the number removed.
    pub fn cancel_by_predicate<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&Event<P>) -> bool,
    {
        let removed = self.heap.retain(|e| !pred(e));
        if removed > 0 {
            self.handles.clear();
            for (handle, event) in self.heap.iter() {
                self.handles.insert(event.id, handle);
            }
            self.stats.cancelled += removed as u64;
        }
        removed
    }

    /// Drop every pending event.  The clock is unchanged.
    pub fn clear(&mut self) {
        self.stats.cancelled += self.heap.len() as u64;
        self.heap.clear();
        self.handles.clear();
    }

    // ── Inspection ────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Time of the earliest pending event.
    pub fn next_event_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|e| e.time)
    }

    pub fn peek(&self) -> Option<&Event<P>> {
        self.heap.peek()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.handles.contains_key(&id)
    }

    /// Pending events with `start <= time <= end`, in execution order.
    pub fn events_in_window(&self, start: SimTime, end: SimTime) -> Vec<&Event<P>> {
        let mut out: Vec<&Event<P>> = self
            .heap
            .iter()
            .map(|(_, e)| e)
            .filter(|e| e.time >= start && e.time <= end)
            .collect();
        out.sort_by(|a, b| event_order(a, b));
        out
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats { pending: self.heap.len(), ..self.stats }
    }

    // ── Stop flag ─────────────────────────────────────────────────────────

    /// Make the running `process_*` call return after the executing event.
    /// The flag is cleared when a new call starts.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    #[inline]
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    // ── Scheduler plumbing ────────────────────────────────────────────────

    /// Pop the earliest event and move the clock to its time.
    pub(crate) fn pop(&mut self) -> Option<Event<P>> {
        let event = self.heap.pop()?;
        self.handles.remove(&event.id);
        self.now = self.now.max(event.time);
        Some(event)
    }

    /// Move the clock forward to `time`; never backwards.
    pub(crate) fn advance_to(&mut self, time: SimTime) {
        if time.is_valid() {
            self.now = self.now.max(time);
        }
    }

    pub(crate) fn take_stop(&mut self) -> bool {
        std::mem::take(&mut self.stop_requested)
    }

    pub(crate) fn record_outcome(&mut self, failed: bool) {
        self.stats.processed += 1;
        if failed {
            self.stats.failed += 1;
        }
    }

    /// Empty the queue and rewind the clock to `start`, zeroing counters.
    pub(crate) fn reset(&mut self, start: SimTime) {
        self.heap.clear();
        self.handles.clear();
        self.now = start;
        self.stop_requested = false;
        self.stats = SchedulerStats::default();
    }
}

impl<P> Default for EventQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventQueue<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("now", &self.now)
            .field("pending", &self.heap.len())
            .field("stats", &self.stats)
            .finish()
    }
}
