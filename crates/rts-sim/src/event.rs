//! Events, payloads and the execution context handed to them.

use std::cmp::Ordering;

use rts_core::{EventId, SimTime};

use crate::{EventError, EventQueue, SimResult};

/// A scheduled occurrence on the logical timeline.
///
/// Events are ordered by `(time, priority, seq)`.  Lower `priority` runs
/// first at equal times; `seq` is the queue's insertion counter, so equal
/// `(time, priority)` pairs run in the order they were scheduled.
#[derive(Debug)]
pub struct Event<P> {
    pub time:     SimTime,
    pub priority: i32,
    pub id:       EventId,
    pub seq:      u64,
    pub payload:  P,
}

impl<P> Event<P> {
    /// The cheap, payload-free part of the event.
    pub fn info(&self) -> EventInfo
    where
        P: Payload,
    {
        EventInfo {
            id:       self.id,
            time:     self.time,
            priority: self.priority,
            label:    self.payload.label(),
        }
    }
}

/// Total order used by the event queue.
pub(crate) fn event_order<P>(a: &Event<P>, b: &Event<P>) -> Ordering {
    a.time
        .total_cmp(&b.time)
        .then(a.priority.cmp(&b.priority))
        .then(a.seq.cmp(&b.seq))
}

/// Behaviour carried by an event.
///
/// A payload runs exactly once and is consumed by doing so.  Families of
/// related events are normally one enum implementing this trait (see
/// [`TrafficEvent`](crate::TrafficEvent)); [`Callback`](crate::Callback)
/// covers one-off closures.
pub trait Payload: Sized {
    /// State the payload reads and mutates.
    type World;

    fn execute(self, ctx: &mut EventContext<'_, Self>) -> Result<(), EventError>;

    /// Short static name for logs and observers.
    fn label(&self) -> &'static str {
        "event"
    }
}

/// What a payload may touch while it runs: the world, and the queue for
/// follow-up events.
pub struct EventContext<'a, P: Payload> {
    /// Time of the executing event.
    pub now:   SimTime,
    pub world: &'a mut P::World,
    pub queue: &'a mut EventQueue<P>,
}

impl<P: Payload> EventContext<'_, P> {
    /// Schedule a follow-up at `time` (which may equal `now`).
    pub fn schedule(
        &mut self,
        time: impl Into<SimTime>,
        priority: i32,
        payload: P,
    ) -> SimResult<EventId> {
        self.queue.schedule(time, priority, payload)
    }

    pub fn schedule_after(&mut self, delay: f64, priority: i32, payload: P) -> SimResult<EventId> {
        self.queue.schedule_after(delay, priority, payload)
    }

    /// Ask the running `process_*` loop to return after this event.
    pub fn request_stop(&mut self) {
        self.queue.request_stop();
    }
}

/// Identity of an event once its payload has been taken.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventInfo {
    pub id:       EventId,
    pub time:     SimTime,
    pub priority: i32,
    pub label:    &'static str,
}

/// Outcome of one processed event.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedEvent {
    pub info:  EventInfo,
    /// `Some` if the payload reported a failure.
    pub error: Option<EventError>,
}

impl ProcessedEvent {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
