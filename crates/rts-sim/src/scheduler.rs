//! The discrete-event scheduler.
//!
//! # Run loop
//!
//! ```text
//! loop {
//!     pop earliest event          (clock := event.time)
//!     observer.on_event_start
//!     payload.execute(ctx)        (may mutate world, schedule follow-ups)
//!     record / log outcome
//!     observer.on_event_end
//!     stop requested? → break
//! }
//! observer.on_run_end
//! ```
//!
//! Processing is single-threaded and strictly ordered, so anything that
//! reads the world between two `process_*` calls sees the state after the
//! last processed event and nothing later.

use tracing::{debug, trace, warn};

use rts_core::{EventId, SimTime};

use crate::{
    Event, EventContext, EventQueue, NoopObserver, Payload, ProcessedEvent, SchedulerObserver,
    SchedulerStats, SimResult,
};

/// Whether a `process_*` call is on the stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SchedulerState {
    #[default]
    Idle,
    Running,
}

/// Owns the event queue and the world the events act on.
pub struct Scheduler<P: Payload> {
    queue: EventQueue<P>,
    world: P::World,
    state: SchedulerState,
    start: SimTime,
}

impl<P: Payload> Scheduler<P> {
    pub fn new(world: P::World) -> Self {
        Self::with_start(world, SimTime::ZERO)
    }

    /// Scheduler whose clock starts (and resets) at `start`.
    pub fn with_start(world: P::World, start: SimTime) -> Self {
        Self {
            queue: EventQueue::starting_at(start),
            world,
            state: SchedulerState::Idle,
            start,
        }
    }

    // ── Scheduling ────────────────────────────────────────────────────────

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

    pub fn cancel(&mut self, id: EventId) -> bool {
        self.queue.cancel(id)
    }

    pub fn cancel_by_predicate<F>(&mut self, pred: F) -> usize
    where
        F: FnMut(&Event<P>) -> bool,
    {
        self.queue.cancel_by_predicate(pred)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    /// `Running` is set only while a `process_until`, `process_events` or
    /// `run_to_completion` loop holds `&mut self`, so any caller able to
    /// read this sees `Idle`, including after a stop request ended a run.
    /// `process_next` never changes it.
    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn world(&self) -> &P::World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut P::World {
        &mut self.world
    }

    pub fn queue(&self) -> &EventQueue<P> {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut EventQueue<P> {
        &mut self.queue
    }

    pub fn stats(&self) -> SchedulerStats {
        self.queue.stats()
    }

    pub fn into_world(self) -> P::World {
        self.world
    }

    /// Drop pending events, rewind the clock to the start time and zero the
    /// counters.  The world is left as it is.
    pub fn reset(&mut self) {
        self.queue.reset(self.start);
        self.state = SchedulerState::Idle;
    }

    // ── Processing ────────────────────────────────────────────────────────

    /// Run the earliest pending event.  `None` if the queue is empty.
    pub fn process_next(&mut self) -> Option<ProcessedEvent> {
        self.process_next_observed(&mut NoopObserver)
    }

    pub fn process_next_observed<O>(&mut self, observer: &mut O) -> Option<ProcessedEvent>
    where
        O: SchedulerObserver<P>,
    {
        let event = self.queue.pop()?;
        let info = event.info();
        observer.on_event_start(&info);

        let mut ctx = EventContext {
            now:   event.time,
            world: &mut self.world,
            queue: &mut self.queue,
        };
        let error = event.payload.execute(&mut ctx).err();

        match &error {
            None => trace!(id = %info.id, time = info.time.0, label = info.label, "event processed"),
            Some(e) => warn!(id = %info.id, time = info.time.0, label = info.label, error = %e, "event failed"),
        }
        self.queue.record_outcome(error.is_some());

        let processed = ProcessedEvent { info, error };
        observer.on_event_end(&processed, &self.world);
        Some(processed)
    }

    /// Run every event with `time <= until`, then move the clock to
    /// `until`.  Returns the number of events processed.
    ///
    /// The clock never moves backwards; an `until` earlier than `now`
    /// processes nothing.  A stop request leaves the clock at the last
    /// processed event.
    pub fn process_until(&mut self, until: impl Into<SimTime>) -> usize {
        self.process_until_observed(until, &mut NoopObserver)
    }

    pub fn process_until_observed<O>(&mut self, until: impl Into<SimTime>, observer: &mut O) -> usize
    where
        O: SchedulerObserver<P>,
    {
        let until = until.into();
        if until.0.is_nan() {
            return 0;
        }
        let (processed, stopped) = self.drive(observer, usize::MAX, |next| next <= until);
        if !stopped {
            self.queue.advance_to(until);
        }
        observer.on_run_end(self.now(), processed);
        processed
    }

    /// Run at most `max` events.
    pub fn process_events(&mut self, max: usize) -> usize {
        self.process_events_observed(max, &mut NoopObserver)
    }

    pub fn process_events_observed<O>(&mut self, max: usize, observer: &mut O) -> usize
    where
        O: SchedulerObserver<P>,
    {
        let (processed, _) = self.drive(observer, max, |_| true);
        observer.on_run_end(self.now(), processed);
        processed
    }

    /// Run until the queue is empty or a payload requests a stop.
    ///
    /// Self-rescheduling payloads (such as periodic traffic updates) keep
    /// the queue non-empty forever; bound those runs with
    /// [`process_until`](Self::process_until) instead.
    pub fn run_to_completion(&mut self) -> usize {
        self.run_to_completion_observed(&mut NoopObserver)
    }

    pub fn run_to_completion_observed<O>(&mut self, observer: &mut O) -> usize
    where
        O: SchedulerObserver<P>,
    {
        self.process_events_observed(usize::MAX, observer)
    }

    /// Shared loop: process while fewer than `max` events ran and `admit`
    /// accepts the next event time.  Returns the count and whether a stop
    /// request ended the loop.
    fn drive<O, F>(&mut self, observer: &mut O, max: usize, mut admit: F) -> (usize, bool)
    where
        O: SchedulerObserver<P>,
        F: FnMut(SimTime) -> bool,
    {
        self.state = SchedulerState::Running;
        self.queue.take_stop();

        let mut processed = 0;
        let mut stopped = false;
        while processed < max {
            match self.queue.next_event_time() {
                Some(next) if admit(next) => {}
                _ => break,
            }
            self.process_next_observed(observer);
            processed += 1;
            if self.queue.take_stop() {
                debug!(now = self.now().0, processed, "stop requested");
                stopped = true;
                break;
            }
        }

        self.state = SchedulerState::Idle;
        (processed, stopped)
    }
}

impl<P> std::fmt::Debug for Scheduler<P>
where
    P: Payload,
    P::World: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("state", &self.state)
            .field("queue", &self.queue)
            .field("world", &self.world)
            .finish()
    }
}
