//! Observer hooks for progress reporting and data collection.

use rts_core::SimTime;

use crate::{EventInfo, Payload, ProcessedEvent};

/// Callbacks invoked by the scheduler's `*_observed` methods.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: failure counter
///
/// ```rust,ignore
/// struct Failures(usize);
///
/// impl<P: Payload> SchedulerObserver<P> for Failures {
///     fn on_event_end(&mut self, event: &ProcessedEvent, _world: &P::World) {
///         if !event.is_ok() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SchedulerObserver<P: Payload> {
    /// Called after the clock moves to the event's time, before its payload
    /// runs.
    fn on_event_start(&mut self, _event: &EventInfo) {}

    /// Called after the payload returns, with read-only access to the
    /// world it just changed.
    fn on_event_end(&mut self, _event: &ProcessedEvent, _world: &P::World) {}

    /// Called once when a `process_*` call returns.
    fn on_run_end(&mut self, _now: SimTime, _processed: usize) {}
}

/// A [`SchedulerObserver`] that does nothing.
pub struct NoopObserver;

impl<P: Payload> SchedulerObserver<P> for NoopObserver {}
