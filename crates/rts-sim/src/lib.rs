//! `rts-sim`: discrete-event scheduler and the traffic world it drives.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`event`]       | `Event<P>`, `Payload`, `EventContext`, `ProcessedEvent`    |
//! | [`queue`]       | `EventQueue<P>`, `SchedulerStats`                          |
//! | [`scheduler`]   | `Scheduler<P>`, `SchedulerState`                           |
//! | [`observer`]    | `SchedulerObserver<P>`, `NoopObserver`                     |
//! | [`callback`]    | `Callback<W>` closure payloads                             |
//! | [`traffic`]     | `TrafficWorld`, `TrafficEvent`, congestion and incidents   |
//! | [`error`]       | `SimError`, `EventError`                                   |
//!
//! # Ordering
//!
//! Events run in `(time, priority, seq)` order: earliest first, then lower
//! priority value, then scheduling order.  The clock only moves forward, and
//! a payload may schedule follow-ups at the current instant but never
//! before it.
//!
//! # Failures
//!
//! A payload returning `Err` does not stop the run.  The error is logged,
//! counted in [`SchedulerStats::failed`], handed to the observer and
//! returned in the [`ProcessedEvent`]; the next event runs as usual.

pub mod callback;
pub mod error;
pub mod event;
pub mod observer;
pub mod queue;
pub mod scheduler;
pub mod traffic;


pub use callback::Callback;
pub use error::{EventError, SimError, SimResult};
pub use event::{Event, EventContext, EventInfo, Payload, ProcessedEvent};
pub use observer::{NoopObserver, SchedulerObserver};
pub use queue::{EventQueue, SchedulerStats};
pub use scheduler::{Scheduler, SchedulerState};
pub use traffic::{
    EdgeTraffic, IncidentKind, TrafficEvent, TrafficLevel, TrafficParams, TrafficStats,
    TrafficWorld,
};
