//! Error types for `rts-sim`.

use rts_core::{EventId, NodeId, SimTime};
use rts_graph::GraphError;
use rts_queue::QueueError;
use thiserror::Error;

/// Errors returned by the event queue and scheduler.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("cannot schedule at {time}: clock is already at {now}")]
    PastScheduling { time: SimTime, now: SimTime },

    #[error("event time must be finite, got {0}")]
    InvalidTime(f64),

    #[error("no pending event with {0}")]
    UnknownEvent(EventId),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type SimResult<T> = Result<T, SimError>;

/// Failure reported by a payload while it executes.
///
/// The scheduler records these and keeps going; they never abort a run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EventError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("no traffic state for edge {from} -> {to}")]
    UnknownEdge { from: NodeId, to: NodeId },

    #[error("scheduler error: {0}")]
    Sim(#[from] SimError),

    #[error("{0}")]
    Payload(String),
}
