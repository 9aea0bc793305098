//! Routing error type.

use thiserror::Error;

use rts_core::NodeId;
use rts_queue::QueueError;

/// Errors produced by `rts-route`.
///
/// An unreachable target is *not* an error: it yields a `PathResult` with
/// `found == false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("priority queue error: {0}")]
    Queue(#[from] QueueError),
}

pub type RouteResult<T> = Result<T, RouteError>;
