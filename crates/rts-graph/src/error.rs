//! Graph-store error type.

use thiserror::Error;

use rts_core::NodeId;

/// Errors produced by `rts-graph`.
///
/// A call that fails with any of these leaves the graph untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: NodeId, to: NodeId },

    #[error("edge {from} -> {to} not found")]
    UnknownEdge { from: NodeId, to: NodeId },

    #[error("invalid weight {weight} on edge {from} -> {to} (must be >= 0, not NaN)")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f32 },

    #[error("invalid length {length} on edge {from} -> {to} (must be >= 0, not NaN)")]
    InvalidLength { from: NodeId, to: NodeId, length: f32 },

    #[error("invalid position ({lat}, {lon}) for node {id} (must be finite)")]
    InvalidPosition { id: NodeId, lat: f64, lon: f64 },

    /// Internal consistency violation reported by `WeightedGraph::validate`.
    #[error("graph invariant violated: {0}")]
    Invariant(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
