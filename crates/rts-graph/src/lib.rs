//! `rts-graph`: weighted graph store with stable external IDs.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`graph`]  | `WeightedGraph` (slot table + R-tree), `DegreeStats`          |
//! | [`node`]   | `Node`, `NodeKind`, `NodeFlags`                               |
//! | [`edge`]   | `Edge`, `EdgeFlags`                                           |
//! | [`config`] | `GraphConfig`                                                 |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                                |
//!
//! # IDs versus slots
//!
//! Callers address nodes by [`NodeId`](rts_core::NodeId) only.  Internally
//! each node lives in a dense slot; removal frees the slot and compaction
//! renumbers slots, but a node's `NodeId` and its edges never change.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on nodes, edges and config. |

pub mod config;
pub mod edge;
pub mod error;
pub mod graph;
pub mod node;

#[cfg(test)]
mod tests;

pub use config::GraphConfig;
pub use edge::{Edge, EdgeFlags};
pub use error::{GraphError, GraphResult};
pub use graph::{create_graph, DegreeStats, WeightedGraph};
pub use node::{Node, NodeFlags, NodeKind};
