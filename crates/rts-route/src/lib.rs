//! `rts-route`: shortest-path search over a [`WeightedGraph`](rts_graph::WeightedGraph).
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`dijkstra`]  | `dijkstra`, `dijkstra_with`, `dijkstra_to`                |
//! | [`astar`]     | `astar`, `astar_with`                                     |
//! | [`heuristic`] | `Heuristic` trait, zero / haversine / planar estimators   |
//! | [`metric`]    | `CostMetric` (which edge attribute is the cost)           |
//! | [`result`]    | `ShortestPathTree`, `PathResult`, `NodeLabel`, `SearchStats` |
//! | [`router`]    | `Router` trait, `DijkstraRouter`, `AStarRouter`           |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                            |
//!
//! # Search state
//!
//! Every query allocates its own priority queue and per-slot scratch arrays,
//! so searches never observe each other.  The graph is borrowed immutably
//! for the duration of a query; weight changes take effect on the next one.

pub mod astar;
pub mod dijkstra;
pub mod error;
pub mod heuristic;
pub mod metric;
pub mod result;
pub mod router;

mod search;

#[cfg(test)]
mod tests;

pub use astar::{astar, astar_with};
pub use dijkstra::{dijkstra, dijkstra_to, dijkstra_with, has_non_negative_weights};
pub use error::{RouteError, RouteResult};
pub use heuristic::{
    EuclideanHeuristic, HaversineHeuristic, Heuristic, ManhattanHeuristic, ZeroHeuristic,
};
pub use metric::CostMetric;
pub use result::{NodeLabel, PathResult, SearchStats, ShortestPathTree};
pub use router::{AStarRouter, DijkstraRouter, Router};
