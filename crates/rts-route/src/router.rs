//! Pluggable point-to-point routing.
//!
//! Callers that only need "best path from A to B" hold a `dyn Router` and
//! can swap the algorithm without touching call sites.

use rts_core::NodeId;
use rts_graph::WeightedGraph;

use crate::{CostMetric, Heuristic, PathResult, RouteResult, astar_with, dijkstra_to};

/// Point-to-point routing engine.
///
/// Implementations must be `Send + Sync` so one router can serve queries
/// from several threads over a shared graph.
pub trait Router: Send + Sync {
    /// Best path from `from` to `to`.  An unreachable target is reported as
    /// `found == false`, not as an error.
    fn route(&self, graph: &WeightedGraph, from: NodeId, to: NodeId) -> RouteResult<PathResult>;

    fn name(&self) -> &'static str;
}

/// Dijkstra with early exit at the target.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter {
    pub metric: CostMetric,
}

impl DijkstraRouter {
    pub fn new(metric: CostMetric) -> Self {
        Self { metric }
    }
}

impl Router for DijkstraRouter {
    fn route(&self, graph: &WeightedGraph, from: NodeId, to: NodeId) -> RouteResult<PathResult> {
        dijkstra_to(graph, from, to, self.metric)
    }

    fn name(&self) -> &'static str {
        "dijkstra"
    }
}

/// A* with a fixed heuristic.
#[derive(Clone, Debug)]
pub struct AStarRouter<H> {
    pub heuristic: H,
    pub metric:    CostMetric,
}

impl<H: Heuristic> AStarRouter<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic, metric: CostMetric::Time }
    }

    pub fn with_metric(heuristic: H, metric: CostMetric) -> Self {
        Self { heuristic, metric }
    }
}

impl<H> Router for AStarRouter<H>
where
    H: Heuristic + Send + Sync,
{
    fn route(&self, graph: &WeightedGraph, from: NodeId, to: NodeId) -> RouteResult<PathResult> {
        astar_with(graph, from, to, &self.heuristic, self.metric)
    }

    fn name(&self) -> &'static str {
        "astar"
    }
}
