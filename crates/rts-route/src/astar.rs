//! Goal-directed A* search.
//!
//! Frontier key is `g + h(node, target)`; ties go to the lower `g`, then the
//! lower `NodeId`.  Settled nodes are closed and never reopened, and the
//! search returns as soon as the target is popped.

use tracing::trace;

use rts_core::NodeId;
use rts_graph::WeightedGraph;

use crate::search::best_first;
use crate::{CostMetric, Heuristic, PathResult, RouteError, RouteResult};

/// A* by travel time.
pub fn astar<H>(
    graph: &WeightedGraph,
    source: NodeId,
    target: NodeId,
    heuristic: &H,
) -> RouteResult<PathResult>
where
    H: Heuristic + ?Sized,
{
    astar_with(graph, source, target, heuristic, CostMetric::Time)
}

/// A* under `metric`.
///
/// # Errors
///
/// [`RouteError::UnknownNode`] if either endpoint is not in the graph.
pub fn astar_with<H>(
    graph: &WeightedGraph,
    source: NodeId,
    target: NodeId,
    heuristic: &H,
    metric: CostMetric,
) -> RouteResult<PathResult>
where
    H: Heuristic + ?Sized,
{
    if !graph.has_node(source) {
        return Err(RouteError::UnknownNode(source));
    }
    let goal = graph.node(target).ok_or(RouteError::UnknownNode(target))?;

    let space = best_first(graph, source, Some(target), metric, |node| {
        heuristic.estimate(node, goal)
    })?;

    trace!(
        %source,
        %target,
        heuristic = heuristic.name(),
        found = space.reached.is_some(),
        settled = space.stats.settled,
        relaxed = space.stats.relaxed,
        decrease_keys = space.stats.decrease_keys,
        "astar finished"
    );
    Ok(match space.reached {
        Some(slot) => PathResult {
            source,
            target,
            found: true,
            cost: space.dist[slot],
            nodes: space.path(graph, target, slot),
            stats: space.stats,
        },
        None => PathResult::not_found(source, target, space.stats),
    })
}
