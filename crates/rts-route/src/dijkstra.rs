//! Dijkstra's algorithm with a decrease-key frontier.
//!
//! A node enters the frontier once, on discovery.  Later improvements while
//! it is queued go through `decrease_key`, so the frontier never holds stale
//! duplicates and never exceeds the number of discovered nodes.
//!
//! Edge costs come from a [`CostMetric`]; blocked edges (`+∞`) are skipped.
//! Equal-distance nodes are settled in ascending `NodeId` order.

use rustc_hash::FxHashMap;
use tracing::trace;

use rts_core::NodeId;
use rts_graph::WeightedGraph;

use crate::search::best_first;
use crate::{CostMetric, NodeLabel, PathResult, RouteError, RouteResult, ShortestPathTree};

/// Single-source shortest paths by travel time.
pub fn dijkstra(graph: &WeightedGraph, source: NodeId) -> RouteResult<ShortestPathTree> {
    dijkstra_with(graph, source, CostMetric::Time)
}

/// Single-source shortest paths under `metric`.
///
/// # Errors
///
/// [`RouteError::UnknownNode`] if `source` is not in the graph.
pub fn dijkstra_with(
    graph: &WeightedGraph,
    source: NodeId,
    metric: CostMetric,
) -> RouteResult<ShortestPathTree> {
    let space = best_first(graph, source, None, metric, |_| 0.0)?;

    let mut labels = FxHashMap::default();
    for (slot, &distance) in space.dist.iter().enumerate() {
        if !distance.is_finite() {
            continue;
        }
        if let Some(node) = graph.node_at_slot(slot) {
            labels.insert(
                node.id,
                NodeLabel { reachable: true, distance, predecessor: space.pred[slot] },
            );
        }
    }

    trace!(
        %source,
        reached = labels.len(),
        settled = space.stats.settled,
        relaxed = space.stats.relaxed,
        decrease_keys = space.stats.decrease_keys,
        "dijkstra finished"
    );
    Ok(ShortestPathTree { source, labels, stats: space.stats })
}

/// Shortest path from `source` to `target`, stopping once `target` is
/// settled.
pub fn dijkstra_to(
    graph: &WeightedGraph,
    source: NodeId,
    target: NodeId,
    metric: CostMetric,
) -> RouteResult<PathResult> {
    if !graph.has_node(target) {
        return Err(RouteError::UnknownNode(target));
    }
    let space = best_first(graph, source, Some(target), metric, |_| 0.0)?;

    trace!(
        %source,
        %target,
        found = space.reached.is_some(),
        settled = space.stats.settled,
        relaxed = space.stats.relaxed,
        decrease_keys = space.stats.decrease_keys,
        "dijkstra_to finished"
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

/// `true` if no stored edge has a negative or NaN weight.
///
/// The graph store already rejects such weights; this is a cheap audit for
/// graphs assembled elsewhere before trusting Dijkstra's result.
pub fn has_non_negative_weights(graph: &WeightedGraph) -> bool {
    graph.edges().all(|e| e.weight >= 0.0)
}
