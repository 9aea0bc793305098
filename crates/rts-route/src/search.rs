//! Shared best-first search loop behind Dijkstra and A*.
//!
//! Scratch state is indexed by graph *slot*, not `NodeId`, so every lookup on
//! the hot path is a vector index.  Slots are stable because the graph is
//! borrowed for the whole search.

use std::cmp::Ordering;

use rts_core::NodeId;
use rts_graph::{Node, WeightedGraph};
use rts_queue::{HeapHandle, IndexedPriorityQueue};

use crate::{CostMetric, RouteError, RouteResult, SearchStats};

/// One frontier entry.  `key = g + h`; for Dijkstra `h = 0`.
#[derive(Copy, Clone, Debug)]
struct Frontier {
    key:  f64,
    g:    f64,
    node: NodeId,
    slot: usize,
}

/// Lower key first, then lower `g`, then lower id.
fn frontier_order(a: &Frontier, b: &Frontier) -> Ordering {
    a.key
        .total_cmp(&b.key)
        .then_with(|| a.g.total_cmp(&b.g))
        .then_with(|| a.node.cmp(&b.node))
}

/// Per-slot results of one search.
pub(crate) struct SearchSpace {
    pub dist:    Vec<f64>,
    pub pred:    Vec<Option<NodeId>>,
    pub stats:   SearchStats,
    /// Slot of the target if it was settled.
    pub reached: Option<usize>,
}

impl SearchSpace {
    /// Walk predecessors back from `target_slot`.
    pub fn path(&self, graph: &WeightedGraph, target: NodeId, target_slot: usize) -> Vec<NodeId> {
        let mut nodes = vec![target];
        let mut slot = target_slot;
        while let Some(prev) = self.pred[slot] {
            nodes.push(prev);
            match graph.slot_of(prev) {
                Some(s) => slot = s,
                None => break,
            }
        }
        nodes.reverse();
        nodes
    }
}

/// Run best-first search from `source`.
///
/// With `target = None` the frontier is drained completely; otherwise the
/// search stops as soon as the target is popped.  `estimate` is evaluated
/// for a node each time its tentative distance improves.
pub(crate) fn best_first<F>(
    graph: &WeightedGraph,
    source: NodeId,
    target: Option<NodeId>,
    metric: CostMetric,
    estimate: F,
) -> RouteResult<SearchSpace>
where
    F: Fn(&Node) -> f64,
{
    let source_slot = graph.slot_of(source).ok_or(RouteError::UnknownNode(source))?;
    let cap = graph.slot_capacity();

    let mut dist    = vec![f64::INFINITY; cap];
    let mut pred    = vec![None; cap];
    let mut handles: Vec<Option<HeapHandle>> = vec![None; cap];
    let mut settled = vec![false; cap];
    let mut stats   = SearchStats::default();
    let mut reached = None;

    let mut queue = IndexedPriorityQueue::with_capacity_and_comparator(
        cap.min(1_024),
        frontier_order,
    );

    let h0 = graph.node_at_slot(source_slot).map_or(0.0, &estimate);
    dist[source_slot] = 0.0;
    handles[source_slot] = Some(queue.push(Frontier {
        key:  h0,
        g:    0.0,
        node: source,
        slot: source_slot,
    }));
    stats.pushes += 1;
    stats.max_frontier = 1;

    while let Some(cur) = queue.pop() {
        handles[cur.slot] = None;
        settled[cur.slot] = true;
        stats.settled += 1;

        if target == Some(cur.node) {
            reached = Some(cur.slot);
            break;
        }

        for edge in graph.neighbors_at_slot(cur.slot) {
            let w = metric.cost(edge);
            if !w.is_finite() {
                continue;
            }
            let Some(next) = graph.slot_of(edge.to) else {
                continue;
            };
            if settled[next] {
                continue;
            }
            stats.relaxed += 1;

            let g = cur.g + w;
            if g >= dist[next] {
                continue;
            }
            dist[next] = g;
            pred[next] = Some(cur.node);

            let h = graph.node_at_slot(next).map_or(0.0, &estimate);
            let item = Frontier { key: g + h, g, node: edge.to, slot: next };
            match handles[next] {
                Some(handle) => {
                    queue.decrease_key(handle, item)?;
                    stats.decrease_keys += 1;
                }
                None => {
                    handles[next] = Some(queue.push(item));
                    stats.pushes += 1;
                }
            }
        }
        stats.max_frontier = stats.max_frontier.max(queue.len());
    }

    Ok(SearchSpace { dist, pred, stats, reached })
}
