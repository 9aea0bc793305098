//! Search outputs.

use rustc_hash::FxHashMap;

use rts_core::NodeId;

// ── SearchStats ───────────────────────────────────────────────────────────────

/// Work counters for one query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier and finalised.
    pub settled:       usize,
    /// Edges examined towards unsettled nodes.
    pub relaxed:       usize,
    pub pushes:        usize,
    pub decrease_keys: usize,
    /// Largest frontier size observed.
    pub max_frontier:  usize,
}

// ── NodeLabel ─────────────────────────────────────────────────────────────────

/// What the search learned about one node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeLabel {
    pub reachable:   bool,
    /// `+∞` when unreachable.
    pub distance:    f64,
    /// `None` for the source and for unreachable nodes.
    pub predecessor: Option<NodeId>,
}

impl NodeLabel {
    pub const UNREACHABLE: NodeLabel = NodeLabel {
        reachable:   false,
        distance:    f64::INFINITY,
        predecessor: None,
    };
}

// ── ShortestPathTree ──────────────────────────────────────────────────────────

/// Single-source result: a label for every node reachable from `source`.
#[derive(Clone, Debug)]
pub struct ShortestPathTree {
    pub source: NodeId,
    pub labels: FxHashMap<NodeId, NodeLabel>,
    pub stats:  SearchStats,
}

impl ShortestPathTree {
    /// Label for `id`; nodes the search never reached (including ids not in
    /// the graph) get [`NodeLabel::UNREACHABLE`].
    pub fn label(&self, id: NodeId) -> NodeLabel {
        self.labels.get(&id).copied().unwrap_or(NodeLabel::UNREACHABLE)
    }

    pub fn distance(&self, id: NodeId) -> Option<f64> {
        self.labels.get(&id).map(|l| l.distance)
    }

    pub fn is_reachable(&self, id: NodeId) -> bool {
        self.labels.contains_key(&id)
    }

    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.labels.get(&id).and_then(|l| l.predecessor)
    }

    /// Node sequence `source … id`, or `None` if `id` is unreachable.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(id) {
            return None;
        }
        let mut path = vec![id];
        let mut cur = id;
        while let Some(prev) = self.predecessor(cur) {
            // A tree has at most `labels.len()` nodes on any root path.
            if path.len() > self.labels.len() {
                return None;
            }
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        (path[0] == self.source).then_some(path)
    }

    /// Reachable nodes with their distances, sorted by id.
    pub fn reachable(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let mut ids: Vec<NodeId> = self.labels.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().map(move |id| (id, self.labels[&id].distance))
    }
}

// ── PathResult ────────────────────────────────────────────────────────────────

/// Point-to-point result.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub found:  bool,
    /// `+∞` when not found.
    pub cost:   f64,
    /// `source … target` inclusive; empty when not found.
    pub nodes:  Vec<NodeId>,
    pub stats:  SearchStats,
}

impl PathResult {
    pub(crate) fn not_found(source: NodeId, target: NodeId, stats: SearchStats) -> Self {
        Self { source, target, found: false, cost: f64::INFINITY, nodes: Vec::new(), stats }
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}
