//! The weighted graph store.
//!
//! # Data layout
//!
//! ```text
//! index: FxHashMap<NodeId, u32>      external id → slot
//! slots: Vec<Option<Slot>>           Slot = node + its outgoing edges
//! free:  Vec<u32>                    slots emptied by remove_node
//! ```
//!
//! A node's outgoing edges live inside its slot, so iterating a node's
//! neighbours is one contiguous scan, and weight updates mutate the edge in
//! place.  Edges store the *external* ids of both endpoints; nothing outside
//! this module ever sees a slot number it could hold across a mutation.
//!
//! # Compaction
//!
//! `remove_node` leaves a hole.  Once holes exceed
//! [`GraphConfig::compaction_ratio`] of all slots, live slots are packed to
//! the front and `index` is rebuilt.  External ids and edge contents are
//! unaffected.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.  It is
//! updated on every node insertion and removal.

use std::fmt;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use rts_core::{GeoPoint, NodeId};

use crate::{Edge, EdgeFlags, GraphConfig, GraphError, GraphResult, Node};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// `[lat, lon]` point plus the node it locates.
#[derive(Clone, Debug, PartialEq)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl NodeEntry {
    fn of(node: &Node) -> Self {
        Self { point: [node.pos.lat, node.pos.lon], id: node.id }
    }
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space; adequate for snapping
    /// within a city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── DegreeStats ───────────────────────────────────────────────────────────────

/// Out-degree distribution over live nodes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DegreeStats {
    pub min:     u32,
    pub max:     u32,
    pub mean:    f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

// ── WeightedGraph ─────────────────────────────────────────────────────────────

#[derive(Clone)]
struct Slot {
    node:  Node,
    edges: Vec<Edge>,
}

/// Compacting adjacency-list graph addressed by external [`NodeId`]s.
///
/// # Example
///
/// ```
/// use rts_core::NodeId;
/// use rts_graph::create_graph;
///
/// let mut g = create_graph(false);
/// g.add_node(NodeId(1), 40.41, -3.70);
/// g.add_node(NodeId(2), 40.42, -3.71);
/// assert!(g.add_edge(NodeId(1), NodeId(2), 30.0, 400.0));
/// assert_eq!(g.edge_count(), 2); // mirrored
/// assert!(g.update_edge_weight(NodeId(1), NodeId(2), 90.0));
/// assert_eq!(g.edge(NodeId(2), NodeId(1)).unwrap().weight, 30.0);
/// ```
#[derive(Clone)]
pub struct WeightedGraph {
    config:     GraphConfig,
    slots:      Vec<Option<Slot>>,
    index:      FxHashMap<NodeId, u32>,
    free:       Vec<u32>,
    /// Stored directed edges, mirrors included.  Always `Σ degree`.
    edge_count: usize,
    spatial:    RTree<NodeEntry>,
}

/// Empty graph with default settings.
pub fn create_graph(directed: bool) -> WeightedGraph {
    WeightedGraph::new(directed)
}

#[inline]
fn valid_weight(weight: f32) -> bool {
    !weight.is_nan() && weight >= 0.0
}

#[inline]
fn valid_length(length: f32) -> bool {
    !length.is_nan() && length >= 0.0
}

impl WeightedGraph {
    pub fn new(directed: bool) -> Self {
        Self::with_config(GraphConfig { directed, ..GraphConfig::default() })
    }

    pub fn with_config(config: GraphConfig) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(config.initial_capacity);
        Self {
            slots: Vec::with_capacity(config.initial_capacity),
            index,
            free: Vec::new(),
            edge_count: 0,
            spatial: RTree::new(),
            config,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.config.directed
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ── Node insertion ────────────────────────────────────────────────────

    /// Add an intersection node.  Returns `false` if `id` already exists or
    /// the position is not finite.
    pub fn add_node(&mut self, id: NodeId, lat: f64, lon: f64) -> bool {
        self.insert_node(Node::new(id, lat, lon))
    }

    pub fn insert_node(&mut self, node: Node) -> bool {
        self.try_add_node(node).is_ok()
    }

    /// Add a fully described node, reusing a freed slot if one exists.
    pub fn try_add_node(&mut self, mut node: Node) -> GraphResult<()> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        let GeoPoint { lat, lon } = node.pos;
        if !lat.is_finite() || !lon.is_finite() {
            return Err(GraphError::InvalidPosition { id: node.id, lat, lon });
        }
        node.degree = 0;
        let id = node.id;
        let entry = NodeEntry::of(&node);
        let slot = Slot { node, edges: Vec::new() };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx as usize] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                (self.slots.len() - 1) as u32
            }
        };
        self.index.insert(id, idx);
        self.spatial.insert(entry);
        Ok(())
    }

    /// Insert every node whose id is new; returns how many were added.
    pub fn extend_nodes<I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = Node>,
    {
        nodes.into_iter().filter_map(|n| self.try_add_node(n).ok()).count()
    }

    // ── Edge insertion ────────────────────────────────────────────────────

    /// Add a road edge.  A zero `length` is estimated from `weight`.
    ///
    /// Returns `false` if an endpoint is unknown, the edge exists, or the
    /// weight or length is NaN or negative.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f32, length: f32) -> bool {
        self.insert_edge(Edge::new(from, to, weight, length))
    }

    pub fn insert_edge(&mut self, edge: Edge) -> bool {
        self.try_add_edge(edge).is_ok()
    }

    /// Add `edge`; in undirected mode also add its reverse unless it is a
    /// self-loop or the reverse already exists.  The reverse is a separate
    /// edge afterwards.
    pub fn try_add_edge(&mut self, edge: Edge) -> GraphResult<()> {
        let (from, to) = (edge.from, edge.to);
        if !valid_weight(edge.weight) {
            return Err(GraphError::InvalidWeight { from, to, weight: edge.weight });
        }
        if !valid_length(edge.length) {
            return Err(GraphError::InvalidLength { from, to, length: edge.length });
        }
        if !self.index.contains_key(&from) {
            return Err(GraphError::UnknownNode(from));
        }
        if !self.index.contains_key(&to) {
            return Err(GraphError::UnknownNode(to));
        }
        if self.has_edge(from, to) {
            return Err(GraphError::DuplicateEdge { from, to });
        }

        let mirror = if !self.config.directed && from != to && !self.has_edge(to, from) {
            Some(edge.reversed())
        } else {
            None
        };

        self.attach_edge(edge);
        if let Some(rev) = mirror {
            self.attach_edge(rev);
        }
        Ok(())
    }

    /// Append to the source slot.  Caller has checked both endpoints.
    fn attach_edge(&mut self, edge: Edge) {
        if let Some(slot) = self.slot_mut(edge.from) {
            slot.edges.push(edge);
            slot.node.degree += 1;
            self.edge_count += 1;
        }
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Remove `id`, its outgoing edges and every edge pointing at it.
    ///
    /// Incoming edges are found by scanning all live slots, so this is
    /// O(V + E).
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(idx) = self.index.remove(&id) else {
            return false;
        };
        let Some(slot) = self.slots[idx as usize].take() else {
            return false;
        };
        self.edge_count -= slot.edges.len();

        let mut incoming = 0;
        for other in self.slots.iter_mut().flatten() {
            let before = other.edges.len();
            other.edges.retain(|e| e.to != id);
            let dropped = before - other.edges.len();
            other.node.degree -= dropped as u32;
            incoming += dropped;
        }
        self.edge_count -= incoming;

        self.free.push(idx);
        self.spatial.remove(&NodeEntry::of(&slot.node));
        trace!(node = %id, slot = idx, outgoing = slot.edges.len(), incoming, "node removed");

        if self.free.len() as f64 > self.slots.len() as f64 * self.config.compaction_ratio {
            self.compact();
        }
        true
    }

    /// Remove `from → to`; in undirected mode also `to → from`.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        let removed = self.detach_edge(from, to);
        if removed && !self.config.directed && from != to {
            self.detach_edge(to, from);
        }
        removed
    }

    fn detach_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        let Some(slot) = self.slot_mut(from) else {
            return false;
        };
        let Some(pos) = slot.edges.iter().position(|e| e.to == to) else {
            return false;
        };
        slot.edges.remove(pos);
        slot.node.degree -= 1;
        self.edge_count -= 1;
        true
    }

    // ── Mutation of existing edges ────────────────────────────────────────

    /// Overwrite the weight of `from → to` in place.
    ///
    /// O(degree(from)), no allocation.  `false` if the edge does not exist
    /// or `weight` is NaN or negative.  `f32::INFINITY` blocks the edge.
    pub fn update_edge_weight(&mut self, from: NodeId, to: NodeId, weight: f32) -> bool {
        self.try_update_edge_weight(from, to, weight).is_ok()
    }

    pub fn try_update_edge_weight(&mut self, from: NodeId, to: NodeId, weight: f32) -> GraphResult<()> {
        if !valid_weight(weight) {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }
        let edge = self.edge_mut(from, to).ok_or(GraphError::UnknownEdge { from, to })?;
        edge.weight = weight;

        if self.mirrors_updates(from, to) {
            if let Some(rev) = self.edge_mut(to, from) {
                rev.weight = weight;
            }
        }
        Ok(())
    }

    /// Set (`on = true`) or clear `flags` on `from → to`.
    pub fn set_edge_flags(&mut self, from: NodeId, to: NodeId, flags: EdgeFlags, on: bool) -> bool {
        let Some(edge) = self.edge_mut(from, to) else {
            return false;
        };
        edge.flags.set(flags, on);

        if self.mirrors_updates(from, to) {
            if let Some(rev) = self.edge_mut(to, from) {
                rev.flags.set(flags, on);
            }
        }
        true
    }

    /// Multiply every outgoing finite weight of `id` by `factor`.
    pub fn scale_outgoing_weights(&mut self, id: NodeId, factor: f32) -> bool {
        if !valid_weight(factor) {
            return false;
        }
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        for edge in &mut slot.edges {
            if edge.weight.is_finite() {
                edge.weight *= factor;
            }
        }
        true
    }

    #[inline]
    fn mirrors_updates(&self, from: NodeId, to: NodeId) -> bool {
        self.config.symmetric_weight_updates && !self.config.directed && from != to
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn has_node(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edge(from, to).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slot(id).map(|s| &s.node)
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.slot(from)?.edges.iter().find(|e| e.to == to)
    }

    /// Outgoing edges of `id` in insertion order; empty for unknown ids.
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        match self.slot(id) {
            Some(slot) => &slot.edges,
            None => &[],
        }
    }

    pub fn try_neighbors(&self, id: NodeId) -> GraphResult<&[Edge]> {
        self.slot(id)
            .map(|s| s.edges.as_slice())
            .ok_or(GraphError::UnknownNode(id))
    }

    /// Live node ids in slot order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().map(|n| n.id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.slots.iter().flatten().map(|s| &s.node)
    }

    /// Every stored directed edge, grouped by source node.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.slots.iter().flatten().flat_map(|s| s.edges.iter())
    }

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        let idx = *self.index.get(&id)?;
        self.slots[idx as usize].as_ref()
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        let idx = *self.index.get(&id)?;
        self.slots[idx as usize].as_mut()
    }

    fn edge_mut(&mut self, from: NodeId, to: NodeId) -> Option<&mut Edge> {
        self.slot_mut(from)?.edges.iter_mut().find(|e| e.to == to)
    }

    // ── Dense slot access ─────────────────────────────────────────────────
    //
    // For algorithms that keep per-node scratch arrays.  Slot numbers are
    // only meaningful while the graph is borrowed immutably.

    /// Current slot of `id`.
    #[inline]
    pub fn slot_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).map(|&idx| idx as usize)
    }

    /// Upper bound (exclusive) on slot numbers, holes included.
    #[inline]
    pub fn slot_capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn node_at_slot(&self, slot: usize) -> Option<&Node> {
        self.slots.get(slot)?.as_ref().map(|s| &s.node)
    }

    /// Outgoing edges of the node in `slot`; empty for holes.
    #[inline]
    pub fn neighbors_at_slot(&self, slot: usize) -> &[Edge] {
        match self.slots.get(slot) {
            Some(Some(s)) => &s.edges,
            _ => &[],
        }
    }

    // ── Maintenance ───────────────────────────────────────────────────────

    /// Pack live slots to the front and rebuild the id → slot index.
    pub fn compact(&mut self) {
        if self.free.is_empty() {
            return;
        }
        let before = self.slots.len();
        self.slots.retain(Option::is_some);
        self.index.clear();
        for (idx, slot) in self.slots.iter().enumerate() {
            if let Some(slot) = slot {
                self.index.insert(slot.node.id, idx as u32);
            }
        }
        self.free.clear();
        debug!(slots_before = before, slots_after = self.slots.len(), "graph compacted");
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.free.clear();
        self.edge_count = 0;
        self.spatial = RTree::new();
    }

    pub fn reserve(&mut self, additional_nodes: usize) {
        self.slots.reserve(additional_nodes);
        self.index.reserve(additional_nodes);
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Node closest to `pos`; `None` only for an empty graph.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial.nearest_neighbor(&[pos.lat, pos.lon]).map(|e| e.id)
    }

    /// Up to `k` nodes nearest to `pos`, closest first.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Stored directed edges over the `n·(n-1)` possible ones.
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n <= 1 {
            return 0.0;
        }
        self.edge_count as f64 / (n * (n - 1)) as f64
    }

    pub fn degree_stats(&self) -> Option<DegreeStats> {
        let n = self.node_count();
        if n == 0 {
            return None;
        }
        let (mut min, mut max, mut sum) = (u32::MAX, 0u32, 0.0f64);
        for node in self.nodes() {
            min = min.min(node.degree);
            max = max.max(node.degree);
            sum += node.degree as f64;
        }
        let mean = sum / n as f64;
        let variance = self
            .nodes()
            .map(|node| (node.degree as f64 - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        Some(DegreeStats { min, max, mean, std_dev: variance.sqrt() })
    }

    // ── Consistency check ─────────────────────────────────────────────────

    /// Verify every structural invariant.  O(V + E); meant for tests.
    pub fn validate(&self) -> GraphResult<()> {
        let fail = |msg: String| Err(GraphError::Invariant(msg));

        let mut live = 0usize;
        let mut degree_sum = 0usize;
        for (idx, slot) in self.slots.iter().enumerate() {
            let Some(slot) = slot else {
                if !self.free.contains(&(idx as u32)) {
                    return fail(format!("empty slot {idx} missing from free list"));
                }
                continue;
            };
            live += 1;
            let id = slot.node.id;
            if !slot.node.pos.lat.is_finite() || !slot.node.pos.lon.is_finite() {
                return fail(format!("{id} has a non-finite position"));
            }

            if self.index.get(&id) != Some(&(idx as u32)) {
                return fail(format!("index does not map {id} to slot {idx}"));
            }
            if slot.node.degree as usize != slot.edges.len() {
                return fail(format!(
                    "{id} reports degree {} but stores {} edges",
                    slot.node.degree,
                    slot.edges.len()
                ));
            }
            for (k, edge) in slot.edges.iter().enumerate() {
                if edge.from != id {
                    return fail(format!("edge {} -> {} stored under {id}", edge.from, edge.to));
                }
                if !self.index.contains_key(&edge.to) {
                    return fail(format!("edge {id} -> {} targets a missing node", edge.to));
                }
                if slot.edges[..k].iter().any(|e| e.to == edge.to) {
                    return fail(format!("duplicate edge {id} -> {}", edge.to));
                }
                if !valid_weight(edge.weight) {
                    return fail(format!("edge {id} -> {} has weight {}", edge.to, edge.weight));
                }
                if !valid_length(edge.length) {
                    return fail(format!("edge {id} -> {} has length {}", edge.to, edge.length));
                }
            }
            degree_sum += slot.edges.len();
        }

        if live != self.index.len() {
            return fail(format!("{live} live slots but {} indexed ids", self.index.len()));
        }
        if self.free.len() != self.slots.len() - live {
            return fail(format!(
                "free list has {} entries for {} empty slots",
                self.free.len(),
                self.slots.len() - live
            ));
        }
        if degree_sum != self.edge_count {
            return fail(format!("edge_count {} but degrees sum to {degree_sum}", self.edge_count));
        }
        if self.spatial.size() != live {
            return fail(format!("R-tree holds {} points for {live} nodes", self.spatial.size()));
        }
        Ok(())
    }
}

impl fmt::Debug for WeightedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedGraph")
            .field("directed", &self.config.directed)
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}
