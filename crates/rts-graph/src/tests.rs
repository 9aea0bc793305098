//! Unit tests for rts-graph.
//!
//! All tests use hand-built graphs; coordinates only matter for the spatial
//! tests.

#[cfg(test)]
mod helpers {
    use rts_core::NodeId;

    use crate::WeightedGraph;

    pub fn n(id: u32) -> NodeId {
        NodeId(id)
    }

    /// Directed chain `0 → 1 → … → count-1`, each edge weight 1, nodes laid
    /// out along the equator.
    pub fn chain(count: u32) -> WeightedGraph {
        let mut g = WeightedGraph::new(true);
        for i in 0..count {
            assert!(g.add_node(n(i), 0.0, i as f64 * 0.01));
        }
        for i in 1..count {
            assert!(g.add_edge(n(i - 1), n(i), 1.0, 100.0));
        }
        g
    }
}

// ── Edge & node value types ───────────────────────────────────────────────────

#[cfg(test)]
mod edge_type {
    use rts_core::{NodeId, TransportMode};

    use crate::{Edge, EdgeFlags};

    #[test]
    fn zero_length_is_estimated_from_weight() {
        let e = Edge::new(NodeId(1), NodeId(2), 12.0, 0.0);
        assert_eq!(e.length, 120.0);
        assert_eq!(e.capacity, 1_000);
        assert_eq!(e.transport_mode, TransportMode::Road);
    }

    #[test]
    fn closures_make_edge_impassable() {
        let e = Edge::new(NodeId(1), NodeId(2), 10.0, 500.0);
        assert!(e.is_accessible());
        assert_eq!(e.effective_weight(), 10.0);

        let closed = e.clone().with_flags(EdgeFlags::TEMPORARY_CLOSURE);
        assert!(!closed.is_accessible());
        assert!(closed.is_blocked());
        assert_eq!(closed.effective_weight(), f32::INFINITY);

        let works = e.with_flags(EdgeFlags::CONSTRUCTION);
        assert_eq!(works.effective_weight(), f32::INFINITY);
    }

    #[test]
    fn infinite_weight_is_blocked() {
        let e = Edge::new(NodeId(1), NodeId(2), f32::INFINITY, 100.0);
        assert!(e.is_accessible());
        assert!(e.is_blocked());
        assert_eq!(e.speed_kmh(), 0.0);
    }

    #[test]
    fn toll_penalty() {
        let e = Edge::new(NodeId(1), NodeId(2), 10.0, 500.0).with_flags(EdgeFlags::TOLL_ROAD);
        assert!((e.effective_weight() - 12.0).abs() < 1e-6);
    }

    #[test]
    fn speed_and_blended_cost() {
        // 1 km in 60 s = 60 km/h
        let e = Edge::new(NodeId(1), NodeId(2), 60.0, 1_000.0);
        assert!((e.speed_kmh() - 60.0).abs() < 1e-4);
        // 0.7·60 + 0.3·1 = 42.3
        assert!((e.travel_cost(0.7, 0.3) - 42.3).abs() < 1e-4);
    }

    #[test]
    fn reversed_swaps_endpoints_only() {
        let e = Edge::new(NodeId(1), NodeId(2), 5.0, 50.0).with_capacity(300);
        let r = e.reversed();
        assert_eq!((r.from, r.to), (NodeId(2), NodeId(1)));
        assert_eq!(r.weight, 5.0);
        assert_eq!(r.capacity, 300);
    }
}

#[cfg(test)]
mod node_type {
    use rts_core::NodeId;

    use crate::{Node, NodeFlags, NodeKind};

    #[test]
    fn builder_setters() {
        let node = Node::new(NodeId(4), 40.0, -3.0)
            .with_kind(NodeKind::BusStop)
            .with_zone(2)
            .with_flags(NodeFlags::ACCESSIBLE | NodeFlags::TRANSIT_HUB);
        assert_eq!(node.kind, NodeKind::BusStop);
        assert_eq!(node.zone_id, 2);
        assert!(node.flags.contains(NodeFlags::TRANSIT_HUB));
        assert_eq!(node.kind.to_string(), "bus stop");
    }

    #[test]
    fn distance_between_nodes() {
        let a = Node::new(NodeId(0), 0.0, 0.0);
        let b = Node::new(NodeId(1), 1.0, 0.0);
        assert!((a.distance_to(&b) - 111_195.0).abs() < 50.0);
        assert!(a.bearing_to(&b).abs() < 1e-9);
    }
}

// ── Nodes ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod nodes {
    use super::helpers::n;
    use crate::{GraphError, Node, WeightedGraph, create_graph};

    #[test]
    fn empty_graph() {
        let g = create_graph(true);
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors(n(1)).is_empty());
        assert!(g.validate().is_ok());
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut g = WeightedGraph::new(true);
        assert!(g.add_node(n(1), 1.0, 2.0));
        assert!(!g.add_node(n(1), 9.0, 9.0));
        assert_eq!(
            g.try_add_node(Node::new(n(1), 0.0, 0.0)),
            Err(GraphError::DuplicateNode(n(1)))
        );
        // First insertion wins.
        assert_eq!(g.node(n(1)).unwrap().pos.lat, 1.0);
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let mut g = WeightedGraph::new(true);
        assert!(!g.add_node(n(1), f64::NAN, 0.0));
        assert!(!g.add_node(n(1), 0.0, f64::INFINITY));
        assert!(matches!(
            g.try_add_node(Node::new(n(1), f64::NEG_INFINITY, 0.0)),
            Err(GraphError::InvalidPosition { .. })
        ));
        assert!(g.is_empty());

        assert!(g.add_node(n(2), 0.0, 0.0));
        assert!(!g.remove_node(n(1)));
        assert!(g.validate().is_ok());
        assert_eq!(g.nearest_node(rts_core::GeoPoint::new(0.0, 0.0)), Some(n(2)));
    }

    #[test]
    fn supplied_degree_is_ignored() {
        let mut g = WeightedGraph::new(true);
        let mut node = Node::new(n(1), 0.0, 0.0);
        node.degree = 99;
        g.insert_node(node);
        assert_eq!(g.node(n(1)).unwrap().degree, 0);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn extend_counts_only_new_nodes() {
        let mut g = WeightedGraph::new(true);
        g.add_node(n(2), 0.0, 0.0);
        let added = g.extend_nodes((1..=3).map(|i| Node::new(n(i), 0.0, i as f64)));
        assert_eq!(added, 2);
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn ids_are_not_positions() {
        let mut g = WeightedGraph::new(true);
        g.add_node(n(1_000_000), 0.0, 0.0);
        g.add_node(n(7), 0.0, 1.0);
        assert_eq!(g.slot_capacity(), 2);
        let mut ids: Vec<_> = g.node_ids().collect();
        ids.sort();
        assert_eq!(ids, vec![n(7), n(1_000_000)]);
    }
}

// ── Edges ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod edges {
    use super::helpers::n;
    use crate::{Edge, GraphError, WeightedGraph};

    fn pair(directed: bool) -> WeightedGraph {
        let mut g = WeightedGraph::new(directed);
        g.add_node(n(1), 0.0, 0.0);
        g.add_node(n(2), 0.0, 1.0);
        g
    }

    #[test]
    fn directed_edges_are_one_way() {
        let mut g = pair(true);
        assert!(g.add_edge(n(1), n(2), 5.0, 50.0));
        assert!(g.has_edge(n(1), n(2)));
        assert!(!g.has_edge(n(2), n(1)));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.node(n(1)).unwrap().degree, 1);
        assert_eq!(g.node(n(2)).unwrap().degree, 0);
    }

    #[test]
    fn undirected_insert_adds_mirror() {
        let mut g = pair(false);
        assert!(g.add_edge(n(1), n(2), 5.0, 50.0));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge(n(2), n(1)).unwrap().weight, 5.0);
        assert!(g.validate().is_ok());
        // The mirror already exists.
        assert!(!g.add_edge(n(2), n(1), 1.0, 10.0));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn undirected_self_loop_is_single() {
        let mut g = pair(false);
        assert!(g.add_edge(n(1), n(1), 3.0, 30.0));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.node(n(1)).unwrap().degree, 1);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn rejected_edges_leave_graph_untouched() {
        let mut g = pair(true);
        g.add_edge(n(1), n(2), 5.0, 50.0);

        assert_eq!(
            g.try_add_edge(Edge::new(n(1), n(9), 1.0, 1.0)),
            Err(GraphError::UnknownNode(n(9)))
        );
        assert_eq!(
            g.try_add_edge(Edge::new(n(1), n(2), 1.0, 1.0)),
            Err(GraphError::DuplicateEdge { from: n(1), to: n(2) })
        );
        assert!(matches!(
            g.try_add_edge(Edge::new(n(2), n(1), -1.0, 1.0)),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(!g.add_edge(n(2), n(1), f32::NAN, 1.0));

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge(n(1), n(2)).unwrap().weight, 5.0);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn negative_or_nan_length_is_rejected() {
        let mut g = pair(true);
        assert!(!g.add_edge(n(1), n(2), 5.0, -100.0));
        assert!(!g.add_edge(n(1), n(2), 5.0, f32::NAN));
        assert_eq!(
            g.try_add_edge(Edge::new(n(2), n(1), 5.0, -1.0)),
            Err(GraphError::InvalidLength { from: n(2), to: n(1), length: -1.0 })
        );
        assert_eq!(g.edge_count(), 0);

        // Zero is estimated from the weight; the estimate is accepted.
        assert!(g.add_edge(n(1), n(2), 5.0, 0.0));
        assert_eq!(g.edge(n(1), n(2)).unwrap().length, 50.0);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn infinite_weight_is_accepted_as_blocked() {
        let mut g = pair(true);
        assert!(g.add_edge(n(1), n(2), f32::INFINITY, 50.0));
        assert!(g.edge(n(1), n(2)).unwrap().is_blocked());
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut g = WeightedGraph::new(true);
        for i in 0..4 {
            g.add_node(n(i), 0.0, i as f64);
        }
        g.add_edge(n(0), n(3), 1.0, 0.0);
        g.add_edge(n(0), n(1), 1.0, 0.0);
        g.add_edge(n(0), n(2), 1.0, 0.0);
        let targets: Vec<_> = g.neighbors(n(0)).iter().map(|e| e.to).collect();
        assert_eq!(targets, vec![n(3), n(1), n(2)]);
        assert_eq!(g.try_neighbors(n(42)), Err(GraphError::UnknownNode(n(42))));
    }

    #[test]
    fn remove_edge_directed_and_undirected() {
        let mut g = pair(true);
        g.add_edge(n(1), n(2), 1.0, 0.0);
        g.add_edge(n(2), n(1), 1.0, 0.0);
        assert!(g.remove_edge(n(1), n(2)));
        assert!(g.has_edge(n(2), n(1)));
        assert!(!g.remove_edge(n(1), n(2)));
        assert_eq!(g.edge_count(), 1);

        let mut u = pair(false);
        u.add_edge(n(1), n(2), 1.0, 0.0);
        assert!(u.remove_edge(n(2), n(1)));
        assert_eq!(u.edge_count(), 0);
        assert!(u.validate().is_ok());
    }
}

// ── Weight updates ────────────────────────────────────────────────────────────

#[cfg(test)]
mod weights {
    use super::helpers::n;
    use crate::{EdgeFlags, GraphConfig, GraphError, WeightedGraph};

    fn undirected(symmetric: bool) -> WeightedGraph {
        let mut g = WeightedGraph::with_config(GraphConfig {
            symmetric_weight_updates: symmetric,
            ..GraphConfig::undirected()
        });
        g.add_node(n(1), 0.0, 0.0);
        g.add_node(n(2), 0.0, 1.0);
        g.add_edge(n(1), n(2), 10.0, 100.0);
        g
    }

    #[test]
    fn mirrors_are_independent_by_default() {
        let mut g = undirected(false);
        assert!(g.update_edge_weight(n(1), n(2), 40.0));
        assert_eq!(g.edge(n(1), n(2)).unwrap().weight, 40.0);
        assert_eq!(g.edge(n(2), n(1)).unwrap().weight, 10.0);
    }

    #[test]
    fn symmetric_option_updates_both_directions() {
        let mut g = undirected(true);
        assert!(g.update_edge_weight(n(2), n(1), 7.5));
        assert_eq!(g.edge(n(1), n(2)).unwrap().weight, 7.5);
        assert_eq!(g.edge(n(2), n(1)).unwrap().weight, 7.5);

        assert!(g.set_edge_flags(n(1), n(2), EdgeFlags::TEMPORARY_CLOSURE, true));
        assert!(g.edge(n(2), n(1)).unwrap().is_blocked());
    }

    #[test]
    fn invalid_updates_are_rejected() {
        let mut g = undirected(false);
        assert!(!g.update_edge_weight(n(1), n(2), f32::NAN));
        assert!(!g.update_edge_weight(n(1), n(2), -0.5));
        assert!(!g.update_edge_weight(n(1), n(9), 1.0));
        assert_eq!(
            g.try_update_edge_weight(n(1), n(9), 1.0),
            Err(GraphError::UnknownEdge { from: n(1), to: n(9) })
        );
        assert_eq!(g.edge(n(1), n(2)).unwrap().weight, 10.0);
    }

    #[test]
    fn block_and_unblock_with_infinity() {
        let mut g = undirected(false);
        assert!(g.update_edge_weight(n(1), n(2), f32::INFINITY));
        assert!(g.edge(n(1), n(2)).unwrap().is_blocked());
        assert!(g.update_edge_weight(n(1), n(2), 10.0));
        assert!(!g.edge(n(1), n(2)).unwrap().is_blocked());
        assert!(g.validate().is_ok());
    }

    #[test]
    fn flags_set_and_clear() {
        let mut g = undirected(false);
        assert!(g.set_edge_flags(n(1), n(2), EdgeFlags::TOLL_ROAD | EdgeFlags::BRIDGE, true));
        assert!(g.edge(n(1), n(2)).unwrap().flags.contains(EdgeFlags::BRIDGE));
        assert!(g.set_edge_flags(n(1), n(2), EdgeFlags::BRIDGE, false));
        assert_eq!(g.edge(n(1), n(2)).unwrap().flags, EdgeFlags::TOLL_ROAD);
        assert!(!g.set_edge_flags(n(3), n(1), EdgeFlags::BRIDGE, true));
    }

    #[test]
    fn scale_outgoing_skips_blocked_edges() {
        let mut g = WeightedGraph::new(true);
        for i in 0..3 {
            g.add_node(n(i), 0.0, i as f64);
        }
        g.add_edge(n(0), n(1), 4.0, 0.0);
        g.add_edge(n(0), n(2), f32::INFINITY, 10.0);
        assert!(g.scale_outgoing_weights(n(0), 0.0));
        assert_eq!(g.edge(n(0), n(1)).unwrap().weight, 0.0);
        assert_eq!(g.edge(n(0), n(2)).unwrap().weight, f32::INFINITY);
        assert!(!g.scale_outgoing_weights(n(0), -2.0));
        assert!(g.validate().is_ok());
    }
}

// ── Removal & compaction ──────────────────────────────────────────────────────

#[cfg(test)]
mod removal {
    use std::collections::BTreeMap;

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rts_core::{GeoPoint, NodeId};

    use super::helpers::{chain, n};
    use crate::{GraphConfig, WeightedGraph};

    #[test]
    fn removing_node_drops_incoming_and_outgoing() {
        let mut g = chain(4); // 0→1→2→3
        g.add_edge(n(3), n(1), 2.0, 0.0);
        assert_eq!(g.edge_count(), 4);

        assert!(g.remove_node(n(1)));
        assert!(!g.has_node(n(1)));
        assert_eq!(g.edge_count(), 1); // only 2→3 survives
        assert!(g.neighbors(n(0)).is_empty());
        assert!(g.neighbors(n(3)).is_empty());
        assert_eq!(g.node(n(0)).unwrap().degree, 0);
        assert!(g.validate().is_ok());
        assert!(!g.remove_node(n(1)));
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut g = chain(10);
        let cap = g.slot_capacity();
        assert!(g.remove_node(n(4)));
        assert!(g.add_node(n(100), 0.0, 0.0));
        assert_eq!(g.slot_capacity(), cap);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn compaction_preserves_ids_and_edges() {
        let mut g = WeightedGraph::new(true);
        for i in 0..8 {
            g.add_node(n(i), 0.0, i as f64);
        }
        for i in 0..8 {
            g.add_edge(n(i), n((i + 1) % 8), i as f32 + 1.0, 0.0);
            g.add_edge(n(i), n((i + 3) % 8), 10.0 * (i as f32 + 1.0), 0.0);
        }

        assert!(g.remove_node(n(1)));
        assert!(g.remove_node(n(2)));
        assert_eq!(g.slot_capacity(), 8); // 2 holes of 8: below threshold
        assert!(g.remove_node(n(3)));
        assert_eq!(g.slot_capacity(), 5); // 3 holes of 8: compacted
        assert!(g.validate().is_ok());

        let mut ids: Vec<_> = g.node_ids().collect();
        ids.sort();
        assert_eq!(ids, vec![n(0), n(4), n(5), n(6), n(7)]);

        // Surviving edges and their weights are untouched.
        assert_eq!(g.edge(n(4), n(5)).unwrap().weight, 5.0);
        assert_eq!(g.edge(n(4), n(7)).unwrap().weight, 50.0);
        assert_eq!(g.edge(n(7), n(0)).unwrap().weight, 8.0);
        assert_eq!(g.edge(n(5), n(0)).unwrap().weight, 60.0);
        assert!(!g.has_edge(n(0), n(1)));
        assert!(!g.has_edge(n(0), n(3)));

        // Spatial index followed the removals.
        assert_eq!(g.nearest_node(GeoPoint::new(0.0, 1.9)), Some(n(0)));
        assert_eq!(g.nearest_node(GeoPoint::new(0.0, 2.1)), Some(n(4)));
    }

    #[test]
    fn compaction_can_be_disabled() {
        let mut g = WeightedGraph::with_config(GraphConfig {
            compaction_ratio: 1.0,
            ..GraphConfig::directed()
        });
        for i in 0..4 {
            g.add_node(n(i), 0.0, i as f64);
        }
        for i in 0..3 {
            g.remove_node(n(i));
        }
        assert_eq!(g.slot_capacity(), 4);
        assert!(g.validate().is_ok());
        g.compact();
        assert_eq!(g.slot_capacity(), 1);
        assert_eq!(g.slot_of(n(3)), Some(0));
        assert!(g.validate().is_ok());
    }

    /// Random mutations against a `BTreeMap` adjacency model.  The first half
    /// grows the graph, the second half shrinks it so compaction runs.
    #[test]
    fn random_mutations_match_model() {
        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let mut g = WeightedGraph::new(true);
        let mut model: BTreeMap<NodeId, BTreeMap<NodeId, f32>> = BTreeMap::new();
        let mut compactions = 0;

        for step in 0..4_000 {
            let shrinking = step >= 2_000;
            let (a, b) = (n(rng.gen_range(0..40)), n(rng.gen_range(0..40)));
            let capacity = g.slot_capacity();

            match rng.gen_range(0..10) {
                0..=2 if !shrinking => {
                    let added = g.add_node(a, 0.0, a.0 as f64 * 0.01);
                    assert_eq!(added, !model.contains_key(&a));
                    model.entry(a).or_default();
                }
                0..=2 => {
                    let removed = g.remove_node(a);
                    assert_eq!(removed, model.remove(&a).is_some());
                    for out in model.values_mut() {
                        out.remove(&a);
                    }
                }
                3..=5 => {
                    let w = rng.gen_range(0.0f32..100.0);
                    let expected = model.contains_key(&b)
                        && model.get(&a).is_some_and(|out| !out.contains_key(&b));
                    assert_eq!(g.add_edge(a, b, w, 0.0), expected);
                    if expected {
                        model.entry(a).or_default().insert(b, w);
                    }
                }
                6 => {
                    let expected = model.get_mut(&a).is_some_and(|out| out.remove(&b).is_some());
                    assert_eq!(g.remove_edge(a, b), expected);
                }
                7 | 8 => {
                    let w = rng.gen_range(0.0f32..100.0);
                    let slot = model.get_mut(&a).and_then(|out| out.get_mut(&b));
                    let expected = slot.is_some();
                    if let Some(weight) = slot {
                        *weight = w;
                    }
                    assert_eq!(g.update_edge_weight(a, b, w), expected);
                }
                _ if shrinking => {
                    let removed = g.remove_node(a);
                    assert_eq!(removed, model.remove(&a).is_some());
                    for out in model.values_mut() {
                        out.remove(&a);
                    }
                }
                _ => {}
            }
            if g.slot_capacity() < capacity {
                compactions += 1;
            }

            assert!(g.validate().is_ok(), "step {step}: {:?}", g.validate());
            assert_eq!(g.node_count(), model.len());
            assert_eq!(g.edge_count(), model.values().map(BTreeMap::len).sum::<usize>());
            for (&id, out) in &model {
                let stored: BTreeMap<NodeId, f32> =
                    g.neighbors(id).iter().map(|e| (e.to, e.weight)).collect();
                assert_eq!(&stored, out, "step {step}: neighbours of {id}");
                let pos = GeoPoint::new(0.0, id.0 as f64 * 0.01);
                assert_eq!(g.nearest_node(pos), Some(id));
            }
        }
        assert!(compactions > 0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut g = chain(5);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.nearest_node(GeoPoint::new(0.0, 0.0)), None);
        assert!(g.validate().is_ok());
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial {
    use rts_core::GeoPoint;

    use super::helpers::{chain, n};

    #[test]
    fn nearest_node_snaps() {
        let g = chain(5); // lon 0.00, 0.01, … 0.04
        assert_eq!(g.nearest_node(GeoPoint::new(0.0, 0.021)), Some(n(2)));
        assert_eq!(g.nearest_node(GeoPoint::new(5.0, 5.0)), Some(n(4)));
    }

    #[test]
    fn k_nearest_sorted_by_distance() {
        let g = chain(5);
        let near = g.k_nearest_nodes(GeoPoint::new(0.0, 0.0), 3);
        assert_eq!(near, vec![n(0), n(1), n(2)]);
        assert_eq!(g.k_nearest_nodes(GeoPoint::new(0.0, 0.0), 50).len(), 5);
    }

    #[test]
    fn removed_nodes_are_not_snapped_to() {
        let mut g = chain(5);
        g.remove_node(n(2));
        assert_ne!(g.nearest_node(GeoPoint::new(0.0, 0.02)), Some(n(2)));
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use super::helpers::{chain, n};
    use crate::WeightedGraph;

    #[test]
    fn density_of_chain() {
        let g = chain(4); // 3 edges of 12 possible
        assert!((g.density() - 0.25).abs() < 1e-12);
        assert_eq!(WeightedGraph::new(true).density(), 0.0);
    }

    #[test]
    fn degree_distribution() {
        let mut g = chain(3); // degrees 1, 1, 0
        g.add_edge(n(0), n(2), 1.0, 0.0); // degrees 2, 1, 0
        let s = g.degree_stats().unwrap();
        assert_eq!(s.min, 0);
        assert_eq!(s.max, 2);
        assert!((s.mean - 1.0).abs() < 1e-12);
        assert!((s.std_dev - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!(WeightedGraph::new(false).degree_stats().is_none());
    }

    #[test]
    fn edge_count_matches_degree_sum() {
        let mut g = WeightedGraph::new(false);
        for i in 0..6 {
            g.add_node(n(i), 0.0, i as f64);
        }
        for i in 0..6 {
            for j in (i + 1)..6 {
                if (i + j) % 2 == 1 {
                    g.add_edge(n(i), n(j), 1.0, 0.0);
                }
            }
        }
        let sum: usize = g.nodes().map(|node| node.degree as usize).sum();
        assert_eq!(sum, g.edge_count());
        assert_eq!(g.edges().count(), g.edge_count());
        assert!(g.validate().is_ok());
    }
}
