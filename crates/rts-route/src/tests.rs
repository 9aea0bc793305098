//! Unit tests for rts-route.
//!
//! Correctness is checked against exhaustive simple-path enumeration on
//! small random graphs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rts_core::NodeId;
use rts_graph::WeightedGraph;

use crate::CostMetric;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn n(id: u32) -> NodeId {
    NodeId(id)
}

/// `1→2 (5)`, `2→3 (2)`, `1→3 (9)`.
fn triangle() -> WeightedGraph {
    let mut g = WeightedGraph::new(true);
    for i in 1..=3 {
        g.add_node(n(i), 0.0, i as f64 * 0.01);
    }
    g.add_edge(n(1), n(2), 5.0, 500.0);
    g.add_edge(n(2), n(3), 2.0, 900.0);
    g.add_edge(n(1), n(3), 9.0, 1_000.0);
    g
}

/// Cheapest simple path cost by enumerating every simple path.
fn brute_force(g: &WeightedGraph, source: NodeId, target: NodeId) -> f64 {
    fn dfs(
        g: &WeightedGraph,
        cur: NodeId,
        target: NodeId,
        visited: &mut Vec<NodeId>,
        acc: f64,
        best: &mut f64,
    ) {
        if cur == target {
            *best = best.min(acc);
            return;
        }
        for e in g.neighbors(cur) {
            let w = CostMetric::Time.cost(e);
            if !w.is_finite() || visited.contains(&e.to) {
                continue;
            }
            visited.push(e.to);
            dfs(g, e.to, target, visited, acc + w, best);
            visited.pop();
        }
    }
    let mut best = f64::INFINITY;
    dfs(g, source, target, &mut vec![source], 0.0, &mut best);
    best
}

/// Random graph on a 10×10 coordinate grid.  Every finite weight is at
/// least 10× the straight-line distance between its endpoints, so
/// `EuclideanHeuristic { scale: 10.0 }` is admissible.  About 10 % of edges
/// are blocked.
fn random_graph(rng: &mut SmallRng, nodes: u32, directed: bool) -> WeightedGraph {
    let mut g = WeightedGraph::new(directed);
    for i in 0..nodes {
        g.add_node(n(i), rng.gen_range(0..10) as f64, rng.gen_range(0..10) as f64);
    }
    for a in 0..nodes {
        for b in 0..nodes {
            if a == b || !rng.gen_bool(0.3) {
                continue;
            }
            let (pa, pb) = (g.node(n(a)).unwrap().pos, g.node(n(b)).unwrap().pos);
            let straight = ((pa.lat - pb.lat).powi(2) + (pa.lon - pb.lon).powi(2)).sqrt() * 10.0;
            let weight = if rng.gen_bool(0.1) {
                f32::INFINITY
            } else {
                (straight.ceil() + rng.gen_range(0..5) as f64) as f32
            };
            g.add_edge(n(a), n(b), weight, 0.0);
        }
    }
    g
}

/// Sum of `Time` costs along `path`.
fn path_cost(g: &WeightedGraph, path: &[NodeId]) -> f64 {
    path.windows(2)
        .map(|w| CostMetric::Time.cost(g.edge(w[0], w[1]).unwrap()))
        .sum()
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dijkstra {
    use super::*;
    use crate::{dijkstra, dijkstra_to, dijkstra_with, NodeLabel, RouteError};

    #[test]
    fn triangle_prefers_two_hops() {
        let g = triangle();
        let tree = dijkstra(&g, n(1)).unwrap();
        assert_eq!(tree.distance(n(3)), Some(7.0));
        assert_eq!(tree.distance(n(2)), Some(5.0));
        assert_eq!(tree.distance(n(1)), Some(0.0));
        assert_eq!(tree.path_to(n(3)), Some(vec![n(1), n(2), n(3)]));
        assert_eq!(tree.predecessor(n(3)), Some(n(2)));
        assert_eq!(tree.predecessor(n(1)), None);
    }

    #[test]
    fn unreachable_and_unknown_nodes() {
        let mut g = triangle();
        g.add_node(n(4), 0.0, 0.0);
        let tree = dijkstra(&g, n(2)).unwrap();
        assert!(!tree.is_reachable(n(1)));
        assert!(!tree.is_reachable(n(4)));
        assert_eq!(tree.label(n(4)), NodeLabel::UNREACHABLE);
        assert_eq!(tree.label(n(99)).distance, f64::INFINITY);
        assert_eq!(tree.path_to(n(1)), None);

        assert_eq!(dijkstra(&g, n(99)).unwrap_err(), RouteError::UnknownNode(n(99)));
        assert_eq!(
            dijkstra_to(&g, n(1), n(99), CostMetric::Time).unwrap_err(),
            RouteError::UnknownNode(n(99))
        );
    }

    #[test]
    fn reachable_is_sorted_by_id() {
        let g = triangle();
        let tree = dijkstra(&g, n(1)).unwrap();
        let got: Vec<_> = tree.reachable().collect();
        assert_eq!(got, vec![(n(1), 0.0), (n(2), 5.0), (n(3), 7.0)]);
    }

    #[test]
    fn blocked_edges_are_skipped() {
        let mut g = triangle();
        g.update_edge_weight(n(2), n(3), f32::INFINITY);
        let tree = dijkstra(&g, n(1)).unwrap();
        assert_eq!(tree.distance(n(3)), Some(9.0));
        assert_eq!(tree.path_to(n(3)), Some(vec![n(1), n(3)]));

        g.set_edge_flags(n(1), n(3), rts_graph::EdgeFlags::TEMPORARY_CLOSURE, true);
        let tree = dijkstra(&g, n(1)).unwrap();
        assert!(!tree.is_reachable(n(3)));
    }

    #[test]
    fn weight_changes_apply_to_next_query() {
        let mut g = triangle();
        assert_eq!(dijkstra(&g, n(1)).unwrap().distance(n(3)), Some(7.0));
        g.update_edge_weight(n(1), n(2), 20.0);
        let tree = dijkstra(&g, n(1)).unwrap();
        assert_eq!(tree.distance(n(3)), Some(9.0));
        assert_eq!(tree.path_to(n(3)), Some(vec![n(1), n(3)]));
    }

    #[test]
    fn improvement_uses_decrease_key() {
        let mut g = WeightedGraph::new(true);
        for i in 0..3 {
            g.add_node(n(i), 0.0, 0.0);
        }
        g.add_edge(n(0), n(2), 10.0, 0.0);
        g.add_edge(n(0), n(1), 1.0, 0.0);
        g.add_edge(n(1), n(2), 1.0, 0.0);
        let tree = dijkstra(&g, n(0)).unwrap();
        assert_eq!(tree.distance(n(2)), Some(2.0));
        assert_eq!(tree.stats.decrease_keys, 1);
        assert_eq!(tree.stats.pushes, 3);
        assert_eq!(tree.stats.settled, 3);
    }

    #[test]
    fn equal_costs_break_ties_by_node_id() {
        let mut g = WeightedGraph::new(true);
        for i in 0..4 {
            g.add_node(n(i), 0.0, 0.0);
        }
        // Insert the higher-id branch first.
        g.add_edge(n(0), n(2), 1.0, 0.0);
        g.add_edge(n(0), n(1), 1.0, 0.0);
        g.add_edge(n(2), n(3), 1.0, 0.0);
        g.add_edge(n(1), n(3), 1.0, 0.0);
        let tree = dijkstra(&g, n(0)).unwrap();
        assert_eq!(tree.path_to(n(3)), Some(vec![n(0), n(1), n(3)]));
    }

    #[test]
    fn distance_metric_changes_route() {
        let g = triangle();
        // By length: 1→3 is 1000 m, 1→2→3 is 1400 m.
        let tree = dijkstra_with(&g, n(1), CostMetric::Distance).unwrap();
        assert_eq!(tree.distance(n(3)), Some(1_000.0));
        assert_eq!(tree.path_to(n(3)), Some(vec![n(1), n(3)]));
    }

    #[test]
    fn early_exit_matches_full_tree() {
        let g = triangle();
        let p = dijkstra_to(&g, n(1), n(3), CostMetric::Time).unwrap();
        assert!(p.found);
        assert_eq!(p.cost, 7.0);
        assert_eq!(p.nodes, vec![n(1), n(2), n(3)]);
        assert_eq!(p.hops(), 2);

        let none = dijkstra_to(&g, n(3), n(1), CostMetric::Time).unwrap();
        assert!(!none.found);
        assert_eq!(none.cost, f64::INFINITY);
        assert!(none.nodes.is_empty());
    }

    #[test]
    fn matches_brute_force_on_random_graphs() {
        let mut rng = SmallRng::seed_from_u64(7);
        for round in 0..40 {
            let directed = round % 2 == 0;
            let g = random_graph(&mut rng, 8, directed);
            for s in 0..8 {
                let tree = dijkstra(&g, n(s)).unwrap();
                for t in 0..8 {
                    let expected = brute_force(&g, n(s), n(t));
                    let got = tree.label(n(t));
                    if expected.is_finite() {
                        assert!(got.reachable, "round {round}: {s}->{t} should be reachable");
                        assert!((got.distance - expected).abs() < 1e-9, "round {round}: {s}->{t}");
                        let path = tree.path_to(n(t)).unwrap();
                        assert_eq!(path.first(), Some(&n(s)));
                        assert_eq!(path.last(), Some(&n(t)));
                        assert!((path_cost(&g, &path) - expected).abs() < 1e-9);
                    } else {
                        assert!(!got.reachable, "round {round}: {s}->{t} should be unreachable");
                    }
                }
            }
        }
    }

    #[test]
    fn audit_weights() {
        assert!(crate::has_non_negative_weights(&triangle()));
    }
}

// ── A* ────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod astar {
    use super::*;
    use crate::{
        astar, astar_with, dijkstra, dijkstra_to, EuclideanHeuristic, RouteError, ZeroHeuristic,
    };

    #[test]
    fn triangle_with_zero_heuristic() {
        let g = triangle();
        let p = astar(&g, n(1), n(3), &ZeroHeuristic).unwrap();
        assert!(p.found);
        assert_eq!(p.cost, 7.0);
        assert_eq!(p.nodes, vec![n(1), n(2), n(3)]);
    }

    #[test]
    fn source_equals_target() {
        let g = triangle();
        let p = astar(&g, n(2), n(2), &ZeroHeuristic).unwrap();
        assert!(p.found);
        assert_eq!(p.cost, 0.0);
        assert_eq!(p.nodes, vec![n(2)]);
    }

    #[test]
    fn unknown_endpoints_are_errors() {
        let g = triangle();
        assert_eq!(
            astar(&g, n(9), n(1), &ZeroHeuristic).unwrap_err(),
            RouteError::UnknownNode(n(9))
        );
        assert_eq!(
            astar(&g, n(1), n(9), &ZeroHeuristic).unwrap_err(),
            RouteError::UnknownNode(n(9))
        );
    }

    #[test]
    fn unreachable_target() {
        let g = triangle();
        let p = astar(&g, n(3), n(1), &ZeroHeuristic).unwrap();
        assert!(!p.found);
        assert_eq!(p.cost, f64::INFINITY);
        assert!(p.nodes.is_empty());
    }

    #[test]
    fn closure_heuristic() {
        let g = triangle();
        let h = |_: &rts_graph::Node, _: &rts_graph::Node| 0.5;
        let p = astar(&g, n(1), n(3), &h).unwrap();
        assert_eq!(p.cost, 7.0);
    }

    #[test]
    fn admissible_heuristic_matches_dijkstra() {
        let mut rng = SmallRng::seed_from_u64(99);
        let h = EuclideanHeuristic { scale: 10.0 };
        for round in 0..40 {
            let g = random_graph(&mut rng, 10, round % 2 == 1);
            for s in 0..10 {
                let tree = dijkstra(&g, n(s)).unwrap();
                for t in 0..10 {
                    let a = astar(&g, n(s), n(t), &h).unwrap();
                    let z = astar(&g, n(s), n(t), &ZeroHeuristic).unwrap();
                    match tree.distance(n(t)) {
                        Some(d) => {
                            assert!(a.found && z.found, "round {round}: {s}->{t}");
                            assert!((a.cost - d).abs() < 1e-9, "round {round}: {s}->{t}");
                            assert!((z.cost - d).abs() < 1e-9);
                            assert!((path_cost(&g, &a.nodes) - a.cost).abs() < 1e-9);
                        }
                        None => assert!(!a.found && !z.found),
                    }
                }
            }
        }
    }

    #[test]
    fn heuristic_prunes_search() {
        // Hub 0 with an eastward chain 1..=5 and a westward chain 6..=10.
        let mut g = WeightedGraph::new(false);
        g.add_node(n(0), 0.0, 0.0);
        for i in 1..=5 {
            g.add_node(n(i), 0.0, i as f64);
            g.add_node(n(i + 5), 0.0, -(i as f64));
        }
        g.add_edge(n(0), n(1), 1.0, 0.0);
        g.add_edge(n(0), n(6), 1.0, 0.0);
        for i in 1..5 {
            g.add_edge(n(i), n(i + 1), 1.0, 0.0);
            g.add_edge(n(i + 5), n(i + 6), 1.0, 0.0);
        }

        let guided = astar(&g, n(0), n(5), &EuclideanHeuristic::default()).unwrap();
        let blind = dijkstra_to(&g, n(0), n(5), CostMetric::Time).unwrap();
        assert_eq!(guided.cost, 5.0);
        assert_eq!(blind.cost, 5.0);
        assert_eq!(guided.stats.settled, 6);
        assert!(guided.stats.settled < blind.stats.settled);
    }

    #[test]
    fn metric_is_respected() {
        let g = triangle();
        let p = astar_with(&g, n(1), n(3), &ZeroHeuristic, CostMetric::Distance).unwrap();
        assert_eq!(p.nodes, vec![n(1), n(3)]);
        assert_eq!(p.cost, 1_000.0);
    }
}

// ── Heuristics, metrics, routers ──────────────────────────────────────────────

#[cfg(test)]
mod pluggable {
    use rts_graph::{Edge, EdgeFlags, Node};

    use super::*;
    use crate::{
        AStarRouter, DijkstraRouter, EuclideanHeuristic, HaversineHeuristic, Heuristic,
        ManhattanHeuristic, Router, ZeroHeuristic, dijkstra_with,
    };

    #[test]
    fn heuristic_values() {
        let a = Node::new(n(0), 0.0, 0.0);
        let b = Node::new(n(1), 3.0, 4.0);
        assert_eq!(ZeroHeuristic.estimate(&a, &b), 0.0);
        assert!((EuclideanHeuristic::default().estimate(&a, &b) - 5.0).abs() < 1e-12);
        assert!((ManhattanHeuristic { scale: 2.0 }.estimate(&a, &b) - 14.0).abs() < 1e-12);

        let north = Node::new(n(2), 1.0, 0.0);
        let m = HaversineHeuristic::metres().estimate(&a, &north);
        assert!((m - 111_195.0).abs() < 50.0);
        let secs = HaversineHeuristic::for_max_speed(10.0).estimate(&a, &north);
        assert!((secs - m / 10.0).abs() < 1e-6);
    }

    #[test]
    fn heuristic_names() {
        let custom = |_: &Node, _: &Node| 1.0;
        assert_eq!(custom.name(), "custom");
        assert_eq!(ZeroHeuristic.name(), "zero");
        assert_eq!(HaversineHeuristic::default().name(), "haversine");
    }

    #[test]
    fn metric_costs() {
        let e = Edge::new(n(0), n(1), 60.0, 2_000.0);
        assert_eq!(CostMetric::Time.cost(&e), 60.0);
        assert_eq!(CostMetric::Distance.cost(&e), 2_000.0);
        let blended = CostMetric::Blended { time_weight: 0.5, distance_weight: 1.0 };
        assert!((blended.cost(&e) - 32.0).abs() < 1e-6);

        let toll = e.clone().with_flags(EdgeFlags::TOLL_ROAD);
        assert!((CostMetric::Effective.cost(&toll) - 72.0).abs() < 1e-4);

        let closed = e.with_flags(EdgeFlags::CONSTRUCTION);
        assert_eq!(CostMetric::Distance.cost(&closed), f64::INFINITY);
    }

    #[test]
    fn negative_blend_factors_count_as_zero() {
        let e = Edge::new(n(0), n(1), 60.0, 2_000.0);
        let time_only = CostMetric::Blended { time_weight: 1.0, distance_weight: -5.0 };
        assert_eq!(time_only.cost(&e), 60.0);
        let nan = CostMetric::Blended { time_weight: f32::NAN, distance_weight: 1.0 };
        assert!((nan.cost(&e) - 2.0).abs() < 1e-6);

        let g = triangle();
        let tree = dijkstra_with(&g, n(1), CostMetric::Blended {
            time_weight: -1.0,
            distance_weight: -1.0,
        })
        .unwrap();
        assert_eq!(tree.distance(n(3)), Some(0.0));
        assert!(tree.reachable().all(|(_, d)| d >= 0.0));
    }

    #[test]
    fn routers_are_interchangeable() {
        let g = triangle();
        let routers: Vec<Box<dyn Router>> = vec![
            Box::new(DijkstraRouter::default()),
            Box::new(AStarRouter::new(ZeroHeuristic)),
            Box::new(AStarRouter::new(HaversineHeuristic { cost_per_metre: 0.0 })),
        ];
        for r in &routers {
            let p = r.route(&g, n(1), n(3)).unwrap();
            assert_eq!(p.cost, 7.0, "router {}", r.name());
            assert_eq!(p.nodes, vec![n(1), n(2), n(3)]);
        }
    }
}
