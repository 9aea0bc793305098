//! Synthetic 2 × 5 street grid.
//!
//! ```text
//!  w0 ── w1 ── w2 ── w3 ── w4      north row
//!  │     │     │     │     │
//!  e0 ── e1 ── e2 ── e3 ── e4      south row
//! ```
//!
//! Node ids are `row * 10 + col`.  Edge weights are free-flow minutes at
//! [`FREE_FLOW_M_PER_MIN`].

use rts_core::{GeoPoint, NodeId};
use rts_graph::{GraphConfig, WeightedGraph};

/// 30 km/h.
pub const FREE_FLOW_M_PER_MIN: f64 = 500.0;

const ORIGIN: GeoPoint = GeoPoint { lat: 30.690, lon: -88.080 };
const STEP_DEG: f64 = 0.008;
const COLS: u32 = 5;
const ROWS: u32 = 2;

pub fn grid_id(row: u32, col: u32) -> NodeId {
    NodeId(row * 10 + col)
}

/// Build the grid.  Returns the graph plus the two corner nodes used as the
/// observed commute.
pub fn build_grid() -> (WeightedGraph, NodeId, NodeId) {
    let mut g = WeightedGraph::with_config(GraphConfig::undirected());

    let pos = |row: u32, col: u32| {
        GeoPoint::new(ORIGIN.lat - row as f64 * STEP_DEG, ORIGIN.lon + col as f64 * STEP_DEG)
    };
    for row in 0..ROWS {
        for col in 0..COLS {
            let p = pos(row, col);
            g.add_node(grid_id(row, col), p.lat, p.lon);
        }
    }

    let mut road = |a: (u32, u32), b: (u32, u32)| {
        let metres = pos(a.0, a.1).distance_m(pos(b.0, b.1));
        let minutes = metres / FREE_FLOW_M_PER_MIN;
        g.add_edge(grid_id(a.0, a.1), grid_id(b.0, b.1), minutes as f32, metres as f32);
    };
    for row in 0..ROWS {
        for col in 0..COLS - 1 {
            road((row, col), (row, col + 1));
        }
    }
    for col in 0..COLS {
        road((0, col), (1, col));
    }

    (g, grid_id(0, 0), grid_id(0, COLS - 1))
}
