//! Lower-bound estimators for A*.
//!
//! A heuristic is *admissible* if it never overestimates the remaining cost;
//! only then is A* guaranteed to return an optimal path.  Admissibility
//! depends on the units of the cost metric, so the geographic estimators
//! take an explicit scale factor.  Nothing here checks admissibility at
//! runtime.

use rts_graph::Node;

/// Estimate of the cost from `from` to `goal`.
pub trait Heuristic {
    fn estimate(&self, from: &Node, goal: &Node) -> f64;

    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> Heuristic for F
where
    F: Fn(&Node, &Node) -> f64,
{
    #[inline]
    fn estimate(&self, from: &Node, goal: &Node) -> f64 {
        self(from, goal)
    }
}

/// Always 0.  A* with this heuristic explores like Dijkstra.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    #[inline]
    fn estimate(&self, _from: &Node, _goal: &Node) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "zero"
    }
}

/// Great-circle distance times `cost_per_metre`.
///
/// For time-weighted graphs use [`for_max_speed`](Self::for_max_speed) with
/// the fastest speed any edge allows.
#[derive(Copy, Clone, Debug)]
pub struct HaversineHeuristic {
    pub cost_per_metre: f64,
}

impl HaversineHeuristic {
    /// Cost unit = metres.
    pub fn metres() -> Self {
        Self { cost_per_metre: 1.0 }
    }

    /// Cost unit = metres / `max_speed`, in whatever time unit `max_speed`
    /// is expressed in (metres per second gives seconds, metres per minute
    /// gives minutes).
    pub fn for_max_speed(max_speed: f64) -> Self {
        Self { cost_per_metre: 1.0 / max_speed }
    }
}

impl Default for HaversineHeuristic {
    fn default() -> Self {
        Self::metres()
    }
}

impl Heuristic for HaversineHeuristic {
    #[inline]
    fn estimate(&self, from: &Node, goal: &Node) -> f64 {
        from.distance_to(goal) * self.cost_per_metre
    }

    fn name(&self) -> &'static str {
        "haversine"
    }
}

/// Straight-line distance in raw coordinate space (lat as x, lon as y).
#[derive(Copy, Clone, Debug)]
pub struct EuclideanHeuristic {
    pub scale: f64,
}

impl Default for EuclideanHeuristic {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Heuristic for EuclideanHeuristic {
    #[inline]
    fn estimate(&self, from: &Node, goal: &Node) -> f64 {
        let dx = goal.lat() - from.lat();
        let dy = goal.lon() - from.lon();
        (dx * dx + dy * dy).sqrt() * self.scale
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

/// L1 distance in raw coordinate space.  Admissible only on grid-like
/// graphs without diagonal shortcuts.
#[derive(Copy, Clone, Debug)]
pub struct ManhattanHeuristic {
    pub scale: f64,
}

impl Default for ManhattanHeuristic {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Heuristic for ManhattanHeuristic {
    #[inline]
    fn estimate(&self, from: &Node, goal: &Node) -> f64 {
        ((goal.lat() - from.lat()).abs() + (goal.lon() - from.lon()).abs()) * self.scale
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}
