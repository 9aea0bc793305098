//! Edge cost selection.

use rts_graph::Edge;

/// Which edge attribute a search minimises.
///
/// Every metric returns `+∞` for a blocked edge (closed, under
/// construction, or weight `+∞`), and searches never traverse such edges.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum CostMetric {
    /// `weight` as stored (travel time).
    #[default]
    Time,
    /// `weight` with the toll penalty applied.
    Effective,
    /// `length` in metres.
    Distance,
    /// `time_weight · weight + distance_weight · length / 1000`.  Negative
    /// or NaN factors count as zero.
    Blended { time_weight: f32, distance_weight: f32 },
}

impl CostMetric {
    /// Cost of traversing `edge`, widened to `f64` for accumulation.
    #[inline]
    pub fn cost(self, edge: &Edge) -> f64 {
        if edge.is_blocked() {
            return f64::INFINITY;
        }
        let c = match self {
            CostMetric::Time      => edge.weight,
            CostMetric::Effective => edge.effective_weight(),
            CostMetric::Distance  => edge.length,
            CostMetric::Blended { time_weight, distance_weight } => {
                edge.travel_cost(time_weight.max(0.0), distance_weight.max(0.0))
            }
        };
        c as f64
    }
}
