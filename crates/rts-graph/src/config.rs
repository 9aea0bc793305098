//! Graph store configuration.

/// Construction-time settings for a [`WeightedGraph`](crate::WeightedGraph).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// `false` mirrors every inserted edge `(a, b)` as `(b, a)`.
    pub directed: bool,

    /// Node slots reserved up front.
    pub initial_capacity: usize,

    /// Compact after a removal once free slots exceed this share of all
    /// slots.  `0.25` reproduces the classic threshold; `1.0` or more never
    /// compacts automatically.
    pub compaction_ratio: f64,

    /// Undirected graphs only: when `true`, weight and flag updates on
    /// `(a, b)` also apply to `(b, a)`.  Off by default, so the two
    /// directions of a mirrored edge evolve independently.
    pub symmetric_weight_updates: bool,
}

impl GraphConfig {
    pub fn directed() -> Self {
        Self { directed: true, ..Self::default() }
    }

    pub fn undirected() -> Self {
        Self { directed: false, ..Self::default() }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed:                 true,
            initial_capacity:         1_000,
            compaction_ratio:         0.25,
            symmetric_weight_updates: false,
        }
    }
}
