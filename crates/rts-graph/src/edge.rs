//! Directed weighted edge.
//!
//! `weight` is the routing cost (nominally seconds of travel time) and is
//! the value traffic events rewrite.  `length` is the physical distance in
//! metres and never changes after insertion.

use bitflags::bitflags;

use rts_core::{NodeId, TransportMode};

/// Capacity assigned when the caller does not supply one (vehicles/hour).
pub const DEFAULT_CAPACITY: u16 = 1_000;

/// Toll roads cost this much more in [`Edge::effective_weight`].
const TOLL_PENALTY: f32 = 1.2;

bitflags! {
    /// Per-edge attribute bits.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct EdgeFlags: u8 {
        const ONE_WAY           = 1 << 0;
        const TOLL_ROAD         = 1 << 1;
        const BRIDGE            = 1 << 2;
        const TUNNEL            = 1 << 3;
        const HIGHWAY           = 1 << 4;
        const RESTRICTED        = 1 << 5;
        const TEMPORARY_CLOSURE = 1 << 6;
        const CONSTRUCTION      = 1 << 7;
    }
}

impl EdgeFlags {
    /// Bits that make an edge impassable.
    pub const CLOSED: EdgeFlags = EdgeFlags::TEMPORARY_CLOSURE.union(EdgeFlags::CONSTRUCTION);
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from:           NodeId,
    pub to:             NodeId,
    /// Non-negative routing cost; `f32::INFINITY` marks a blocked edge.
    pub weight:         f32,
    /// Metres.
    pub length:         f32,
    pub capacity:       u16,
    pub flags:          EdgeFlags,
    pub transport_mode: TransportMode,
}

impl Edge {
    /// Road edge with default capacity.  A zero `length` is estimated as
    /// `weight × 10`.
    pub fn new(from: NodeId, to: NodeId, weight: f32, length: f32) -> Self {
        let length = if length == 0.0 { weight * 10.0 } else { length };
        Self {
            from,
            to,
            weight,
            length,
            capacity: DEFAULT_CAPACITY,
            flags: EdgeFlags::empty(),
            transport_mode: TransportMode::Road,
        }
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = mode;
        self
    }

    pub fn with_capacity(mut self, capacity: u16) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_flags(mut self, flags: EdgeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// `false` while closed or under construction.
    #[inline]
    pub fn is_accessible(&self) -> bool {
        !self.flags.intersects(EdgeFlags::CLOSED)
    }

    /// `true` if routing must not traverse this edge.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        !self.is_accessible() || self.weight == f32::INFINITY
    }

    /// Cost used for routing: `weight` with the toll penalty applied, or
    /// `+∞` for blocked edges.
    pub fn effective_weight(&self) -> f32 {
        if self.is_blocked() {
            return f32::INFINITY;
        }
        if self.flags.contains(EdgeFlags::TOLL_ROAD) {
            self.weight * TOLL_PENALTY
        } else {
            self.weight
        }
    }

    /// Average speed implied by `length` and `weight` (seconds), in km/h.
    /// Zero for non-positive or infinite weights.
    pub fn speed_kmh(&self) -> f32 {
        if self.weight <= 0.0 || !self.weight.is_finite() {
            return 0.0;
        }
        (self.length / 1_000.0) / (self.weight / 3_600.0)
    }

    /// Weighted blend of time and distance (kilometres).
    #[inline]
    pub fn travel_cost(&self, time_weight: f32, distance_weight: f32) -> f32 {
        time_weight * self.weight + distance_weight * (self.length / 1_000.0)
    }

    /// Same attributes, endpoints swapped.
    pub fn reversed(&self) -> Edge {
        Edge { from: self.to, to: self.from, ..self.clone() }
    }
}
