//! Node type: a located point of the transport network.

use std::fmt;

use bitflags::bitflags;

use rts_core::{GeoPoint, NodeId};

/// What kind of place a node represents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NodeKind {
    #[default]
    Intersection  = 0,
    BusStop       = 1,
    TrainStation  = 2,
    SubwayStation = 3,
    Airport       = 4,
    FerryTerminal = 5,
    Parking       = 6,
    /// Point of interest.
    Poi           = 7,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Intersection  => "intersection",
            NodeKind::BusStop       => "bus stop",
            NodeKind::TrainStation  => "train station",
            NodeKind::SubwayStation => "subway station",
            NodeKind::Airport       => "airport",
            NodeKind::FerryTerminal => "ferry terminal",
            NodeKind::Parking       => "parking",
            NodeKind::Poi           => "point of interest",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Per-node attribute bits.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct NodeFlags: u8 {
        /// Wheelchair accessible.
        const ACCESSIBLE         = 1 << 0;
        const TRAFFIC_LIGHT      = 1 << 1;
        const MAJOR_INTERSECTION = 1 << 2;
        const TRANSIT_HUB        = 1 << 3;
        const RESTRICTED_ACCESS  = 1 << 4;
        const TEMPORARY_CLOSURE  = 1 << 5;
    }
}

/// A network location.
///
/// `degree` is maintained by the graph store and always equals the number
/// of outgoing edges; any value supplied on insertion is overwritten.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:      NodeId,
    pub pos:     GeoPoint,
    pub degree:  u32,
    pub kind:    NodeKind,
    /// Fare or traffic zone.
    pub zone_id: u16,
    pub flags:   NodeFlags,
}

impl Node {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            pos: GeoPoint::new(lat, lon),
            degree: 0,
            kind: NodeKind::Intersection,
            zone_id: 0,
            flags: NodeFlags::empty(),
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_zone(mut self, zone_id: u16) -> Self {
        self.zone_id = zone_id;
        self
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.pos.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.pos.lon
    }

    /// Great-circle distance to `other` in metres.
    #[inline]
    pub fn distance_to(&self, other: &Node) -> f64 {
        self.pos.distance_m(other.pos)
    }

    /// Initial bearing towards `other` in degrees, 0 = north.
    #[inline]
    pub fn bearing_to(&self, other: &Node) -> f64 {
        self.pos.bearing_deg(other.pos)
    }
}
