//! Transportation mode carried by every edge.
//!
//! Stored on edges as a single byte (`#[repr(u8)]`), so the discriminants are
//! part of the data model and must not be renumbered.

/// The means of travel an edge represents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TransportMode {
    /// Car or bus on a public road (default).
    #[default]
    Road    = 0,
    Walking = 1,
    Cycling = 2,
    Bus     = 3,
    Train   = 4,
    Subway  = 5,
    Tram    = 6,
    Ferry   = 7,
    Flight  = 8,
}

impl TransportMode {
    /// Decode the byte stored on an edge; `None` for unknown values.
    pub fn from_u8(raw: u8) -> Option<TransportMode> {
        Some(match raw {
            0 => TransportMode::Road,
            1 => TransportMode::Walking,
            2 => TransportMode::Cycling,
            3 => TransportMode::Bus,
            4 => TransportMode::Train,
            5 => TransportMode::Subway,
            6 => TransportMode::Tram,
            7 => TransportMode::Ferry,
            8 => TransportMode::Flight,
            _ => return None,
        })
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// `true` for timetabled public transport.
    pub fn is_scheduled_transit(self) -> bool {
        matches!(
            self,
            TransportMode::Bus
                | TransportMode::Train
                | TransportMode::Subway
                | TransportMode::Tram
                | TransportMode::Ferry
                | TransportMode::Flight
        )
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Road    => "road",
            TransportMode::Walking => "walking",
            TransportMode::Cycling => "cycling",
            TransportMode::Bus     => "bus",
            TransportMode::Train   => "train",
            TransportMode::Subway  => "subway",
            TransportMode::Tram    => "tram",
            TransportMode::Ferry   => "ferry",
            TransportMode::Flight  => "flight",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
