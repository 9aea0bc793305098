//! Logical simulation time.
//!
//! # Design
//!
//! Time is a floating-point clock advanced only by event processing; it has
//! no connection to the wall clock.  The unit is up to the application (the
//! traffic world in `rts-sim` reads it as minutes since midnight).
//!
//! `SimTime` deliberately implements only `PartialOrd`.  Queues that need a
//! total order use [`SimTime::total_cmp`], and every entry point that accepts
//! a time rejects non-finite values, so NaN never reaches a heap.

use std::cmp::Ordering;
use std::fmt;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// A point on the logical simulation timeline.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Return the time `delta` units after `self`.
    #[inline]
    pub fn offset(self, delta: f64) -> SimTime {
        SimTime(self.0 + delta)
    }

    /// Units elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// `true` for finite values, the only times a scheduler accepts.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite()
    }

    /// IEEE-754 total order; agrees with `<` for all finite values.
    #[inline]
    pub fn total_cmp(&self, other: &SimTime) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    #[inline]
    pub fn max(self, other: SimTime) -> SimTime {
        if other.0 > self.0 { other } else { self }
    }
}

impl From<f64> for SimTime {
    #[inline]
    fn from(t: f64) -> SimTime {
        SimTime(t)
    }
}

impl From<SimTime> for f64 {
    #[inline]
    fn from(t: SimTime) -> f64 {
        t.0
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the scheduler and traffic world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Logical time at which the run starts.
    pub start_time: f64,

    /// Logical time at which `process_until` stops.  1440 = one day in
    /// minutes.
    pub end_time: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Interval between periodic per-edge traffic updates.
    pub update_interval: f64,
}

impl SimConfig {
    #[inline]
    pub fn start(&self) -> SimTime {
        SimTime(self.start_time)
    }

    #[inline]
    pub fn end(&self) -> SimTime {
        SimTime(self.end_time)
    }

    /// Length of the run in logical time units.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_time:      0.0,
            end_time:        1_440.0,
            seed:            42,
            update_interval: 5.0,
        }
    }
}
