//! `rts-core`: foundational types shared by every `rts-*` crate.
//!
//! This crate has no `rts-*` dependencies and minimal external ones (only
//! `rand`, plus optional `serde`).  Each layer above it owns its error type.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EventId`                                   |
//! | [`geo`]         | `GeoPoint`, haversine distance, bearing               |
//! | [`time`]        | `SimTime`, `SimConfig`                                |
//! | [`rng`]         | `SimRng`                                              |
//! | [`transport`]   | `TransportMode` enum                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{EventId, NodeId};
pub use rng::SimRng;
pub use time::{SimConfig, SimTime};
pub use transport::TransportMode;
