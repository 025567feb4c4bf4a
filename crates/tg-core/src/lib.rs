//! `tg-core` — foundational types for the transit network generator.
//!
//! This crate is a dependency of every other `tg-*` crate.  It has no
//! `tg-*` dependencies and only `thiserror` (plus optional `serde`) from
//! outside the standard library.
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `CellId`, `EdgeId`, `RouteId`, `SequenceId`             |
//! | [`sampler`]   | `Sampler` (seeded scalar PRNG + biased choice)          |
//! | [`time`]      | `TimePool`, day/weekday helpers, hourly distributions   |
//! | [`geo`]       | `GeoPoint`, haversine, `CoordinateMapping`              |
//! | [`report`]    | `Stage`, `Shortfall`                                    |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod report;
pub mod sampler;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{CoordinateMapping, GeoPoint, LinearMapping};
pub use ids::{CellId, EdgeId, RouteId, SequenceId};
pub use report::{Shortfall, Stage};
pub use sampler::Sampler;
pub use time::{DepartureClock, TimePool, MAX_TIME_MS, MS_PER_DAY, MS_PER_HOUR};
