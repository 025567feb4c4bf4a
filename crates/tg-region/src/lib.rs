//! `tg-region` — the populated grid every later stage reads and extends.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`region`]   | `Region` arena: `Cell`s, `Edge`s, neighbourhood queries     |
//! | [`generate`] | `RegionGenerator` trait, `NoisyRegion`, `IsolatedRegion`    |
//! | [`loader`]   | `load_region_csv`, `load_region_reader`                     |
//! | [`stops`]    | `StopsConfig`, `place_stops`                                |
//! | [`config`]   | `RegionConfig`, `RegionSource`                              |
//! | [`error`]    | `RegionError`, `RegionResult<T>`                            |
//!
//! # Arena model
//!
//! Cells and edges live in two flat `Vec`s owned by the `Region`.  A cell's
//! incident-edge list holds `EdgeId`s, an edge's endpoints are `CellId`s and
//! its owning route is a `RouteId`; nothing holds a pointer into anything
//! else, so the cyclic cell ↔ edge ↔ route graph needs no lifetimes.

pub mod config;
pub mod error;
pub mod generate;
pub mod loader;
pub mod region;
pub mod stops;


pub use config::{RegionConfig, RegionSource};
pub use error::{RegionError, RegionResult};
pub use generate::{IsolatedRegion, NoisyRegion, RegionGenerator};
pub use loader::{load_region_csv, load_region_reader};
pub use region::{Cell, Edge, EdgeKind, Region};
pub use stops::{place_stops, StopsConfig, StopsOutcome};
