//! `tg-routes` — turns the station graph into rider-facing routes.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`route`]   | `Route`, `Trip`: oriented stop-to-stop legs               |
//! | [`config`]  | `RoutesConfig`                                            |
//! | [`select`]  | Step 1: major-station selection                           |
//! | [`micro`]   | Step 2: bounded BFS micro-routes; Step 3: stitching       |
//! | [`merge`]   | Step 4: short-route merging and renumbering               |
//! | [`walk`]    | Step 5: greedy directional macro-routes                   |
//! | [`builder`] | `build_routes` entry point, `RouteReport`                 |
//!
//! # Edge ownership
//!
//! Every track edge gets exactly one owning route, recorded in
//! `Edge::route`.  The first route to traverse an edge owns it; Step 4 hands
//! a dissolved route's edges to the route that absorbs it.  Macro-routes own
//! only their synthetic hop edges.
//!
//! # Trips
//!
//! A route's `trips` are one vehicle run.  Each [`Trip`] names its edge
//! and the direction it is travelled in, and every trip departs from the
//! stop the previous one arrived at.

pub mod builder;
pub mod config;
pub mod merge;
pub mod micro;
pub mod route;
pub mod select;
pub mod walk;

#[cfg(test)]
mod tests;

pub use builder::{build_routes, RouteReport};
pub use config::RoutesConfig;
pub use route::{Route, RouteKind, Trip};
