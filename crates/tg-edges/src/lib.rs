//! `tg-edges` — connects the stations of a [`Region`](tg_region::Region)
//! into one graph.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`config`]  | `EdgesConfig`                                              |
//! | [`cluster`] | Phase A (agglomerative) and Phase B (border) clustering    |
//! | [`loose`]   | Phase C: directional reconnection of degree-1 stations     |
//! | [`builder`] | `build_edges` entry point, `EdgeReport`                    |
//! | [`split`]   | Post-edge stop placement by edge splitting                 |
//!
//! # Phases
//!
//! ```text
//! A  singleton clusters → merge by centroid distance, threshold grows per round
//! B  pick a cluster at random → merge with every cluster within both ceilings
//! C  for each degree-1 station → walk away from its neighbour, connect first hit
//! S  (post-edge stops) split long edges A–B into A–C, C–B at a new station C
//! ```
//!
//! After Phase B the station graph is connected.  Phase C only adds edges
//! between stations that already have one, so it never creates new
//! degree-1 stations.  Edge splitting keeps every station's degree and
//! gives each new station two edges.

pub mod builder;
pub mod cluster;
pub mod config;
pub mod loose;
pub mod split;

#[cfg(test)]
mod tests;

pub use builder::{build_edges, EdgeReport};
pub use config::EdgesConfig;
pub use split::place_stops_on_edges;
