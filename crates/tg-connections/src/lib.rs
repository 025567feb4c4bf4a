//! `tg-connections` — turns routes into a timetable of vehicle movements.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`config`]     | `ConnectionsConfig`                                    |
//! | [`connection`] | `Connection`                                           |
//! | [`travel`]     | `TravelModel`: speed- and acceleration-limited timing  |
//! | [`delay`]      | `DelayReasons`, `DelayChain`                           |
//! | [`simulate`]   | `Simulator`, `generate_connections`                    |
//! | [`query`]      | `QueriesConfig`, `generate_queries`: journey requests  |
//!
//! # Route instances
//!
//! One simulated run of a route produces one connection per trip, all
//! sharing a `SequenceId`.  A run is committed whole or not at all: if its
//! last scheduled arrival falls after `time_final` the batch is dropped and
//! another route is drawn.

pub mod config;
pub mod connection;
pub mod delay;
pub mod query;
pub mod simulate;
pub mod travel;


pub use config::ConnectionsConfig;
pub use connection::Connection;
pub use delay::{DelayChain, DelayReasons};
pub use query::{generate_queries, QueriesConfig, QueriesOutcome, Query};
pub use simulate::{generate_connections, ConnectionsOutcome, Simulator};
pub use travel::TravelModel;
