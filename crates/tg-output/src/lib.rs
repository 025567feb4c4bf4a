//! `tg-output` — plain CSV dump of a generated network.
//!
//! A debugging aid: the files mirror the in-memory arena (ids are arena
//! indices) and are not a transit-feed format.
//!
//! | File              | One row per                                         |
//! |-------------------|-----------------------------------------------------|
//! | `stations.csv`    | station cell, with its lat/lon                      |
//! | `edges.csv`       | edge (track and hop) with its owning route          |
//! | `routes.csv`      | route, with its stop sequence                       |
//! | `connections.csv` | connection, with scheduled times and delays         |
//! | `queries.csv`     | journey request, empty unless queries were generated |
//!
//! # Usage
//!
//! ```rust,ignore
//! use tg_output::{write_network, CsvWriter};
//!
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! write_network(&mut writer, &net.region, &net.routes, &net.connections, &net.queries, &mapping)?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::{ConnectionRow, EdgeRow, QueryRow, RouteRow, StationRow};
pub use writer::{write_network, NetworkWriter};
