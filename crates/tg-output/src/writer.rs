//! The `NetworkWriter` trait and the one-call dump built on it.

use tg_connections::{Connection, Query};
use tg_core::CoordinateMapping;
use tg_region::Region;
use tg_routes::Route;

use crate::row::{connection_rows, edge_rows, query_rows, route_rows, station_rows};
use crate::{ConnectionRow, EdgeRow, OutputResult, QueryRow, RouteRow, StationRow};

/// Trait implemented by network dump backends.
pub trait NetworkWriter {
    fn write_stations(&mut self, rows: &[StationRow]) -> OutputResult<()>;
    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()>;
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()>;
    fn write_connections(&mut self, rows: &[ConnectionRow]) -> OutputResult<()>;
    fn write_queries(&mut self, rows: &[QueryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every part of a generated network and finish the writer.
///
/// `queries` may be empty; the queries file then holds only its header.
pub fn write_network<W, M>(
    writer: &mut W,
    region: &Region,
    routes: &[Route],
    connections: &[Connection],
    queries: &[Query],
    mapping: &M,
) -> OutputResult<()>
where
    W: NetworkWriter + ?Sized,
    M: CoordinateMapping + ?Sized,
{
    writer.write_stations(&station_rows(region, mapping))?;
    writer.write_edges(&edge_rows(region))?;
    writer.write_routes(&route_rows(routes))?;
    writer.write_connections(&connection_rows(connections))?;
    writer.write_queries(&query_rows(queries))?;
    writer.finish()?;
    log::info!(
        "output: {} stations, {} edges, {} routes, {} connections, {} queries",
        region.station_count(),
        region.edge_count(),
        routes.len(),
        connections.len(),
        queries.len()
    );
    Ok(())
}
