//! CSV output backend.
//!
//! Creates five files in the configured output directory:
//! - `stations.csv`
//! - `edges.csv`
//! - `routes.csv`
//! - `connections.csv`
//! - `queries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use tg_region::EdgeKind;

use crate::writer::NetworkWriter;
use crate::{ConnectionRow, EdgeRow, OutputResult, QueryRow, RouteRow, StationRow};

/// Writes a network dump to five CSV files.
pub struct CsvWriter {
    stations:    Writer<File>,
    edges:       Writer<File>,
    routes:      Writer<File>,
    connections: Writer<File>,
    queries:     Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the five CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut stations = Writer::from_path(dir.join("stations.csv"))?;
        stations.write_record(["station_id", "x", "y", "weight", "lat", "lon"])?;

        let mut edges = Writer::from_path(dir.join("edges.csv"))?;
        edges.write_record(["edge_id", "from", "to", "kind", "length_sq", "route_id"])?;

        let mut routes = Writer::from_path(dir.join("routes.csv"))?;
        routes.write_record(["route_id", "kind", "edges", "trips", "size", "stops"])?;

        let mut connections = Writer::from_path(dir.join("connections.csv"))?;
        connections.write_record([
            "sequence_id",
            "route_id",
            "trip_id",
            "from",
            "to",
            "departure_time",
            "arrival_time",
            "delay_departure",
            "delay_arrival",
            "delay_reason_departure",
            "delay_reason_arrival",
        ])?;

        let mut queries = Writer::from_path(dir.join("queries.csv"))?;
        queries.write_record(["departure_stop", "arrival_stop", "departure_time", "lead_time_s"])?;

        Ok(Self {
            stations,
            edges,
            routes,
            connections,
            queries,
            finished: false,
        })
    }
}

impl NetworkWriter for CsvWriter {
    fn write_stations(&mut self, rows: &[StationRow]) -> OutputResult<()> {
        for row in rows {
            self.stations.write_record(&[
                row.station_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.weight.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()> {
        for row in rows {
            let kind = match row.kind {
                EdgeKind::Track => "track",
                EdgeKind::Hop   => "hop",
            };
            self.edges.write_record(&[
                row.edge_id.to_string(),
                row.from.to_string(),
                row.to.to_string(),
                kind.to_string(),
                row.length_sq.to_string(),
                row.route_id.map(|r| r.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        for row in rows {
            let stops: Vec<String> = row.stops.iter().map(u32::to_string).collect();
            self.routes.write_record(&[
                row.route_id.to_string(),
                if row.is_macro { "macro" } else { "micro" }.to_string(),
                row.edges.to_string(),
                row.trips.to_string(),
                row.size.to_string(),
                stops.join(" "),
            ])?;
        }
        Ok(())
    }

    fn write_connections(&mut self, rows: &[ConnectionRow]) -> OutputResult<()> {
        for row in rows {
            self.connections.write_record(&[
                row.sequence_id.to_string(),
                row.route_id.to_string(),
                row.trip_id.to_string(),
                row.from.to_string(),
                row.to.to_string(),
                row.departure_time.to_string(),
                row.arrival_time.to_string(),
                row.delay_departure.to_string(),
                row.delay_arrival.to_string(),
                row.delay_reason_departure.clone().unwrap_or_default(),
                row.delay_reason_arrival.clone().unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_queries(&mut self, rows: &[QueryRow]) -> OutputResult<()> {
        for row in rows {
            self.queries.write_record(&[
                row.departure_stop.to_string(),
                row.arrival_stop.to_string(),
                row.departure_time.to_string(),
                row.lead_time_s.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stations.flush()?;
        self.edges.flush()?;
        self.routes.flush()?;
        self.connections.flush()?;
        self.queries.flush()?;
        Ok(())
    }
}
