//! Unit tests for tg-output.

use tg_connections::{Connection, Query};
use tg_core::{CellId, LinearMapping, RouteId, SequenceId};
use tg_region::Region;
use tg_routes::{Route, RouteKind, Trip};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Three stations on a line with two track edges owned by route 0, a
/// fourth unowned edge to a plain cell, and one macro route over a hop.
fn network() -> (Region, Vec<Route>, Vec<Connection>) {
    let mut r = Region::new();
    let a = r.put(0, 0, 1.0);
    let b = r.put(2, 0, 2.0);
    let c = r.put(4, 0, 3.0);
    let plain = r.put(4, 4, 0.5);
    for id in [a, b, c] {
        r.mark_station(id);
    }
    let ab = r.add_edge(a, b);
    let bc = r.add_edge(b, c);
    r.add_edge(c, plain);
    r.edge_mut(ab).route = Some(RouteId(0));
    r.edge_mut(bc).route = Some(RouteId(0));
    let hop = r.add_hop(a, c);
    r.edge_mut(hop).route = Some(RouteId(1));

    let micro = Route::from_path(&r, RouteId(0), a, vec![ab, bc]);
    let macro_route = Route::new(
        &r,
        RouteId(1),
        RouteKind::Macro,
        vec![ab, bc],
        vec![Trip { edge: hop, from: a, to: c }],
    );

    let conn = |trip: Trip, dep: i64, reason: Option<&str>| Connection {
        trip: trip.edge,
        from: trip.from,
        to: trip.to,
        route: RouteId(0),
        departure_time: dep,
        arrival_time: dep + 100,
        delay_departure: 0,
        delay_arrival: if reason.is_some() { 5000 } else { 0 },
        delay_reason_departure: None,
        delay_reason_arrival: reason.map(str::to_string),
        sequence_id: SequenceId(0),
    };
    let connections = vec![
        conn(micro.trips[0], 1000, None),
        conn(micro.trips[1], 70_000, Some("WEATHER")),
    ];
    (r, vec![micro, macro_route], connections)
}

fn queries() -> Vec<Query> {
    vec![Query {
        departure_stop: CellId(2),
        arrival_stop: CellId(0),
        departure_time: 3_600_000,
        lead_time_s: 90.5,
    }]
}

fn records(path: &std::path::Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

fn headers(path: &std::path::Path) -> Vec<String> {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.headers().unwrap().iter().map(str::to_owned).collect()
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use super::*;
    use crate::row::{connection_rows, edge_rows, query_rows, route_rows, station_rows};

    #[test]
    fn stations_are_mapped() {
        let (r, _, _) = network();
        let rows = station_rows(&r, &LinearMapping::new(50.0, 4.0, 100.0));
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[1].x, rows[1].y), (2, 0));
        assert!((rows[1].lat - 50.02).abs() < 1e-9);
        assert!((rows[1].lon - 4.0).abs() < 1e-9);
    }

    #[test]
    fn edges_keep_owner() {
        let (r, _, _) = network();
        let rows = edge_rows(&r);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].route_id, Some(0));
        assert_eq!(rows[2].route_id, None);
        assert_eq!(rows[3].kind, tg_region::EdgeKind::Hop);
        assert_eq!(rows[0].length_sq, 4.0);
    }

    #[test]
    fn route_stop_sequence() {
        let (r, routes, _) = network();
        let rows = route_rows(&routes);
        assert_eq!(rows[0].stops, vec![0, 1, 2]);
        assert!(!rows[0].is_macro);
        assert_eq!(rows[1].stops, vec![0, 2]);
        assert!(rows[1].is_macro);
        assert_eq!((rows[1].edges, rows[1].trips), (2, 1));
    }

    #[test]
    fn connection_endpoints() {
        let (_, _, conns) = network();
        let rows = connection_rows(&conns);
        assert_eq!((rows[1].from, rows[1].to), (1, 2));
        assert_eq!(rows[1].delay_reason_arrival.as_deref(), Some("WEATHER"));
    }

    #[test]
    fn query_endpoints() {
        let rows = query_rows(&queries());
        assert_eq!((rows[0].departure_stop, rows[0].arrival_stop), (2, 0));
        assert_eq!(rows[0].departure_time, 3_600_000);
        assert_eq!(rows[0].lead_time_s, 90.5);
    }

    #[test]
    fn reversed_route_lists_stops_in_travel_order() {
        let (r, routes, conns) = network();
        let (ab, bc) = (routes[0].edges[0], routes[0].edges[1]);
        let c = r.cell_at(4, 0).unwrap();
        let back = Route::from_path(&r, RouteId(0), c, vec![bc, ab]);
        assert_eq!(route_rows(std::slice::from_ref(&back))[0].stops, vec![2, 1, 0]);

        let conn = Connection {
            trip: back.trips[0].edge,
            from: back.trips[0].from,
            to: back.trips[0].to,
            ..conns[0].clone()
        };
        let rows = connection_rows(&[conn]);
        assert_eq!(rows[0].trip_id, bc.0);
        assert_eq!((rows[0].from, rows[0].to), (2, 1));
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::writer::{write_network, NetworkWriter};
    use crate::CsvWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        for name in ["stations.csv", "edges.csv", "routes.csv", "connections.csv", "queries.csv"] {
            assert!(dir.path().join(name).exists(), "{name}");
        }
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(
            headers(&dir.path().join("stations.csv")),
            ["station_id", "x", "y", "weight", "lat", "lon"]
        );
        assert_eq!(
            headers(&dir.path().join("edges.csv")),
            ["edge_id", "from", "to", "kind", "length_sq", "route_id"]
        );
        let conn = headers(&dir.path().join("connections.csv"));
        assert_eq!(conn.len(), 11);
        assert_eq!(conn[0], "sequence_id");
        assert_eq!(
            headers(&dir.path().join("queries.csv")),
            ["departure_stop", "arrival_stop", "departure_time", "lead_time_s"]
        );
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn full_dump() {
        let dir = tmp();
        let (r, routes, conns) = network();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        write_network(&mut w, &r, &routes, &conns, &queries(), &LinearMapping::default()).unwrap();

        assert_eq!(records(&dir.path().join("stations.csv")).len(), 3);

        let edges = records(&dir.path().join("edges.csv"));
        assert_eq!(edges.len(), 4);
        assert_eq!(&edges[0][3], "track");
        assert_eq!(&edges[2][5], "");
        assert_eq!(&edges[3][3], "hop");

        let routes = records(&dir.path().join("routes.csv"));
        assert_eq!(&routes[0][1], "micro");
        assert_eq!(&routes[0][5], "0 1 2");
        assert_eq!(&routes[1][1], "macro");

        let conns = records(&dir.path().join("connections.csv"));
        assert_eq!(conns.len(), 2);
        assert_eq!(&conns[0][5], "1000");
        assert_eq!(&conns[0][10], "");
        assert_eq!(&conns[1][8], "5000");
        assert_eq!(&conns[1][10], "WEATHER");

        let queries = records(&dir.path().join("queries.csv"));
        assert_eq!(queries.len(), 1);
        assert_eq!(&queries[0][0], "2");
        assert_eq!(&queries[0][3], "90.5");
    }

    #[test]
    fn no_queries_leaves_header_only() {
        let dir = tmp();
        let (r, routes, conns) = network();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        write_network(&mut w, &r, &routes, &conns, &[], &LinearMapping::default()).unwrap();
        assert!(records(&dir.path().join("queries.csv")).is_empty());
        assert_eq!(records(&dir.path().join("connections.csv")).len(), 2);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}
