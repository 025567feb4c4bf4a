//! Plain data row types written by output backends, and their builders.

use tg_connections::{Connection, Query};
use tg_core::CoordinateMapping;
use tg_region::{EdgeKind, Region};
use tg_routes::Route;

/// One station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationRow {
    /// Cell id of the station.
    pub station_id: u32,
    pub x:          u32,
    pub y:          u32,
    pub weight:     f64,
    pub lat:        f64,
    pub lon:        f64,
}

/// One edge, track or hop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRow {
    pub edge_id:   u32,
    pub from:      u32,
    pub to:        u32,
    pub kind:      EdgeKind,
    /// Squared grid distance.
    pub length_sq: f64,
    /// `None` for an edge no route owns.
    pub route_id:  Option<u32>,
}

/// One route with its stop sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    pub route_id: u32,
    pub is_macro: bool,
    pub edges:    usize,
    pub trips:    usize,
    pub size:     f64,
    /// Station ids in travel order.
    pub stops:    Vec<u32>,
}

/// One scheduled connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRow {
    pub sequence_id:            u32,
    pub route_id:               u32,
    pub trip_id:                u32,
    pub from:                   u32,
    pub to:                     u32,
    pub departure_time:         i64,
    pub arrival_time:           i64,
    pub delay_departure:        i64,
    pub delay_arrival:          i64,
    pub delay_reason_departure: Option<String>,
    pub delay_reason_arrival:   Option<String>,
}

/// One journey request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryRow {
    pub departure_stop: u32,
    pub arrival_stop:   u32,
    pub departure_time: i64,
    pub lead_time_s:    f64,
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Station rows ordered by `(x, y)`.
pub fn station_rows<M: CoordinateMapping + ?Sized>(region: &Region, mapping: &M) -> Vec<StationRow> {
    region
        .stations()
        .into_iter()
        .map(|id| {
            let cell = region.cell(id);
            let geo = mapping.to_geo(cell.x, cell.y);
            StationRow {
                station_id: id.0,
                x:          cell.x,
                y:          cell.y,
                weight:     cell.weight,
                lat:        geo.lat,
                lon:        geo.lon,
            }
        })
        .collect()
}

pub fn edge_rows(region: &Region) -> Vec<EdgeRow> {
    region
        .edges()
        .iter()
        .enumerate()
        .map(|(i, e)| EdgeRow {
            edge_id:   i as u32,
            from:      e.from.0,
            to:        e.to.0,
            kind:      e.kind,
            length_sq: e.length,
            route_id:  e.route.map(|r| r.0),
        })
        .collect()
}

pub fn route_rows(routes: &[Route]) -> Vec<RouteRow> {
    routes
        .iter()
        .map(|r| RouteRow {
            route_id: r.id.0,
            is_macro: r.is_macro(),
            edges:    r.edges.len(),
            trips:    r.trips.len(),
            size:     r.size,
            stops:    r.stops().into_iter().map(|s| s.0).collect(),
        })
        .collect()
}

/// Connection rows; `from` and `to` follow the direction of travel.
pub fn connection_rows(connections: &[Connection]) -> Vec<ConnectionRow> {
    connections
        .iter()
        .map(|c| ConnectionRow {
            sequence_id:            c.sequence_id.0,
            route_id:               c.route.0,
            trip_id:                c.trip.0,
            from:                   c.from.0,
            to:                     c.to.0,
            departure_time:         c.departure_time,
            arrival_time:           c.arrival_time,
            delay_departure:        c.delay_departure,
            delay_arrival:          c.delay_arrival,
            delay_reason_departure: c.delay_reason_departure.clone(),
            delay_reason_arrival:   c.delay_reason_arrival.clone(),
        })
        .collect()
}

pub fn query_rows(queries: &[Query]) -> Vec<QueryRow> {
    queries
        .iter()
        .map(|q| QueryRow {
            departure_stop: q.departure_stop.0,
            arrival_stop:   q.arrival_stop.0,
            departure_time: q.departure_time,
            lead_time_s:    q.lead_time_s,
        })
        .collect()
}
