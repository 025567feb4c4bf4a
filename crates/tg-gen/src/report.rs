//! Summary of one pipeline run.

use tg_core::Shortfall;
use tg_edges::EdgeReport;
use tg_routes::RouteReport;

/// What each stage produced.
///
/// A run that hit an attempt cap still returns a usable network; it lists
/// the cap in `shortfalls` and [`GenerationReport::is_complete`] is false.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub cells: usize,
    /// Stations placed by stop placement, both before and after the edges
    /// (0 when the region came with them).
    pub stops_placed: usize,
    /// The part of `stops_placed` added by splitting edges.
    pub post_edge_stops: usize,
    pub stations: usize,
    pub edges: EdgeReport,
    pub routes: RouteReport,
    pub route_count: usize,
    pub connections: usize,
    pub instances: usize,
    pub discarded_instances: usize,
    pub queries: usize,
    pub shortfalls: Vec<Shortfall>,
}

impl GenerationReport {
    /// True if every stage reached its target.
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }

    pub fn loose_stations_remaining(&self) -> usize {
        self.edges.loose_stations_remaining
    }

    pub fn unmergeable_routes(&self) -> usize {
        self.routes.unmergeable_routes
    }
}
