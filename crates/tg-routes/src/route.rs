use tg_core::{CellId, EdgeId, RouteId};
use tg_region::Region;

/// One stop-to-stop leg of a route in travel direction.
///
/// `edge` may be stored the other way round; `from` and `to` are what a
/// vehicle running the route sees.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Trip {
    pub edge: EdgeId,
    pub from: CellId,
    pub to: CellId,
}

impl Trip {
    /// The same edge travelled the other way.
    pub fn reversed(self) -> Self {
        Self { edge: self.edge, from: self.to, to: self.from }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RouteKind {
    /// Runs along track edges: micro-routes, stitched chains and their merges.
    Track,
    /// Runs over hop edges between sampled stops of a walk.
    Macro,
}

/// A rider-facing route.
///
/// `edges` is the set of track edges the route uses.  `trips` is one
/// vehicle run: consecutive trips share a stop, `trips[i].to ==
/// trips[i + 1].from`.  For track routes the trips cover `edges` (a merged
/// spur is served out and back, so an edge may appear twice).  For
/// macro-routes `trips` are hop edges between the sampled stops.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub kind: RouteKind,
    pub edges: Vec<EdgeId>,
    pub trips: Vec<Trip>,
    /// Sum of endpoint weights over `trips`.
    pub size: f64,
}

impl Route {
    /// A track route running `edges` in order, starting at `start`.
    pub fn from_path(region: &Region, id: RouteId, start: CellId, edges: Vec<EdgeId>) -> Self {
        let trips = orient(region, start, &edges);
        Self::new(region, id, RouteKind::Track, edges, trips)
    }

    pub fn new(region: &Region, id: RouteId, kind: RouteKind, edges: Vec<EdgeId>, trips: Vec<Trip>) -> Self {
        let size = trip_size(region, &trips);
        Self { id, kind, edges, trips, size }
    }

    pub fn is_macro(&self) -> bool {
        self.kind == RouteKind::Macro
    }

    /// Stops in travel order: the first departure, then every arrival.
    pub fn stops(&self) -> Vec<CellId> {
        stops_of(&self.trips)
    }

    /// `true` if every trip departs where the previous one arrived.
    pub fn is_chained(&self) -> bool {
        self.trips.windows(2).all(|w| w[0].to == w[1].from)
    }
}

/// Trips along `edges` starting at `start`, each oriented away from the
/// previous arrival.
pub fn orient(region: &Region, start: CellId, edges: &[EdgeId]) -> Vec<Trip> {
    let mut at = start;
    edges
        .iter()
        .map(|&edge| {
            let to = region.edge(edge).other_end(at);
            let trip = Trip { edge, from: at, to };
            at = to;
            trip
        })
        .collect()
}

pub(crate) fn stops_of(trips: &[Trip]) -> Vec<CellId> {
    let mut stops: Vec<CellId> = trips.first().map(|t| t.from).into_iter().collect();
    stops.extend(trips.iter().map(|t| t.to));
    stops
}

pub(crate) fn reversed(trips: &[Trip]) -> Vec<Trip> {
    trips.iter().rev().map(|t| t.reversed()).collect()
}

pub fn trip_size(region: &Region, trips: &[Trip]) -> f64 {
    trips
        .iter()
        .map(|t| region.weight(t.from) + region.weight(t.to))
        .sum()
}

/// Give `route` every edge of `path` that has no owner yet.
pub(crate) fn claim(region: &mut Region, path: &[EdgeId], route: RouteId) {
    for &e in path {
        let edge = region.edge_mut(e);
        if edge.route.is_none() {
            edge.route = Some(route);
        }
    }
}
