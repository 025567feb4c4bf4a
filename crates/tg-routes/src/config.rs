use serde::Deserialize;

/// Route Builder parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Target total route count; macro-routes fill the gap.
    pub routes: usize,
    /// Fraction of (penalised, weight-sorted) stations treated as major.
    pub largest_stations_fraction: f64,
    /// Radius within which a heavier station suppresses a lighter one.
    pub penalize_station_size_area: f64,
    /// Depth bound for path search and stitching, in edges.
    pub max_route_length: usize,
    /// Routes with fewer edges are merged into a neighbour.
    pub min_route_length: usize,
    /// Cap on macro-route walk attempts.
    pub max_attempts: usize,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            routes:                     4500,
            largest_stations_fraction:  0.05,
            penalize_station_size_area: 10.0,
            max_route_length:           10,
            min_route_length:           4,
            max_attempts:               100_000,
        }
    }
}
