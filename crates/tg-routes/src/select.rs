//! Step 1: pick the major stations routes are built between.

use tg_core::CellId;
use tg_region::Region;

use crate::RoutesConfig;

/// A station and its weight after local-maximum suppression.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MajorStation {
    pub id: CellId,
    pub weight: f64,
}

/// Stations whose weight survives suppression, heaviest first, truncated to
/// `ceil(len · largest_stations_fraction)`.
///
/// A station's weight drops to 0 when a strictly heavier station lies within
/// `penalize_station_size_area`, so only local maxima compete for the top
/// slots.  Suppression compares against the unpenalised region weights.
pub fn major_stations(region: &Region, config: &RoutesConfig) -> Vec<MajorStation> {
    let mut stations: Vec<MajorStation> = region
        .stations()
        .into_iter()
        .map(|id| {
            let own = region.weight(id);
            let (x, y) = region.coords(id);
            let dominated = region
                .points_in_radius(x as i64, y as i64, config.penalize_station_size_area, 0.0, true)
                .into_iter()
                .any(|other| region.weight(other) > own);
            MajorStation { id, weight: if dominated { 0.0 } else { own } }
        })
        .collect();

    stations.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    let keep = (stations.len() as f64 * config.largest_stations_fraction).ceil() as usize;
    stations.truncate(keep);
    stations
}
