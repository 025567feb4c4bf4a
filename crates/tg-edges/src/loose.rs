//! Phase C: reconnect loose stations.
//!
//! A loose station has exactly one incident edge.  Its neighbourhood is the
//! station plus its K nearest other stations; the average distance from
//! each member to its own nearest station sets the scale of the search.
//! The walk starts at the station and steps along the unit vector pointing
//! away from its single neighbour, probing a disk at each step.
//!
//! Nearest-station queries go through an R-tree (via `rstar`) over all
//! station positions.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use tg_core::{CellId, Sampler};
use tg_region::Region;

use crate::EdgesConfig;

// ── R-tree station entry ──────────────────────────────────────────────────────

#[derive(Clone)]
struct StationEntry {
    point: [f64; 2], // [x, y]
    id: CellId,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

struct StationIndex {
    tree: RTree<StationEntry>,
}

impl StationIndex {
    fn build(region: &Region, stations: &[CellId]) -> Self {
        let entries = stations
            .iter()
            .map(|&id| {
                let (x, y) = region.coords(id);
                StationEntry { point: [x as f64, y as f64], id }
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Up to `k` nearest stations to `id`, excluding `id`, closest first.
    fn k_nearest(&self, region: &Region, id: CellId, k: usize) -> Vec<CellId> {
        let (x, y) = region.coords(id);
        self.tree
            .nearest_neighbor_iter(&[x as f64, y as f64])
            .filter(|e| e.id != id)
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    /// Euclidean distance from `id` to its nearest other station.
    fn nearest_distance(&self, region: &Region, id: CellId) -> Option<f64> {
        let (x, y) = region.coords(id);
        let query = [x as f64, y as f64];
        self.tree
            .nearest_neighbor_iter(&query)
            .find(|e| e.id != id)
            .map(|e| e.distance_2(&query).sqrt())
    }
}

// ── Reconnection ──────────────────────────────────────────────────────────────

/// Number of stations with exactly one incident edge.
pub fn count_loose(region: &Region, stations: &[CellId]) -> usize {
    stations.iter().filter(|&&id| region.degree(id) == 1).count()
}

/// Try to give every loose station a second edge.  Returns the number of
/// edges added.
pub fn reconnect_loose(region: &mut Region, config: &EdgesConfig, sampler: &mut Sampler) -> usize {
    let stations = region.stations();
    if stations.len() < 3 {
        return 0;
    }
    let index = StationIndex::build(region, &stations);
    let max_range = region.diagonal() * config.loosestations_max_range_factor;
    let mut added = 0;

    for &station in &stations {
        if region.degree(station) != 1 {
            continue;
        }

        let mut neighbourhood = vec![station];
        neighbourhood.extend(index.k_nearest(region, station, config.loosestations_neighbourcount));
        let spacing: f64 = neighbourhood
            .iter()
            .filter_map(|&id| index.nearest_distance(region, id))
            .sum::<f64>()
            / neighbourhood.len() as f64;

        if spacing <= 0.0 || spacing > max_range {
            continue;
        }

        let anchor = region.edge(region.incident(station)[0]).other_end(station);
        let (sx, sy) = region.coords(station);
        let (ax, ay) = region.coords(anchor);
        let (dx, dy) = (sx as f64 - ax as f64, sy as f64 - ay as f64);
        let norm = dx.hypot(dy);
        if norm == 0.0 {
            continue;
        }
        let (ux, uy) = (dx / norm, dy / norm);
        let radius = spacing * config.loosestations_search_radius_factor;

        for step in 1..=config.loosestations_max_iterations {
            let cx = sx as f64 + ux * radius * step as f64;
            let cy = sy as f64 + uy * radius * step as f64;
            let candidates: Vec<CellId> = region
                .stations_in_disk(cx, cy, radius)
                .into_iter()
                .filter(|&c| c != station && !region.adjacent(station, c))
                .collect();
            if candidates.is_empty() {
                continue;
            }
            if let Some(&target) = sampler.choose(&candidates) {
                region.add_edge(station, target);
                added += 1;
                break;
            }
        }
    }
    added
}
