//! Unit tests for tg-edges.

use std::collections::VecDeque;

use tg_core::{CellId, Sampler};
use tg_region::Region;

use crate::{build_edges, EdgesConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn grid_with_stations(n: u32, stations: &[(u32, u32)]) -> Region {
    let mut r = Region::new();
    for x in 0..n {
        for y in 0..n {
            r.put(x, y, 1.0);
        }
    }
    for &(x, y) in stations {
        r.mark_station_at(x, y).unwrap();
    }
    r
}

/// Number of stations reachable from the first station over track edges.
fn reachable(region: &Region) -> usize {
    let stations = region.stations();
    let Some(&start) = stations.first() else {
        return 0;
    };
    let mut seen = vec![start];
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        for &e in region.incident(cell) {
            let next: CellId = region.edge(e).other_end(cell);
            if !seen.contains(&next) {
                seen.push(next);
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

const SCATTERED: &[(u32, u32)] = &[
    (1, 1), (2, 7), (5, 5), (8, 2), (9, 9), (14, 3), (17, 16), (3, 18), (12, 12), (19, 0),
];

// ── Clustering ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clustering {
    use super::*;
    use crate::cluster::{agglomerate, connect_borders, singletons};

    #[test]
    fn close_pair_merges_in_phase_a() {
        let mut r = grid_with_stations(5, &[(1, 1), (1, 2)]);
        let seeds = singletons(&r);
        let (clusters, _) = agglomerate(&mut r, seeds, &EdgesConfig::default());
        assert_eq!(clusters.len(), 1);
        assert_eq!(r.edge_count(), 1);
        assert_eq!(clusters[0].center, (1.0, 1.5));
    }

    #[test]
    fn far_groups_survive_phase_a() {
        let mut r = grid_with_stations(60, &[(0, 0), (1, 0), (50, 50), (51, 50)]);
        let cfg = EdgesConfig { max_intracluster_distance: 4.0, ..EdgesConfig::default() };
        let seeds = singletons(&r);
        let (clusters, _) = agglomerate(&mut r, seeds, &cfg);
        assert_eq!(clusters.len(), 2);
        assert_eq!(r.edge_count(), 2);
    }

    #[test]
    fn phase_b_joins_far_groups_by_closest_pair() {
        let mut r = grid_with_stations(60, &[(0, 0), (1, 0), (50, 50), (51, 50)]);
        let cfg = EdgesConfig { max_intracluster_distance: 4.0, ..EdgesConfig::default() };
        let seeds = singletons(&r);
        let (clusters, _) = agglomerate(&mut r, seeds, &cfg);
        connect_borders(&mut r, clusters, &cfg, &mut Sampler::new(1));

        assert_eq!(r.edge_count(), 3);
        let bridge = r.edge(tg_core::EdgeId(2));
        let ends = [r.coords(bridge.from), r.coords(bridge.to)];
        assert!(ends.contains(&(1, 0)) && ends.contains(&(50, 50)), "{ends:?}");
    }

    #[test]
    fn each_merge_adds_one_edge() {
        let mut r = grid_with_stations(20, SCATTERED);
        let cfg = EdgesConfig::default();
        let seeds = singletons(&r);
        let (clusters, _) = agglomerate(&mut r, seeds, &cfg);
        connect_borders(&mut r, clusters, &cfg, &mut Sampler::new(1));
        assert_eq!(r.edge_count(), SCATTERED.len() - 1);
    }
}

// ── Loose stations ────────────────────────────────────────────────────────────

#[cfg(test)]
mod loose {
    use super::*;
    use crate::loose::{count_loose, reconnect_loose};

    #[test]
    fn walks_away_from_neighbour() {
        let mut r = grid_with_stations(10, &[(2, 4), (4, 4), (6, 4)]);
        let n = r.cell_at(2, 4).unwrap();
        let s = r.cell_at(4, 4).unwrap();
        let t = r.cell_at(6, 4).unwrap();
        r.add_edge(n, s);
        r.add_edge(n, t);
        assert_eq!(count_loose(&r, &r.stations()), 2);

        let added = reconnect_loose(&mut r, &EdgesConfig::default(), &mut Sampler::new(1));
        assert_eq!(added, 1);
        assert!(r.adjacent(s, t));
        assert_eq!(count_loose(&r, &r.stations()), 0);
    }

    #[test]
    fn sparse_neighbourhood_is_skipped() {
        let mut r = grid_with_stations(10, &[(2, 4), (4, 4), (6, 4)]);
        let n = r.cell_at(2, 4).unwrap();
        let s = r.cell_at(4, 4).unwrap();
        let t = r.cell_at(6, 4).unwrap();
        r.add_edge(n, s);
        r.add_edge(n, t);

        let cfg = EdgesConfig { loosestations_max_range_factor: 0.01, ..EdgesConfig::default() };
        assert_eq!(reconnect_loose(&mut r, &cfg, &mut Sampler::new(1)), 0);
    }

    #[test]
    fn dead_end_pointing_off_grid_stays_loose() {
        let mut r = grid_with_stations(10, &[(0, 0), (2, 0), (4, 0), (6, 0)]);
        let ids: Vec<_> = [(0, 0), (2, 0), (4, 0), (6, 0)]
            .iter()
            .map(|&(x, y)| r.cell_at(x, y).unwrap())
            .collect();
        r.add_edge(ids[0], ids[1]);
        r.add_edge(ids[1], ids[2]);
        r.add_edge(ids[2], ids[3]);

        let added = reconnect_loose(&mut r, &EdgesConfig::default(), &mut Sampler::new(1));
        assert_eq!(added, 0);
        assert_eq!(count_loose(&r, &r.stations()), 2);
    }
}

// ── build_edges ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn graph_is_connected() {
        let mut r = grid_with_stations(20, SCATTERED);
        let report = build_edges(&mut r, &EdgesConfig::default(), &mut Sampler::new(1));
        assert_eq!(reachable(&r), SCATTERED.len());
        assert_eq!(report.stations, SCATTERED.len());
        assert!(report.edges >= SCATTERED.len() - 1);
        assert_eq!(report.edges, r.edge_count());
    }

    #[test]
    fn loose_count_never_grows() {
        for seed in 1..20 {
            let mut r = grid_with_stations(20, SCATTERED);
            let report = build_edges(&mut r, &EdgesConfig::default(), &mut Sampler::new(seed));
            assert!(report.loose_stations_remaining <= report.loose_stations_before);
        }
    }

    #[test]
    fn deterministic() {
        let mut a = grid_with_stations(20, SCATTERED);
        let mut b = grid_with_stations(20, SCATTERED);
        let ra = build_edges(&mut a, &EdgesConfig::default(), &mut Sampler::new(9));
        let rb = build_edges(&mut b, &EdgesConfig::default(), &mut Sampler::new(9));
        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }

    #[test]
    fn no_stations_no_edges() {
        let mut r = grid_with_stations(5, &[]);
        let report = build_edges(&mut r, &EdgesConfig::default(), &mut Sampler::new(1));
        assert_eq!(report.edges, 0);
        assert_eq!(report.stations, 0);
    }

    #[test]
    fn single_station_no_edges() {
        let mut r = grid_with_stations(5, &[(2, 2)]);
        let report = build_edges(&mut r, &EdgesConfig::default(), &mut Sampler::new(1));
        assert_eq!(report.edges, 0);
        assert_eq!(reachable(&r), 1);
    }
}

// ── Post-edge stops ───────────────────────────────────────────────────────────

#[cfg(test)]
mod split {
    use super::*;
    use crate::place_stops_on_edges;
    use crate::split::cells_along;
    use tg_region::StopsConfig;

    fn config() -> StopsConfig {
        StopsConfig { stops: 10, ..StopsConfig::default() }
    }

    /// Two stations eight cells apart joined by one edge.
    fn long_edge() -> Region {
        let mut r = grid_with_stations(9, &[(0, 4), (8, 4)]);
        let stations = r.stations();
        r.add_edge(stations[0], stations[1]);
        r
    }

    #[test]
    fn cells_along_skip_endpoints() {
        let r = long_edge();
        let s = r.stations();
        let along = cells_along(&r, s[0], s[1]);
        let mut coords: Vec<_> = along.iter().map(|&id| r.coords(id)).collect();
        coords.sort();
        assert_eq!(coords, (1..8).map(|x| (x, 4)).collect::<Vec<_>>());
    }

    #[test]
    fn split_stations_keep_graph_connected() {
        let mut r = long_edge();
        let placed = place_stops_on_edges(&mut r, &config(), 3, &mut Sampler::new(1));
        assert!(placed > 0);
        assert_eq!(r.station_count(), 2 + placed);
        assert_eq!(r.track_edges().count(), 1 + placed);
        assert_eq!(reachable(&r), r.station_count());
        for s in r.stations() {
            assert!(r.degree(s) >= 1);
        }
        let ends = (r.cell_at(0, 4).unwrap(), r.cell_at(8, 4).unwrap());
        assert!(!r.adjacent(ends.0, ends.1));
    }

    #[test]
    fn new_stations_keep_their_distance() {
        let mut r = long_edge();
        let cfg = StopsConfig { min_interstop_distance: 2.0, ..config() };
        place_stops_on_edges(&mut r, &cfg, 5, &mut Sampler::new(3));
        let stations = r.stations();
        for (i, &a) in stations.iter().enumerate() {
            for &b in &stations[i + 1..] {
                assert!(r.distance2(a, b) > 4.0, "stations too close");
            }
        }
    }

    #[test]
    fn zero_target_draws_nothing() {
        let mut r = long_edge();
        let mut s = Sampler::new(1);
        assert_eq!(place_stops_on_edges(&mut r, &config(), 0, &mut s), 0);
        assert_eq!(s.counter(), 1);
        assert_eq!(r.station_count(), 2);
    }

    #[test]
    fn no_edges_places_nothing() {
        let mut r = grid_with_stations(5, &[(2, 2)]);
        assert_eq!(place_stops_on_edges(&mut r, &config(), 4, &mut Sampler::new(1)), 0);
        assert_eq!(r.station_count(), 1);
    }

    #[test]
    fn deterministic() {
        let mut a = long_edge();
        let mut b = long_edge();
        let pa = place_stops_on_edges(&mut a, &config(), 3, &mut Sampler::new(5));
        let pb = place_stops_on_edges(&mut b, &config(), 3, &mut Sampler::new(5));
        assert_eq!(pa, pb);
        assert_eq!(a, b);
    }
}
