//! Unit tests for tg-routes.

use tg_core::{CellId, EdgeId, RouteId, Sampler};
use tg_region::Region;

use crate::RoutesConfig;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Stations on `y = 0` at `x = 0..weights.len()`, chained by edges.
fn line(weights: &[f64]) -> (Region, Vec<CellId>, Vec<EdgeId>) {
    let mut r = Region::new();
    let cells: Vec<CellId> = weights
        .iter()
        .enumerate()
        .map(|(x, &w)| {
            let id = r.put(x as u32, 0, w);
            r.mark_station(id);
            id
        })
        .collect();
    let edges = cells.windows(2).map(|p| r.add_edge(p[0], p[1])).collect();
    (r, cells, edges)
}

/// 4 × 4 lattice of stations at even coordinates of a 10 × 10 grid, each
/// joined to its right and lower neighbour.
fn lattice() -> Region {
    let mut r = Region::new();
    for x in 0..10u32 {
        for y in 0..10u32 {
            r.put(x, y, ((x * 7 + y * 3) % 10) as f64 + 1.0);
        }
    }
    for i in 0..4 {
        for j in 0..4 {
            r.mark_station_at(2 * i, 2 * j).unwrap();
        }
    }
    for i in 0..4 {
        for j in 0..4 {
            let here = r.cell_at(2 * i, 2 * j).unwrap();
            if i < 3 {
                let right = r.cell_at(2 * i + 2, 2 * j).unwrap();
                r.add_edge(here, right);
            }
            if j < 3 {
                let down = r.cell_at(2 * i, 2 * j + 2).unwrap();
                r.add_edge(here, down);
            }
        }
    }
    r
}

fn config(routes: usize, min: usize, max: usize) -> RoutesConfig {
    RoutesConfig {
        routes,
        min_route_length: min,
        max_route_length: max,
        ..RoutesConfig::default()
    }
}

// ── Step 1 ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod select {
    use super::*;
    use crate::select::major_stations;

    fn region() -> Region {
        let mut r = Region::new();
        for (x, w) in [(0, 5.0), (1, 3.0), (8, 4.0)] {
            let id = r.put(x, 0, w);
            r.mark_station(id);
        }
        r
    }

    #[test]
    fn lighter_neighbour_is_suppressed() {
        let r = region();
        let cfg = RoutesConfig { largest_stations_fraction: 1.0, penalize_station_size_area: 2.0, ..RoutesConfig::default() };
        let majors = major_stations(&r, &cfg);
        let got: Vec<_> = majors.iter().map(|m| (r.coords(m.id), m.weight)).collect();
        assert_eq!(got, vec![((0, 0), 5.0), ((8, 0), 4.0), ((1, 0), 0.0)]);
    }

    #[test]
    fn fraction_rounds_up() {
        let r = region();
        let cfg = RoutesConfig { largest_stations_fraction: 0.5, penalize_station_size_area: 2.0, ..RoutesConfig::default() };
        assert_eq!(major_stations(&r, &cfg).len(), 2);
    }
}

// ── Steps 2 and 3 ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod micro {
    use super::*;
    use crate::micro::{micro_routes, shortest_path, stitch_leftovers};
    use crate::select::MajorStation;

    #[test]
    fn path_along_line() {
        let (r, c, e) = line(&[1.0; 6]);
        assert_eq!(shortest_path(&r, c[0], c[3], 10), Some(vec![e[0], e[1], e[2]]));
        assert_eq!(shortest_path(&r, c[3], c[0], 10), Some(vec![e[2], e[1], e[0]]));
    }

    #[test]
    fn path_respects_depth_bound() {
        let (r, c, _) = line(&[1.0; 6]);
        assert!(shortest_path(&r, c[0], c[3], 2).is_none());
        assert!(shortest_path(&r, c[0], c[3], 3).is_some());
    }

    #[test]
    fn path_takes_fewest_edges() {
        let (mut r, c, e) = line(&[1.0; 6]);
        let shortcut = r.add_edge(c[0], c[3]);
        assert_eq!(shortest_path(&r, c[0], c[4], 10), Some(vec![shortcut, e[3]]));
    }

    #[test]
    fn first_route_owns_shared_edges() {
        let (mut r, c, e) = line(&[5.0, 1.0, 4.0, 1.0, 3.0]);
        let majors = [
            MajorStation { id: c[0], weight: 5.0 },
            MajorStation { id: c[2], weight: 4.0 },
            MajorStation { id: c[4], weight: 3.0 },
        ];
        let mut routes = Vec::new();
        let added = micro_routes(&mut r, &majors, &config(0, 1, 10), &mut routes);
        assert_eq!(added, 3);

        // heaviest pair first: (c0, c2), then (c0, c4), then (c2, c4)
        assert_eq!(routes[0].edges, vec![e[1], e[0]]);
        assert_eq!(routes[1].edges.len(), 4);
        assert_eq!(r.edge(e[0]).route, Some(RouteId(0)));
        assert_eq!(r.edge(e[2]).route, Some(RouteId(1)));
        assert!(e.iter().all(|&id| r.edge(id).passed));
    }

    #[test]
    fn stitching_covers_line_in_bounded_chains() {
        let (mut r, _, e) = line(&[1.0; 6]);
        let mut routes = Vec::new();
        let added = stitch_leftovers(&mut r, &config(0, 1, 2), &mut routes);
        assert_eq!(added, 3);
        assert_eq!(routes[0].edges, vec![e[0], e[1]]);
        assert_eq!(routes[1].edges, vec![e[2], e[3]]);
        assert_eq!(routes[2].edges, vec![e[4]]);
        assert_eq!(r.edge(e[4]).route, Some(RouteId(2)));
    }

    #[test]
    fn stitching_grows_at_head_when_tail_is_spent() {
        // Edges created out of line order: c1–c2 first, then c0–c1.
        let mut r = Region::new();
        let c: Vec<CellId> = (0..3)
            .map(|x| {
                let id = r.put(x, 0, 1.0);
                r.mark_station(id);
                id
            })
            .collect();
        let first = r.add_edge(c[1], c[2]);
        let second = r.add_edge(c[0], c[1]);

        let mut routes = Vec::new();
        stitch_leftovers(&mut r, &config(0, 1, 10), &mut routes);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].edges, vec![second, first]);
        assert_eq!(routes[0].stops(), vec![c[0], c[1], c[2]]);
        assert!(routes[0].is_chained());
    }

    #[test]
    fn micro_route_runs_from_first_station() {
        let (mut r, c, _) = line(&[5.0, 1.0, 4.0]);
        let majors = [
            MajorStation { id: c[2], weight: 4.0 },
            MajorStation { id: c[0], weight: 5.0 },
        ];
        let mut routes = Vec::new();
        micro_routes(&mut r, &majors, &config(0, 1, 10), &mut routes);
        // pair (1, 0): from c0 to c2
        assert_eq!(routes[0].stops(), vec![c[0], c[1], c[2]]);
        assert!(routes[0].is_chained());
    }

    #[test]
    fn stitching_skips_passed_edges() {
        let (mut r, _, e) = line(&[1.0; 4]);
        r.edge_mut(e[1]).passed = true;
        let mut routes = Vec::new();
        stitch_leftovers(&mut r, &config(0, 1, 10), &mut routes);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].edges, vec![e[0]]);
        assert_eq!(routes[1].edges, vec![e[2]]);
    }
}

// ── Step 4 ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod merge {
    use super::*;
    use crate::merge::merge_short_routes;
    use crate::micro::stitch_leftovers;

    #[test]
    fn short_routes_cascade_into_first() {
        let (mut r, c, e) = line(&[1.0; 6]);
        let mut routes = Vec::new();
        stitch_leftovers(&mut r, &config(0, 4, 2), &mut routes);
        assert_eq!(routes.len(), 3);

        let (routes, outcome) = merge_short_routes(&mut r, routes, &config(0, 4, 2));
        assert_eq!(outcome.dissolved, 2);
        assert_eq!(outcome.unmergeable, 0);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].id, RouteId(0));
        assert_eq!(routes[0].edges, vec![e[0], e[1], e[2], e[3], e[4]]);
        let trip_edges: Vec<EdgeId> = routes[0].trips.iter().map(|t| t.edge).collect();
        assert_eq!(trip_edges, routes[0].edges);
        assert_eq!(routes[0].stops(), c);
        assert!(e.iter().all(|&id| r.edge(id).route == Some(RouteId(0))));
    }

    #[test]
    fn renumbers_after_removal() {
        let (mut r, _, e) = line(&[1.0; 6]);
        let mut routes = Vec::new();
        stitch_leftovers(&mut r, &config(0, 2, 2), &mut routes);
        let (routes, outcome) = merge_short_routes(&mut r, routes, &config(0, 2, 2));
        assert_eq!(outcome.dissolved, 1);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].id, RouteId(1));
        assert_eq!(routes[1].edges, vec![e[2], e[3], e[4]]);
        assert_eq!(r.edge(e[4]).route, Some(RouteId(1)));
    }

    #[test]
    fn spur_is_served_out_and_back() {
        let (mut r, c, e) = line(&[1.0; 5]);
        let spur_end = r.put(2, 3, 1.0);
        r.mark_station(spur_end);
        let spur = r.add_edge(c[2], spur_end);

        let mut routes = Vec::new();
        stitch_leftovers(&mut r, &config(0, 2, 10), &mut routes);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].edges, vec![spur]);

        let (routes, outcome) = merge_short_routes(&mut r, routes, &config(0, 2, 10));
        assert_eq!(outcome.dissolved, 1);
        assert_eq!(routes.len(), 1);
        let route = &routes[0];
        assert_eq!(route.edges, vec![e[0], e[1], e[2], e[3], spur]);
        assert_eq!(
            route.stops(),
            vec![c[0], c[1], c[2], spur_end, c[2], c[3], c[4]]
        );
        assert!(route.is_chained());
        assert_eq!(route.size, 12.0);
        assert_eq!(r.edge(spur).route, Some(RouteId(0)));
    }

    #[test]
    fn branch_at_route_end_is_served_one_way() {
        let (mut r, c, e) = line(&[1.0; 4]);
        let mut routes = Vec::new();
        stitch_leftovers(&mut r, &config(0, 2, 2), &mut routes);
        let (routes, _) = merge_short_routes(&mut r, routes, &config(0, 2, 2));
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].edges, vec![e[0], e[1], e[2]]);
        assert_eq!(routes[0].stops(), c);
    }

    #[test]
    fn isolated_short_route_is_unmergeable() {
        let (mut r, _, _) = line(&[1.0, 2.0]);
        let mut routes = Vec::new();
        stitch_leftovers(&mut r, &config(0, 4, 10), &mut routes);
        let (routes, outcome) = merge_short_routes(&mut r, routes, &config(0, 4, 10));
        assert_eq!(routes.len(), 1);
        assert_eq!(outcome.unmergeable, 1);
        assert_eq!(routes[0].size, 3.0);
    }
}

// ── Step 5 ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod walk {
    use super::*;
    use crate::walk::greedy_walk;

    #[test]
    fn walk_reaches_target_on_lattice() {
        let r = lattice();
        let a = r.cell_at(0, 0).unwrap();
        let b = r.cell_at(6, 6).unwrap();
        let (stops, edges) = greedy_walk(&r, a, b);
        assert_eq!(stops.first(), Some(&a));
        assert_eq!(stops.last(), Some(&b));
        assert_eq!(edges.len(), 6);
        assert_eq!(stops.len(), 7);
    }

    #[test]
    fn walk_heads_toward_target() {
        let (r, c, e) = line(&[1.0; 4]);
        let (stops, edges) = greedy_walk(&r, c[1], c[3]);
        assert_eq!(stops, vec![c[1], c[2], c[3]]);
        assert_eq!(edges, vec![e[1], e[2]]);
    }

    #[test]
    fn walk_stops_at_dead_end() {
        let (mut r, c, e) = line(&[1.0; 4]);
        let unreachable = r.put(0, 5, 1.0);
        r.mark_station(unreachable);
        let (stops, edges) = greedy_walk(&r, c[1], unreachable);
        assert_eq!(stops, vec![c[1], c[0]]);
        assert_eq!(edges, vec![e[0]]);
    }

    #[test]
    fn walk_to_self_is_trivial() {
        let (r, c, _) = line(&[1.0; 4]);
        let (stops, edges) = greedy_walk(&r, c[2], c[2]);
        assert_eq!(stops, vec![c[2]]);
        assert!(edges.is_empty());
    }
}

// ── build_routes ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use crate::build_routes;
    use tg_region::EdgeKind;

    #[test]
    fn every_track_edge_has_one_live_owner() {
        let mut r = lattice();
        let (routes, _) = build_routes(&mut r, &config(0, 4, 10), &mut Sampler::new(1));
        for e in r.track_edges() {
            let owner = r.edge(e).route.expect("unowned edge");
            assert!(owner.index() < routes.len());
        }
        for (i, route) in routes.iter().enumerate() {
            assert_eq!(route.id, RouteId(i as u32));
        }
    }

    #[test]
    fn short_routes_are_only_unmergeable_ones() {
        let mut r = lattice();
        let cfg = config(0, 4, 10);
        let (routes, report) = build_routes(&mut r, &cfg, &mut Sampler::new(1));
        let short = routes.iter().filter(|rt| rt.edges.len() < cfg.min_route_length).count();
        assert_eq!(short, report.unmergeable_routes);
        assert_eq!(report.macro_routes, 0);
        assert!(report.shortfall.is_none());
    }

    #[test]
    fn macro_routes_fill_target_with_hops() {
        let mut r = lattice();
        let base = build_routes(&mut lattice(), &config(0, 2, 5), &mut Sampler::new(1)).0.len();
        let cfg = RoutesConfig { max_attempts: 1_000, ..config(base + 3, 2, 5) };
        let (routes, report) = build_routes(&mut r, &cfg, &mut Sampler::new(1));

        assert_eq!(report.macro_routes, 3);
        assert_eq!(routes.len(), base + 3);
        assert!(report.shortfall.is_none());

        for route in &routes[base..] {
            assert!(!route.trips.is_empty());
            assert!(route.is_macro());
            for t in &route.trips {
                let hop = r.edge(t.edge);
                assert_eq!(hop.kind, EdgeKind::Hop);
                assert_eq!(hop.route, Some(route.id));
                assert_eq!((hop.from, hop.to), (t.from, t.to));
                assert!(!r.incident(hop.from).contains(&t.edge));
            }
        }
    }

    #[test]
    fn every_route_is_one_vehicle_run() {
        for (min, max) in [(4, 10), (2, 5), (3, 3), (6, 8)] {
            let mut r = lattice();
            let cfg = RoutesConfig { max_attempts: 1_000, ..config(40, min, max) };
            let (routes, _) = build_routes(&mut r, &cfg, &mut Sampler::new(2));
            for route in &routes {
                assert!(route.is_chained(), "{} breaks its run: {:?}", route.id, route.trips);
                for t in &route.trips {
                    assert!(r.edge(t.edge).touches(t.from));
                    assert_eq!(r.edge(t.edge).other_end(t.from), t.to);
                }
                if !route.is_macro() {
                    for e in &route.edges {
                        assert!(route.trips.iter().any(|t| t.edge == *e));
                    }
                }
            }
        }
    }

    #[test]
    fn attempt_cap_yields_shortfall() {
        let mut r = lattice();
        let cfg = RoutesConfig { max_attempts: 0, ..config(10_000, 2, 5) };
        let (_, report) = build_routes(&mut r, &cfg, &mut Sampler::new(1));
        let shortfall = report.shortfall.unwrap();
        assert_eq!(shortfall.produced, 0);
        assert!(shortfall.requested > 0);
    }

    #[test]
    fn deterministic() {
        let mut a = lattice();
        let mut b = lattice();
        let cfg = RoutesConfig { max_attempts: 1_000, ..config(40, 3, 6) };
        let ra = build_routes(&mut a, &cfg, &mut Sampler::new(4));
        let rb = build_routes(&mut b, &cfg, &mut Sampler::new(4));
        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }
}
