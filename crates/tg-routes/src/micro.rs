//! Steps 2 and 3: micro-routes between major stations, then stitching of
//! the edges no micro-route used.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use tg_core::{CellId, EdgeId, RouteId};
use tg_region::Region;

use crate::route::claim;
use crate::select::MajorStation;
use crate::{Route, RoutesConfig};

// ── Path search ───────────────────────────────────────────────────────────────

/// Fewest-edges path from `from` to `to` using at most `max_depth` edges.
///
/// Breadth-first over incident track edges in creation order, so ties
/// resolve the same way on every run.  Returns the edges in travel order,
/// or `None` if `to` is not reachable within the bound.
pub fn shortest_path(region: &Region, from: CellId, to: CellId, max_depth: usize) -> Option<Vec<EdgeId>> {
    if from == to {
        return Some(Vec::new());
    }

    let mut prev: FxHashMap<CellId, EdgeId> = FxHashMap::default();
    let mut queue = VecDeque::from([(from, 0usize)]);

    while let Some((cell, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for &e in region.incident(cell) {
            let next = region.edge(e).other_end(cell);
            if next == from || prev.contains_key(&next) {
                continue;
            }
            prev.insert(next, e);
            if next == to {
                return Some(trace_back(region, &prev, from, to));
            }
            queue.push_back((next, depth + 1));
        }
    }
    None
}

fn trace_back(region: &Region, prev: &FxHashMap<CellId, EdgeId>, from: CellId, to: CellId) -> Vec<EdgeId> {
    let mut path = Vec::new();
    let mut cell = to;
    while cell != from {
        let Some(&e) = prev.get(&cell) else {
            break;
        };
        path.push(e);
        cell = region.edge(e).other_end(cell);
    }
    path.reverse();
    path
}

// ── Step 2 ────────────────────────────────────────────────────────────────────

/// One route per connected pair of major stations.
///
/// Pairs are tried heaviest combined weight first, so the most important
/// corridors claim their edges before anything else.  Returns the number of
/// routes added.
pub fn micro_routes(
    region: &mut Region,
    majors: &[MajorStation],
    config: &RoutesConfig,
    routes: &mut Vec<Route>,
) -> usize {
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for i in 0..majors.len() {
        for j in 0..i {
            pairs.push((i, j));
        }
    }
    let combined = |&(i, j): &(usize, usize)| majors[i].weight + majors[j].weight;
    pairs.sort_by(|a, b| combined(b).total_cmp(&combined(a)));

    let before = routes.len();
    for (i, j) in pairs {
        let Some(path) = shortest_path(region, majors[i].id, majors[j].id, config.max_route_length) else {
            continue;
        };
        if path.is_empty() {
            continue;
        }
        for &e in &path {
            region.edge_mut(e).passed = true;
        }
        let id = RouteId(routes.len() as u32);
        claim(region, &path, id);
        routes.push(Route::from_path(region, id, majors[i].id, path));
    }
    routes.len() - before
}

// ── Step 3 ────────────────────────────────────────────────────────────────────

/// First unpassed edge incident to `cell`.
fn next_unpassed(region: &Region, cell: CellId) -> Option<EdgeId> {
    region
        .incident(cell)
        .iter()
        .copied()
        .find(|&n| !region.edge(n).passed)
}

/// Cover every unpassed track edge with a chain route.  Returns the number
/// of routes added.
///
/// A chain starts at the first unpassed edge, in creation order, and
/// grows one edge at a time: at its tail (beyond the start edge's `to`)
/// while that end has an unpassed edge, otherwise at its head.  The
/// result is a path a vehicle can run from head to tail.
pub fn stitch_leftovers(region: &mut Region, config: &RoutesConfig, routes: &mut Vec<Route>) -> usize {
    let before = routes.len();
    let tracks: Vec<EdgeId> = region.track_edges().collect();

    for start in tracks {
        if region.edge(start).passed {
            continue;
        }
        region.edge_mut(start).passed = true;
        let mut path = VecDeque::from([start]);
        let (mut head, mut tail) = {
            let e = region.edge(start);
            (e.from, e.to)
        };

        while path.len() < config.max_route_length {
            if let Some(next) = next_unpassed(region, tail) {
                region.edge_mut(next).passed = true;
                path.push_back(next);
                tail = region.edge(next).other_end(tail);
            } else if let Some(next) = next_unpassed(region, head) {
                region.edge_mut(next).passed = true;
                path.push_front(next);
                head = region.edge(next).other_end(head);
            } else {
                break;
            }
        }

        let path: Vec<EdgeId> = path.into();
        let id = RouteId(routes.len() as u32);
        claim(region, &path, id);
        routes.push(Route::from_path(region, id, head, path));
    }
    routes.len() - before
}
