//! Step 5: macro-routes from greedy directional walks.

use tg_core::{CellId, EdgeId, RouteId, Sampler, Shortfall, Stage};
use tg_region::Region;

use crate::route::{RouteKind, Trip};
use crate::{Route, RoutesConfig};

/// Walk from `from` toward `to`, always taking the incident edge whose far
/// end is closest to `to` (squared distance, first minimum wins).  Edges and
/// stops are never revisited.  Stops at `to` or at a dead end.
///
/// Returns the visited stops (starting with `from`) and the walked edges.
pub fn greedy_walk(region: &Region, from: CellId, to: CellId) -> (Vec<CellId>, Vec<EdgeId>) {
    let mut stops = vec![from];
    let mut edges: Vec<EdgeId> = Vec::new();
    let mut current = from;

    while current != to {
        let mut best: Option<(EdgeId, CellId, f64)> = None;
        for &e in region.incident(current) {
            if edges.contains(&e) {
                continue;
            }
            let far = region.edge(e).other_end(current);
            if stops.contains(&far) {
                continue;
            }
            let d = region.distance2(far, to);
            if best.is_none_or(|(_, _, bd)| d < bd) {
                best = Some((e, far, d));
            }
        }
        let Some((e, far, _)) = best else {
            break;
        };
        edges.push(e);
        stops.push(far);
        current = far;
    }
    (stops, edges)
}

/// Add macro-routes until `routes.len()` reaches the target or the attempt
/// cap runs out.
///
/// Each attempt draws two stations uniformly, walks between them, then
/// keeps the `k` heaviest visited stops (in walk order) with
/// `k = min(len, floor(min + (max − min) · u))`.  Attempts keeping fewer than
/// `max(2, min_route_length)` stops are discarded.  Consecutive kept stops
/// become hop edges owned by the new route.
pub fn macro_routes(
    region: &mut Region,
    config: &RoutesConfig,
    routes: &mut Vec<Route>,
    sampler: &mut Sampler,
) -> (usize, Option<Shortfall>) {
    let stations = region.stations();
    let requested = config.routes.saturating_sub(routes.len());
    if requested == 0 {
        return (0, None);
    }

    let min_len = config.min_route_length as f64;
    let max_len = config.max_route_length as f64;
    let needed = config.min_route_length.max(2);
    let mut added = 0;
    let mut attempts = 0;

    while routes.len() < config.routes && attempts < config.max_attempts && !stations.is_empty() {
        attempts += 1;
        let (Some(&a), Some(&b)) = (sampler.choose(&stations), sampler.choose(&stations)) else {
            break;
        };

        let (visited, walked) = greedy_walk(region, a, b);

        let mut by_weight = visited.clone();
        by_weight.sort_by(|&p, &q| region.weight(q).total_cmp(&region.weight(p)));
        let take = ((min_len + (max_len - min_len) * sampler.next_uniform()).floor() as usize)
            .min(by_weight.len());
        if take < needed {
            continue;
        }
        by_weight.truncate(take);
        let kept: Vec<CellId> = visited.into_iter().filter(|s| by_weight.contains(s)).collect();

        let id = RouteId(routes.len() as u32);
        let hops: Vec<Trip> = kept
            .windows(2)
            .map(|pair| {
                let edge = region.add_hop(pair[0], pair[1]);
                region.edge_mut(edge).route = Some(id);
                Trip { edge, from: pair[0], to: pair[1] }
            })
            .collect();
        routes.push(Route::new(region, id, RouteKind::Macro, walked, hops));
        added += 1;
    }

    let shortfall = (routes.len() < config.routes).then(|| {
        log::warn!(
            "routes: {added} of {requested} macro-routes after {attempts} attempts"
        );
        Shortfall { stage: Stage::Routes, requested, produced: added }
    });
    (added, shortfall)
}
