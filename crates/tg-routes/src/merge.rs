//! Step 4: dissolve routes shorter than `min_route_length` into a touching
//! route, then compact and renumber.

use tg_core::{EdgeId, RouteId};
use tg_region::Region;

use crate::route::{reversed, stops_of, trip_size, Trip};
use crate::{Route, RoutesConfig};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub dissolved: usize,
    /// Short routes left standing because no other route touches them.
    pub unmergeable: usize,
}

/// A live route, other than `own`, owning an edge incident to any endpoint
/// of `route`'s edges.
fn neighbour_route(region: &Region, route: &Route, own: RouteId, live: &[Option<Route>]) -> Option<RouteId> {
    for &e in &route.edges {
        let edge = region.edge(e);
        for end in [edge.from, edge.to] {
            for &n in region.incident(end) {
                if let Some(r) = region.edge(n).route {
                    if r != own && live.get(r.index()).is_some_and(Option::is_some) {
                        return Some(r);
                    }
                }
            }
        }
    }
    None
}

/// Splice the run `branch` into the run `main` at their first shared stop.
///
/// The junction splits `branch` into at most two arms leading away from
/// it; each arm is served out and back.  An arm at the very end of `main`
/// is served one way only.  Runs with no stop in common are concatenated.
fn splice(main: &[Trip], branch: &[Trip]) -> Vec<Trip> {
    let main_stops = stops_of(main);
    let junction = stops_of(branch)
        .iter()
        .enumerate()
        .find_map(|(k, s)| main_stops.iter().position(|m| m == s).map(|i| (k, i)));
    let Some((k, i)) = junction else {
        return main.iter().chain(branch).copied().collect();
    };

    let arms: Vec<Vec<Trip>> = [branch[k..].to_vec(), reversed(&branch[..k])]
        .into_iter()
        .filter(|arm| !arm.is_empty())
        .collect();
    let at_end = i == main.len();

    let mut out = main[..i].to_vec();
    for (n, arm) in arms.iter().enumerate() {
        out.extend_from_slice(arm);
        if !(at_end && n + 1 == arms.len()) {
            out.extend(reversed(arm));
        }
    }
    out.extend_from_slice(&main[i..]);
    out
}

/// Merge short routes, scanning from the last route to the first.
///
/// Expects `routes[i].id == RouteId(i)`.  The returned list is compacted
/// and renumbered so that still holds; `Edge::route` is rewritten to the
/// new ids.  An absorbing route keeps one vehicle run: the dissolved
/// route's trips are spliced in where the two meet.
pub fn merge_short_routes(
    region: &mut Region,
    routes: Vec<Route>,
    config: &RoutesConfig,
) -> (Vec<Route>, MergeOutcome) {
    let mut live: Vec<Option<Route>> = routes.into_iter().map(Some).collect();
    let mut outcome = MergeOutcome::default();

    for i in (0..live.len()).rev() {
        let own = RouteId(i as u32);
        let target = match &live[i] {
            Some(r) if r.edges.len() < config.min_route_length => neighbour_route(region, r, own, &live),
            _ => continue,
        };
        let Some(target) = target else {
            continue;
        };
        let Some(dissolved) = live[i].take() else {
            continue;
        };

        for &e in &dissolved.edges {
            let edge = region.edge_mut(e);
            if edge.route == Some(own) {
                edge.route = Some(target);
            }
        }
        if let Some(absorber) = live[target.index()].as_mut() {
            for &e in &dissolved.edges {
                if !absorber.edges.contains(&e) {
                    absorber.edges.push(e);
                }
            }
            absorber.trips = splice(&absorber.trips, &dissolved.trips);
            absorber.size = trip_size(region, &absorber.trips);
        }
        outcome.dissolved += 1;
    }

    // ── Compact and renumber ──────────────────────────────────────────────
    let mut remap: Vec<Option<RouteId>> = vec![None; live.len()];
    let mut out: Vec<Route> = Vec::with_capacity(live.len() - outcome.dissolved);
    for (old, slot) in live.into_iter().enumerate() {
        if let Some(mut route) = slot {
            let id = RouteId(out.len() as u32);
            remap[old] = Some(id);
            route.id = id;
            out.push(route);
        }
    }
    for i in 0..region.edge_count() {
        let edge = region.edge_mut(EdgeId(i as u32));
        if let Some(old) = edge.route {
            edge.route = remap.get(old.index()).copied().flatten();
        }
    }

    outcome.unmergeable = out
        .iter()
        .filter(|r| r.edges.len() < config.min_route_length)
        .count();
    (out, outcome)
}
