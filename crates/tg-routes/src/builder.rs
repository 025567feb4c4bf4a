use tg_core::{Sampler, Shortfall};
use tg_region::Region;

use crate::merge::merge_short_routes;
use crate::micro::{micro_routes, stitch_leftovers};
use crate::select::major_stations;
use crate::walk::macro_routes;
use crate::{Route, RoutesConfig};

/// What the Route Builder did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteReport {
    pub major_stations: usize,
    pub micro_routes: usize,
    pub stitched_routes: usize,
    /// Short routes dissolved into a neighbour.
    pub merged_routes: usize,
    /// Short routes no neighbour could absorb.
    pub unmergeable_routes: usize,
    pub macro_routes: usize,
    pub shortfall: Option<Shortfall>,
}

/// Build routes over the track edges of `region`.
///
/// On return `routes[i].id == RouteId(i)` and every track edge has an owner.
pub fn build_routes(
    region: &mut Region,
    config: &RoutesConfig,
    sampler: &mut Sampler,
) -> (Vec<Route>, RouteReport) {
    let mut report = RouteReport::default();
    let mut routes: Vec<Route> = Vec::new();

    // ── Step 1: major stations ────────────────────────────────────────────
    let majors = major_stations(region, config);
    report.major_stations = majors.len();

    // ── Steps 2 and 3: micro-routes, stitching ────────────────────────────
    report.micro_routes = micro_routes(region, &majors, config, &mut routes);
    report.stitched_routes = stitch_leftovers(region, config, &mut routes);
    log::debug!(
        "routes: {} micro-routes between {} major stations, {} stitched",
        report.micro_routes,
        report.major_stations,
        report.stitched_routes
    );

    // ── Step 4: merge short routes ────────────────────────────────────────
    let (mut routes, merged) = merge_short_routes(region, routes, config);
    report.merged_routes = merged.dissolved;
    report.unmergeable_routes = merged.unmergeable;
    if merged.unmergeable > 0 {
        log::warn!(
            "routes: {} routes shorter than {} edges have no neighbour to merge into",
            merged.unmergeable,
            config.min_route_length
        );
    }

    // ── Step 5: macro-routes ──────────────────────────────────────────────
    let (added, shortfall) = macro_routes(region, config, &mut routes, sampler);
    report.macro_routes = added;
    report.shortfall = shortfall;

    log::info!(
        "routes: {} routes ({} micro, {} stitched, {} merged away, {} macro)",
        routes.len(),
        report.micro_routes,
        report.stitched_routes,
        report.merged_routes,
        report.macro_routes
    );
    (routes, report)
}
