//! Post-edge stop placement: new stations on long edges.
//!
//! Runs after Phase C.  Every accepted stop C splits an edge A–B into A–C
//! and C–B, so the graph stays connected and C never starts out loose.

use tg_core::{CellId, EdgeId, Sampler};
use tg_region::{Region, StopsConfig};

fn sort_heaviest_first(region: &Region, cells: &mut [CellId]) {
    cells.sort_by(|&p, &q| region.weight(q).total_cmp(&region.weight(p)));
}

/// Cells strictly between `a` and `b` on the straight segment, one per step
/// along the longer axis, heaviest first.
pub(crate) fn cells_along(region: &Region, a: CellId, b: CellId) -> Vec<CellId> {
    let (ax, ay) = region.coords(a);
    let (bx, by) = region.coords(b);
    let dx = bx as f64 - ax as f64;
    let dy = by as f64 - ay as f64;
    let steps = dx.abs().max(dy.abs()) as usize;

    let mut cells: Vec<CellId> = Vec::new();
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let x = (ax as f64 + dx * t).round() as u32;
        let y = (ay as f64 + dy * t).round() as u32;
        if let Some(id) = region.cell_at(x, y) {
            if id != a && id != b && !cells.contains(&id) {
                cells.push(id);
            }
        }
    }
    sort_heaviest_first(region, &mut cells);
    cells
}

/// Insert `edge` into `by_length` (longest first) after its equals.
fn insert_by_length(region: &Region, by_length: &mut Vec<EdgeId>, edge: EdgeId) {
    let length = region.edge(edge).length;
    let at = by_length.partition_point(|&e| region.edge(e).length >= length);
    by_length.insert(at, edge);
}

/// Place up to `target` stations on the track edges of `region`.  Returns
/// the number placed.
///
/// Each attempt draws an edge biased toward long ones, a cell along it
/// biased toward heavy ones, then a cell within `stop_around_edge_radius`
/// of that point, again biased toward heavy ones.  The candidate is
/// rejected if it is a station or has one within `min_interstop_distance`.
/// At most `3 · stops` attempts are made.
pub fn place_stops_on_edges(
    region: &mut Region,
    config: &StopsConfig,
    target: usize,
    sampler: &mut Sampler,
) -> usize {
    if target == 0 {
        return 0;
    }

    let mut by_length: Vec<EdgeId> = region.track_edges().collect();
    by_length.sort_by(|&a, &b| region.edge(b).length.total_cmp(&region.edge(a).length));

    let max_attempts = config.stops.saturating_mul(3);
    let mut placed = 0;
    let mut attempts = 0;
    while placed < target && attempts < max_attempts {
        attempts += 1;
        let Some(&edge) = sampler.biased_choice(&by_length, config.edge_choice_power) else {
            break;
        };
        let (a, b) = {
            let e = region.edge(edge);
            (e.from, e.to)
        };

        let along = cells_along(region, a, b);
        let Some(&point) = sampler.biased_choice(&along, config.edge_choice_power) else {
            continue;
        };
        let (px, py) = region.coords(point);
        let mut around = region.points_in_radius(
            px as i64,
            py as i64,
            config.stop_around_edge_radius,
            f64::NEG_INFINITY,
            false,
        );
        sort_heaviest_first(region, &mut around);
        let Some(&stop) = sampler.biased_choice(&around, config.stop_around_edge_choice_power) else {
            continue;
        };
        if region.is_station(stop) || region.has_station_near(stop, config.min_interstop_distance) {
            continue;
        }

        region.mark_station(stop);
        let added = region.split_edge(edge, stop);
        by_length.retain(|&e| e != edge);
        insert_by_length(region, &mut by_length, edge);
        insert_by_length(region, &mut by_length, added);
        placed += 1;
    }

    if placed < target {
        log::warn!("edges: placed {placed} of {target} post-edge stops after {attempts} attempts");
    }
    log::info!("edges: {placed} stops placed by splitting edges");
    placed
}
