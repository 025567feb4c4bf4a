use tg_core::Sampler;
use tg_region::Region;

use crate::cluster::{agglomerate, connect_borders, singletons};
use crate::loose::{count_loose, reconnect_loose};
use crate::EdgesConfig;

/// What the Edge Builder did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeReport {
    pub stations: usize,
    pub edges: usize,
    pub phase_a_rounds: usize,
    /// Clusters left after Phase A.
    pub clusters_after_agglomeration: usize,
    pub phase_b_rounds: usize,
    /// Degree-1 stations before Phase C.
    pub loose_stations_before: usize,
    /// Degree-1 stations Phase C could not reconnect.
    pub loose_stations_remaining: usize,
}

/// Connect all stations of `region` with track edges.
///
/// Never fails: a station left with one edge is counted in the report and
/// logged, not treated as an error.
pub fn build_edges(region: &mut Region, config: &EdgesConfig, sampler: &mut Sampler) -> EdgeReport {
    let start_edges = region.edge_count();
    let clusters = singletons(region);
    let mut report = EdgeReport { stations: clusters.len(), ..EdgeReport::default() };
    if clusters.is_empty() {
        log::warn!("edges: region has no stations");
        return report;
    }

    // ── Phase A ───────────────────────────────────────────────────────────
    let (clusters, rounds) = agglomerate(region, clusters, config);
    report.phase_a_rounds = rounds;
    report.clusters_after_agglomeration = clusters.len();

    // ── Phase B ───────────────────────────────────────────────────────────
    report.phase_b_rounds = connect_borders(region, clusters, config, sampler);

    // ── Phase C ───────────────────────────────────────────────────────────
    let stations = region.stations();
    report.loose_stations_before = count_loose(region, &stations);
    let added = reconnect_loose(region, config, sampler);
    report.loose_stations_remaining = count_loose(region, &stations);

    report.edges = region.edge_count() - start_edges;

    if report.loose_stations_remaining > 0 {
        log::warn!(
            "edges: {} of {} loose stations could not be reconnected",
            report.loose_stations_remaining,
            report.loose_stations_before
        );
    }
    log::info!(
        "edges: {} edges over {} stations ({} clusters after phase A, {} loose reconnections)",
        report.edges,
        report.stations,
        report.clusters_after_agglomeration,
        added
    );
    report
}
