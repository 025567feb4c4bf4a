//! Phases A and B: agglomerative clustering, then border reconnection.
//!
//! Clusters are transient.  Each merge adds exactly one edge to the region,
//! between the closest pair of stations across the two clusters, so the
//! clusters are always connected subgraphs and merging `n` singletons into
//! one cluster adds `n − 1` edges.

use tg_core::{CellId, Sampler};
use tg_region::Region;

use crate::EdgesConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    pub stations: Vec<CellId>,
    /// Arithmetic mean of member coordinates.
    pub center: (f64, f64),
}

impl Cluster {
    fn singleton(region: &Region, id: CellId) -> Self {
        let (x, y) = region.coords(id);
        Self { stations: vec![id], center: (x as f64, y as f64) }
    }

    fn center_distance2(&self, other: &Cluster) -> f64 {
        let dx = self.center.0 - other.center.0;
        let dy = self.center.1 - other.center.1;
        dx * dx + dy * dy
    }
}

/// One singleton cluster per station, in `(x, y)` order.
pub fn singletons(region: &Region) -> Vec<Cluster> {
    region
        .stations()
        .into_iter()
        .map(|id| Cluster::singleton(region, id))
        .collect()
}

/// Closest station pair across two clusters (first minimum wins) and its
/// squared distance.
fn closest_pair(region: &Region, a: &Cluster, b: &Cluster) -> Option<(CellId, CellId, f64)> {
    let mut best: Option<(CellId, CellId, f64)> = None;
    for &s1 in &a.stations {
        for &s2 in &b.stations {
            let d = region.distance2(s1, s2);
            if best.is_none_or(|(_, _, bd)| d < bd) {
                best = Some((s1, s2, d));
            }
        }
    }
    best
}

fn min_distance(region: &Region, a: &Cluster, b: &Cluster) -> f64 {
    closest_pair(region, a, b).map_or(f64::INFINITY, |(_, _, d)| d)
}

/// Join two clusters with one edge between their closest stations.
fn merge(region: &mut Region, a: Cluster, b: Cluster) -> Cluster {
    if let Some((s1, s2, _)) = closest_pair(region, &a, &b) {
        region.add_edge(s1, s2);
    }

    let mut stations = a.stations;
    stations.extend(b.stations);

    let (sum_x, sum_y) = stations.iter().fold((0.0, 0.0), |(sx, sy), &id| {
        let (x, y) = region.coords(id);
        (sx + x as f64, sy + y as f64)
    });
    let n = stations.len() as f64;
    Cluster { stations, center: (sum_x / n, sum_y / n) }
}

// ── Phase A ───────────────────────────────────────────────────────────────────

/// Merge clusters whose centroids lie within a growing threshold.
///
/// The threshold factor is raised by the growth factor before every round
/// and capped at 1.  Within a round, pairs `(i, j < i)` are scanned in index
/// order and a cluster merges at most once.  Merged clusters come first in
/// the next round's list, untouched ones after.  Stops after a round with no
/// merge at the full threshold.
///
/// Returns the surviving clusters and the number of rounds run.
pub fn agglomerate(
    region: &mut Region,
    mut clusters: Vec<Cluster>,
    config: &EdgesConfig,
) -> (Vec<Cluster>, usize) {
    let growth = if config.max_intracluster_distance_growthfactor > 0.0 {
        config.max_intracluster_distance_growthfactor
    } else {
        1.0
    };

    let mut factor: f64 = 0.0;
    let mut rounds = 0;
    loop {
        factor = (factor + growth).min(1.0);
        let threshold = config.max_intracluster_distance * factor;
        rounds += 1;

        let mut slots: Vec<Option<Cluster>> = clusters.into_iter().map(Some).collect();
        let mut next = Vec::new();
        for i in 0..slots.len() {
            for j in 0..i {
                let close = match (&slots[i], &slots[j]) {
                    (Some(ci), Some(cj)) => ci.center_distance2(cj) <= threshold,
                    _ => false,
                };
                if close {
                    if let (Some(ci), Some(cj)) = (slots[i].take(), slots[j].take()) {
                        next.push(merge(region, ci, cj));
                    }
                    break;
                }
            }
        }

        let merged = next.len();
        next.extend(slots.into_iter().flatten());
        clusters = next;

        log::debug!(
            "edges: phase A round {rounds}, threshold {threshold:.2}, {merged} merges, {} clusters",
            clusters.len()
        );
        if merged == 0 && factor >= 1.0 {
            break;
        }
    }
    (clusters, rounds)
}

// ── Phase B ───────────────────────────────────────────────────────────────────

/// Merge clusters until one remains.
///
/// Every round, each cluster gets a ceiling: its smallest station distance
/// to any other cluster times the slack factor.  A uniformly chosen cluster
/// then absorbs, in order, every cluster whose distance to it is within both
/// ceilings; its own ceiling becomes the larger of the two after each merge.
/// A round that absorbs nothing falls back to the nearest cluster.
///
/// Returns the number of rounds run.
pub fn connect_borders(
    region: &mut Region,
    mut clusters: Vec<Cluster>,
    config: &EdgesConfig,
    sampler: &mut Sampler,
) -> usize {
    let slack = config.post_cluster_max_intracluster_distancefactor;
    let mut rounds = 0;

    while clusters.len() > 1 {
        rounds += 1;
        let n = clusters.len();

        let mut nearest = vec![f64::INFINITY; n];
        for i in 0..n {
            for j in 0..i {
                let d = min_distance(region, &clusters[i], &clusters[j]);
                nearest[i] = nearest[i].min(d);
                nearest[j] = nearest[j].min(d);
            }
        }
        let ceiling: Vec<f64> = nearest.iter().map(|d| d * slack).collect();

        let pick = sampler.uniform_index(n);
        let mut slots: Vec<Option<Cluster>> = clusters.into_iter().map(Some).collect();
        let Some(mut current) = slots[pick].take() else {
            break;
        };
        let mut current_ceiling = ceiling[pick];
        let mut absorbed = 0;

        for j in 0..n {
            let Some(other) = slots[j].as_ref() else {
                continue;
            };
            let d = min_distance(region, &current, other);
            if d <= current_ceiling && d <= ceiling[j] {
                if let Some(other) = slots[j].take() {
                    current = merge(region, current, other);
                    current_ceiling = current_ceiling.max(ceiling[j]);
                    absorbed += 1;
                }
            }
        }

        if absorbed == 0 {
            let mut best: Option<(usize, f64)> = None;
            for (j, slot) in slots.iter().enumerate() {
                if let Some(other) = slot {
                    let d = min_distance(region, &current, other);
                    if best.is_none_or(|(_, bd)| d < bd) {
                        best = Some((j, d));
                    }
                }
            }
            if let Some(other) = best.and_then(|(j, _)| slots[j].take()) {
                current = merge(region, current, other);
                absorbed = 1;
            }
        }

        clusters = slots.into_iter().flatten().collect();
        clusters.push(current);

        log::debug!(
            "edges: phase B round {rounds}, absorbed {absorbed}, {} clusters left",
            clusters.len()
        );
    }
    rounds
}
