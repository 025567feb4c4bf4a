//! Stop placement: turn populated cells into stations.

use serde::Deserialize;

use tg_core::{Sampler, Shortfall, Stage};

use crate::Region;

/// Stop placement parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StopsConfig {
    /// Number of stations to place.
    pub stops: usize,
    /// Smallest cell weight a station may have.
    pub min_station_size: f64,
    /// Largest cell weight a station may have.
    pub max_station_size: f64,
    /// Higher values favour heavier cells.
    pub start_stop_choice_power: f64,
    /// Minimum distance, in cells, between two stations.
    pub min_interstop_distance: f64,
    /// Cap on candidate draws before the stage gives up.
    pub max_attempts: usize,
    /// Share of `stops` placed after the edges exist, by splitting long
    /// edges (see `tg_edges::place_stops_on_edges`).
    pub factor_stops_post_edges: f64,
    /// Higher values favour longer edges, and heavier cells along them,
    /// when placing post-edge stops.
    pub edge_choice_power: f64,
    /// Higher values favour heavier cells around the chosen point of an edge.
    pub stop_around_edge_choice_power: f64,
    /// Radius, in cells, searched around the chosen point of an edge.
    pub stop_around_edge_radius: f64,
}

impl Default for StopsConfig {
    fn default() -> Self {
        Self {
            stops:                   600,
            min_station_size:        0.01,
            max_station_size:        30.0,
            start_stop_choice_power: 4.0,
            min_interstop_distance:  1.0,
            max_attempts:            100_000,
            factor_stops_post_edges:       0.66,
            edge_choice_power:             2.0,
            stop_around_edge_choice_power: 4.0,
            stop_around_edge_radius:       2.0,
        }
    }
}

impl StopsConfig {
    /// Stops placed before the edges exist.
    pub fn pre_edge_stops(&self) -> usize {
        let share = (1.0 - self.factor_stops_post_edges).clamp(0.0, 1.0);
        ((self.stops as f64 * share).ceil() as usize).min(self.stops)
    }

    /// Stops left for the post-edge phase.
    pub fn post_edge_stops(&self) -> usize {
        self.stops - self.pre_edge_stops()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopsOutcome {
    pub placed: usize,
    /// Stops handed to the post-edge phase; 0 when placement was skipped.
    pub deferred: usize,
    /// Set when fewer than the pre-edge share could be placed.  Counted
    /// against the full `stops` request.
    pub shortfall: Option<Shortfall>,
}

/// Mark the pre-edge share of stations on `region`.
///
/// Does nothing if the region already carries stations (e.g. loaded with
/// `mark_stops`).  The point list must be sorted heaviest first.
pub fn place_stops(region: &mut Region, config: &StopsConfig, sampler: &mut Sampler) -> StopsOutcome {
    let existing = region.station_count();
    if existing > 0 {
        log::info!("stops: region already has {existing} stations, skipping placement");
        return StopsOutcome::default();
    }

    let eligible = |w: f64| w >= config.min_station_size && w <= config.max_station_size;
    let eligible_count = region
        .points()
        .iter()
        .filter(|&&id| eligible(region.weight(id)))
        .count();

    // Spaced stations cannot outnumber eligible cells per unit of spacing.
    let room = if config.min_interstop_distance > 0.0 {
        (eligible_count as f64 / config.min_interstop_distance) as usize
    } else {
        eligible_count
    };
    let share = config.pre_edge_stops();
    let target = share.min(room);

    let mut placed = 0;
    let mut attempts = 0;
    while placed < target && attempts < config.max_attempts {
        attempts += 1;
        let Some(&id) = sampler.biased_choice(region.points(), config.start_stop_choice_power) else {
            break;
        };
        if !eligible(region.weight(id))
            || region.is_station(id)
            || region.has_station_near(id, config.min_interstop_distance)
        {
            continue;
        }
        region.mark_station(id);
        placed += 1;
    }

    let shortfall = (placed < share).then(|| {
        log::warn!(
            "stops: placed {placed} of {share} after {attempts} attempts ({eligible_count} eligible cells)"
        );
        Shortfall { stage: Stage::Stops, requested: config.stops, produced: placed }
    });

    log::info!("stops: placed {placed} stations ({eligible_count} eligible cells)");
    StopsOutcome { placed, deferred: config.post_edge_stops(), shortfall }
}
