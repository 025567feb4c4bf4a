//! Query sets: rider journeys to plan against the generated timetable.

use serde::Deserialize;

use tg_core::time::{DEFAULT_HOURLY_WEEKDAY_DISTRIBUTION, DEFAULT_HOURLY_WEEKEND_DISTRIBUTION};
use tg_core::{CellId, CoreResult, DepartureClock, Sampler, Shortfall, Stage, MS_PER_DAY, MS_PER_HOUR};
use tg_region::Region;

/// Query set parameters.  Times are Unix milliseconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueriesConfig {
    /// Off by default.
    pub generate: bool,
    pub query_count: usize,
    /// Higher values favour heavier stations as endpoints.
    pub start_stop_choice_power: f64,
    pub time_initial: i64,
    pub time_final: i64,
    /// Longest lead time between issuing a query and its departure, ms.
    pub max_time_before_departure: i64,
    pub hourly_weekday_distribution: Vec<f64>,
    pub hourly_weekend_distribution: Vec<f64>,
    /// Cap on endpoint draws before the stage gives up.
    pub max_attempts: usize,
}

impl Default for QueriesConfig {
    fn default() -> Self {
        Self {
            generate:                    false,
            query_count:                 100,
            start_stop_choice_power:     4.0,
            time_initial:                0,
            time_final:                  31 * MS_PER_DAY,
            max_time_before_departure:   MS_PER_HOUR,
            hourly_weekday_distribution: DEFAULT_HOURLY_WEEKDAY_DISTRIBUTION.to_vec(),
            hourly_weekend_distribution: DEFAULT_HOURLY_WEEKEND_DISTRIBUTION.to_vec(),
            max_attempts:                100_000,
        }
    }
}

/// One journey request.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub departure_stop: CellId,
    pub arrival_stop: CellId,
    pub departure_time: i64,
    /// How long before `departure_time` the query is issued, in seconds.
    pub lead_time_s: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueriesOutcome {
    pub queries: Vec<Query>,
    pub shortfall: Option<Shortfall>,
}

/// Lead-time factor in `(0, 1]`, skewed toward short lead times:
/// `1 − log10(9u + 1)`.
fn lead_factor(sampler: &mut Sampler) -> f64 {
    1.0 - (sampler.next_uniform() * 9.0 + 1.0).log10()
}

/// Draw `query_count` journeys between distinct stations of `region`.
///
/// Endpoints are biased toward heavy stations, and the arrival stop is
/// redrawn until it differs from the departure stop.  The departure time
/// comes from the hourly pools like a route instance's start.  Needs at
/// least two stations; every draw counts toward `max_attempts`.
pub fn generate_queries(region: &Region, config: &QueriesConfig, sampler: &mut Sampler) -> CoreResult<QueriesOutcome> {
    let clock = DepartureClock::new(
        &config.hourly_weekday_distribution,
        &config.hourly_weekend_distribution,
        config.time_initial,
        config.time_final,
    )?;

    let mut stations = region.stations();
    stations.sort_by(|&a, &b| region.weight(b).total_cmp(&region.weight(a)));

    let mut queries = Vec::with_capacity(config.query_count);
    let mut attempts = 0;
    if stations.len() >= 2 {
        while queries.len() < config.query_count && attempts < config.max_attempts {
            attempts += 1;
            let Some(&from) = sampler.biased_choice(&stations, config.start_stop_choice_power) else {
                break;
            };
            // Redraw the arrival stop until it differs.
            let mut to = from;
            while to == from && attempts < config.max_attempts {
                attempts += 1;
                if let Some(&next) = sampler.biased_choice(&stations, config.start_stop_choice_power) {
                    to = next;
                }
            }
            if to == from {
                break;
            }
            let departure_time = clock.sample(sampler);
            let lead_time_s = lead_factor(sampler) * config.max_time_before_departure as f64 / 1000.0;
            queries.push(Query { departure_stop: from, arrival_stop: to, departure_time, lead_time_s });
        }
    }

    let shortfall = (queries.len() < config.query_count).then(|| {
        log::warn!(
            "queries: {} of {} after {attempts} attempts ({} stations)",
            queries.len(),
            config.query_count,
            stations.len()
        );
        Shortfall { stage: Stage::Queries, requested: config.query_count, produced: queries.len() }
    });
    log::info!("queries: {} queries", queries.len());
    Ok(QueriesOutcome { queries, shortfall })
}
