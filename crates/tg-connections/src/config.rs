use std::collections::BTreeMap;

use serde::Deserialize;

use tg_core::time::{DEFAULT_HOURLY_WEEKDAY_DISTRIBUTION, DEFAULT_HOURLY_WEEKEND_DISTRIBUTION};

/// Connection Simulator parameters.  Times are Unix milliseconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectionsConfig {
    pub time_initial: i64,
    pub time_final: i64,
    /// Target number of connections.
    pub connections: usize,
    /// Higher values favour larger routes.
    pub route_choice_power: f64,
    /// km/h
    pub vehicle_max_speed: f64,
    /// km/h²
    pub vehicle_speedup: f64,
    pub hourly_weekday_distribution: Vec<f64>,
    pub hourly_weekend_distribution: Vec<f64>,
    /// Minimum dwell at a stop, ms.
    pub stop_wait_min: f64,
    /// Extra dwell per unit of stop weight, ms.
    pub stop_wait_size_factor: f64,
    /// Probability that a trip picks up a fresh delay.
    pub delay_chance: f64,
    /// Upper bound (exclusive) of one fresh delay, ms.
    pub delay_max: u64,
    /// Higher values make large delays rarer.
    pub delay_choice_power: f64,
    /// Reason name → relative weight.
    pub delay_reasons: BTreeMap<String, f64>,
    /// Fraction of a trip's duration that absorbs carried delay.
    pub delay_reduction_duration_fraction: f64,
    /// Cap on route instances simulated.
    pub max_attempts: usize,
}

/// GTFS-realtime alert causes with rough relative frequencies.
pub fn default_delay_reasons() -> BTreeMap<String, f64> {
    [
        ("TECHNICAL_PROBLEM", 3.0),
        ("WEATHER", 1.0),
        ("ACCIDENT", 1.0),
        ("STRIKE", 0.1),
        ("CONSTRUCTION", 1.0),
        ("POLICE_ACTIVITY", 0.5),
        ("MEDICAL_EMERGENCY", 0.5),
        ("OTHER_CAUSE", 1.0),
    ]
    .into_iter()
    .map(|(name, w)| (name.to_string(), w))
    .collect()
}

impl Default for ConnectionsConfig {
    fn default() -> Self {
        Self {
            time_initial:                      0,
            time_final:                        24 * 3_600_000,
            connections:                       30_000,
            route_choice_power:                2.0,
            vehicle_max_speed:                 160.0,
            vehicle_speedup:                   5_000.0,
            hourly_weekday_distribution:       DEFAULT_HOURLY_WEEKDAY_DISTRIBUTION.to_vec(),
            hourly_weekend_distribution:       DEFAULT_HOURLY_WEEKEND_DISTRIBUTION.to_vec(),
            stop_wait_min:                     60_000.0,
            stop_wait_size_factor:             20_000.0,
            delay_chance:                      0.0,
            delay_max:                         3_600_000,
            delay_choice_power:                1.0,
            delay_reasons:                     default_delay_reasons(),
            delay_reduction_duration_fraction: 0.1,
            max_attempts:                      1_000_000,
        }
    }
}
