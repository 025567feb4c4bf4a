//! Top-level generator configuration.
//!
//! Every field has a default, so `{}` is a complete configuration.  Values
//! are only checked by [`GeneratorConfig::validate`], which the builder runs
//! before any stage executes.

use std::path::Path;

use serde::Deserialize;

use tg_connections::{ConnectionsConfig, QueriesConfig};
use tg_core::MAX_TIME_MS;
use tg_edges::EdgesConfig;
use tg_region::{RegionConfig, RegionSource, StopsConfig};
use tg_routes::RoutesConfig;

use crate::{ConfigError, GenResult};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed of the one sampler shared by all stages.
    pub seed: u64,
    pub region: RegionConfig,
    pub stops: StopsConfig,
    pub edges: EdgesConfig,
    pub routes: RoutesConfig,
    pub connections: ConnectionsConfig,
    /// Optional final stage; runs only with `queries.generate`.
    pub queries: QueriesConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed:        1,
            region:      RegionConfig::default(),
            stops:       StopsConfig::default(),
            edges:       EdgesConfig::default(),
            routes:      RoutesConfig::default(),
            connections: ConnectionsConfig::default(),
            queries:     QueriesConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> GenResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> GenResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check every option the stages rely on.  Reports the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.source == RegionSource::File && self.region.file_path.is_none() {
            return Err(ConfigError::MissingOption("region.file_path"));
        }
        self.validate_values()
    }

    /// Like [`GeneratorConfig::validate`] but without the region source
    /// options, for runs that bring their own region.
    pub fn validate_values(&self) -> Result<(), ConfigError> {
        positive("region.cells_per_latlon", self.region.cells_per_latlon)?;

        positive("stops.min_interstop_distance", self.stops.min_interstop_distance)?;
        if self.stops.min_station_size > self.stops.max_station_size {
            return Err(invalid(
                "stops.min_station_size",
                "must not exceed stops.max_station_size",
            ));
        }
        fraction("stops.factor_stops_post_edges", self.stops.factor_stops_post_edges)?;
        positive("stops.stop_around_edge_radius", self.stops.stop_around_edge_radius)?;

        let edges = &self.edges;
        positive(
            "edges.max_intracluster_distance_growthfactor",
            edges.max_intracluster_distance_growthfactor,
        )?;
        positive(
            "edges.post_cluster_max_intracluster_distancefactor",
            edges.post_cluster_max_intracluster_distancefactor,
        )?;
        positive("edges.loosestations_search_radius_factor", edges.loosestations_search_radius_factor)?;

        let routes = &self.routes;
        fraction("routes.largest_stations_fraction", routes.largest_stations_fraction)?;
        if routes.min_route_length < 1 {
            return Err(invalid("routes.min_route_length", "must be at least 1"));
        }
        if routes.min_route_length > routes.max_route_length {
            return Err(invalid(
                "routes.min_route_length",
                "must not exceed routes.max_route_length",
            ));
        }

        let conn = &self.connections;
        window(
            ("connections.time_initial", conn.time_initial),
            ("connections.time_final", conn.time_final),
        )?;
        hourly("connections.hourly_weekday_distribution", &conn.hourly_weekday_distribution)?;
        hourly("connections.hourly_weekend_distribution", &conn.hourly_weekend_distribution)?;
        positive("connections.vehicle_max_speed", conn.vehicle_max_speed)?;
        positive("connections.vehicle_speedup", conn.vehicle_speedup)?;
        fraction("connections.delay_chance", conn.delay_chance)?;
        fraction(
            "connections.delay_reduction_duration_fraction",
            conn.delay_reduction_duration_fraction,
        )?;
        if conn.delay_chance > 0.0 {
            let total: f64 = conn.delay_reasons.values().filter(|&&w| w > 0.0).sum();
            if !(total > 0.0) {
                return Err(invalid(
                    "connections.delay_reasons",
                    "needs a positive total weight when delay_chance > 0",
                ));
            }
        }

        let queries = &self.queries;
        if queries.generate {
            window(
                ("queries.time_initial", queries.time_initial),
                ("queries.time_final", queries.time_final),
            )?;
            hourly("queries.hourly_weekday_distribution", &queries.hourly_weekday_distribution)?;
            hourly("queries.hourly_weekend_distribution", &queries.hourly_weekend_distribution)?;
            if queries.max_time_before_departure < 0 {
                return Err(invalid("queries.max_time_before_departure", "must not be negative"));
            }
        }
        Ok(())
    }
}

// ── Checks ────────────────────────────────────────────────────────────────────

fn invalid(option: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { option, reason: reason.to_string() }
}

fn positive(option: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { option, reason: format!("must be positive, got {value}") })
    }
}

fn fraction(option: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid { option, reason: format!("must be in [0, 1], got {value}") })
    }
}

/// A non-empty window with both ends within `±MAX_TIME_MS`.
fn window(initial: (&'static str, i64), last: (&'static str, i64)) -> Result<(), ConfigError> {
    for (option, t) in [initial, last] {
        if t.unsigned_abs() > MAX_TIME_MS as u64 {
            return Err(ConfigError::Invalid {
                option,
                reason: format!("must lie within ±{MAX_TIME_MS} ms, got {t}"),
            });
        }
    }
    if last.1 <= initial.1 {
        return Err(ConfigError::Invalid {
            option: last.0,
            reason: format!("must be later than {}", initial.0),
        });
    }
    Ok(())
}

fn hourly(option: &'static str, distribution: &[f64]) -> Result<(), ConfigError> {
    if distribution.len() != 24 {
        return Err(ConfigError::Invalid {
            option,
            reason: format!("needs 24 hourly values, got {}", distribution.len()),
        });
    }
    let total: f64 = distribution.iter().filter(|&&w| w > 0.0).sum();
    if !(total > 0.0) {
        return Err(invalid(option, "needs a positive sum"));
    }
    Ok(())
}
