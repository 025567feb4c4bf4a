//! The pipeline: region → stops → edges → routes → connections, then an
//! optional query set.

use tg_connections::{generate_connections, generate_queries, Connection, Query};
use tg_core::{CoordinateMapping, Sampler, Shortfall, Stage};
use tg_edges::{build_edges, place_stops_on_edges};
use tg_region::{place_stops, Region};
use tg_routes::{build_routes, Route};

use crate::{GenResult, GenerationReport, GeneratorConfig};

/// The generated transit network.
#[derive(Clone, Debug)]
pub struct Network {
    /// Cells, stations and every edge (track and hop).
    pub region: Region,
    /// `routes[i].id == RouteId(i)`.
    pub routes: Vec<Route>,
    /// Sorted by scheduled departure.
    pub connections: Vec<Connection>,
    /// Empty unless `queries.generate` is set.
    pub queries: Vec<Query>,
    pub report: GenerationReport,
}

/// A validated, ready-to-run pipeline.  Construct with
/// [`GeneratorBuilder`](crate::GeneratorBuilder).
pub struct Generator {
    pub(crate) config:  GeneratorConfig,
    pub(crate) region:  Option<Region>,
    pub(crate) mapping: Box<dyn CoordinateMapping>,
}

impl Generator {
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run every stage with one sampler seeded from `config.seed`.
    ///
    /// Equal configurations and inputs give identical networks.
    pub fn run(self) -> GenResult<Network> {
        let config = &self.config;
        let mut sampler = Sampler::new(config.seed);
        let mut report = GenerationReport::default();

        // ── Stage 0: region ───────────────────────────────────────────────
        let mut region = match self.region {
            Some(mut region) => {
                region.sort_points_by_weight();
                region
            }
            None => config.region.build_region(&mut sampler)?,
        };
        report.cells = region.cell_count();
        log::info!("region: {} cells, extent {:?}", report.cells, region.extent());

        // ── Stage 1: stops ────────────────────────────────────────────────
        let stops = place_stops(&mut region, &config.stops, &mut sampler);

        // ── Stage 2: edges, then the post-edge stops ──────────────────────
        report.edges = build_edges(&mut region, &config.edges, &mut sampler);
        let split = place_stops_on_edges(&mut region, &config.stops, stops.deferred, &mut sampler);
        report.edges.edges += split;
        report.post_edge_stops = split;
        report.stops_placed = stops.placed + split;
        report.stations = region.station_count();
        if stops.shortfall.is_some() || split < stops.deferred {
            report.shortfalls.push(Shortfall {
                stage: Stage::Stops,
                requested: config.stops.stops,
                produced: report.stops_placed,
            });
        }

        // ── Stage 3: routes ───────────────────────────────────────────────
        let (routes, route_report) = build_routes(&mut region, &config.routes, &mut sampler);
        report.shortfalls.extend(route_report.shortfall.clone());
        report.routes = route_report;
        report.route_count = routes.len();

        // ── Stage 4: connections ──────────────────────────────────────────
        let outcome = generate_connections(
            &region,
            &routes,
            self.mapping.as_ref(),
            &config.connections,
            &mut sampler,
        )?;
        report.connections = outcome.connections.len();
        report.instances = outcome.instances;
        report.discarded_instances = outcome.discarded_instances;
        report.shortfalls.extend(outcome.shortfall);

        // ── Stage 5: query set ────────────────────────────────────────────
        let queries = if config.queries.generate {
            let set = generate_queries(&region, &config.queries, &mut sampler)?;
            report.shortfalls.extend(set.shortfall);
            set.queries
        } else {
            Vec::new()
        };
        report.queries = queries.len();

        if report.is_complete() {
            log::info!("generation complete after {} draws", sampler.counter().wrapping_sub(config.seed));
        } else {
            for s in &report.shortfalls {
                log::warn!("generation incomplete: {s}");
            }
        }

        Ok(Network { region, routes, connections: outcome.connections, queries, report })
    }
}
