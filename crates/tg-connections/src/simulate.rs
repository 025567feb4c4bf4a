//! The Connection Simulator.

use tg_core::{CoordinateMapping, CoreResult, DepartureClock, Sampler, SequenceId, Shortfall, Stage};
use tg_region::Region;
use tg_routes::{Route, Trip};

use crate::{Connection, ConnectionsConfig, DelayChain, DelayReasons, TravelModel};

/// What the simulator produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionsOutcome {
    /// Sorted by scheduled departure (stable).
    pub connections: Vec<Connection>,
    /// Route instances committed.
    pub instances: usize,
    /// Route instances dropped for ending after `time_final`.
    pub discarded_instances: usize,
    pub shortfall: Option<Shortfall>,
}

/// Connection Simulator with its lookup tables prepared.
pub struct Simulator<'a> {
    config: &'a ConnectionsConfig,
    clock: DepartureClock,
    reasons: DelayReasons,
    travel: TravelModel,
}

impl<'a> Simulator<'a> {
    /// Fails if either hourly distribution does not have 24 entries.
    pub fn new(config: &'a ConnectionsConfig) -> CoreResult<Self> {
        Ok(Self {
            config,
            clock: DepartureClock::new(
                &config.hourly_weekday_distribution,
                &config.hourly_weekend_distribution,
                config.time_initial,
                config.time_final,
            )?,
            reasons: DelayReasons::new(&config.delay_reasons),
            travel: TravelModel::new(config.vehicle_max_speed, config.vehicle_speedup),
        })
    }

    /// Start time of a route instance.
    pub fn departure_time(&self, sampler: &mut Sampler) -> i64 {
        self.clock.sample(sampler)
    }

    /// Travel time of one trip in fractional ms.
    pub fn trip_duration<M: CoordinateMapping + ?Sized>(
        &self,
        region: &Region,
        mapping: &M,
        trip: &Trip,
    ) -> f64 {
        let (fx, fy) = region.coords(trip.from);
        let (tx, ty) = region.coords(trip.to);
        let distance = mapping.to_geo(fx, fy).distance_km(mapping.to_geo(tx, ty));
        self.travel.duration_ms(distance)
    }

    /// Dwell at the arrival stop of `trip`, ms.
    fn dwell(&self, region: &Region, trip: &Trip) -> f64 {
        self.config.stop_wait_min + region.weight(trip.to) * self.config.stop_wait_size_factor
    }

    /// Simulate one run of `route` starting at `start`.  Returns the batch
    /// (with a placeholder sequence id) and the last scheduled arrival.
    fn run_instance<M: CoordinateMapping + ?Sized>(
        &self,
        region: &Region,
        mapping: &M,
        route: &Route,
        start: i64,
        sampler: &mut Sampler,
    ) -> (Vec<Connection>, i64) {
        let cfg = self.config;
        let mut batch = Vec::with_capacity(route.trips.len());
        let mut chain = DelayChain::default();
        let mut t = start as f64;
        let mut last_arrival = start;

        for trip in &route.trips {
            let duration = self.trip_duration(region, mapping, trip);
            let departed = chain.clone();

            chain.absorb(duration, cfg.delay_reduction_duration_fraction);
            chain.maybe_delay(
                sampler,
                cfg.delay_chance,
                cfg.delay_max,
                cfg.delay_choice_power,
                &self.reasons,
            );

            let departure_time = t.floor() as i64;
            let arrival_time = (t + duration).floor() as i64;
            batch.push(Connection {
                trip: trip.edge,
                from: trip.from,
                to: trip.to,
                route: route.id,
                departure_time,
                arrival_time,
                delay_departure: departed.delay_ms,
                delay_arrival: chain.delay_ms,
                delay_reason_departure: departed.reason,
                delay_reason_arrival: chain.reason.clone(),
                sequence_id: SequenceId::INVALID,
            });

            last_arrival = arrival_time;
            t = arrival_time as f64 + self.dwell(region, trip);
        }
        (batch, last_arrival)
    }

    /// Timetable `routes` until the target count or the attempt cap.
    pub fn run<M: CoordinateMapping + ?Sized>(
        &self,
        region: &Region,
        routes: &[Route],
        mapping: &M,
        sampler: &mut Sampler,
    ) -> ConnectionsOutcome {
        let cfg = self.config;
        let mut outcome = ConnectionsOutcome::default();

        let mut by_size: Vec<&Route> = routes.iter().filter(|r| !r.trips.is_empty()).collect();
        by_size.sort_by(|a, b| b.size.total_cmp(&a.size));

        let mut attempts = 0;
        while outcome.connections.len() < cfg.connections && attempts < cfg.max_attempts {
            attempts += 1;
            let Some(&route) = sampler.biased_choice(&by_size, cfg.route_choice_power) else {
                break;
            };
            let start = self.departure_time(sampler);
            let (mut batch, last_arrival) = self.run_instance(region, mapping, route, start, sampler);

            if last_arrival > cfg.time_final {
                outcome.discarded_instances += 1;
                log::debug!(
                    "connections: dropped instance of {} ending at {last_arrival}",
                    route.id
                );
                continue;
            }

            let sequence_id = SequenceId(outcome.instances as u32);
            for c in &mut batch {
                c.sequence_id = sequence_id;
            }
            outcome.connections.append(&mut batch);
            outcome.instances += 1;
        }

        outcome.connections.sort_by_key(|c| c.departure_time);

        if outcome.connections.len() < cfg.connections {
            log::warn!(
                "connections: {} of {} after {attempts} attempts ({} routes)",
                outcome.connections.len(),
                cfg.connections,
                by_size.len()
            );
            outcome.shortfall = Some(Shortfall {
                stage: Stage::Connections,
                requested: cfg.connections,
                produced: outcome.connections.len(),
            });
        }
        log::info!(
            "connections: {} connections in {} instances ({} discarded)",
            outcome.connections.len(),
            outcome.instances,
            outcome.discarded_instances
        );
        outcome
    }
}

/// Build a [`Simulator`] for `config` and run it once.
pub fn generate_connections<M: CoordinateMapping + ?Sized>(
    region: &Region,
    routes: &[Route],
    mapping: &M,
    config: &ConnectionsConfig,
    sampler: &mut Sampler,
) -> CoreResult<ConnectionsOutcome> {
    Ok(Simulator::new(config)?.run(region, routes, mapping, sampler))
}
