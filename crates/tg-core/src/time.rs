//! Timestamp helpers and hourly ridership pools.
//!
//! # Design
//!
//! All times are `i64` milliseconds since the Unix epoch (UTC).  Day and
//! weekday are derived arithmetically; no calendar library is needed because
//! the generator only ever asks "which day does this instant fall on, and is
//! it a weekend?".
//!
//! An hourly distribution (24 relative weights, e.g. percentages of daily
//! ridership) is flattened into a [`TimePool`] once, so drawing an hour is a
//! single uniform index into a `Vec<u8>`.

use crate::{CoreError, CoreResult, Sampler};

pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
/// Largest timestamp magnitude a time window may use (10^8 days).
pub const MAX_TIME_MS: i64 = 100_000_000 * MS_PER_DAY;

/// Empirical weekday ridership per hour of day (percent of daily total).
pub const DEFAULT_HOURLY_WEEKDAY_DISTRIBUTION: [f64; 24] = [
    0.05, 0.01, 0.01, 0.48, 2.46, 5.64, 7.13, 6.23, 5.44, 5.43, 5.41, 5.49,
    5.42, 5.41, 5.57, 6.70, 6.96, 6.21, 5.40, 4.95, 4.33, 3.31, 1.56, 0.42,
];

/// Empirical weekend ridership per hour of day (percent of daily total).
pub const DEFAULT_HOURLY_WEEKEND_DISTRIBUTION: [f64; 24] = [
    0.09, 0.01, 0.01, 0.08, 0.98, 3.56, 5.23, 5.79, 5.82, 5.89, 5.84, 5.91,
    5.88, 5.95, 5.87, 5.95, 5.89, 5.96, 5.92, 5.94, 5.62, 4.61, 2.45, 0.76,
];

/// Midnight (UTC) of the day containing `time_ms`.
#[inline]
pub fn day_start(time_ms: i64) -> i64 {
    time_ms - time_ms.rem_euclid(MS_PER_DAY)
}

/// Day of week for `time_ms`, 0 = Sunday … 6 = Saturday.
///
/// 1970-01-01 was a Thursday (4).
#[inline]
pub fn weekday(time_ms: i64) -> u8 {
    let days = time_ms.div_euclid(MS_PER_DAY);
    (days + 4).rem_euclid(7) as u8
}

#[inline]
pub fn is_weekend(time_ms: i64) -> bool {
    matches!(weekday(time_ms), 0 | 6)
}

// ── TimePool ──────────────────────────────────────────────────────────────────

/// Flattened hour-of-day pool: hour `h` appears `ceil(weight[h] · SCALE)`
/// times, so a uniform index reproduces the distribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimePool {
    hours: Vec<u8>,
}

impl TimePool {
    /// Multiplier applied to each hourly weight before rounding up.
    pub const SCALE: f64 = 100.0;

    /// Build a pool from up to 24 hourly weights.  Negative or NaN weights
    /// contribute nothing.
    pub fn new(distribution: &[f64]) -> Self {
        let mut hours = Vec::new();
        for (hour, &weight) in distribution.iter().take(24).enumerate() {
            if !(weight > 0.0) {
                continue;
            }
            let copies = (weight * Self::SCALE).ceil() as usize;
            hours.extend(std::iter::repeat_n(hour as u8, copies));
        }
        Self { hours }
    }

    /// Like [`TimePool::new`] but insists on exactly one weight per hour.
    pub fn from_hourly(distribution: &[f64]) -> CoreResult<Self> {
        if distribution.len() != 24 {
            return Err(CoreError::BadDistribution(distribution.len()));
        }
        Ok(Self::new(distribution))
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// How many pool slots belong to `hour`.
    pub fn slots_for(&self, hour: u8) -> usize {
        self.hours.iter().filter(|&&h| h == hour).count()
    }

    /// Draw an hour of day.  `None` only for an empty pool.
    pub fn sample(&self, sampler: &mut Sampler) -> Option<u8> {
        let i = sampler.uniform_index(self.hours.len());
        self.hours.get(i).copied()
    }
}

// ── DepartureClock ────────────────────────────────────────────────────────────

/// Draws instants in `[time_initial, time_final)` shaped by hourly pools.
///
/// A uniform instant in the window picks the day and, through its weekday,
/// the pool; the hour comes from the pool and the offset within the hour
/// is uniform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartureClock {
    weekday: TimePool,
    weekend: TimePool,
    time_initial: i64,
    time_final: i64,
}

impl DepartureClock {
    /// Fails if either distribution does not have 24 entries.
    pub fn new(weekday: &[f64], weekend: &[f64], time_initial: i64, time_final: i64) -> CoreResult<Self> {
        Ok(Self {
            weekday: TimePool::from_hourly(weekday)?,
            weekend: TimePool::from_hourly(weekend)?,
            time_initial,
            time_final,
        })
    }

    /// Three draws: the day, the hour, the offset.
    pub fn sample(&self, sampler: &mut Sampler) -> i64 {
        let instant = sampler.uniform_range(self.time_initial, self.time_final);
        let pool = if is_weekend(instant) { &self.weekend } else { &self.weekday };
        let hour = pool.sample(sampler).unwrap_or(0) as i64;
        day_start(instant) + hour * MS_PER_HOUR + sampler.uniform_range(0, MS_PER_HOUR)
    }
}
