//! Trip duration from a trapezoidal speed profile.
//!
//! A vehicle accelerates at `A` up to `Vmax`, cruises, then brakes at `A`.
//! The distance spent accelerating is `d_accel = (Vmax / A)² · A`.  Trips
//! shorter than `2 · d_accel` never reach `Vmax` and follow a triangular
//! profile instead.

use tg_core::MS_PER_HOUR;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TravelModel {
    /// km/h
    pub max_speed: f64,
    /// km/h²
    pub speedup: f64,
}

impl TravelModel {
    pub fn new(max_speed: f64, speedup: f64) -> Self {
        Self { max_speed, speedup }
    }

    /// Hours needed to reach `max_speed` from standstill.
    #[inline]
    pub fn hours_to_max_speed(&self) -> f64 {
        self.max_speed / self.speedup
    }

    /// Distance (km) covered while reaching `max_speed`.
    #[inline]
    pub fn accel_distance(&self) -> f64 {
        self.hours_to_max_speed().powi(2) * self.speedup
    }

    /// Travel time in hours for `distance_km`.
    pub fn duration_hours(&self, distance_km: f64) -> f64 {
        let halfway = distance_km / 2.0;
        let d_accel = self.accel_distance();
        if halfway >= d_accel {
            2.0 * self.hours_to_max_speed() + (distance_km - 2.0 * d_accel) / self.max_speed
        } else {
            2.0 * (halfway / self.speedup).sqrt()
        }
    }

    /// Travel time in (fractional) milliseconds for `distance_km`.
    #[inline]
    pub fn duration_ms(&self, distance_km: f64) -> f64 {
        self.duration_hours(distance_km) * MS_PER_HOUR as f64
    }
}
