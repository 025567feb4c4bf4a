//! Geographic coordinates and the grid → lat/lon mapping.
//!
//! The generator works on an abstract integer grid; only the Connection
//! Simulator needs real distances, which it gets by mapping both endpoints
//! of a trip through a [`CoordinateMapping`] and taking the great-circle
//! distance.

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Uses the 12 742 km mean Earth diameter; the travel-time model is
    /// calibrated against this exact constant.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        const EARTH_DIAMETER_KM: f64 = 12_742.0;

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lon / 2.0).sin()
                * (d_lon / 2.0).sin();

        EARTH_DIAMETER_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── CoordinateMapping ─────────────────────────────────────────────────────────

/// Maps a grid cell `(x, y)` to a geographic coordinate.
///
/// Implemented for [`LinearMapping`] and for any `Fn(u32, u32) -> GeoPoint`,
/// so callers with a custom projection can pass a closure.
pub trait CoordinateMapping {
    fn to_geo(&self, x: u32, y: u32) -> GeoPoint;
}

impl<F> CoordinateMapping for F
where
    F: Fn(u32, u32) -> GeoPoint,
{
    #[inline]
    fn to_geo(&self, x: u32, y: u32) -> GeoPoint {
        self(x, y)
    }
}

/// Offset-and-scale mapping: `lat = lat_offset + x / cells_per_latlon`,
/// `lon = lon_offset + y / cells_per_latlon`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearMapping {
    pub lat_offset: f64,
    pub lon_offset: f64,
    pub cells_per_latlon: f64,
}

impl LinearMapping {
    pub fn new(lat_offset: f64, lon_offset: f64, cells_per_latlon: f64) -> Self {
        Self { lat_offset, lon_offset, cells_per_latlon }
    }
}

impl Default for LinearMapping {
    fn default() -> Self {
        Self::new(0.0, 0.0, 100.0)
    }
}

impl CoordinateMapping for LinearMapping {
    #[inline]
    fn to_geo(&self, x: u32, y: u32) -> GeoPoint {
        GeoPoint::new(
            self.lat_offset + x as f64 / self.cells_per_latlon,
            self.lon_offset + y as f64 / self.cells_per_latlon,
        )
    }
}
