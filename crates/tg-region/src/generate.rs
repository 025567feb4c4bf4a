//! Synthetic region sources.
//!
//! Both generators draw from the run's single [`Sampler`], so a synthetic
//! region is part of the reproducible pipeline rather than a separate
//! seeded step.

use tg_core::Sampler;

use crate::Region;

/// Produces a populated [`Region`] without reading any file.
pub trait RegionGenerator {
    fn generate(&self, sampler: &mut Sampler) -> Region;
}

/// `max(0, avg + dev − 2·u·dev)`: one noisy population draw.
#[inline]
fn noisy_value(sampler: &mut Sampler, average: f64, deviation: f64) -> f64 {
    (average + deviation - 2.0 * sampler.next_uniform() * deviation).max(0.0)
}

// ── NoisyRegion ───────────────────────────────────────────────────────────────

/// Smoothed noise over the full `size_x × size_y` rectangle.
///
/// Each cell's draw is averaged with the already generated left (`x − 1`)
/// and upper (`y − 1`) neighbours, which produces soft gradients instead of
/// white noise.
#[derive(Clone, Debug, PartialEq)]
pub struct NoisyRegion {
    pub size_x: u32,
    pub size_y: u32,
    pub pop_average: f64,
    pub pop_deviation: f64,
}

impl RegionGenerator for NoisyRegion {
    fn generate(&self, sampler: &mut Sampler) -> Region {
        let mut region = Region::new();
        let mut prev_col: Vec<f64> = Vec::new();

        for x in 0..self.size_x {
            let mut col = Vec::with_capacity(self.size_y as usize);
            for y in 0..self.size_y {
                let mut value = noisy_value(sampler, self.pop_average, self.pop_deviation);
                let mut parts = 1.0;
                if x > 0 {
                    value += prev_col[y as usize];
                    parts += 1.0;
                }
                if y > 0 {
                    value += col[y as usize - 1];
                    parts += 1.0;
                }
                value /= parts;
                region.put(x, y, value);
                col.push(value);
            }
            prev_col = col;
        }
        region
    }
}

// ── IsolatedRegion ────────────────────────────────────────────────────────────

/// `pop_clusters` independent population discs on an otherwise empty grid.
///
/// A disc with centre `c`, radius `r` and peak `v` gives every cell at
/// squared distance `d < r` the value `v · (1 − d / r)`.  Overlapping discs
/// overwrite: the last disc to touch a cell wins.
#[derive(Clone, Debug, PartialEq)]
pub struct IsolatedRegion {
    pub size_x: u32,
    pub size_y: u32,
    pub pop_clusters: u32,
    pub pop_average: f64,
    pub pop_deviation: f64,
    pub max_radius: u32,
}

impl RegionGenerator for IsolatedRegion {
    fn generate(&self, sampler: &mut Sampler) -> Region {
        let mut region = Region::new();

        for _ in 0..self.pop_clusters {
            let value = noisy_value(sampler, self.pop_average, self.pop_deviation);
            let xc = (sampler.next_uniform() * self.size_x as f64).floor() as i64;
            let yc = (sampler.next_uniform() * self.size_y as f64).floor() as i64;
            let radius = (sampler.next_uniform() * self.max_radius as f64).floor() as i64;

            for x in (xc - radius)..(xc + radius) {
                for y in (yc - radius)..(yc + radius) {
                    if x < 0 || y < 0 {
                        continue;
                    }
                    let d = ((x - xc).pow(2) + (y - yc).pow(2)) as f64;
                    if d < radius as f64 {
                        region.put(x as u32, y as u32, value * (1.0 - d / radius as f64));
                    }
                }
            }
        }
        region
    }
}
