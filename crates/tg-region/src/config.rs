//! Region section of the generator configuration.

use std::path::PathBuf;

use serde::Deserialize;

use tg_core::{LinearMapping, Sampler};

use crate::generate::{IsolatedRegion, NoisyRegion, RegionGenerator};
use crate::{load_region_csv, Region, RegionError, RegionResult};

/// Where the populated grid comes from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionSource {
    #[default]
    Noisy,
    Isolated,
    /// Cell CSV at `file_path`.
    File,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub source: RegionSource,
    /// Required when `source` is `file`.
    pub file_path: Option<PathBuf>,
    /// Honour the station column of a loaded CSV.
    pub mark_stops: bool,

    pub size_x: u32,
    pub size_y: u32,
    pub pop_average: f64,
    pub pop_deviation: f64,
    pub pop_clusters: u32,
    pub max_radius: u32,

    pub lat_offset: f64,
    pub lon_offset: f64,
    pub cells_per_latlon: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            source:           RegionSource::Noisy,
            file_path:        None,
            mark_stops:       false,
            size_x:           300,
            size_y:           300,
            pop_average:      0.0,
            pop_deviation:    10.0,
            pop_clusters:     50,
            max_radius:       50,
            lat_offset:       0.0,
            lon_offset:       0.0,
            cells_per_latlon: 100.0,
        }
    }
}

impl RegionConfig {
    /// Grid → lat/lon mapping described by the offset fields.
    pub fn mapping(&self) -> LinearMapping {
        LinearMapping::new(self.lat_offset, self.lon_offset, self.cells_per_latlon)
    }

    /// Fail early if the selected source is missing a required option.
    pub fn check(&self) -> RegionResult<()> {
        if self.source == RegionSource::File && self.file_path.is_none() {
            return Err(RegionError::MissingOption("region.file_path"));
        }
        Ok(())
    }

    /// Produce the region selected by `source`, point list sorted heaviest
    /// first.
    pub fn build_region(&self, sampler: &mut Sampler) -> RegionResult<Region> {
        self.check()?;
        let mut region = match self.source {
            RegionSource::Noisy => NoisyRegion {
                size_x:        self.size_x,
                size_y:        self.size_y,
                pop_average:   self.pop_average,
                pop_deviation: self.pop_deviation,
            }
            .generate(sampler),
            RegionSource::Isolated => IsolatedRegion {
                size_x:        self.size_x,
                size_y:        self.size_y,
                pop_clusters:  self.pop_clusters,
                pop_average:   self.pop_average,
                pop_deviation: self.pop_deviation,
                max_radius:    self.max_radius,
            }
            .generate(sampler),
            RegionSource::File => {
                let path = self
                    .file_path
                    .as_deref()
                    .ok_or(RegionError::MissingOption("region.file_path"))?;
                return load_region_csv(path, self.mark_stops);
            }
        };
        region.sort_points_by_weight();
        log::info!(
            "region: generated {} cells ({:?} source)",
            region.cell_count(),
            self.source
        );
        Ok(region)
    }
}
