//! Fluent builder for constructing a [`Generator`].

use tg_core::CoordinateMapping;
use tg_region::Region;

use crate::{GenResult, Generator, GeneratorConfig};

/// Fluent builder for [`Generator`].
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                                          |
/// |----------------|--------------------------------------------------|
/// | `.region(r)`   | Built from `config.region.source` at run time    |
/// | `.mapping(m)`  | `config.region.mapping()` (offset and scale)     |
///
/// # Example
///
/// ```rust,ignore
/// let config = GeneratorConfig::from_path("network.json")?;
/// let network = GeneratorBuilder::new(config).build()?.run()?;
/// println!("{} connections", network.connections.len());
/// ```
pub struct GeneratorBuilder {
    config:  GeneratorConfig,
    region:  Option<Region>,
    mapping: Option<Box<dyn CoordinateMapping>>,
}

impl GeneratorBuilder {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config, region: None, mapping: None }
    }

    /// Use a ready-made region instead of the configured source.
    ///
    /// Stop placement still runs unless the region already has stations.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Supply a custom grid → lat/lon projection.
    pub fn mapping(mut self, mapping: Box<dyn CoordinateMapping>) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Generator`].
    ///
    /// A supplied region makes `region.file_path` irrelevant, so a `file`
    /// source without a path is accepted in that case.
    pub fn build(self) -> GenResult<Generator> {
        if self.region.is_some() {
            self.config.validate_values()?;
        } else {
            self.config.validate()?;
        }

        let mapping = self
            .mapping
            .unwrap_or_else(|| Box::new(self.config.region.mapping()));

        Ok(Generator {
            config: self.config,
            region: self.region,
            mapping,
        })
    }
}
