//! Configuration for the AgroLayer pipeline.
//!
//! INI-backed configuration split by concern: settings structs in
//! `settings`, constants in [`defaults`], parsing in `parser`,
//! serialization in `writer`, and file I/O in `file`. The adapters
//! here turn a loaded [`ConfigFile`] into the typed pipeline inputs.

pub mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DateSettings, LayerSettings, LayerTable, LoggingSettings, RegionSettings,
    SuitabilitySettings, TemperatureSettings, ThresholdSettings,
};

use crate::catalog::{DateRange, EmptyDateRange};
use crate::geo::{GeoError, Region};
use crate::source::{LayerKind, SourceRegistry, SourceSpec};
use crate::suitability::Thresholds;
use crate::transform::LinearEncoding;

impl ConfigFile {
    /// The configured region of interest.
    pub fn to_region(&self) -> Result<Region, GeoError> {
        Region::new(
            self.region.min_lon,
            self.region.min_lat,
            self.region.max_lon,
            self.region.max_lat,
        )
    }

    /// The shared temporal window.
    pub fn to_date_range(&self) -> Result<DateRange, EmptyDateRange> {
        DateRange::new(self.dates.start, self.dates.end)
    }

    /// Builds the source registry for all five layers.
    pub fn to_registry(&self) -> Result<SourceRegistry, EmptyDateRange> {
        let range = self.to_date_range()?;
        let spec =
            |layer: &LayerSettings| SourceSpec::new(layer.dataset.clone(), layer.bands.clone(), range);
        Ok(SourceRegistry::new([
            (LayerKind::Rain, spec(&self.layers.rain)),
            (LayerKind::SoilMoisture, spec(&self.layers.soil_moisture)),
            (LayerKind::Temperature, spec(&self.layers.temperature)),
            (LayerKind::Dryness, spec(&self.layers.dryness)),
            (LayerKind::Minerals, spec(&self.layers.minerals)),
        ]))
    }

    /// The suitability predicate thresholds.
    pub fn to_thresholds(&self) -> Thresholds {
        Thresholds {
            min_moisture: self.thresholds.min_moisture,
            min_temperature_c: self.thresholds.min_temperature_c,
            max_dryness: self.thresholds.max_dryness,
        }
    }

    /// The land-surface temperature encoding.
    pub fn to_temperature_encoding(&self) -> LinearEncoding {
        LinearEncoding {
            scale: self.temperature.scale,
            offset: self.temperature.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapters_from_defaults() {
        let config = ConfigFile::default();
        let region = config.to_region().unwrap();
        assert_eq!(region.min_lon, -75.0);
        assert_eq!(region.max_lat, 41.0);

        let range = config.to_date_range().unwrap();
        assert_eq!(range.start.to_string(), "2023-01-01");

        let registry = config.to_registry().unwrap();
        assert_eq!(
            registry.get(LayerKind::Rain).unwrap().dataset_id,
            defaults::RAIN_DATASET
        );
        assert_eq!(
            registry.get(LayerKind::Dryness).unwrap().bands,
            vec!["B8", "B4"]
        );

        let thresholds = config.to_thresholds();
        assert_eq!(thresholds.max_dryness, 0.5);

        let encoding = config.to_temperature_encoding();
        assert_eq!(encoding.offset, -273.15);
    }

    #[test]
    fn test_to_region_rejects_inverted_bounds() {
        let mut config = ConfigFile::default();
        config.region.min_lat = 50.0;
        assert!(config.to_region().is_err());
    }
}
