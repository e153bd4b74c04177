//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use crate::render::Color;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Region of interest and display zoom
    pub region: RegionSettings,
    /// Shared temporal window for all layers
    pub dates: DateSettings,
    /// Suitability predicate thresholds
    pub thresholds: ThresholdSettings,
    /// Land-surface temperature encoding
    pub temperature: TemperatureSettings,
    /// Per-layer dataset and visualization settings
    pub layers: LayerTable,
    /// Suitability mask visualization
    pub suitability: SuitabilitySettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Region of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSettings {
    /// Western edge in degrees
    pub min_lon: f64,
    /// Southern edge in degrees
    pub min_lat: f64,
    /// Eastern edge in degrees
    pub max_lon: f64,
    /// Northern edge in degrees
    pub max_lat: f64,
    /// Zoom level for the center directive
    pub zoom: u8,
}

/// Temporal window shared by every layer, half-open.
#[derive(Debug, Clone, PartialEq)]
pub struct DateSettings {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Suitability thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSettings {
    /// Soil moisture must exceed this fraction
    pub min_moisture: f64,
    /// Temperature must exceed this many degrees Celsius
    pub min_temperature_c: f64,
    /// Dryness must stay below this value
    pub max_dryness: f64,
}

/// Land-surface temperature band encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSettings {
    /// Multiplier from raw samples to Kelvin
    pub scale: f64,
    /// Additive offset applied after scaling (Kelvin to Celsius)
    pub offset: f64,
}

/// Dataset and visualization settings for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSettings {
    /// Catalog identifier of the dataset
    pub dataset: String,
    /// Bands to aggregate, in transformer order
    pub bands: Vec<String>,
    /// Value mapped to the start of the ramp
    pub vis_min: f64,
    /// Value mapped to the end of the ramp
    pub vis_max: f64,
    /// Ordered color stops; unused by the minerals RGB composite
    pub palette: Vec<Color>,
}

/// The five layer sections.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerTable {
    pub rain: LayerSettings,
    pub soil_moisture: LayerSettings,
    pub temperature: LayerSettings,
    pub dryness: LayerSettings,
    pub minerals: LayerSettings,
}

/// Suitability mask visualization.
#[derive(Debug, Clone, PartialEq)]
pub struct SuitabilitySettings {
    pub vis_min: f64,
    pub vis_max: f64,
    pub palette: Vec<Color>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
