//! Default values and constants for all configuration settings.
//!
//! Every hardcoded-looking number in the pipeline lives here: region
//! bounds, dataset identifiers, band selectors, visualization ranges,
//! palettes, thresholds, and the temperature encoding. The values are
//! the ones the analysis was published with.

use super::settings::*;
use crate::render::Color;
use chrono::NaiveDate;
use std::path::PathBuf;

// =============================================================================
// Region and dates
// =============================================================================

pub const DEFAULT_MIN_LON: f64 = -75.0;
pub const DEFAULT_MIN_LAT: f64 = 40.0;
pub const DEFAULT_MAX_LON: f64 = -74.0;
pub const DEFAULT_MAX_LAT: f64 = 41.0;
pub const DEFAULT_ZOOM: u8 = 8;

pub const DEFAULT_START: (i32, u32, u32) = (2023, 1, 1);
pub const DEFAULT_END: (i32, u32, u32) = (2023, 12, 31);

// =============================================================================
// Datasets and bands
// =============================================================================

pub const RAIN_DATASET: &str = "NASA/GPM_L3/IMERG_V06";
pub const RAIN_BAND: &str = "precipitationCal";

pub const SOIL_MOISTURE_DATASET: &str = "NASA_USDA/HSL/SMAP10KM_soil_moisture";
pub const SOIL_MOISTURE_BAND: &str = "ssm";

pub const TEMPERATURE_DATASET: &str = "MODIS/006/MOD11A2";
pub const TEMPERATURE_BAND: &str = "LST_Day_1km";

pub const SENTINEL2_DATASET: &str = "COPERNICUS/S2";
/// NDVI inputs: near-infrared first, red second.
pub const DRYNESS_BANDS: [&str; 2] = ["B8", "B4"];
/// Rendered directly as an RGB triple.
pub const MINERALS_BANDS: [&str; 3] = ["B11", "B12", "B8"];

// =============================================================================
// Thresholds and encoding
// =============================================================================

pub const DEFAULT_MIN_MOISTURE: f64 = 0.2;
pub const DEFAULT_MIN_TEMPERATURE_C: f64 = 15.0;
pub const DEFAULT_MAX_DRYNESS: f64 = 0.5;

pub const DEFAULT_TEMPERATURE_SCALE: f64 = 0.02;
pub const DEFAULT_TEMPERATURE_OFFSET: f64 = -273.15;

// =============================================================================
// Visualization
// =============================================================================

const BLUE: Color = Color::rgb(0, 0, 255);
const CYAN: Color = Color::rgb(0, 255, 255);
const GREEN: Color = Color::rgb(0, 128, 0);
const YELLOW: Color = Color::rgb(255, 255, 0);
const ORANGE: Color = Color::rgb(255, 165, 0);
const RED: Color = Color::rgb(255, 0, 0);
const WHITE: Color = Color::rgb(255, 255, 255);
const BROWN: Color = Color::rgb(165, 42, 42);
const BLACK: Color = Color::rgb(0, 0, 0);

pub const RAIN_VIS: (f64, f64) = (0.0, 10.0);
pub const RAIN_PALETTE: [Color; 6] = [BLUE, CYAN, GREEN, YELLOW, ORANGE, RED];

pub const SOIL_MOISTURE_VIS: (f64, f64) = (0.0, 0.5);
pub const SOIL_MOISTURE_PALETTE: [Color; 3] = [WHITE, BLUE, GREEN];

pub const TEMPERATURE_VIS: (f64, f64) = (10.0, 40.0);
pub const TEMPERATURE_PALETTE: [Color; 3] = [BLUE, YELLOW, RED];

pub const DRYNESS_VIS: (f64, f64) = (0.0, 1.0);
pub const DRYNESS_PALETTE: [Color; 3] = [WHITE, BROWN, BLACK];

pub const MINERALS_VIS: (f64, f64) = (500.0, 4000.0);

pub const SUITABILITY_VIS: (f64, f64) = (0.0, 1.0);
pub const SUITABILITY_PALETTE: [Color; 2] = [RED, GREEN];

// =============================================================================
// Logging
// =============================================================================

pub const DEFAULT_LOG_FILE: &str = "logs/agrolayer.log";

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    // The constants above are valid calendar dates.
    NaiveDate::from_ymd_opt(y, m, d).expect("default date constant is valid")
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            region: RegionSettings {
                min_lon: DEFAULT_MIN_LON,
                min_lat: DEFAULT_MIN_LAT,
                max_lon: DEFAULT_MAX_LON,
                max_lat: DEFAULT_MAX_LAT,
                zoom: DEFAULT_ZOOM,
            },
            dates: DateSettings {
                start: ymd(DEFAULT_START),
                end: ymd(DEFAULT_END),
            },
            thresholds: ThresholdSettings {
                min_moisture: DEFAULT_MIN_MOISTURE,
                min_temperature_c: DEFAULT_MIN_TEMPERATURE_C,
                max_dryness: DEFAULT_MAX_DRYNESS,
            },
            temperature: TemperatureSettings {
                scale: DEFAULT_TEMPERATURE_SCALE,
                offset: DEFAULT_TEMPERATURE_OFFSET,
            },
            layers: LayerTable {
                rain: LayerSettings {
                    dataset: RAIN_DATASET.to_string(),
                    bands: vec![RAIN_BAND.to_string()],
                    vis_min: RAIN_VIS.0,
                    vis_max: RAIN_VIS.1,
                    palette: RAIN_PALETTE.to_vec(),
                },
                soil_moisture: LayerSettings {
                    dataset: SOIL_MOISTURE_DATASET.to_string(),
                    bands: vec![SOIL_MOISTURE_BAND.to_string()],
                    vis_min: SOIL_MOISTURE_VIS.0,
                    vis_max: SOIL_MOISTURE_VIS.1,
                    palette: SOIL_MOISTURE_PALETTE.to_vec(),
                },
                temperature: LayerSettings {
                    dataset: TEMPERATURE_DATASET.to_string(),
                    bands: vec![TEMPERATURE_BAND.to_string()],
                    vis_min: TEMPERATURE_VIS.0,
                    vis_max: TEMPERATURE_VIS.1,
                    palette: TEMPERATURE_PALETTE.to_vec(),
                },
                dryness: LayerSettings {
                    dataset: SENTINEL2_DATASET.to_string(),
                    bands: DRYNESS_BANDS.iter().map(|b| b.to_string()).collect(),
                    vis_min: DRYNESS_VIS.0,
                    vis_max: DRYNESS_VIS.1,
                    palette: DRYNESS_PALETTE.to_vec(),
                },
                minerals: LayerSettings {
                    dataset: SENTINEL2_DATASET.to_string(),
                    bands: MINERALS_BANDS.iter().map(|b| b.to_string()).collect(),
                    vis_min: MINERALS_VIS.0,
                    vis_max: MINERALS_VIS.1,
                    palette: Vec::new(),
                },
            },
            suitability: SuitabilitySettings {
                vis_min: SUITABILITY_VIS.0,
                vis_max: SUITABILITY_VIS.1,
                palette: SUITABILITY_PALETTE.to_vec(),
            },
            logging: LoggingSettings {
                file: PathBuf::from(DEFAULT_LOG_FILE),
            },
        }
    }
}
