//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::{ConfigFile, LayerSettings};
use crate::render::Color;
use chrono::NaiveDate;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [region] section
    if let Some(section) = ini.section(Some("region")) {
        for (key, field) in [
            ("min_lon", &mut config.region.min_lon),
            ("min_lat", &mut config.region.min_lat),
            ("max_lon", &mut config.region.max_lon),
            ("max_lat", &mut config.region.max_lat),
        ] {
            if let Some(v) = section.get(key) {
                *field = parse_f64("region", key, v)?;
            }
        }
        if let Some(v) = section.get("zoom") {
            config.region.zoom = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "region".to_string(),
                key: "zoom".to_string(),
                value: v.to_string(),
                reason: "expected an integer between 0 and 18".to_string(),
            })?;
        }
    }

    // [dates] section
    if let Some(section) = ini.section(Some("dates")) {
        if let Some(v) = section.get("start") {
            config.dates.start = parse_date("dates", "start", v)?;
        }
        if let Some(v) = section.get("end") {
            config.dates.end = parse_date("dates", "end", v)?;
        }
    }

    // [thresholds] section
    if let Some(section) = ini.section(Some("thresholds")) {
        for (key, field) in [
            ("min_moisture", &mut config.thresholds.min_moisture),
            (
                "min_temperature_c",
                &mut config.thresholds.min_temperature_c,
            ),
            ("max_dryness", &mut config.thresholds.max_dryness),
        ] {
            if let Some(v) = section.get(key) {
                *field = parse_f64("thresholds", key, v)?;
            }
        }
    }

    // [temperature] section
    if let Some(section) = ini.section(Some("temperature")) {
        if let Some(v) = section.get("scale") {
            config.temperature.scale = parse_f64("temperature", "scale", v)?;
        }
        if let Some(v) = section.get("offset") {
            config.temperature.offset = parse_f64("temperature", "offset", v)?;
        }
    }

    // [layer.*] sections
    for (name, layer) in [
        ("layer.rain", &mut config.layers.rain),
        ("layer.soil_moisture", &mut config.layers.soil_moisture),
        ("layer.temperature", &mut config.layers.temperature),
        ("layer.dryness", &mut config.layers.dryness),
        ("layer.minerals", &mut config.layers.minerals),
    ] {
        if let Some(section) = ini.section(Some(name)) {
            parse_layer(name, section, layer)?;
        }
    }

    // [suitability] section
    if let Some(section) = ini.section(Some("suitability")) {
        if let Some(v) = section.get("vis_min") {
            config.suitability.vis_min = parse_f64("suitability", "vis_min", v)?;
        }
        if let Some(v) = section.get("vis_max") {
            config.suitability.vis_max = parse_f64("suitability", "vis_max", v)?;
        }
        if let Some(v) = section.get("palette") {
            config.suitability.palette = parse_palette("suitability", "palette", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn parse_layer(
    section_name: &str,
    section: &ini::Properties,
    layer: &mut LayerSettings,
) -> Result<(), ConfigFileError> {
    if let Some(v) = section.get("dataset") {
        let v = v.trim();
        if !v.is_empty() {
            layer.dataset = v.to_string();
        }
    }
    if let Some(v) = section.get("bands") {
        let bands: Vec<String> = v
            .split(',')
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        if bands.is_empty() {
            return Err(ConfigFileError::InvalidValue {
                section: section_name.to_string(),
                key: "bands".to_string(),
                value: v.to_string(),
                reason: "expected a comma-separated list of band names".to_string(),
            });
        }
        layer.bands = bands;
    }
    if let Some(v) = section.get("vis_min") {
        layer.vis_min = parse_f64(section_name, "vis_min", v)?;
    }
    if let Some(v) = section.get("vis_max") {
        layer.vis_max = parse_f64(section_name, "vis_max", v)?;
    }
    if let Some(v) = section.get("palette") {
        layer.palette = parse_palette(section_name, "palette", v)?;
    }
    Ok(())
}

fn parse_f64(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected a number".to_string(),
        })
}

fn parse_date(section: &str, key: &str, value: &str) -> Result<NaiveDate, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected a date in YYYY-MM-DD format".to_string(),
        })
}

fn parse_palette(section: &str, key: &str, value: &str) -> Result<Vec<Color>, ConfigFileError> {
    value
        .split(',')
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| {
            Color::parse(c).map_err(|_| ConfigFileError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                value: value.to_string(),
                reason: format!("unknown color '{}' (use a name or #rrggbb)", c),
            })
        })
        .collect()
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
