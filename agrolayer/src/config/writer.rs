//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use super::settings::{ConfigFile, LayerSettings};
use crate::render::Color;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[region]
; Region of interest as a geographic bounding box, degrees.
min_lon = {min_lon}
min_lat = {min_lat}
max_lon = {max_lon}
max_lat = {max_lat}
; Zoom level for the map center directive (0-18).
zoom = {zoom}

[dates]
; Temporal window shared by every layer. Half-open: the end date
; itself is excluded.
start = {start}
end = {end}

[thresholds]
; Planting suitability predicate. A cell is suitable when all three
; conditions hold. These are starting points, not agronomic truth;
; tune them for your crop and region.
min_moisture = {min_moisture}
min_temperature_c = {min_temperature_c}
max_dryness = {max_dryness}

[temperature]
; Raw land-surface temperature samples decode as:
;   celsius = raw * scale + offset
scale = {temp_scale}
offset = {temp_offset}

{rain}
{soil_moisture}
{temperature}
{dryness}
{minerals}
[suitability]
; Visualization of the suitability mask (0 = unsuitable, 1 = suitable).
vis_min = {suit_min}
vis_max = {suit_max}
palette = {suit_palette}

[logging]
; Log file path. The directory is created if missing.
file = {log_file}
"#,
        min_lon = config.region.min_lon,
        min_lat = config.region.min_lat,
        max_lon = config.region.max_lon,
        max_lat = config.region.max_lat,
        zoom = config.region.zoom,
        start = config.dates.start,
        end = config.dates.end,
        min_moisture = config.thresholds.min_moisture,
        min_temperature_c = config.thresholds.min_temperature_c,
        max_dryness = config.thresholds.max_dryness,
        temp_scale = config.temperature.scale,
        temp_offset = config.temperature.offset,
        rain = layer_section("rain", &config.layers.rain),
        soil_moisture = layer_section("soil_moisture", &config.layers.soil_moisture),
        temperature = layer_section("temperature", &config.layers.temperature),
        dryness = layer_section("dryness", &config.layers.dryness),
        minerals = layer_section("minerals", &config.layers.minerals),
        suit_min = config.suitability.vis_min,
        suit_max = config.suitability.vis_max,
        suit_palette = palette_string(&config.suitability.palette),
        log_file = config.logging.file.display(),
    )
}

fn layer_section(name: &str, layer: &LayerSettings) -> String {
    let mut section = format!(
        "[layer.{name}]\ndataset = {dataset}\nbands = {bands}\nvis_min = {vis_min}\nvis_max = {vis_max}\n",
        name = name,
        dataset = layer.dataset,
        bands = layer.bands.join(","),
        vis_min = layer.vis_min,
        vis_max = layer.vis_max,
    );
    if !layer.palette.is_empty() {
        section.push_str(&format!("palette = {}\n", palette_string(&layer.palette)));
    }
    section
}

fn palette_string(palette: &[Color]) -> String {
    palette
        .iter()
        .map(|c| format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ini::Ini;

    #[test]
    fn test_roundtrip_through_parser() {
        let config = ConfigFile::default();
        let text = to_config_string(&config);
        let ini = Ini::load_from_str(&text).unwrap();
        let parsed = super::super::parser::parse_ini(&ini).unwrap();
        assert_eq!(parsed, config, "saving then loading must be lossless");
    }

    #[test]
    fn test_palette_serialized_as_hex() {
        let s = palette_string(&[Color::rgb(255, 0, 0), Color::rgb(0, 128, 0)]);
        assert_eq!(s, "#ff0000,#008000");
    }
}
