//! Rendering types and traits

use crate::geo::Region;
use crate::raster::{CompositeLayer, RasterLayer};
use thiserror::Error;

/// Errors that can occur while presenting a layer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A palette ramp needs at least one color
    #[error("empty color palette")]
    EmptyPalette,

    /// A composite image was presented with a palette style (or vice versa)
    #[error("visualization style does not match layer shape: {0}")]
    StyleMismatch(String),

    /// Writing the output failed
    #[error("render I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding failed
    #[error("image encode failed: {0}")]
    Encode(String),
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error parsing a color from text.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown color: '{0}' (expected a named color or #rrggbb)")]
pub struct ColorParseError(pub String);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parses `#rrggbb` hex or one of the web color names the default
    /// palettes use.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return Ok(Color::rgb(r, g, b));
                }
            }
            return Err(ColorParseError(s.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::rgb(0, 0, 0)),
            "white" => Ok(Color::rgb(255, 255, 255)),
            "red" => Ok(Color::rgb(255, 0, 0)),
            "green" => Ok(Color::rgb(0, 128, 0)),
            "blue" => Ok(Color::rgb(0, 0, 255)),
            "cyan" => Ok(Color::rgb(0, 255, 255)),
            "yellow" => Ok(Color::rgb(255, 255, 0)),
            "orange" => Ok(Color::rgb(255, 165, 0)),
            "brown" => Ok(Color::rgb(165, 42, 42)),
            _ => Err(ColorParseError(s.to_string())),
        }
    }
}

/// How values map to colors.
#[derive(Debug, Clone, PartialEq)]
pub enum RampStyle {
    /// Linear interpolation across an ordered color sequence
    Palette(Vec<Color>),
    /// Three raw bands stretched onto the red, green, blue channels
    RgbComposite,
}

/// Value-to-color mapping for one layer: purely descriptive, never
/// touches the underlying data.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationSpec {
    /// Value mapped to the start of the ramp (or channel black point)
    pub min: f64,
    /// Value mapped to the end of the ramp (or channel white point)
    pub max: f64,
    pub style: RampStyle,
}

impl VisualizationSpec {
    pub fn palette(min: f64, max: f64, colors: Vec<Color>) -> Self {
        VisualizationSpec {
            min,
            max,
            style: RampStyle::Palette(colors),
        }
    }

    pub fn composite(min: f64, max: f64) -> Self {
        VisualizationSpec {
            min,
            max,
            style: RampStyle::RgbComposite,
        }
    }

    /// Normalizes a value into [0, 1] over the spec's range, clamped
    /// at both ends.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// What a presentation call carries: either a scalar layer rendered
/// through a palette ramp, or a three-band composite rendered as RGB.
#[derive(Debug, Clone)]
pub enum LayerImage {
    Scalar(RasterLayer),
    Composite(CompositeLayer),
}

impl LayerImage {
    pub fn region(&self) -> &Region {
        match self {
            LayerImage::Scalar(layer) => layer.region(),
            LayerImage::Composite(layer) => layer.region(),
        }
    }
}

/// Samples the color for a value on a palette ramp.
///
/// The value is normalized over `[vis.min, vis.max]` (clamped at both
/// ends), then linearly interpolated between the two nearest palette
/// stops.
pub fn sample_ramp(vis: &VisualizationSpec, value: f64) -> Result<Color, RenderError> {
    let colors = match &vis.style {
        RampStyle::Palette(colors) => colors,
        RampStyle::RgbComposite => {
            return Err(RenderError::StyleMismatch(
                "sample_ramp needs a palette style".to_string(),
            ))
        }
    };
    if colors.is_empty() {
        return Err(RenderError::EmptyPalette);
    }
    if colors.len() == 1 {
        return Ok(colors[0]);
    }

    let t = vis.normalize(value);
    let position = t * (colors.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = (low + 1).min(colors.len() - 1);
    let frac = position - low as f64;

    let lerp = |a: u8, b: u8| -> u8 { (a as f64 + (b as f64 - a as f64) * frac).round() as u8 };
    Ok(Color::rgb(
        lerp(colors[low].r, colors[high].r),
        lerp(colors[low].g, colors[high].g),
        lerp(colors[low].b, colors[high].b),
    ))
}

/// The external rendering surface.
///
/// The sole place in the pipeline with an observable side effect.
/// Implementations receive layers in presentation order plus a single
/// center-and-zoom directive.
pub trait RenderSurface {
    /// Draws one layer with its visualization spec and display label.
    fn add_layer(
        &mut self,
        image: LayerImage,
        vis: &VisualizationSpec,
        label: &str,
    ) -> Result<(), RenderError>;

    /// Centers the display on a region at a zoom level.
    fn center(&mut self, region: &Region, zoom: u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_names_and_hex() {
        assert_eq!(Color::parse("blue").unwrap(), Color::rgb(0, 0, 255));
        assert_eq!(Color::parse("Brown").unwrap(), Color::rgb(165, 42, 42));
        assert_eq!(Color::parse("#ff8000").unwrap(), Color::rgb(255, 128, 0));
        assert!(Color::parse("chartreuse-ish").is_err());
        assert!(Color::parse("#12345").is_err());
    }

    #[test]
    fn test_sample_ramp_endpoints_and_clamping() {
        let vis = VisualizationSpec::palette(
            0.0,
            10.0,
            vec![Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)],
        );
        assert_eq!(sample_ramp(&vis, 0.0).unwrap(), Color::rgb(0, 0, 0));
        assert_eq!(sample_ramp(&vis, 10.0).unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(
            sample_ramp(&vis, -5.0).unwrap(),
            Color::rgb(0, 0, 0),
            "values below min clamp to the ramp start"
        );
        assert_eq!(
            sample_ramp(&vis, 99.0).unwrap(),
            Color::rgb(255, 255, 255),
            "values above max clamp to the ramp end"
        );
    }

    #[test]
    fn test_sample_ramp_midpoint_interpolation() {
        let vis = VisualizationSpec::palette(
            0.0,
            1.0,
            vec![Color::rgb(0, 0, 0), Color::rgb(200, 100, 50)],
        );
        assert_eq!(sample_ramp(&vis, 0.5).unwrap(), Color::rgb(100, 50, 25));
    }

    #[test]
    fn test_sample_ramp_multi_stop() {
        let vis = VisualizationSpec::palette(
            0.0,
            1.0,
            vec![
                Color::rgb(255, 0, 0),
                Color::rgb(0, 255, 0),
                Color::rgb(0, 0, 255),
            ],
        );
        assert_eq!(
            sample_ramp(&vis, 0.5).unwrap(),
            Color::rgb(0, 255, 0),
            "the middle stop sits at the middle of the range"
        );
    }

    #[test]
    fn test_sample_ramp_rejects_empty_palette() {
        let vis = VisualizationSpec::palette(0.0, 1.0, vec![]);
        assert!(matches!(
            sample_ramp(&vis, 0.5),
            Err(RenderError::EmptyPalette)
        ));
    }

    #[test]
    fn test_normalize_degenerate_range() {
        let vis = VisualizationSpec::palette(5.0, 5.0, vec![Color::rgb(1, 2, 3)]);
        assert_eq!(vis.normalize(99.0), 0.0);
    }
}
