//! Band transformer module
//!
//! Per-layer post-processing that turns aggregated raw bands into
//! analysis-ready rasters: land-surface temperature decoding, NDVI,
//! dryness inversion, and the minerals RGB pass-through. Every
//! transform propagates missing cells and refuses mismatched extents.

use crate::raster::{CompositeLayer, RasterError, RasterLayer};
use thiserror::Error;

/// MODIS LST_Day_1km encoding: Kelvin = raw * scale, then to Celsius.
pub const LST_SCALE: f64 = 0.02;
pub const KELVIN_OFFSET: f64 = -273.15;

/// Errors that can occur during band transforms.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input layers cover different ground or grids
    #[error("incompatible input layers: {0}")]
    Incompatible(#[from] RasterError),
}

/// Linear encoding of a raw band: `value * scale + offset`.
///
/// Used for temperature, where the dataset stores scaled Kelvin and
/// the analysis wants Celsius. No empty fallback exists here: an empty
/// collection has already failed in the aggregator, so a raw raster
/// always reflects real samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearEncoding {
    pub scale: f64,
    pub offset: f64,
}

impl Default for LinearEncoding {
    fn default() -> Self {
        LinearEncoding {
            scale: LST_SCALE,
            offset: KELVIN_OFFSET,
        }
    }
}

/// Decodes a raw land-surface temperature raster to degrees Celsius.
pub fn temperature_celsius(raw: &RasterLayer, encoding: LinearEncoding) -> RasterLayer {
    raw.map("temperature_c", |v| v * encoding.scale + encoding.offset)
}

/// Normalized difference vegetation index: `(nir - red) / (nir + red)`.
///
/// The 0/0 cell is missing by convention, not zero and not an error;
/// no NaN ever leaks into downstream comparisons.
pub fn ndvi(nir: &RasterLayer, red: &RasterLayer) -> Result<RasterLayer, TransformError> {
    let layer = nir.zip_with(red, "ndvi", |n, r| {
        let denom = n + r;
        if denom == 0.0 {
            None
        } else {
            Some((n - r) / denom)
        }
    })?;
    Ok(layer)
}

/// Dryness is the elementwise negation of NDVI.
pub fn dryness(ndvi: &RasterLayer) -> RasterLayer {
    ndvi.map("dryness", |v| -v)
}

/// Wraps three raw spectral bands as an RGB composite, unchanged.
pub fn mineral_composite(
    b11: RasterLayer,
    b12: RasterLayer,
    b8: RasterLayer,
) -> Result<CompositeLayer, TransformError> {
    Ok(CompositeLayer::new("minerals", b11, b12, b8)?)
}
