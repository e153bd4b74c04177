//! PNG rendering surface.
//!
//! Draws each presented layer as an RGBA PNG in an output directory.
//! Scalar layers go through the palette ramp; composites stretch each
//! band onto its color channel. Missing cells are fully transparent,
//! which keeps the false/missing distinction visible in the output.

use crate::geo::Region;
use crate::raster::{CompositeLayer, RasterLayer};
use crate::render::{
    sample_ramp, LayerImage, RampStyle, RenderError, RenderSurface, VisualizationSpec,
};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::info;

/// A surface that writes one `NN_label.png` file per presented layer.
#[derive(Debug)]
pub struct PngSurface {
    out_dir: PathBuf,
    sequence: usize,
}

impl PngSurface {
    /// Creates the output directory if needed.
    pub fn create(out_dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir)?;
        Ok(PngSurface {
            out_dir,
            sequence: 0,
        })
    }

    fn next_path(&mut self, label: &str) -> PathBuf {
        let slug: String = label
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        self.sequence += 1;
        self.out_dir.join(format!("{:02}_{}.png", self.sequence, slug))
    }

    fn scalar_image(
        layer: &RasterLayer,
        vis: &VisualizationSpec,
    ) -> Result<RgbaImage, RenderError> {
        let mut img = RgbaImage::new(layer.width() as u32, layer.height() as u32);
        for row in 0..layer.height() {
            for col in 0..layer.width() {
                // Indices are in range by construction.
                let cell = layer.get(row, col).map_err(|e| {
                    RenderError::Encode(format!("cell read failed: {}", e))
                })?;
                let pixel = match cell {
                    Some(value) => {
                        let color = sample_ramp(vis, value)?;
                        Rgba([color.r, color.g, color.b, 255])
                    }
                    None => Rgba([0, 0, 0, 0]),
                };
                img.put_pixel(col as u32, row as u32, pixel);
            }
        }
        Ok(img)
    }

    fn composite_image(
        layer: &CompositeLayer,
        vis: &VisualizationSpec,
    ) -> Result<RgbaImage, RenderError> {
        let mut img = RgbaImage::new(layer.width() as u32, layer.height() as u32);
        let stretch = |v: f64| -> u8 { (vis.normalize(v) * 255.0).round() as u8 };
        let bands = layer.bands();
        for row in 0..layer.height() {
            for col in 0..layer.width() {
                let mut channels = [0u8; 3];
                let mut missing = false;
                for (i, band) in bands.iter().enumerate() {
                    match band.get(row, col).map_err(|e| {
                        RenderError::Encode(format!("cell read failed: {}", e))
                    })? {
                        Some(v) => channels[i] = stretch(v),
                        None => missing = true,
                    }
                }
                let pixel = if missing {
                    Rgba([0, 0, 0, 0])
                } else {
                    Rgba([channels[0], channels[1], channels[2], 255])
                };
                img.put_pixel(col as u32, row as u32, pixel);
            }
        }
        Ok(img)
    }
}

impl RenderSurface for PngSurface {
    fn add_layer(
        &mut self,
        image: LayerImage,
        vis: &VisualizationSpec,
        label: &str,
    ) -> Result<(), RenderError> {
        let rgba = match (&image, &vis.style) {
            (LayerImage::Scalar(layer), RampStyle::Palette(_)) => Self::scalar_image(layer, vis)?,
            (LayerImage::Composite(layer), RampStyle::RgbComposite) => {
                Self::composite_image(layer, vis)?
            }
            (LayerImage::Scalar(_), RampStyle::RgbComposite) => {
                return Err(RenderError::StyleMismatch(
                    "scalar layer with composite style".to_string(),
                ))
            }
            (LayerImage::Composite(_), RampStyle::Palette(_)) => {
                return Err(RenderError::StyleMismatch(
                    "composite layer with palette style".to_string(),
                ))
            }
        };
        let path = self.next_path(label);
        rgba.save(&path)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        info!(label, path = %path.display(), "layer rendered");
        Ok(())
    }

    fn center(&mut self, region: &Region, zoom: u8) {
        info!(
            min_lon = region.min_lon,
            min_lat = region.min_lat,
            max_lon = region.max_lon,
            max_lat = region.max_lat,
            zoom,
            "map centered"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    fn region() -> Region {
        Region::new(-75.0, 40.0, -74.0, 41.0).unwrap()
    }

    #[test]
    fn test_scalar_layer_written_with_transparent_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PngSurface::create(dir.path()).unwrap();
        let layer = RasterLayer::from_cells(
            "l",
            region(),
            2,
            1,
            vec![Some(1.0), None],
        )
        .unwrap();
        let vis = VisualizationSpec::palette(
            0.0,
            1.0,
            vec![Color::rgb(0, 0, 0), Color::rgb(255, 0, 0)],
        );
        surface
            .add_layer(LayerImage::Scalar(layer), &vis, "Rain")
            .unwrap();

        let path = dir.path().join("01_rain.png");
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(
            img.get_pixel(1, 0),
            &Rgba([0, 0, 0, 0]),
            "missing cell must be transparent"
        );
    }

    #[test]
    fn test_style_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PngSurface::create(dir.path()).unwrap();
        let layer = RasterLayer::filled("l", region(), 1, 1, Some(1.0)).unwrap();
        let vis = VisualizationSpec::composite(0.0, 1.0);
        let result = surface.add_layer(LayerImage::Scalar(layer), &vis, "bad");
        assert!(matches!(result, Err(RenderError::StyleMismatch(_))));
    }

    #[test]
    fn test_composite_layer_stretches_channels() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = PngSurface::create(dir.path()).unwrap();
        let band = |v: f64| RasterLayer::filled("b", region(), 1, 1, Some(v)).unwrap();
        let composite =
            CompositeLayer::new("m", band(4000.0), band(500.0), band(2250.0)).unwrap();
        let vis = VisualizationSpec::composite(500.0, 4000.0);
        surface
            .add_layer(LayerImage::Composite(composite), &vis, "Minerals")
            .unwrap();

        let img = image::open(dir.path().join("01_minerals.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 0, 128, 255]));
    }
}
