//! Three-band RGB composite.

use crate::raster::{RasterError, RasterLayer};

/// Exactly three same-extent scalar layers treated as an RGB band triple.
///
/// Used for the minerals layer, where raw spectral bands are rendered
/// directly as color channels instead of going through a palette ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLayer {
    name: String,
    bands: [RasterLayer; 3],
}

impl CompositeLayer {
    /// Builds a composite, checking that all three bands share the same
    /// extent and grid size.
    pub fn new(
        name: impl Into<String>,
        red: RasterLayer,
        green: RasterLayer,
        blue: RasterLayer,
    ) -> Result<Self, RasterError> {
        red.check_compatible(&green)?;
        red.check_compatible(&blue)?;
        Ok(CompositeLayer {
            name: name.into(),
            bands: [red, green, blue],
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bands in channel order: red, green, blue.
    pub fn bands(&self) -> &[RasterLayer; 3] {
        &self.bands
    }

    pub fn region(&self) -> &crate::geo::Region {
        self.bands[0].region()
    }

    pub fn width(&self) -> usize {
        self.bands[0].width()
    }

    pub fn height(&self) -> usize {
        self.bands[0].height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Region;

    #[test]
    fn test_new_rejects_mismatched_bands() {
        let region = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let a = RasterLayer::filled("a", region, 2, 2, Some(1.0)).unwrap();
        let b = RasterLayer::filled("b", region, 2, 2, Some(2.0)).unwrap();
        let c = RasterLayer::filled("c", region, 3, 3, Some(3.0)).unwrap();
        let result = CompositeLayer::new("rgb", a, b, c);
        assert!(matches!(result, Err(RasterError::GridMismatch { .. })));
    }

    #[test]
    fn test_band_order_is_preserved() {
        let region = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let r = RasterLayer::filled("r", region, 1, 1, Some(1.0)).unwrap();
        let g = RasterLayer::filled("g", region, 1, 1, Some(2.0)).unwrap();
        let b = RasterLayer::filled("b", region, 1, 1, Some(3.0)).unwrap();
        let composite = CompositeLayer::new("rgb", r, g, b).unwrap();
        assert_eq!(composite.bands()[0].cells(), &[Some(1.0)]);
        assert_eq!(composite.bands()[1].cells(), &[Some(2.0)]);
        assert_eq!(composite.bands()[2].cells(), &[Some(3.0)]);
    }
}
