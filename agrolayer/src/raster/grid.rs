//! The scalar raster grid.
//!
//! A [`RasterLayer`] is a named 2D grid of floating-point samples tagged
//! with the geographic extent it covers. Each cell is `Option<f64>`:
//! `None` is the missing marker, and it propagates through every
//! arithmetic and logical operation rather than being defaulted to a
//! sentinel value.

use crate::geo::Region;
use crate::raster::RasterError;

/// A 2D grid of optional floating-point samples with a geographic extent.
///
/// Rows run north to south, columns west to east, row-major storage.
/// The extent invariant: after clipping, a layer's extent equals the
/// clip region exactly, and binary operations refuse layers whose
/// extents or grid sizes differ.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayer {
    name: String,
    region: Region,
    width: usize,
    height: usize,
    cells: Vec<Option<f64>>,
}

impl RasterLayer {
    /// Creates a raster with every cell set to the same value.
    pub fn filled(
        name: impl Into<String>,
        region: Region,
        width: usize,
        height: usize,
        value: Option<f64>,
    ) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSize { width, height });
        }
        Ok(RasterLayer {
            name: name.into(),
            region,
            width,
            height,
            cells: vec![value; width * height],
        })
    }

    /// Creates a raster from a row-major cell buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not `width * height`
    /// or either dimension is zero.
    pub fn from_cells(
        name: impl Into<String>,
        region: Region,
        width: usize,
        height: usize,
        cells: Vec<Option<f64>>,
    ) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSize { width, height });
        }
        if cells.len() != width * height {
            return Err(RasterError::DimensionMismatch {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(RasterLayer {
            name: name.into(),
            region,
            width,
            height,
            cells,
        })
    }

    /// Constructor for sibling modules whose dimensions are already checked.
    pub(crate) fn new_unchecked(
        name: String,
        region: Region,
        width: usize,
        height: usize,
        cells: Vec<Option<f64>>,
    ) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        RasterLayer {
            name,
            region,
            width,
            height,
            cells,
        }
    }

    /// Layer name, used for logging and rendered layer labels.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geographic extent covered by this grid.
    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell size in degrees as (lon_per_cell, lat_per_cell).
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.region.width() / self.width as f64,
            self.region.height() / self.height as f64,
        )
    }

    /// Reads the cell at (row, col); row 0 is the northern edge.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<f64>, RasterError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Writes the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: Option<f64>) -> Result<(), RasterError> {
        let i = self.index(row, col)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Row-major view of the cell buffer.
    pub fn cells(&self) -> &[Option<f64>] {
        &self.cells
    }

    /// Returns true when every cell is missing.
    pub fn is_all_missing(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, RasterError> {
        if row >= self.height || col >= self.width {
            return Err(RasterError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row * self.width + col)
    }

    /// Geographic center of the cell at (row, col).
    fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        let (dx, dy) = self.cell_size();
        let lon = self.region.min_lon + (col as f64 + 0.5) * dx;
        let lat = self.region.max_lat - (row as f64 + 0.5) * dy;
        (lon, lat)
    }

    /// Samples the value at a geographic point by nearest cell center.
    ///
    /// Returns `None` when the point lies outside this layer's extent
    /// or the covering cell is missing.
    pub fn sample(&self, lon: f64, lat: f64) -> Option<f64> {
        if !self.region.contains(lon, lat) {
            return None;
        }
        let (dx, dy) = self.cell_size();
        let col = (((lon - self.region.min_lon) / dx) as usize).min(self.width - 1);
        let row = (((self.region.max_lat - lat) / dy) as usize).min(self.height - 1);
        self.cells[row * self.width + col]
    }

    /// Applies a per-cell function, preserving missing cells.
    pub fn map(&self, name: impl Into<String>, f: impl Fn(f64) -> f64) -> RasterLayer {
        RasterLayer {
            name: name.into(),
            region: self.region,
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|c| c.map(&f)).collect(),
        }
    }

    /// Combines two layers per cell.
    ///
    /// The closure receives both samples only when both are present;
    /// it may still return `None` (e.g. NDVI's 0/0 convention). A
    /// missing cell in either operand yields a missing result cell.
    ///
    /// # Errors
    ///
    /// Returns an error when the layers' extents or grid sizes differ;
    /// mismatched layers are never silently resampled.
    pub fn zip_with(
        &self,
        other: &RasterLayer,
        name: impl Into<String>,
        f: impl Fn(f64, f64) -> Option<f64>,
    ) -> Result<RasterLayer, RasterError> {
        self.check_compatible(other)?;
        let cells = self
            .cells
            .iter()
            .zip(other.cells.iter())
            .map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => f(*a, *b),
                _ => None,
            })
            .collect();
        Ok(RasterLayer {
            name: name.into(),
            region: self.region,
            width: self.width,
            height: self.height,
            cells,
        })
    }

    /// Checks that another layer covers the same ground with the same grid.
    pub fn check_compatible(&self, other: &RasterLayer) -> Result<(), RasterError> {
        if self.region != other.region {
            return Err(RasterError::ExtentMismatch {
                a: self.region,
                b: other.region,
            });
        }
        if self.width != other.width || self.height != other.height {
            return Err(RasterError::GridMismatch {
                a_width: self.width,
                a_height: self.height,
                b_width: other.width,
                b_height: other.height,
            });
        }
        Ok(())
    }

    /// Resamples this layer onto an explicit target grid.
    ///
    /// Every target cell takes the value of the source cell whose
    /// center covers the target cell's center (nearest cell-center
    /// sampling). Target cells outside the source extent are missing.
    /// The result's extent equals `region` exactly.
    pub fn resample_to(
        &self,
        region: Region,
        width: usize,
        height: usize,
    ) -> Result<RasterLayer, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSize { width, height });
        }
        let mut cells = Vec::with_capacity(width * height);
        let dx = region.width() / width as f64;
        let dy = region.height() / height as f64;
        for row in 0..height {
            let lat = region.max_lat - (row as f64 + 0.5) * dy;
            for col in 0..width {
                let lon = region.min_lon + (col as f64 + 0.5) * dx;
                cells.push(self.sample(lon, lat));
            }
        }
        Ok(RasterLayer {
            name: self.name.clone(),
            region,
            width,
            height,
            cells,
        })
    }

    /// Clips this layer to a region at its own resolution.
    ///
    /// The target grid keeps the source cell size (at least one cell
    /// per axis) and its extent equals `region` exactly, even where the
    /// source does not cover it (those cells come back missing).
    pub fn clip(&self, region: Region) -> Result<RasterLayer, RasterError> {
        let (dx, dy) = self.cell_size();
        let width = ((region.width() / dx).round() as usize).max(1);
        let height = ((region.height() / dy).round() as usize).max(1);
        self.resample_to(region, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        Region::new(-75.0, 40.0, -74.0, 41.0).unwrap()
    }

    fn grid_2x2(cells: [Option<f64>; 4]) -> RasterLayer {
        RasterLayer::from_cells("test", region(), 2, 2, cells.to_vec()).unwrap()
    }

    #[test]
    fn test_from_cells_checks_dimensions() {
        let result = RasterLayer::from_cells("bad", region(), 2, 2, vec![Some(1.0); 3]);
        assert!(matches!(
            result,
            Err(RasterError::DimensionMismatch { cells: 3, .. })
        ));
    }

    #[test]
    fn test_from_cells_rejects_zero_size() {
        let result = RasterLayer::from_cells("bad", region(), 0, 2, vec![]);
        assert!(matches!(result, Err(RasterError::ZeroSize { .. })));
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut layer = RasterLayer::filled("t", region(), 2, 2, None).unwrap();
        layer.set(1, 0, Some(3.5)).unwrap();
        assert_eq!(layer.get(1, 0).unwrap(), Some(3.5));
        assert_eq!(layer.get(0, 0).unwrap(), None);
        assert!(layer.get(2, 0).is_err());
    }

    #[test]
    fn test_map_preserves_missing() {
        let layer = grid_2x2([Some(1.0), None, Some(2.0), Some(3.0)]);
        let doubled = layer.map("doubled", |v| v * 2.0);
        assert_eq!(
            doubled.cells(),
            &[Some(2.0), None, Some(4.0), Some(6.0)],
            "missing cells must stay missing through map"
        );
        assert_eq!(doubled.region(), layer.region());
    }

    #[test]
    fn test_zip_with_propagates_missing() {
        let a = grid_2x2([Some(1.0), None, Some(2.0), Some(3.0)]);
        let b = grid_2x2([Some(10.0), Some(20.0), None, Some(30.0)]);
        let sum = a.zip_with(&b, "sum", |x, y| Some(x + y)).unwrap();
        assert_eq!(sum.cells(), &[Some(11.0), None, None, Some(33.0)]);
    }

    #[test]
    fn test_zip_with_rejects_extent_mismatch() {
        let a = grid_2x2([Some(1.0); 4]);
        let other_region = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = RasterLayer::filled("b", other_region, 2, 2, Some(1.0)).unwrap();
        let result = a.zip_with(&b, "sum", |x, y| Some(x + y));
        assert!(matches!(result, Err(RasterError::ExtentMismatch { .. })));
    }

    #[test]
    fn test_zip_with_rejects_grid_mismatch() {
        let a = grid_2x2([Some(1.0); 4]);
        let b = RasterLayer::filled("b", region(), 4, 4, Some(1.0)).unwrap();
        let result = a.zip_with(&b, "sum", |x, y| Some(x + y));
        assert!(matches!(result, Err(RasterError::GridMismatch { .. })));
    }

    #[test]
    fn test_sample_nearest_cell_center() {
        // 2x2 grid over [-75, 40, -74, 41]: NW, NE / SW, SE
        let layer = grid_2x2([Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
        assert_eq!(layer.sample(-74.9, 40.9), Some(1.0), "northwest cell");
        assert_eq!(layer.sample(-74.1, 40.9), Some(2.0), "northeast cell");
        assert_eq!(layer.sample(-74.9, 40.1), Some(3.0), "southwest cell");
        assert_eq!(layer.sample(-74.1, 40.1), Some(4.0), "southeast cell");
        assert_eq!(layer.sample(-73.0, 40.5), None, "outside the extent");
    }

    #[test]
    fn test_clip_extent_equals_target_region() {
        let layer = grid_2x2([Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
        let target = Region::new(-75.0, 40.0, -74.5, 40.5).unwrap();
        let clipped = layer.clip(target).unwrap();
        assert_eq!(*clipped.region(), target);
        assert_eq!(clipped.width(), 1);
        assert_eq!(clipped.height(), 1);
        assert_eq!(clipped.cells(), &[Some(3.0)], "southwest quadrant");
    }

    #[test]
    fn test_clip_outside_coverage_is_missing() {
        let layer = grid_2x2([Some(1.0); 4]);
        // Target extends one degree east of the source coverage.
        let target = Region::new(-75.0, 40.0, -73.0, 41.0).unwrap();
        let clipped = layer.clip(target).unwrap();
        assert_eq!(*clipped.region(), target);
        assert_eq!(clipped.width(), 4);
        for row in 0..clipped.height() {
            for col in 0..clipped.width() {
                let cell = clipped.get(row, col).unwrap();
                if col < 2 {
                    assert_eq!(cell, Some(1.0), "cell ({}, {}) is covered", row, col);
                } else {
                    assert_eq!(cell, None, "cell ({}, {}) is beyond coverage", row, col);
                }
            }
        }
    }
}
