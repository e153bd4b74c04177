//! Boolean mask layer.
//!
//! Produced by the suitability evaluator. Cells are `Option<bool>` with
//! the same propagation rule as scalar rasters: a missing input in any
//! operand makes the mask cell missing, never silently false.

use crate::geo::Region;
use crate::raster::{RasterError, RasterLayer};

/// A 2D grid of optional booleans with a geographic extent.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskLayer {
    name: String,
    region: Region,
    width: usize,
    height: usize,
    cells: Vec<Option<bool>>,
}

impl MaskLayer {
    /// Creates a mask from a row-major cell buffer.
    pub fn from_cells(
        name: impl Into<String>,
        region: Region,
        width: usize,
        height: usize,
        cells: Vec<Option<bool>>,
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
        Ok(MaskLayer {
            name: name.into(),
            region,
            width,
            height,
            cells,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Option<bool>] {
        &self.cells
    }

    /// Reads the cell at (row, col); row 0 is the northern edge.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<bool>, RasterError> {
        if row >= self.height || col >= self.width {
            return Err(RasterError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.cells[row * self.width + col])
    }

    /// Number of cells that are present and true.
    pub fn count_true(&self) -> usize {
        self.cells.iter().filter(|c| **c == Some(true)).count()
    }

    /// Converts to a 0/1 scalar raster for rendering.
    ///
    /// True becomes 1.0, false 0.0, missing stays missing so the
    /// false/missing distinction survives into the rendered output.
    pub fn to_raster(&self) -> RasterLayer {
        let cells = self
            .cells
            .iter()
            .map(|c| c.map(|b| if b { 1.0 } else { 0.0 }))
            .collect();
        RasterLayer::new_unchecked(self.name.clone(), self.region, self.width, self.height, cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_raster_keeps_false_and_missing_distinct() {
        let region = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let mask = MaskLayer::from_cells(
            "mask",
            region,
            3,
            1,
            vec![Some(true), Some(false), None],
        )
        .unwrap();
        let raster = mask.to_raster();
        assert_eq!(raster.cells(), &[Some(1.0), Some(0.0), None]);
    }

    #[test]
    fn test_count_true() {
        let region = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let mask =
            MaskLayer::from_cells("mask", region, 2, 2, vec![Some(true), Some(true), None, Some(false)])
                .unwrap();
        assert_eq!(mask.count_true(), 2);
    }
}
