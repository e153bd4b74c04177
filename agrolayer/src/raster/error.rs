//! Error types for raster operations.

use crate::geo::Region;
use thiserror::Error;

/// Errors that can occur constructing or combining rasters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    /// Cell buffer length does not match the declared dimensions
    #[error("cell count {cells} does not match {width}x{height} grid")]
    DimensionMismatch {
        width: usize,
        height: usize,
        cells: usize,
    },

    /// Grid dimensions must be at least 1x1
    #[error("raster dimensions must be non-zero, got {width}x{height}")]
    ZeroSize { width: usize, height: usize },

    /// Two layers in a binary operation cover different ground
    #[error("extent mismatch: {a:?} vs {b:?}")]
    ExtentMismatch { a: Region, b: Region },

    /// Two layers in a binary operation have different grid sizes
    #[error("grid size mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    GridMismatch {
        a_width: usize,
        a_height: usize,
        b_width: usize,
        b_height: usize,
    },

    /// Cell index outside the grid
    #[error("cell ({row}, {col}) outside {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
}
