//! Raster grid module
//!
//! Scalar grids, boolean masks, and RGB composites with per-cell
//! missing propagation. Missing is `Option::None`, never a sentinel
//! float; arithmetic with any missing operand yields missing.

mod composite;
mod error;
mod grid;
mod mask;

pub use composite::CompositeLayer;
pub use error::RasterError;
pub use grid::RasterLayer;
pub use mask::MaskLayer;
