//! Presentation adapter module
//!
//! Maps rasters to color ramps and sends them to a rendering surface.
//! The [`RenderSurface`] trait is the only seam in the crate with an
//! observable side effect; [`MapSession`] records what crossed it.

mod png;
mod session;
mod types;

pub use png::PngSurface;
pub use session::{MapSession, NoopSurface};
pub use types::{
    sample_ramp, Color, ColorParseError, LayerImage, RampStyle, RenderError, RenderSurface,
    VisualizationSpec,
};
