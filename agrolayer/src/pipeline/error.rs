//! Error types for the layer pipeline.
//!
//! Errors are categorized by pipeline stage. A layer's error never
//! aborts its siblings; the runner records it and keeps going.

use crate::aggregate::AggregateError;
use crate::catalog::EmptyDateRange;
use crate::geo::GeoError;
use crate::render::RenderError;
use crate::source::LayerKind;
use crate::suitability::SuitabilityError;
use crate::transform::TransformError;
use thiserror::Error;

/// Errors that can occur while computing or rendering one layer.
#[derive(Debug, Error)]
pub enum LayerError {
    /// Aggregation failed (including the empty-collection case)
    #[error("aggregation failed: {0}")]
    Aggregate(#[from] AggregateError),

    /// Band transform failed
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    /// Suitability evaluation failed
    #[error("suitability evaluation failed: {0}")]
    Suitability(#[from] SuitabilityError),

    /// The rendering surface rejected the layer
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// A layer's source spec has the wrong number of bands for its transform
    #[error("{kind} needs {expected} band(s), spec has {got}")]
    BandCount {
        kind: LayerKind,
        expected: usize,
        got: usize,
    },

    /// The layer task panicked or was cancelled
    #[error("layer task failed: {0}")]
    Task(String),
}

/// Errors assembling pipeline parameters from configuration.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The configured region is invalid
    #[error("invalid region: {0}")]
    Region(#[from] GeoError),

    /// The configured date window is invalid
    #[error("invalid date window: {0}")]
    Dates(#[from] EmptyDateRange),

    /// A layer's visualization range is empty or inverted
    #[error("invalid visualization range for {label}: min {min} must be below max {max}")]
    VisRange {
        label: &'static str,
        min: f64,
        max: f64,
    },
}
