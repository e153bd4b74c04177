//! Geographic type definitions

use thiserror::Error;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom levels accepted by the center-and-zoom directive
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 18;

/// Axis-aligned geographic bounding box in degrees.
///
/// Created once at startup and passed by reference through the pipeline;
/// every raster layer produced by the aggregator carries an extent equal
/// to the region it was clipped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Western edge in degrees
    pub min_lon: f64,
    /// Southern edge in degrees
    pub min_lat: f64,
    /// Eastern edge in degrees
    pub max_lon: f64,
    /// Northern edge in degrees
    pub max_lat: f64,
}

/// Errors that can occur constructing or combining regions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude is outside valid range (-90 to 90)
    #[error("invalid latitude: {0} (must be between {MIN_LAT} and {MAX_LAT})")]
    InvalidLatitude(f64),

    /// Longitude is outside valid range (-180 to 180)
    #[error("invalid longitude: {0} (must be between {MIN_LON} and {MAX_LON})")]
    InvalidLongitude(f64),

    /// Minimum edge is not strictly below maximum edge
    #[error("empty region: ({min_lon}, {min_lat}) to ({max_lon}, {max_lat})")]
    EmptyRegion {
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    },
}
