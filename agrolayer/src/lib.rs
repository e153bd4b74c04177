//! AgroLayer - Multi-source raster aggregation for agricultural decisions
//!
//! This library fetches satellite-derived raster time series
//! (precipitation, soil moisture, land-surface temperature, vegetation
//! and mineral spectral bands) from a dataset catalog, averages each
//! over a region and date window, applies per-layer transforms, and
//! derives a planting-suitability mask from threshold predicates.
//!
//! # High-Level API
//!
//! ```ignore
//! use agrolayer::catalog::FileCatalog;
//! use agrolayer::config::ConfigFile;
//! use agrolayer::pipeline::{self, PipelineParams};
//! use agrolayer::render::{MapSession, PngSurface};
//! use std::sync::Arc;
//!
//! let config = ConfigFile::load()?;
//! let params = PipelineParams::from_config(&config)?;
//! let catalog = Arc::new(FileCatalog::open("slices/")?);
//! let mut session = MapSession::over(PngSurface::create("out/")?);
//!
//! let report = pipeline::run(catalog, &params, &mut session).await;
//! ```

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod geo;
pub mod logging;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod source;
pub mod suitability;
pub mod transform;

/// Version of the AgroLayer library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
