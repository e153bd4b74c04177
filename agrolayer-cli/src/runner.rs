//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization, configuration loading, catalog
//! construction, and the pipeline invocation to keep `main` small.

use crate::error::CliError;
use agrolayer::catalog::{DatasetCatalog, FileCatalog, MemoryCatalog};
use agrolayer::config::ConfigFile;
use agrolayer::logging::{init_logging, LoggingGuard};
use agrolayer::pipeline::{self, PipelineParams, PipelineReport};
use agrolayer::render::{MapSession, PngSurface};
use agrolayer::source::LayerKind;
use chrono::Datelike;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file, or `None` for the
    ///   default location (defaults are used when the file is absent)
    /// * `debug_mode` - When true, enables debug-level logging
    ///   regardless of RUST_LOG
    pub fn new(config_path: Option<&Path>, debug_mode: bool) -> Result<Self, CliError> {
        let config = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };

        let logging_guard =
            init_logging(&config.logging.file, debug_mode).map_err(CliError::LoggingInit)?;
        info!(version = agrolayer::VERSION, "agrolayer starting");

        Ok(CliRunner {
            logging_guard,
            config,
        })
    }

    /// Mutable access to the loaded config, for CLI overrides.
    pub fn config_mut(&mut self) -> &mut ConfigFile {
        &mut self.config
    }

    /// Runs the pipeline against a directory catalog of slice files.
    pub async fn run_with_files(
        &self,
        catalog_dir: &Path,
        output_dir: &Path,
    ) -> Result<PipelineReport, CliError> {
        let catalog = FileCatalog::open(catalog_dir)?;
        self.execute(Arc::new(catalog), output_dir).await
    }

    /// Runs the pipeline against a built-in synthetic catalog.
    pub async fn run_demo(&self, output_dir: &Path) -> Result<PipelineReport, CliError> {
        let params = PipelineParams::from_config(&self.config)?;
        let catalog = demo_catalog(&params);
        self.execute(Arc::new(catalog), output_dir).await
    }

    async fn execute<C>(&self, catalog: Arc<C>, output_dir: &Path) -> Result<PipelineReport, CliError>
    where
        C: DatasetCatalog + 'static,
    {
        let params = PipelineParams::from_config(&self.config)?;
        let mut session = MapSession::over(PngSurface::create(output_dir)?);
        let report = pipeline::run(catalog, &params, &mut session).await;

        if report.rendered_count() == 0 && !report.mask.is_rendered() {
            return Err(CliError::NothingRendered);
        }
        Ok(report)
    }
}

/// Builds a deterministic synthetic catalog matching the configured
/// sources, for trying the pipeline without any data on disk.
///
/// Each band gets one 16x16 slice per season start (January, April,
/// July, October) with a gentle west-to-east gradient over a
/// layer-appropriate value range.
fn demo_catalog(params: &PipelineParams) -> MemoryCatalog {
    use agrolayer::raster::RasterLayer;

    const SIZE: usize = 16;
    let region = params.region;
    let mut catalog = MemoryCatalog::new();

    for (kind, spec) in params.registry.iter() {
        for (band_index, band) in spec.bands.iter().enumerate() {
            // Raw sample range per layer; temperature is in the
            // dataset's scaled-Kelvin encoding.
            let (lo, hi) = match kind {
                LayerKind::Rain => (0.0, 10.0),
                LayerKind::SoilMoisture => (0.15, 0.45),
                LayerKind::Temperature => (14200.0, 15000.0),
                LayerKind::Dryness => {
                    if band_index == 0 {
                        (0.5, 0.7) // near-infrared
                    } else {
                        (0.1, 0.3) // red
                    }
                }
                LayerKind::Minerals => (500.0, 4000.0),
            };

            for month in [1u32, 4, 7, 10] {
                let date = spec.range.start.with_month(month).unwrap_or(spec.range.start);
                if !spec.range.contains(date) {
                    continue;
                }
                let cells = (0..SIZE * SIZE)
                    .map(|i| {
                        let col = (i % SIZE) as f64;
                        let t = col / (SIZE - 1) as f64;
                        Some(lo + (hi - lo) * t)
                    })
                    .collect();
                let raster = RasterLayer::from_cells(
                    format!("{}/{}", spec.dataset_id, band),
                    region,
                    SIZE,
                    SIZE,
                    cells,
                )
                .expect("demo grid dimensions are consistent");
                catalog.add_slice(spec.dataset_id.clone(), band.clone(), date, raster);
            }
        }
    }

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_catalog_feeds_every_source() {
        let config = ConfigFile::default();
        let params = PipelineParams::from_config(&config).unwrap();
        let catalog = demo_catalog(&params);

        for (_, spec) in params.registry.iter() {
            for band in &spec.bands {
                let slices = catalog
                    .query(&spec.dataset_id, band, &spec.range, &params.region)
                    .await
                    .unwrap();
                assert!(
                    !slices.is_empty(),
                    "demo catalog misses {}/{}",
                    spec.dataset_id,
                    band
                );
            }
        }
    }
}
