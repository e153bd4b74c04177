//! Command-line interface for the agrolayer mapping pipeline.
//!
//! Aggregates satellite rasters from a slice catalog, derives the
//! agronomic layers and the planting suitability mask, and renders
//! them as PNG images.

mod error;
mod runner;

use agrolayer::pipeline::{LayerOutcome, SUITABILITY_LABEL};
use chrono::NaiveDate;
use clap::Parser;
use error::CliError;
use runner::CliRunner;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agrolayer")]
#[command(version = agrolayer::VERSION)]
#[command(about = "Satellite raster aggregation and planting suitability mapping")]
struct Args {
    /// Path to configuration file (default: ~/.agrolayer/config.ini)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory of CSV slice files to read rasters from
    #[arg(long, value_name = "DIR", conflicts_with = "demo")]
    catalog: Option<PathBuf>,

    /// Run against a built-in synthetic catalog instead of slice files
    #[arg(long)]
    demo: bool,

    /// Directory to write rendered PNG layers into
    #[arg(long, value_name = "DIR", default_value = "out")]
    output: PathBuf,

    /// Override the region's western boundary (degrees longitude)
    #[arg(long, value_name = "DEG")]
    min_lon: Option<f64>,

    /// Override the region's southern boundary (degrees latitude)
    #[arg(long, value_name = "DEG")]
    min_lat: Option<f64>,

    /// Override the region's eastern boundary (degrees longitude)
    #[arg(long, value_name = "DEG")]
    max_lon: Option<f64>,

    /// Override the region's northern boundary (degrees latitude)
    #[arg(long, value_name = "DEG")]
    max_lat: Option<f64>,

    /// Override the start of the date window (inclusive, YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: Option<NaiveDate>,

    /// Override the end of the date window (exclusive, YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end: Option<NaiveDate>,

    /// Override the map centering zoom level
    #[arg(long, value_name = "LEVEL")]
    zoom: Option<u8>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    /// Copies any region/date/zoom overrides onto the loaded config.
    fn apply_overrides(&self, runner: &mut CliRunner) {
        let config = runner.config_mut();
        if let Some(v) = self.min_lon {
            config.region.min_lon = v;
        }
        if let Some(v) = self.min_lat {
            config.region.min_lat = v;
        }
        if let Some(v) = self.max_lon {
            config.region.max_lon = v;
        }
        if let Some(v) = self.max_lat {
            config.region.max_lat = v;
        }
        if let Some(v) = self.start {
            config.dates.start = v;
        }
        if let Some(v) = self.end {
            config.dates.end = v;
        }
        if let Some(v) = self.zoom {
            config.region.zoom = v;
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut runner = match CliRunner::new(args.config.as_deref(), args.debug) {
        Ok(runner) => runner,
        Err(e) => e.exit(),
    };
    args.apply_overrides(&mut runner);

    let result = if args.demo {
        runner.run_demo(&args.output).await
    } else if let Some(dir) = &args.catalog {
        runner.run_with_files(dir, &args.output).await
    } else {
        Err(CliError::NoCatalog)
    };

    match result {
        Ok(report) => {
            println!("Rendered {} of {} layers:", report.rendered_count(), report.layers.len());
            for (kind, outcome) in &report.layers {
                match outcome {
                    LayerOutcome::Rendered => println!("  ok    {}", kind.label()),
                    LayerOutcome::Failed(err) => println!("  FAIL  {}: {}", kind.label(), err),
                }
            }
            match &report.mask {
                LayerOutcome::Rendered => println!("  ok    {SUITABILITY_LABEL}"),
                LayerOutcome::Failed(err) => println!("  FAIL  {SUITABILITY_LABEL}: {err}"),
            }
            let (region, zoom) = &report.center;
            let (lon, lat) = region.center();
            println!("Centered on ({lon:.4}, {lat:.4}) at zoom {zoom}");
        }
        Err(e) => e.exit(),
    }
}
