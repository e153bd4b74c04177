//! Pipeline orchestration
//!
//! Runs the whole flow: the five layer computations execute
//! concurrently (they share no state), each successful layer is
//! rendered in the fixed presentation order, then the suitability
//! evaluator joins moisture, temperature, and dryness into the mask
//! layer rendered last. A failing layer is logged and skipped; its
//! siblings and the mask still render.

mod error;

pub use error::{LayerError, ParamsError};

use crate::aggregate::aggregate;
use crate::catalog::DatasetCatalog;
use crate::config::ConfigFile;
use crate::geo::Region;
use crate::raster::RasterLayer;
use crate::render::{LayerImage, RenderSurface, VisualizationSpec};
use crate::source::{LayerKind, SourceRegistry, SourceSpec};
use crate::suitability::{evaluate_partial, Thresholds};
use crate::transform::{
    dryness, mineral_composite, ndvi, temperature_celsius, LinearEncoding,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Display label of the mask layer.
pub const SUITABILITY_LABEL: &str = "Planting Suitability";

/// Visualization specs for the five layers plus the mask.
#[derive(Debug, Clone)]
pub struct VisTable {
    pub rain: VisualizationSpec,
    pub soil_moisture: VisualizationSpec,
    pub temperature: VisualizationSpec,
    pub dryness: VisualizationSpec,
    pub minerals: VisualizationSpec,
    pub suitability: VisualizationSpec,
}

impl VisTable {
    pub fn from_config(config: &ConfigFile) -> Result<Self, ParamsError> {
        let checked = |label: &'static str, min: f64, max: f64| {
            if min < max {
                Ok((min, max))
            } else {
                Err(ParamsError::VisRange { label, min, max })
            }
        };
        let palette = |label: &'static str,
                       layer: &crate::config::LayerSettings|
         -> Result<VisualizationSpec, ParamsError> {
            let (min, max) = checked(label, layer.vis_min, layer.vis_max)?;
            Ok(VisualizationSpec::palette(min, max, layer.palette.clone()))
        };
        let (minerals_min, minerals_max) = checked(
            LayerKind::Minerals.label(),
            config.layers.minerals.vis_min,
            config.layers.minerals.vis_max,
        )?;
        let (suit_min, suit_max) = checked(
            SUITABILITY_LABEL,
            config.suitability.vis_min,
            config.suitability.vis_max,
        )?;
        Ok(VisTable {
            rain: palette(LayerKind::Rain.label(), &config.layers.rain)?,
            soil_moisture: palette(
                LayerKind::SoilMoisture.label(),
                &config.layers.soil_moisture,
            )?,
            temperature: palette(LayerKind::Temperature.label(), &config.layers.temperature)?,
            dryness: palette(LayerKind::Dryness.label(), &config.layers.dryness)?,
            minerals: VisualizationSpec::composite(minerals_min, minerals_max),
            suitability: VisualizationSpec::palette(
                suit_min,
                suit_max,
                config.suitability.palette.clone(),
            ),
        })
    }

    fn for_kind(&self, kind: LayerKind) -> &VisualizationSpec {
        match kind {
            LayerKind::Rain => &self.rain,
            LayerKind::SoilMoisture => &self.soil_moisture,
            LayerKind::Temperature => &self.temperature,
            LayerKind::Dryness => &self.dryness,
            LayerKind::Minerals => &self.minerals,
        }
    }
}

/// Everything the pipeline needs besides the catalog and the surface.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub registry: SourceRegistry,
    pub region: Region,
    pub zoom: u8,
    pub thresholds: Thresholds,
    pub temperature_encoding: LinearEncoding,
    pub vis: VisTable,
}

impl PipelineParams {
    /// Assembles parameters from a loaded configuration.
    pub fn from_config(config: &ConfigFile) -> Result<Self, ParamsError> {
        Ok(PipelineParams {
            registry: config.to_registry()?,
            region: config.to_region()?,
            zoom: config.region.zoom,
            thresholds: config.to_thresholds(),
            temperature_encoding: config.to_temperature_encoding(),
            vis: VisTable::from_config(config)?,
        })
    }
}

/// How one layer ended up.
#[derive(Debug)]
pub enum LayerOutcome {
    Rendered,
    Failed(LayerError),
}

impl LayerOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, LayerOutcome::Rendered)
    }
}

/// What the pipeline did: one outcome per dataset layer, one for the
/// mask, and the center directive that was issued.
#[derive(Debug)]
pub struct PipelineReport {
    /// Outcomes in presentation order
    pub layers: Vec<(LayerKind, LayerOutcome)>,
    /// Outcome of the suitability mask layer
    pub mask: LayerOutcome,
    /// Region and zoom the surface was centered on
    pub center: (Region, u8),
}

impl PipelineReport {
    /// Number of dataset layers that rendered (the mask not included).
    pub fn rendered_count(&self) -> usize {
        self.layers.iter().filter(|(_, o)| o.is_rendered()).count()
    }
}

/// Aggregates and transforms one layer into its presentable image.
async fn compute_layer<C: DatasetCatalog>(
    catalog: &C,
    kind: LayerKind,
    spec: &SourceSpec,
    region: Region,
    encoding: LinearEncoding,
) -> Result<LayerImage, LayerError> {
    let expected = match kind {
        LayerKind::Rain | LayerKind::SoilMoisture | LayerKind::Temperature => 1,
        LayerKind::Dryness => 2,
        LayerKind::Minerals => 3,
    };
    if spec.bands.len() != expected {
        return Err(LayerError::BandCount {
            kind,
            expected,
            got: spec.bands.len(),
        });
    }

    let mut bands = aggregate(catalog, spec, &region).await?;
    match kind {
        LayerKind::Rain | LayerKind::SoilMoisture => Ok(LayerImage::Scalar(bands.remove(0))),
        LayerKind::Temperature => Ok(LayerImage::Scalar(temperature_celsius(
            &bands[0], encoding,
        ))),
        LayerKind::Dryness => {
            let ndvi_layer = ndvi(&bands[0], &bands[1])?;
            Ok(LayerImage::Scalar(dryness(&ndvi_layer)))
        }
        LayerKind::Minerals => {
            let b8 = bands.remove(2);
            let b12 = bands.remove(1);
            let b11 = bands.remove(0);
            Ok(LayerImage::Composite(mineral_composite(b11, b12, b8)?))
        }
    }
}

/// Runs the full pipeline against a catalog and rendering surface.
///
/// The five layers are computed concurrently; the evaluator joins the
/// moisture, temperature, and dryness results once all are settled.
/// Failures are isolated per layer and reported in the returned
/// [`PipelineReport`], never propagated as a crash.
pub async fn run<C, S>(catalog: Arc<C>, params: &PipelineParams, surface: &mut S) -> PipelineReport
where
    C: DatasetCatalog + 'static,
    S: RenderSurface,
{
    let mut handles = Vec::new();
    for (kind, spec) in params.registry.iter() {
        let catalog = Arc::clone(&catalog);
        let spec = spec.clone();
        let region = params.region;
        let encoding = params.temperature_encoding;
        handles.push((
            kind,
            tokio::spawn(async move {
                compute_layer(catalog.as_ref(), kind, &spec, region, encoding).await
            }),
        ));
    }

    let mut results: HashMap<LayerKind, Result<LayerImage, LayerError>> = HashMap::new();
    for (kind, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(LayerError::Task(e.to_string())),
        };
        results.insert(kind, result);
    }

    // Evaluator inputs, captured as the layers render.
    let mut moisture: Option<RasterLayer> = None;
    let mut temperature: Option<RasterLayer> = None;
    let mut dryness_layer: Option<RasterLayer> = None;

    let mut layer_outcomes = Vec::new();
    for kind in LayerKind::all() {
        let Some(result) = results.remove(&kind) else {
            continue;
        };
        let outcome = match result {
            Ok(image) => {
                if let LayerImage::Scalar(layer) = &image {
                    match kind {
                        LayerKind::SoilMoisture => moisture = Some(layer.clone()),
                        LayerKind::Temperature => temperature = Some(layer.clone()),
                        LayerKind::Dryness => dryness_layer = Some(layer.clone()),
                        _ => {}
                    }
                }
                match surface.add_layer(image, params.vis.for_kind(kind), kind.label()) {
                    Ok(()) => {
                        info!(layer = %kind, "layer rendered");
                        LayerOutcome::Rendered
                    }
                    Err(e) => {
                        warn!(layer = %kind, error = %e, "layer render failed");
                        LayerOutcome::Failed(LayerError::Render(e))
                    }
                }
            }
            Err(e) => {
                warn!(layer = %kind, error = %e, "layer computation failed, continuing without it");
                LayerOutcome::Failed(e)
            }
        };
        layer_outcomes.push((kind, outcome));
    }

    // Synchronization point: the mask needs the three transformed
    // inputs settled, present or not.
    let mask_outcome = match evaluate_partial(
        moisture.as_ref(),
        temperature.as_ref(),
        dryness_layer.as_ref(),
        &params.thresholds,
        &params.region,
    ) {
        Ok(mask) => {
            info!(suitable_cells = mask.count_true(), "suitability evaluated");
            match surface.add_layer(
                LayerImage::Scalar(mask.to_raster()),
                &params.vis.suitability,
                SUITABILITY_LABEL,
            ) {
                Ok(()) => LayerOutcome::Rendered,
                Err(e) => {
                    warn!(error = %e, "suitability mask render failed");
                    LayerOutcome::Failed(LayerError::Render(e))
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "suitability mask not evaluable");
            LayerOutcome::Failed(LayerError::Suitability(e))
        }
    };

    surface.center(&params.region, params.zoom);

    PipelineReport {
        layers: layer_outcomes,
        mask: mask_outcome,
        center: (params.region, params.zoom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_from_default_config() {
        let params = PipelineParams::from_config(&ConfigFile::default()).unwrap();
        assert_eq!(params.zoom, 8);
        assert_eq!(params.region.min_lon, -75.0);
        assert_eq!(params.thresholds.min_moisture, 0.2);
        assert!(matches!(
            params.vis.minerals.style,
            crate::render::RampStyle::RgbComposite
        ));
    }

    #[test]
    fn test_params_reject_empty_vis_range() {
        let mut config = ConfigFile::default();
        config.layers.temperature.vis_max = config.layers.temperature.vis_min;
        let result = PipelineParams::from_config(&config);
        assert!(
            matches!(
                result,
                Err(ParamsError::VisRange {
                    label: "Temperature",
                    ..
                })
            ),
            "a degenerate range would render every value as the ramp start"
        );
    }

    #[test]
    fn test_params_reject_bad_region() {
        let mut config = ConfigFile::default();
        config.region.max_lon = config.region.min_lon;
        let result = PipelineParams::from_config(&config);
        assert!(matches!(result, Err(ParamsError::Region(_))));
    }
}
