//! Suitability evaluator module
//!
//! Combines the transformed moisture, temperature, and dryness rasters
//! into a boolean planting-suitability mask via threshold predicates
//! and conjunction. A missing value in any operand makes the mask cell
//! missing; it is never defaulted to false or true.

use crate::geo::Region;
use crate::raster::{MaskLayer, RasterError, RasterLayer};
use thiserror::Error;

/// Threshold configuration for the suitability predicate.
///
/// The defaults mirror the values the analysis was published with;
/// they are illustrative placeholders rather than validated agronomic
/// truth, which is exactly why they live in configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Soil moisture must exceed this fraction
    pub min_moisture: f64,
    /// Temperature must exceed this many degrees Celsius
    pub min_temperature_c: f64,
    /// Dryness index must stay below this value
    pub max_dryness: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            min_moisture: 0.2,
            min_temperature_c: 15.0,
            max_dryness: 0.5,
        }
    }
}

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum SuitabilityError {
    /// Input layers cover different ground or grids
    #[error("incompatible input layers: {0}")]
    Incompatible(#[from] RasterError),

    /// No input layer was available to evaluate against
    #[error("no evaluator inputs available")]
    NoInputs,
}

/// Evaluates the per-cell suitability predicate over three layers.
///
/// `suitable = moisture > min_moisture AND temperature >
/// min_temperature_c AND dryness < max_dryness`, with missing
/// propagation across all three operands.
pub fn evaluate(
    moisture: &RasterLayer,
    temperature: &RasterLayer,
    dryness: &RasterLayer,
    thresholds: &Thresholds,
) -> Result<MaskLayer, SuitabilityError> {
    moisture.check_compatible(temperature)?;
    moisture.check_compatible(dryness)?;

    let cells = moisture
        .cells()
        .iter()
        .zip(temperature.cells().iter())
        .zip(dryness.cells().iter())
        .map(|((m, t), d)| match (m, t, d) {
            (Some(m), Some(t), Some(d)) => Some(
                *m > thresholds.min_moisture
                    && *t > thresholds.min_temperature_c
                    && *d < thresholds.max_dryness,
            ),
            _ => None,
        })
        .collect();

    Ok(MaskLayer::from_cells(
        "suitability",
        *moisture.region(),
        moisture.width(),
        moisture.height(),
        cells,
    )?)
}

/// Evaluates with possibly-absent inputs (partial-failure policy).
///
/// A layer whose computation failed upstream enters as `None` and is
/// treated as an all-missing raster, so the mask still renders instead
/// of aborting with its siblings. The inputs come from sources with
/// different native resolutions, so every present layer is resampled
/// onto the finest present grid over `region` before the predicate
/// runs; missing cells stay missing through the resample.
pub fn evaluate_partial(
    moisture: Option<&RasterLayer>,
    temperature: Option<&RasterLayer>,
    dryness: Option<&RasterLayer>,
    thresholds: &Thresholds,
    region: &Region,
) -> Result<MaskLayer, SuitabilityError> {
    let finest = [moisture, temperature, dryness]
        .into_iter()
        .flatten()
        .max_by_key(|layer| layer.width() * layer.height())
        .ok_or(SuitabilityError::NoInputs)?;
    let (width, height) = (finest.width(), finest.height());
    let align = |layer: Option<&RasterLayer>| match layer {
        Some(layer) => layer.resample_to(*region, width, height),
        None => RasterLayer::filled("absent", *region, width, height, None),
    };
    let moisture = align(moisture)?;
    let temperature = align(temperature)?;
    let dryness = align(dryness)?;
    evaluate(&moisture, &temperature, &dryness, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Region;

    fn region() -> Region {
        Region::new(-75.0, 40.0, -74.0, 41.0).unwrap()
    }

    fn layer(cells: Vec<Option<f64>>) -> RasterLayer {
        let width = cells.len();
        RasterLayer::from_cells("t", region(), width, 1, cells).unwrap()
    }

    #[test]
    fn test_all_conditions_met() {
        let mask = evaluate(
            &layer(vec![Some(0.25)]),
            &layer(vec![Some(20.0)]),
            &layer(vec![Some(0.3)]),
            &Thresholds::default(),
        )
        .unwrap();
        assert_eq!(mask.cells(), &[Some(true)]);
    }

    #[test]
    fn test_low_moisture_fails_predicate() {
        let mask = evaluate(
            &layer(vec![Some(0.1)]),
            &layer(vec![Some(20.0)]),
            &layer(vec![Some(0.3)]),
            &Thresholds::default(),
        )
        .unwrap();
        assert_eq!(mask.cells(), &[Some(false)]);
    }

    #[test]
    fn test_thresholds_are_strict_inequalities() {
        let mask = evaluate(
            &layer(vec![Some(0.2)]),
            &layer(vec![Some(15.0)]),
            &layer(vec![Some(0.5)]),
            &Thresholds::default(),
        )
        .unwrap();
        assert_eq!(mask.cells(), &[Some(false)], "boundary values fail");
    }

    #[test]
    fn test_missing_operand_makes_cell_missing() {
        let mask = evaluate(
            &layer(vec![Some(0.25), None, Some(0.25)]),
            &layer(vec![Some(20.0), Some(20.0), None]),
            &layer(vec![Some(0.3), Some(0.3), Some(0.3)]),
            &Thresholds::default(),
        )
        .unwrap();
        assert_eq!(
            mask.cells(),
            &[Some(true), None, None],
            "missing propagates, never defaults to false"
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = Thresholds {
            min_moisture: 0.05,
            min_temperature_c: 5.0,
            max_dryness: 0.9,
        };
        let mask = evaluate(
            &layer(vec![Some(0.1)]),
            &layer(vec![Some(10.0)]),
            &layer(vec![Some(0.8)]),
            &thresholds,
        )
        .unwrap();
        assert_eq!(mask.cells(), &[Some(true)]);
    }

    #[test]
    fn test_evaluate_rejects_mismatched_grids() {
        let result = evaluate(
            &layer(vec![Some(0.25)]),
            &layer(vec![Some(20.0), Some(21.0)]),
            &layer(vec![Some(0.3)]),
            &Thresholds::default(),
        );
        assert!(matches!(result, Err(SuitabilityError::Incompatible(_))));
    }

    #[test]
    fn test_partial_with_absent_temperature() {
        let mask = evaluate_partial(
            Some(&layer(vec![Some(0.25)])),
            None,
            Some(&layer(vec![Some(0.3)])),
            &Thresholds::default(),
            &region(),
        )
        .unwrap();
        assert_eq!(
            mask.cells(),
            &[None],
            "an absent layer behaves as all-missing, not all-false"
        );
    }

    #[test]
    fn test_partial_aligns_mixed_resolution_inputs() {
        // Coarse moisture beside finer temperature and dryness, as the
        // default SMAP / MODIS / Sentinel-2 sources produce.
        let mask = evaluate_partial(
            Some(&layer(vec![Some(0.25)])),
            Some(&layer(vec![Some(20.0), Some(10.0)])),
            Some(&layer(vec![Some(0.3), Some(0.3)])),
            &Thresholds::default(),
            &region(),
        )
        .unwrap();
        assert_eq!(
            mask.cells(),
            &[Some(true), Some(false)],
            "coarse layers are resampled onto the finest grid"
        );
    }

    #[test]
    fn test_partial_with_no_inputs() {
        let result = evaluate_partial(None, None, None, &Thresholds::default(), &region());
        assert!(matches!(result, Err(SuitabilityError::NoInputs)));
    }
}
