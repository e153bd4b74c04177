//! Aggregator module
//!
//! Reduces a dataset's time series to a single raster per band: query
//! the catalog for the window and region, clip every slice to the
//! region, then take the per-cell mean along the time axis.
//!
//! An empty result is an error, never a zero-filled raster. A zero
//! substitute would read as 0 °C or 0 moisture downstream, turning
//! data absence into a false analytical signal; callers must choose
//! their own fallback policy.

use crate::catalog::{CatalogError, DatasetCatalog, DateRange};
use crate::geo::Region;
use crate::raster::{RasterError, RasterLayer};
use crate::source::{AggregationStat, SourceSpec};
use tracing::debug;

use thiserror::Error;

/// Errors that can occur during aggregation.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The filtered query matched zero time slices
    #[error("no slices for dataset '{dataset_id}' band '{band}' in the requested window")]
    EmptyCollection { dataset_id: String, band: String },

    /// The catalog query itself failed
    #[error("catalog query failed: {0}")]
    Catalog(#[from] CatalogError),

    /// Slices could not be combined onto a common grid
    #[error("raster error: {0}")]
    Raster(#[from] RasterError),
}

/// Aggregates one band of one dataset over a region and time window.
///
/// The returned raster's extent equals `region` exactly (clip
/// invariant); its grid resolution is taken from the first matching
/// slice, and later slices are resampled onto that grid. A cell's
/// mean is taken over the slices where it is present; a cell missing
/// in every slice stays missing.
///
/// # Errors
///
/// [`AggregateError::EmptyCollection`] when no slice matches the
/// filter. Catalog and grid failures are passed through.
pub async fn aggregate_band<C: DatasetCatalog>(
    catalog: &C,
    dataset_id: &str,
    band: &str,
    range: &DateRange,
    region: &Region,
    stat: AggregationStat,
) -> Result<RasterLayer, AggregateError> {
    let slices = catalog.query(dataset_id, band, range, region).await?;
    if slices.is_empty() {
        return Err(AggregateError::EmptyCollection {
            dataset_id: dataset_id.to_string(),
            band: band.to_string(),
        });
    }
    debug!(
        dataset = dataset_id,
        band,
        slices = slices.len(),
        "reducing time series"
    );

    let first = slices[0].raster.clip(*region)?;
    let (width, height) = (first.width(), first.height());

    let mut sums = vec![0.0f64; width * height];
    let mut counts = vec![0u32; width * height];
    for slice in &slices {
        let clipped = slice.raster.resample_to(*region, width, height)?;
        for (i, cell) in clipped.cells().iter().enumerate() {
            if let Some(v) = cell {
                sums[i] += v;
                counts[i] += 1;
            }
        }
    }

    let cells = sums
        .iter()
        .zip(counts.iter())
        .map(|(sum, count)| match stat {
            AggregationStat::Mean => {
                if *count > 0 {
                    Some(sum / *count as f64)
                } else {
                    None
                }
            }
        })
        .collect();

    let name = format!("{}/{}", dataset_id, band);
    Ok(RasterLayer::from_cells(name, *region, width, height, cells)?)
}

/// Aggregates every band of a source spec, in the spec's band order.
pub async fn aggregate<C: DatasetCatalog>(
    catalog: &C,
    spec: &SourceSpec,
    region: &Region,
) -> Result<Vec<RasterLayer>, AggregateError> {
    let mut layers = Vec::with_capacity(spec.bands.len());
    for band in &spec.bands {
        layers.push(
            aggregate_band(
                catalog,
                &spec.dataset_id,
                band,
                &spec.range,
                region,
                spec.stat,
            )
            .await?,
        );
    }
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn region() -> Region {
        Region::new(-75.0, 40.0, -74.0, 41.0).unwrap()
    }

    fn range() -> DateRange {
        DateRange::new(date("2023-01-01"), date("2023-12-31")).unwrap()
    }

    fn slice(cells: [Option<f64>; 4]) -> RasterLayer {
        RasterLayer::from_cells("s", region(), 2, 2, cells.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_mean_over_matching_slices() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_slice("ds", "b", date("2023-02-01"), slice([Some(1.0); 4]));
        catalog.add_slice("ds", "b", date("2023-03-01"), slice([Some(3.0); 4]));
        // Outside the window, must not contribute.
        catalog.add_slice("ds", "b", date("2024-01-01"), slice([Some(100.0); 4]));

        let result = aggregate_band(&catalog, "ds", "b", &range(), &region(), AggregationStat::Mean)
            .await
            .unwrap();
        assert_eq!(result.cells(), &[Some(2.0); 4]);
    }

    #[tokio::test]
    async fn test_extent_equals_region_after_clip() {
        let wide = Region::new(-80.0, 35.0, -70.0, 45.0).unwrap();
        let mut catalog = MemoryCatalog::new();
        let raster = RasterLayer::filled("s", wide, 20, 20, Some(5.0)).unwrap();
        catalog.add_slice("ds", "b", date("2023-02-01"), raster);

        let result = aggregate_band(&catalog, "ds", "b", &range(), &region(), AggregationStat::Mean)
            .await
            .unwrap();
        assert_eq!(*result.region(), region(), "clip invariant");
        assert!(result.cells().iter().all(|c| *c == Some(5.0)));
    }

    #[tokio::test]
    async fn test_empty_collection_is_an_error_not_zeros() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_empty_band("ds", "b");

        let err = aggregate_band(&catalog, "ds", "b", &range(), &region(), AggregationStat::Mean)
            .await
            .unwrap_err();
        assert!(
            matches!(err, AggregateError::EmptyCollection { .. }),
            "zero matches must surface as an error, got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_cell_missing_in_one_slice_still_averages() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_slice(
            "ds",
            "b",
            date("2023-02-01"),
            slice([Some(2.0), None, Some(2.0), None]),
        );
        catalog.add_slice(
            "ds",
            "b",
            date("2023-03-01"),
            slice([Some(4.0), Some(6.0), None, None]),
        );

        let result = aggregate_band(&catalog, "ds", "b", &range(), &region(), AggregationStat::Mean)
            .await
            .unwrap();
        assert_eq!(
            result.cells(),
            &[Some(3.0), Some(6.0), Some(2.0), None],
            "mean is over present samples only; all-missing stays missing"
        );
    }

    #[tokio::test]
    async fn test_aggregate_returns_bands_in_spec_order() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_slice("s2", "B8", date("2023-02-01"), slice([Some(0.5); 4]));
        catalog.add_slice("s2", "B4", date("2023-02-01"), slice([Some(0.1); 4]));

        let spec = SourceSpec::new("s2", vec!["B8".into(), "B4".into()], range());
        let bands = aggregate(&catalog, &spec, &region()).await.unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].cells()[0], Some(0.5), "B8 first");
        assert_eq!(bands[1].cells()[0], Some(0.1), "B4 second");
    }
}
