//! In-memory catalog.
//!
//! The fixture implementation of [`DatasetCatalog`]: slices are
//! registered up front per (dataset, band) pair. Used by tests and by
//! the CLI's demo mode.

use crate::catalog::{CatalogError, DatasetCatalog, DateRange, TimeSlice};
use crate::geo::Region;
use crate::raster::RasterLayer;
use chrono::NaiveDate;
use std::collections::HashMap;

/// A catalog whose entire contents live in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    slices: HashMap<(String, String), Vec<TimeSlice>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one slice under a (dataset, band) pair.
    ///
    /// Registering a band with no slices is also meaningful: the band
    /// exists but any query over it yields an empty collection.
    pub fn add_slice(
        &mut self,
        dataset_id: impl Into<String>,
        band: impl Into<String>,
        date: NaiveDate,
        raster: RasterLayer,
    ) {
        self.slices
            .entry((dataset_id.into(), band.into()))
            .or_default()
            .push(TimeSlice { date, raster });
    }

    /// Registers a (dataset, band) pair with no slices.
    pub fn add_empty_band(&mut self, dataset_id: impl Into<String>, band: impl Into<String>) {
        self.slices
            .entry((dataset_id.into(), band.into()))
            .or_default();
    }

    fn lookup(&self, dataset_id: &str, band: &str) -> Result<&Vec<TimeSlice>, CatalogError> {
        let key = (dataset_id.to_string(), band.to_string());
        if let Some(slices) = self.slices.get(&key) {
            return Ok(slices);
        }
        if self.slices.keys().any(|(d, _)| d == dataset_id) {
            return Err(CatalogError::UnknownBand {
                dataset_id: dataset_id.to_string(),
                band: band.to_string(),
            });
        }
        Err(CatalogError::UnknownDataset(dataset_id.to_string()))
    }
}

impl DatasetCatalog for MemoryCatalog {
    async fn query(
        &self,
        dataset_id: &str,
        band: &str,
        range: &DateRange,
        region: &Region,
    ) -> Result<Vec<TimeSlice>, CatalogError> {
        let slices = self.lookup(dataset_id, band)?;
        Ok(slices
            .iter()
            .filter(|s| range.contains(s.date) && s.raster.region().intersects(region))
            .cloned()
            .collect())
    }
}
