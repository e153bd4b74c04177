//! Catalog types and traits

use crate::geo::Region;
use crate::raster::RasterLayer;
use chrono::NaiveDate;
use std::future::Future;
use thiserror::Error;

/// Errors that can occur during catalog queries.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No dataset registered under this identifier
    #[error("unknown dataset: '{0}'")]
    UnknownDataset(String),

    /// Dataset exists but has no band with this name
    #[error("dataset '{dataset_id}' has no band '{band}'")]
    UnknownBand { dataset_id: String, band: String },

    /// A slice file could not be parsed
    #[error("malformed slice {path}: {reason}")]
    MalformedSlice { path: String, reason: String },

    /// Filesystem access failed
    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A half-open calendar date window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Error building a date range with start on or after end.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("empty date range: {start} to {end}")]
pub struct EmptyDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EmptyDateRange> {
        if start >= end {
            return Err(EmptyDateRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// Whether a date falls inside the window. Start inclusive, end exclusive.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// One time step of one band of one dataset.
#[derive(Debug, Clone)]
pub struct TimeSlice {
    /// Observation date of this slice
    pub date: NaiveDate,
    /// The band's samples for this date
    pub raster: RasterLayer,
}

/// Read-only access to a catalog of raster time-series datasets.
///
/// This is the seam between the pipeline and whatever actually stores
/// the data: an in-memory fixture in tests, a directory of slice files
/// in the CLI, or a remote service in a networked deployment. Queries
/// never mutate anything.
pub trait DatasetCatalog: Send + Sync {
    /// Fetches the time slices of `band` in `dataset_id` whose date
    /// falls within `range` and whose extent intersects `region`.
    ///
    /// Returns an empty vector when the dataset and band exist but no
    /// slice matches the filter; the aggregator turns that into an
    /// explicit empty-collection error rather than inventing data.
    fn query(
        &self,
        dataset_id: &str,
        band: &str,
        range: &DateRange,
        region: &Region,
    ) -> impl Future<Output = Result<Vec<TimeSlice>, CatalogError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_date_range_is_half_open() {
        let range = DateRange::new(date("2023-01-01"), date("2023-12-31")).unwrap();
        assert!(range.contains(date("2023-01-01")), "start is inclusive");
        assert!(range.contains(date("2023-12-30")));
        assert!(!range.contains(date("2023-12-31")), "end is exclusive");
        assert!(!range.contains(date("2022-12-31")));
    }

    #[test]
    fn test_date_range_rejects_empty() {
        let result = DateRange::new(date("2023-06-01"), date("2023-06-01"));
        assert!(result.is_err());
    }
}
