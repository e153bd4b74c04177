//! Directory-backed catalog.
//!
//! Serves time slices from a directory of CSV slice files, one slice
//! per file. The format is deliberately small:
//!
//! ```text
//! dataset_id,band,date,min_lon,min_lat,max_lon,max_lat
//! 1.5,2.0,,3.25
//! 0.5,,1.0,2.0
//! ```
//!
//! The first record identifies the slice; every following record is
//! one grid row of samples, north to south, with an empty field as the
//! missing marker. All sample rows must have the same width.

use crate::catalog::{CatalogError, DatasetCatalog, DateRange, MemoryCatalog, TimeSlice};
use crate::geo::Region;
use crate::raster::RasterLayer;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A read-only catalog over a directory of `.csv` slice files.
///
/// The directory is scanned once at open time; queries are answered
/// from the parsed index.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    index: MemoryCatalog,
    dir: PathBuf,
}

impl FileCatalog {
    /// Scans `dir` and parses every `.csv` file into the index.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or the first malformed slice
    /// file; a catalog with a broken file is refused outright rather
    /// than served partially.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref().to_path_buf();
        let mut index = MemoryCatalog::new();
        let mut count = 0usize;
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }
            let (dataset_id, band, date, raster) = parse_slice_file(&path)?;
            index.add_slice(dataset_id, band, date, raster);
            count += 1;
        }
        debug!(dir = %dir.display(), slices = count, "file catalog opened");
        Ok(FileCatalog { index, dir })
    }

    /// Directory this catalog was opened from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DatasetCatalog for FileCatalog {
    async fn query(
        &self,
        dataset_id: &str,
        band: &str,
        range: &DateRange,
        region: &Region,
    ) -> Result<Vec<TimeSlice>, CatalogError> {
        self.index.query(dataset_id, band, range, region).await
    }
}

fn malformed(path: &Path, reason: impl Into<String>) -> CatalogError {
    CatalogError::MalformedSlice {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

fn parse_slice_file(path: &Path) -> Result<(String, String, NaiveDate, RasterLayer), CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| malformed(path, e.to_string()))?;

    let mut records = reader.records();
    let header = records
        .next()
        .ok_or_else(|| malformed(path, "empty file"))?
        .map_err(|e| malformed(path, e.to_string()))?;
    if header.len() != 7 {
        return Err(malformed(
            path,
            format!("header needs 7 fields, got {}", header.len()),
        ));
    }

    let dataset_id = header[0].to_string();
    let band = header[1].to_string();
    let date: NaiveDate = header[2]
        .parse()
        .map_err(|_| malformed(path, format!("bad date '{}'", &header[2])))?;
    let mut bounds = [0.0f64; 4];
    for (i, b) in bounds.iter_mut().enumerate() {
        *b = header[3 + i]
            .parse()
            .map_err(|_| malformed(path, format!("bad bound '{}'", &header[3 + i])))?;
    }
    let region = Region::new(bounds[0], bounds[1], bounds[2], bounds[3])
        .map_err(|e| malformed(path, e.to_string()))?;

    let mut cells: Vec<Option<f64>> = Vec::new();
    let mut width = 0usize;
    let mut height = 0usize;
    for record in records {
        let record = record.map_err(|e| malformed(path, e.to_string()))?;
        if width == 0 {
            width = record.len();
        } else if record.len() != width {
            return Err(malformed(
                path,
                format!("row {} has {} fields, expected {}", height + 1, record.len(), width),
            ));
        }
        for field in record.iter() {
            let field = field.trim();
            if field.is_empty() {
                cells.push(None);
            } else {
                let value: f64 = field
                    .parse()
                    .map_err(|_| malformed(path, format!("bad sample '{}'", field)))?;
                cells.push(Some(value));
            }
        }
        height += 1;
    }
    if height == 0 {
        return Err(malformed(path, "no sample rows"));
    }

    let name = format!("{}/{}", dataset_id, band);
    let raster = RasterLayer::from_cells(name, region, width, height, cells)
        .map_err(|e| malformed(path, e.to_string()))?;
    Ok((dataset_id, band, date, raster))
}
