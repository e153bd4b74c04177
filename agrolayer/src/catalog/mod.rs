//! Dataset catalog abstraction
//!
//! The pipeline never talks to a concrete data store directly; it goes
//! through the [`DatasetCatalog`] trait. [`MemoryCatalog`] backs tests
//! and the demo mode, [`FileCatalog`] serves slice files from a local
//! directory. A networked implementation would slot in the same way.

mod file;
mod memory;
mod types;

pub use file::FileCatalog;
pub use memory::MemoryCatalog;
pub use types::{CatalogError, DatasetCatalog, DateRange, EmptyDateRange, TimeSlice};
