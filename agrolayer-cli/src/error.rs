//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes.

use agrolayer::catalog::CatalogError;
use agrolayer::config::ConfigFileError;
use agrolayer::pipeline::ParamsError;
use agrolayer::render::RenderError;
use std::process;
use thiserror::Error;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigFileError),

    /// Configuration produced invalid pipeline parameters
    #[error("Invalid pipeline parameters: {0}")]
    Params(#[from] ParamsError),

    /// Failed to open the slice catalog
    #[error("Failed to open catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Failed to set up the output surface
    #[error("Failed to set up output: {0}")]
    Output(#[from] RenderError),

    /// Nothing rendered at all
    #[error("No layer could be rendered")]
    NothingRendered,

    /// Neither --catalog nor --demo was given
    #[error("No data source selected")]
    NoCatalog,
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Catalog(CatalogError::MalformedSlice { .. }) => {
                eprintln!();
                eprintln!("Slice files are CSV: a 7-field header line");
                eprintln!("  dataset,band,date,min_lon,min_lat,max_lon,max_lat");
                eprintln!("followed by rows of samples (empty field = missing).");
            }
            CliError::NothingRendered => {
                eprintln!();
                eprintln!("Check that the catalog directory contains slices for the");
                eprintln!("configured datasets, bands, region, and date window.");
            }
            CliError::NoCatalog => {
                eprintln!();
                eprintln!("Pass --catalog <DIR> to read slice files, or --demo to");
                eprintln!("run against a built-in synthetic catalog.");
            }
            _ => {}
        }

        process::exit(1)
    }
}
