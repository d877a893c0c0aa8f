//! CLI error type.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read survey file: {path}")]
    SurveyRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output: {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Survey file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Rates(#[from] rc_rates::RatesError),

    #[error("Photometry error: {0}")]
    Photometry(#[from] rc_photometry::PhotometryError),

    #[error("Cosmology error: {0}")]
    Cosmo(#[from] rc_cosmo::CosmoError),
}

pub type CliResult<T> = Result<T, CliError>;
