//! Photometry errors.

use rc_core::RcError;
use rc_solver::SolverError;
use thiserror::Error;

/// Result type for photometry operations.
pub type PhotometryResult<T> = Result<T, PhotometryError>;

/// Errors that can occur during synthetic photometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhotometryError {
    /// Malformed bandpass table.
    #[error("Invalid bandpass {name}: {what}")]
    InvalidBandpass { name: String, what: String },

    /// Band name not present in the catalog.
    #[error("Unknown band: {name}")]
    UnknownBand { name: String },

    /// Magnitude system cannot be used with this band.
    #[error("Magnitude system {system} not available for band {band}")]
    UnsupportedMagSystem { system: String, band: String },

    /// Every sampled flux was non-finite (band outside model coverage).
    #[error("No finite flux in band {band} over the model phase range")]
    NonFiniteFlux { band: String },

    /// Peak flux is zero or negative.
    #[error("No positive flux in band {band}")]
    NoPositiveFlux { band: String },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// Root finding / minimization failure.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

impl From<PhotometryError> for RcError {
    fn from(err: PhotometryError) -> Self {
        match err {
            PhotometryError::Solver(e) => e.into(),
            PhotometryError::InvalidArg { what } => RcError::InvalidArg { what },
            other => RcError::Numerical {
                what: other.to_string(),
            },
        }
    }
}
