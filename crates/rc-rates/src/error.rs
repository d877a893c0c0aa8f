//! Rate calculation errors.

use rc_core::RcError;
use rc_cosmo::CosmoError;
use rc_photometry::PhotometryError;
use rc_solver::SolverError;
use thiserror::Error;

pub type RatesResult<T> = Result<T, RatesError>;

#[derive(Error, Debug)]
pub enum RatesError {
    /// The map hit the physical redshift ceiling before reaching the
    /// requested magnitude.
    #[error(
        "Magnitude {requested:.3} is beyond coverage: the model reaches {reached:.3} at the redshift ceiling z = {z_ceiling:.4}"
    )]
    CoverageExhausted {
        requested: f64,
        reached: f64,
        z_ceiling: f64,
    },

    /// A new sample is not fainter than the previous one.
    #[error("Magnitude does not increase with redshift at z = {z}: {magnitude} after {previous}")]
    NonMonotonic {
        z: f64,
        magnitude: f64,
        previous: f64,
    },

    #[error("Non-finite magnitude {magnitude} at z = {z}")]
    NonFiniteMagnitude { z: f64, magnitude: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Photometry error: {0}")]
    Photometry(#[from] PhotometryError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Cosmology error: {0}")]
    Cosmo(#[from] CosmoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<RatesError> for RcError {
    fn from(err: RatesError) -> Self {
        match err {
            RatesError::Photometry(e) => e.into(),
            RatesError::Solver(e) => e.into(),
            RatesError::Cosmo(e) => e.into(),
            RatesError::InvalidArg { what } => RcError::InvalidArg { what },
            e @ RatesError::NonMonotonic { .. } => RcError::Invariant {
                what: e.to_string(),
            },
            other => RcError::Numerical {
                what: other.to_string(),
            },
        }
    }
}
