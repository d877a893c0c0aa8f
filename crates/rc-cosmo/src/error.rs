//! Cosmology and shell-integration errors.

use rc_core::RcError;
use thiserror::Error;

pub type CosmoResult<T> = Result<T, CosmoError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CosmoError {
    /// Parameter outside its physical range.
    #[error("Invalid cosmological parameter {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    /// Malformed redshift grid or exposure.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}

impl From<CosmoError> for RcError {
    fn from(err: CosmoError) -> Self {
        match err {
            CosmoError::InvalidParameter { what, value } => RcError::InvalidArg {
                what: format!("cosmology parameter {what} = {value}"),
            },
            CosmoError::InvalidArg { what } => RcError::InvalidArg { what },
        }
    }
}
