//! Error types for solver operations.

use rc_core::RcError;
use thiserror::Error;

/// Errors that can occur in the scalar solvers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Non-finite value in {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid input: {what}")]
    InvalidInput { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for RcError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ConvergenceFailed { what } => RcError::Numerical { what },
            SolverError::NonFinite { what, value } => RcError::NonFinite { what, value },
            SolverError::InvalidInput { what } => RcError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_to_rc_error() {
        let err = SolverError::ConvergenceFailed {
            what: "bisection".into(),
        };
        assert!(err.to_string().contains("bisection"));
        let rc: RcError = err.into();
        assert!(matches!(rc, RcError::Numerical { .. }));
    }
}
