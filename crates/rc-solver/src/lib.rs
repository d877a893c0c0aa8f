//! Scalar numerical kernels for the rate engine.
//!
//! Everything here works on plain `f64` closures:
//! - bracketing bisection and derivative-free Newton root finding
//! - bounded scalar minimization (Brent)
//! - monotone cubic interpolation
//! - Simpson quadrature

pub mod error;
pub mod minimize;
pub mod quadrature;
pub mod roots;
pub mod spline;

pub use error::{SolverError, SolverResult};
pub use minimize::{Minimum, MinimizeConfig, minimize_bounded};
pub use quadrature::simpson;
pub use roots::{BisectConfig, NewtonConfig, bisect, newton};
pub use spline::MonotoneSpline;
