//! rc-core: stable foundation for the rate engine.
//!
//! Contains:
//! - units (uom SI types + astronomical constructors and constants)
//! - numeric (tolerances, grids and tabulated integration)
//! - error (shared error type)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{RcError, RcResult};
pub use numeric::*;
pub use units::*;
