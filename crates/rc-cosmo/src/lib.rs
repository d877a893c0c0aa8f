//! rc-cosmo: cosmological volumes and volumetric event rates.
//!
//! Provides:
//! - `Cosmology` trait (comoving volume, luminosity distance) and a flat ΛCDM
//!   implementation with the Planck 2015 parameters as the default
//! - `RateFunction` trait for volumetric rate densities
//! - shell-rate integration over a redshift grid, scaled by survey exposure

pub mod cosmology;
pub mod error;
pub mod rate;
pub mod shell;

pub use cosmology::{Cosmology, FlatLambdaCdm};
pub use error::{CosmoError, CosmoResult};
pub use rate::{ConstantRate, PowerLawRate, RateFunction};
pub use shell::{Exposure, ShellRates, shell_rate};
