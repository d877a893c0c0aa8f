//! rc-rates: expected transient counts for a survey.
//!
//! A [`RateCalculator`] scales a transient model to trial redshifts, records
//! the observable magnitude at each in a [`MagnitudeRedshiftMap`], and
//! integrates a volumetric rate over comoving shells out to the redshift
//! where the model fades below the survey limit.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rc_cosmo::{ConstantRate, FlatLambdaCdm};
//! use rc_photometry::{BlackbodyPulse, find_band};
//! use rc_rates::{CalculatorConfig, RateCalculator};
//!
//! let band = find_band("bessellb").unwrap();
//! let mut calc = RateCalculator::new(
//!     BlackbodyPulse::default(),
//!     band,
//!     CalculatorConfig::default(),
//!     Arc::new(FlatLambdaCdm::planck15()),
//!     Arc::new(ConstantRate(3e-5)),
//! )
//! .unwrap();
//! let n = calc.expected_count(21.0, 100).unwrap();
//! println!("{n:.1} events per year");
//! ```

pub mod calculator;
pub mod completeness;
pub mod config;
pub mod error;
pub mod map;
pub mod persist;

pub use calculator::{CountEstimate, Coverage, RateCalculator, RedshiftDistribution};
pub use completeness::gaussian_completeness;
pub use config::{CalculatorConfig, EvaluationMode, RedshiftGrid, ScalingPolicy};
pub use error::{RatesError, RatesResult};
pub use map::{Extension, MagnitudeRedshiftMap};
pub use persist::CalculatorState;
