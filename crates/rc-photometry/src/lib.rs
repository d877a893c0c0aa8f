//! rc-photometry: synthetic photometry of transient models.
//!
//! Provides:
//! - Bandpass definitions and a catalog of built-in bands
//! - Magnitude systems (AB, Vega via per-band offsets)
//! - `TransientModel` trait: the capability the rate engine consumes
//! - `BlackbodyPulse`, an analytic reference transient
//! - Peak location, time-above-threshold and light-curve sampling
//!
//! # Example
//!
//! ```no_run
//! use rc_photometry::{BlackbodyPulse, MagSystem, find_band, locate_peak};
//!
//! let model = BlackbodyPulse::default();
//! let band = find_band("bessellb").unwrap();
//! let peak = locate_peak(&model, &band, MagSystem::Ab, 1.0).unwrap();
//! println!("peak at {:.1} d, {:.2} mag", peak.phase, peak.magnitude);
//! ```

pub mod bandpass;
pub mod catalog;
pub mod error;
pub mod lightcurve;
pub mod magsys;
pub mod model;
pub mod models;
pub mod peak;
pub mod threshold;

// Re-exports for ergonomics
pub use bandpass::Bandpass;
pub use catalog::{BandCatalogEntry, builtin_bands, filter_builtin_bands, find_band};
pub use error::{PhotometryError, PhotometryResult};
pub use lightcurve::{LightCurve, sample_light_curve};
pub use magsys::{MagSystem, Photometer};
pub use model::TransientModel;
pub use models::{BlackbodyPulse, PulseParams};
pub use peak::{DEFAULT_SAMPLING, Peak, locate_peak};
pub use threshold::{TimeAbove, interval_above_threshold, magnitude_for_duration};
