//! Built-in analytic transient models.

mod blackbody_pulse;

pub use blackbody_pulse::{BlackbodyPulse, PulseParams};
