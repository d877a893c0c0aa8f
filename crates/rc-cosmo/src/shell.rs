//! Expected event counts in comoving-volume shells.

use crate::cosmology::Cosmology;
use crate::error::{CosmoError, CosmoResult};
use crate::rate::RateFunction;
use rc_core::linspace;
use rc_core::units::{Time, days, in_days, in_julian_years};

/// Survey exposure: baseline and covered fraction of the sky.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exposure {
    pub duration: Time,
    /// Fraction of the full sky, in [0, 1]
    pub area_fraction: f64,
}

impl Exposure {
    /// Build from a duration in days and a sky area in percent (0–100).
    pub fn from_percent(duration_days: f64, area_percent: f64) -> CosmoResult<Self> {
        if !(duration_days.is_finite() && duration_days >= 0.0) {
            return Err(CosmoError::InvalidArg {
                what: format!("survey duration must be >= 0 days, got {duration_days}"),
            });
        }
        if !(area_percent.is_finite() && (0.0..=100.0).contains(&area_percent)) {
            return Err(CosmoError::InvalidArg {
                what: format!("sky area must be within 0-100 %, got {area_percent}"),
            });
        }
        Ok(Self {
            duration: days(duration_days),
            area_fraction: area_percent / 100.0,
        })
    }

    pub fn duration_days(&self) -> f64 {
        in_days(self.duration)
    }

    pub fn area_percent(&self) -> f64 {
        self.area_fraction * 100.0
    }

    /// Multiplier turning a full-sky, one-year count into this exposure.
    pub fn scale(&self) -> f64 {
        in_julian_years(self.duration) * self.area_fraction
    }
}

impl Default for Exposure {
    /// Full sky for one Julian year.
    fn default() -> Self {
        Self {
            duration: days(365.25),
            area_fraction: 1.0,
        }
    }
}

/// Per-shell expected counts and the shell centers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShellRates {
    pub rates: Vec<f64>,
    pub z_centers: Vec<f64>,
}

impl ShellRates {
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.rates.iter().sum()
    }
}

/// Expected observer-frame counts in `n_bins` equal-width shells over `[z_min, z_max]`.
///
/// ```text
/// N_i = scale · (V(z_i+1) - V(z_i)) · R(z_c) / (1 + z_c)
/// ```
///
/// The `1 + z_c` divisor converts the rest-frame rate into the observer frame.
pub fn shell_rate(
    z_min: f64,
    z_max: f64,
    rate: &dyn RateFunction,
    n_bins: usize,
    cosmology: &dyn Cosmology,
    exposure: &Exposure,
) -> CosmoResult<ShellRates> {
    if n_bins == 0 {
        return Err(CosmoError::InvalidArg {
            what: "shell integration needs at least one bin".to_string(),
        });
    }
    if !(z_min.is_finite() && z_max.is_finite() && z_min >= 0.0 && z_max >= z_min) {
        return Err(CosmoError::InvalidArg {
            what: format!("invalid redshift range [{z_min}, {z_max}]"),
        });
    }

    let scale = exposure.scale();
    let edges = linspace(z_min, z_max, n_bins + 1);
    let volumes = cosmology.comoving_volumes(&edges);

    let mut rates = Vec::with_capacity(n_bins);
    let mut z_centers = Vec::with_capacity(n_bins);
    for i in 0..n_bins {
        let z_c = 0.5 * (edges[i] + edges[i + 1]);
        let shell_volume = volumes[i + 1] - volumes[i];
        rates.push(scale * shell_volume * rate.rate(z_c) / (1.0 + z_c));
        z_centers.push(z_c);
    }

    Ok(ShellRates { rates, z_centers })
}
