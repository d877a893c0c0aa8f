//! Survey and evaluation settings for a [`RateCalculator`](crate::RateCalculator).

use crate::error::{RatesError, RatesResult};
use rc_cosmo::Exposure;
use rc_photometry::{Bandpass, MagSystem, find_band};
use serde::{Deserialize, Serialize};

/// Which magnitude of a light curve counts as "the" magnitude at a redshift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Peak magnitude.
    #[default]
    Peak,
    /// Magnitude a fixed number of days before peak.
    BeforePeak { offset_days: f64 },
    /// Faintest limit the event stays brighter than for this many days.
    TimeAbove { duration_days: f64 },
}

/// How the model flux is set at each trial redshift.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalingPolicy {
    /// Amplitude 1 is a source at 10 pc; dilute by `(d_L / 10 pc)⁻²`.
    #[default]
    LuminosityDistance,
    /// Pin the rest-frame peak to an absolute magnitude.
    PinPeak {
        absolute_magnitude: f64,
        band: Bandpass,
        magsys: MagSystem,
    },
}

impl ScalingPolicy {
    /// Pin the peak in Bessell B, Vega magnitudes.
    pub fn pin_peak_bessell_b(absolute_magnitude: f64) -> RatesResult<Self> {
        Ok(ScalingPolicy::PinPeak {
            absolute_magnitude,
            band: find_band("bessellb")?,
            magsys: MagSystem::Vega,
        })
    }
}

/// Logarithmic redshift sampling of the magnitude map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedshiftGrid {
    /// log10 of the first sampled redshift
    pub logz_start: f64,
    /// log10 increment between samples
    pub logz_step: f64,
}

impl Default for RedshiftGrid {
    fn default() -> Self {
        Self {
            logz_start: -3.5,
            logz_step: 0.05,
        }
    }
}

impl RedshiftGrid {
    pub fn z_start(&self) -> f64 {
        10f64.powf(self.logz_start)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub magsys: MagSystem,
    /// Nominal limiting magnitude
    pub magnitude_limit: f64,
    /// Intrinsic magnitude scatter; enables the completeness weighting
    pub dispersion: Option<f64>,
    /// Detections are followed to `limit + sigma_cut · dispersion`
    pub sigma_cut: f64,
    pub grid: RedshiftGrid,
    /// Sky coverage [%]
    pub area_percent: f64,
    /// Survey baseline [days]
    pub duration_days: f64,
    pub mode: EvaluationMode,
    pub scaling: ScalingPolicy,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            magsys: MagSystem::Ab,
            magnitude_limit: 24.0,
            dispersion: None,
            sigma_cut: 3.0,
            grid: RedshiftGrid::default(),
            area_percent: 100.0,
            duration_days: 365.25,
            mode: EvaluationMode::Peak,
            scaling: ScalingPolicy::LuminosityDistance,
        }
    }
}

impl CalculatorConfig {
    pub fn validate(&self) -> RatesResult<()> {
        let invalid = |what: String| Err(RatesError::InvalidArg { what });

        if !self.magnitude_limit.is_finite() {
            return invalid(format!("magnitude limit {}", self.magnitude_limit));
        }
        if let Some(sigma) = self.dispersion {
            if !(sigma.is_finite() && sigma > 0.0) {
                return invalid(format!("dispersion must be positive, got {sigma}"));
            }
        }
        if !(self.sigma_cut.is_finite() && self.sigma_cut >= 0.0) {
            return invalid(format!("sigma cut must be >= 0, got {}", self.sigma_cut));
        }
        if !self.grid.logz_start.is_finite() {
            return invalid(format!("logz_start {}", self.grid.logz_start));
        }
        if !(self.grid.logz_step.is_finite() && self.grid.logz_step > 0.0) {
            return invalid(format!("logz_step must be positive, got {}", self.grid.logz_step));
        }
        match self.mode {
            EvaluationMode::Peak => {}
            EvaluationMode::BeforePeak { offset_days } if offset_days.is_finite() => {}
            EvaluationMode::TimeAbove { duration_days }
                if duration_days.is_finite() && duration_days >= 0.0 => {}
            mode => return invalid(format!("evaluation mode {mode:?}")),
        }
        if let ScalingPolicy::PinPeak {
            absolute_magnitude, ..
        } = &self.scaling
        {
            if !absolute_magnitude.is_finite() {
                return invalid(format!("absolute magnitude {absolute_magnitude}"));
            }
        }
        self.exposure()?;
        Ok(())
    }

    /// Magnitude margin added to a query limit for scattered detections.
    pub fn smear(&self) -> f64 {
        self.dispersion.map_or(0.0, |sigma| self.sigma_cut * sigma)
    }

    /// The limit the magnitude map must cover for the nominal limit.
    pub fn working_limit(&self) -> f64 {
        self.magnitude_limit + self.smear()
    }

    pub fn exposure(&self) -> RatesResult<Exposure> {
        Ok(Exposure::from_percent(self.duration_days, self.area_percent)?)
    }
}
