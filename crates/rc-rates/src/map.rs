//! Lazily extended redshift ↔ magnitude map.
//!
//! Samples are taken on a logarithmic redshift grid and only ever appended at
//! the high-redshift end. Both interpolants are rebuilt after every growth
//! step, so lookups never see a stale spline.

use crate::error::{RatesError, RatesResult};
use rc_photometry::Bandpass;
use rc_solver::MonotoneSpline;
use tracing::debug;

/// How an [`MagnitudeRedshiftMap::extend_until`] call ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extension {
    /// The last sample is at least as faint as the target.
    Reached,
    /// The next sample would cross the redshift ceiling.
    Ceiling,
}

#[derive(Clone, Debug)]
pub struct MagnitudeRedshiftMap {
    z_samples: Vec<f64>,
    mag_samples: Vec<f64>,
    mag_of_z: MonotoneSpline,
    z_of_mag: MonotoneSpline,
}

impl MagnitudeRedshiftMap {
    /// Map with a single sample.
    pub fn seed(z: f64, magnitude: f64) -> RatesResult<Self> {
        if !(z.is_finite() && z > 0.0) {
            return Err(RatesError::InvalidArg {
                what: format!("seed redshift must be positive, got {z}"),
            });
        }
        Self::from_samples(vec![z], vec![magnitude])
    }

    /// Rebuild a map from stored samples.
    ///
    /// Redshifts and magnitudes must both be strictly increasing.
    pub fn from_samples(z_samples: Vec<f64>, mag_samples: Vec<f64>) -> RatesResult<Self> {
        if z_samples.len() != mag_samples.len() || z_samples.is_empty() {
            return Err(RatesError::InvalidArg {
                what: format!(
                    "map needs matching, non-empty samples ({} redshifts, {} magnitudes)",
                    z_samples.len(),
                    mag_samples.len()
                ),
            });
        }
        for (i, (&z, &m)) in z_samples.iter().zip(&mag_samples).enumerate() {
            if !m.is_finite() {
                return Err(RatesError::NonFiniteMagnitude { z, magnitude: m });
            }
            if i > 0 && m <= mag_samples[i - 1] {
                return Err(RatesError::NonMonotonic {
                    z,
                    magnitude: m,
                    previous: mag_samples[i - 1],
                });
            }
        }

        let mag_of_z = MonotoneSpline::new(z_samples.clone(), mag_samples.clone())?;
        let z_of_mag = MonotoneSpline::new(mag_samples.clone(), z_samples.clone())?;
        Ok(Self {
            z_samples,
            mag_samples,
            mag_of_z,
            z_of_mag,
        })
    }

    /// Redshift at which the band's blue edge leaves the model's spectral
    /// coverage.
    pub fn max_physical_redshift(band: &Bandpass, model_min_wave: f64) -> f64 {
        band.min_wave() / model_min_wave - 1.0
    }

    pub fn z_samples(&self) -> &[f64] {
        &self.z_samples
    }

    pub fn mag_samples(&self) -> &[f64] {
        &self.mag_samples
    }

    pub fn len(&self) -> usize {
        self.z_samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_samples.is_empty()
    }

    /// Highest sampled `(z, magnitude)`.
    pub fn last(&self) -> (f64, f64) {
        let n = self.z_samples.len() - 1;
        (self.z_samples[n], self.mag_samples[n])
    }

    pub fn magnitude_of(&self, z: f64) -> f64 {
        self.mag_of_z.evaluate(z)
    }

    pub fn redshift_of(&self, magnitude: f64) -> f64 {
        self.z_of_mag.evaluate(magnitude)
    }

    /// Append samples until the last magnitude reaches `target` or the next
    /// redshift would reach `z_ceiling`.
    ///
    /// Samples gathered before an evaluation error are kept and the splines
    /// rebuilt before the error is returned.
    pub fn extend_until<F>(
        &mut self,
        target: f64,
        z_ceiling: f64,
        logz_step: f64,
        mut evaluate: F,
    ) -> RatesResult<Extension>
    where
        F: FnMut(f64) -> RatesResult<f64>,
    {
        if !(logz_step.is_finite() && logz_step > 0.0) {
            return Err(RatesError::InvalidArg {
                what: format!("logz_step must be positive, got {logz_step}"),
            });
        }

        let factor = 10f64.powf(logz_step);
        let start_len = self.len();
        let outcome = loop {
            let (z_last, m_last) = self.last();
            if m_last >= target {
                break Ok(Extension::Reached);
            }
            let z = z_last * factor;
            if z >= z_ceiling {
                break Ok(Extension::Ceiling);
            }

            let magnitude = match evaluate(z) {
                Ok(m) => m,
                Err(err) => break Err(err),
            };
            if !magnitude.is_finite() {
                break Err(RatesError::NonFiniteMagnitude { z, magnitude });
            }
            if magnitude <= m_last {
                break Err(RatesError::NonMonotonic {
                    z,
                    magnitude,
                    previous: m_last,
                });
            }

            debug!(z, magnitude, "magnitude map sample");
            self.z_samples.push(z);
            self.mag_samples.push(magnitude);
        };

        if self.len() > start_len {
            self.rebuild()?;
        }
        outcome
    }

    fn rebuild(&mut self) -> RatesResult<()> {
        self.mag_of_z = MonotoneSpline::new(self.z_samples.clone(), self.mag_samples.clone())?;
        self.z_of_mag = MonotoneSpline::new(self.mag_samples.clone(), self.z_samples.clone())?;
        Ok(())
    }
}
