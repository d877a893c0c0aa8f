//! Blackbody spectrum under an asymmetric Gaussian light curve.
//!
//! The rest-frame spectral flux density at 10 pc is
//! `peak_flux · g(t) · B_λ(λ, T) / B_λ(λ_ref, T)` where `g` is a Gaussian in
//! phase with separate rise and fall widths. Observed at redshift `z`,
//! phases and wavelengths stretch by `1 + z` and the flux density drops by
//! `1 / (1 + z)`; distance dimming is carried by the amplitude.

use crate::bandpass::Bandpass;
use crate::error::{PhotometryError, PhotometryResult};
use crate::model::TransientModel;
use rc_core::units::constants::HC_OVER_K_AA_K;
use serde::{Deserialize, Serialize};

/// Rest-frame parameters of a [`BlackbodyPulse`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseParams {
    /// Photospheric temperature [K]
    pub temperature: f64,
    /// f_λ at `reference_wave` and peak, at 10 pc [erg s⁻¹ cm⁻² Å⁻¹]
    pub peak_flux: f64,
    /// Normalization wavelength [Å]
    pub reference_wave: f64,
    /// Phase of maximum light [days]
    pub peak_phase: f64,
    /// Gaussian width before peak [days]
    pub rise_width: f64,
    /// Gaussian width after peak [days]
    pub fall_width: f64,
    /// Phase window [days]
    pub min_phase: f64,
    pub max_phase: f64,
    /// Wavelength window [Å]
    pub min_wave: f64,
    pub max_wave: f64,
}

impl Default for PulseParams {
    /// Roughly a normal Type Ia supernova: M_B ≈ -19.3 at peak.
    fn default() -> Self {
        Self {
            temperature: 11_000.0,
            peak_flux: 0.3,
            reference_wave: 4400.0,
            peak_phase: 0.0,
            rise_width: 10.0,
            fall_width: 20.0,
            min_phase: -20.0,
            max_phase: 60.0,
            min_wave: 1000.0,
            max_wave: 25_000.0,
        }
    }
}

impl PulseParams {
    fn validate(&self) -> PhotometryResult<()> {
        let positive = [
            ("temperature", self.temperature),
            ("peak_flux", self.peak_flux),
            ("reference_wave", self.reference_wave),
            ("rise_width", self.rise_width),
            ("fall_width", self.fall_width),
            ("min_wave", self.min_wave),
        ];
        for (what, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(PhotometryError::InvalidArg {
                    what: format!("pulse {what} must be positive, got {v}"),
                });
            }
        }
        if !(self.min_phase <= self.peak_phase && self.peak_phase <= self.max_phase)
            || self.min_phase >= self.max_phase
        {
            return Err(PhotometryError::InvalidArg {
                what: format!(
                    "pulse phase window [{}, {}] must contain the peak {}",
                    self.min_phase, self.max_phase, self.peak_phase
                ),
            });
        }
        if !(self.max_wave > self.min_wave) {
            return Err(PhotometryError::InvalidArg {
                what: format!("pulse wave window [{}, {}]", self.min_wave, self.max_wave),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlackbodyPulse {
    name: String,
    params: PulseParams,
    redshift: f64,
    amplitude: f64,
}

impl BlackbodyPulse {
    pub fn new(name: impl Into<String>, params: PulseParams) -> PhotometryResult<Self> {
        params.validate()?;
        Ok(Self {
            name: name.into(),
            params,
            redshift: 0.0,
            amplitude: 1.0,
        })
    }

    pub fn params(&self) -> &PulseParams {
        &self.params
    }

    /// Light-curve envelope at rest-frame `phase`, 1 at peak.
    pub fn envelope(&self, phase: f64) -> f64 {
        let p = &self.params;
        let width = if phase < p.peak_phase {
            p.rise_width
        } else {
            p.fall_width
        };
        let x = (phase - p.peak_phase) / width;
        (-0.5 * x * x).exp()
    }

    /// Planck spectrum at rest-frame `wave`, 1 at the reference wavelength.
    pub fn spectral_shape(&self, wave: f64) -> f64 {
        let p = &self.params;
        planck(wave, p.temperature) / planck(p.reference_wave, p.temperature)
    }
}

impl Default for BlackbodyPulse {
    fn default() -> Self {
        Self {
            name: "blackbody-pulse".to_string(),
            params: PulseParams::default(),
            redshift: 0.0,
            amplitude: 1.0,
        }
    }
}

/// Unnormalized B_λ.
fn planck(wave: f64, temperature: f64) -> f64 {
    1.0 / (wave.powi(5) * (HC_OVER_K_AA_K / (wave * temperature)).exp_m1())
}

impl TransientModel for BlackbodyPulse {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_time(&self) -> f64 {
        self.params.min_phase * (1.0 + self.redshift)
    }

    fn max_time(&self) -> f64 {
        self.params.max_phase * (1.0 + self.redshift)
    }

    fn min_wave(&self) -> f64 {
        self.params.min_wave * (1.0 + self.redshift)
    }

    fn max_wave(&self) -> f64 {
        self.params.max_wave * (1.0 + self.redshift)
    }

    fn redshift(&self) -> f64 {
        self.redshift
    }

    fn set_redshift(&mut self, z: f64) {
        self.redshift = z;
    }

    fn amplitude(&self) -> f64 {
        self.amplitude
    }

    fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude;
    }

    fn band_flux(&self, band: &Bandpass, phase: f64) -> f64 {
        if !self.covers(band) {
            return f64::NAN;
        }
        let zp1 = 1.0 + self.redshift;
        let scale = self.amplitude * self.params.peak_flux * self.envelope(phase / zp1) / zp1;
        if scale == 0.0 {
            return 0.0;
        }
        band.photon_flux(|wave| scale * self.spectral_shape(wave / zp1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_band;
    use crate::magsys::MagSystem;

    #[test]
    fn default_peak_is_near_type_ia() {
        let model = BlackbodyPulse::default();
        let band = find_band("bessellb").unwrap();
        let mag = model.band_magnitude(&band, MagSystem::Ab, 0.0).unwrap();
        assert!((mag + 19.3).abs() < 0.3, "M_B = {mag}");
    }

    #[test]
    fn envelope_is_asymmetric() {
        let model = BlackbodyPulse::default();
        assert_eq!(model.envelope(0.0), 1.0);
        assert!((model.envelope(-10.0) - (-0.5_f64).exp()).abs() < 1e-12);
        assert!((model.envelope(20.0) - (-0.5_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn redshift_stretches_windows() {
        let mut model = BlackbodyPulse::default();
        model.set_redshift(1.0);
        assert_eq!(model.min_time(), -40.0);
        assert_eq!(model.max_time(), 120.0);
        assert_eq!(model.min_wave(), 2000.0);
    }

    #[test]
    fn redshift_dims_flux() {
        let band = find_band("bessellr").unwrap();
        let near = BlackbodyPulse::default();
        let mut far = near.clone();
        far.set_redshift(0.1);
        assert!(far.band_flux(&band, 0.0) < near.band_flux(&band, 0.0));
        // The clone is independent
        assert_eq!(near.redshift(), 0.0);
    }

    #[test]
    fn uncovered_band_is_nan() {
        let model = BlackbodyPulse::default();
        let band = Bandpass::top_hat("far-uv", 500.0, 900.0).unwrap();
        assert!(!model.covers(&band));
        assert!(model.band_flux(&band, 0.0).is_nan());
    }

    #[test]
    fn flux_scales_with_amplitude() {
        let band = find_band("bessellv").unwrap();
        let mut model = BlackbodyPulse::default();
        let f1 = model.band_flux(&band, 5.0);
        model.set_amplitude(4.0);
        assert!((model.band_flux(&band, 5.0) / f1 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_params() {
        let params = PulseParams {
            rise_width: 0.0,
            ..PulseParams::default()
        };
        assert!(BlackbodyPulse::new("bad", params).is_err());

        let params = PulseParams {
            peak_phase: 100.0,
            ..PulseParams::default()
        };
        assert!(BlackbodyPulse::new("bad", params).is_err());
    }
}
