//! Filter transmission curves.

use crate::error::{PhotometryError, PhotometryResult};
use rc_core::units::constants::HC_ERG_AA;
use rc_core::units::{Length, angstrom};
use rc_core::{is_strictly_increasing, linspace, trapz};
use serde::{Deserialize, Serialize};

/// Wavelength step of the synthetic photometry grid [Å].
const GRID_STEP_AA: f64 = 5.0;

/// A tabulated transmission curve.
///
/// Wavelengths are in ångström, strictly increasing; transmission is
/// dimensionless and non-negative. `ab_minus_vega` is the AB − Vega magnitude
/// offset of the band, needed to express magnitudes in the Vega system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BandpassTable", into = "BandpassTable")]
pub struct Bandpass {
    name: String,
    wave: Vec<f64>,
    trans: Vec<f64>,
    ab_minus_vega: Option<f64>,
}

/// Unvalidated serialized form.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct BandpassTable {
    name: String,
    wave: Vec<f64>,
    trans: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ab_minus_vega: Option<f64>,
}

impl TryFrom<BandpassTable> for Bandpass {
    type Error = PhotometryError;

    fn try_from(t: BandpassTable) -> PhotometryResult<Self> {
        let band = Bandpass::new(t.name, t.wave, t.trans)?;
        Ok(match t.ab_minus_vega {
            Some(offset) => band.with_ab_minus_vega(offset),
            None => band,
        })
    }
}

impl From<Bandpass> for BandpassTable {
    fn from(b: Bandpass) -> Self {
        Self {
            name: b.name,
            wave: b.wave,
            trans: b.trans,
            ab_minus_vega: b.ab_minus_vega,
        }
    }
}

impl Bandpass {
    pub fn new(name: impl Into<String>, wave: Vec<f64>, trans: Vec<f64>) -> PhotometryResult<Self> {
        let name = name.into();
        let invalid = |what: &str| PhotometryError::InvalidBandpass {
            name: name.clone(),
            what: what.to_string(),
        };

        if wave.len() != trans.len() {
            return Err(invalid("wave/trans length mismatch"));
        }
        if wave.len() < 2 {
            return Err(invalid("need at least two samples"));
        }
        if wave.iter().chain(trans.iter()).any(|v| !v.is_finite()) {
            return Err(invalid("non-finite sample"));
        }
        if wave[0] <= 0.0 || !is_strictly_increasing(&wave) {
            return Err(invalid("wavelengths must be positive and strictly increasing"));
        }
        if trans.iter().any(|&t| t < 0.0) {
            return Err(invalid("negative transmission"));
        }
        if !trans.iter().any(|&t| t > 0.0) {
            return Err(invalid("transmission is zero everywhere"));
        }

        Ok(Self {
            name,
            wave,
            trans,
            ab_minus_vega: None,
        })
    }

    /// Unit transmission between `lo` and `hi` [Å].
    pub fn top_hat(name: impl Into<String>, lo: f64, hi: f64) -> PhotometryResult<Self> {
        Self::new(name, vec![lo, hi], vec![1.0, 1.0])
    }

    pub fn with_ab_minus_vega(mut self, offset: f64) -> Self {
        self.ab_minus_vega = Some(offset);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wave(&self) -> &[f64] {
        &self.wave
    }

    pub fn trans(&self) -> &[f64] {
        &self.trans
    }

    pub fn ab_minus_vega(&self) -> Option<f64> {
        self.ab_minus_vega
    }

    /// Shortest tabulated wavelength [Å].
    pub fn min_wave(&self) -> f64 {
        self.wave[0]
    }

    /// Longest tabulated wavelength [Å].
    pub fn max_wave(&self) -> f64 {
        self.wave[self.wave.len() - 1]
    }

    pub fn blue_edge(&self) -> Length {
        angstrom(self.min_wave())
    }

    pub fn red_edge(&self) -> Length {
        angstrom(self.max_wave())
    }

    /// Transmission-weighted mean wavelength [Å].
    pub fn effective_wave(&self) -> f64 {
        let wt: Vec<f64> = self.wave.iter().zip(&self.trans).map(|(w, t)| w * t).collect();
        trapz(&self.wave, &wt) / trapz(&self.wave, &self.trans)
    }

    /// Linearly interpolated transmission; zero outside the table.
    pub fn transmission(&self, wave: f64) -> f64 {
        if !(self.min_wave()..=self.max_wave()).contains(&wave) {
            return 0.0;
        }
        let idx = self.wave.partition_point(|&w| w <= wave);
        let k = idx.saturating_sub(1).min(self.wave.len() - 2);
        let t = (wave - self.wave[k]) / (self.wave[k + 1] - self.wave[k]);
        self.trans[k] + t * (self.trans[k + 1] - self.trans[k])
    }

    /// Wavelength grid used for synthetic photometry.
    pub fn grid(&self) -> Vec<f64> {
        let span = self.max_wave() - self.min_wave();
        let n = (span / GRID_STEP_AA).ceil() as usize + 1;
        linspace(self.min_wave(), self.max_wave(), n.max(2))
    }

    /// Photon flux through the band for a spectral flux density `f_lambda`
    /// [erg s⁻¹ cm⁻² Å⁻¹]: `∫ f(λ) T(λ) λ / (hc) dλ` in photons s⁻¹ cm⁻².
    pub fn photon_flux<F>(&self, f_lambda: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let grid = self.grid();
        let integrand: Vec<f64> = grid
            .iter()
            .map(|&w| f_lambda(w) * self.transmission(w) * w / HC_ERG_AA)
            .collect();
        trapz(&grid, &integrand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::units::in_angstrom;

    #[test]
    fn top_hat_edges() {
        let b = Bandpass::top_hat("box", 4000.0, 5000.0).unwrap();
        assert!((in_angstrom(b.blue_edge()) - 4000.0).abs() < 1e-6);
        assert!((in_angstrom(b.red_edge()) - 5000.0).abs() < 1e-6);
        assert_eq!(b.transmission(4500.0), 1.0);
        assert_eq!(b.transmission(3999.0), 0.0);
        assert!((b.effective_wave() - 4500.0).abs() < 1e-9);
    }

    #[test]
    fn interpolates_transmission() {
        let b = Bandpass::new("tri", vec![1000.0, 2000.0, 3000.0], vec![0.0, 1.0, 0.0]).unwrap();
        assert!((b.transmission(1500.0) - 0.5).abs() < 1e-12);
        assert!((b.transmission(2750.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn photon_flux_of_flat_spectrum() {
        // Flat f_lambda = 1 through a top hat: (hi² - lo²) / (2 hc)
        let b = Bandpass::top_hat("box", 4000.0, 5000.0).unwrap();
        let expected = (5000.0_f64.powi(2) - 4000.0_f64.powi(2)) / (2.0 * HC_ERG_AA);
        let got = b.photon_flux(|_| 1.0);
        assert!((got - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn rejects_malformed_tables() {
        assert!(Bandpass::new("a", vec![1.0], vec![1.0]).is_err());
        assert!(Bandpass::new("a", vec![2.0, 1.0], vec![1.0, 1.0]).is_err());
        assert!(Bandpass::new("a", vec![1.0, 2.0], vec![0.0, 0.0]).is_err());
        assert!(Bandpass::new("a", vec![1.0, 2.0], vec![-1.0, 1.0]).is_err());
        assert!(Bandpass::new("a", vec![1.0, 2.0], vec![1.0]).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok = r#"{"name":"b","wave":[4000.0,5000.0],"trans":[1.0,1.0],"ab_minus_vega":-0.1}"#;
        let band: Bandpass = serde_json::from_str(ok).unwrap();
        assert_eq!(band.ab_minus_vega(), Some(-0.1));

        let bad = r#"{"name":"b","wave":[5000.0,4000.0],"trans":[1.0,1.0]}"#;
        assert!(serde_json::from_str::<Bandpass>(bad).is_err());
    }
}
