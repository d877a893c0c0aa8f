//! Transient model capability.
//!
//! The rate engine only needs what is declared here: a phase and wavelength
//! window, settable redshift and amplitude, and band-integrated flux. Any
//! spectral time-series backend can implement it.

use crate::bandpass::Bandpass;
use crate::error::PhotometryResult;
use crate::magsys::{MagSystem, Photometer};
use crate::peak::{DEFAULT_SAMPLING, locate_peak};
use rc_cosmo::Cosmology;

/// A redshiftable transient with a time-evolving spectrum.
///
/// Phases and wavelengths are in the observer frame. Implementations are
/// cheap to clone; the rate engine copies a model before every mutation.
pub trait TransientModel: Clone + Send + Sync {
    /// Model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Earliest phase with defined flux [days].
    fn min_time(&self) -> f64;

    /// Latest phase with defined flux [days].
    fn max_time(&self) -> f64;

    /// Shortest observer-frame wavelength covered [Å].
    fn min_wave(&self) -> f64;

    /// Longest observer-frame wavelength covered [Å].
    fn max_wave(&self) -> f64;

    fn redshift(&self) -> f64;

    fn set_redshift(&mut self, z: f64);

    /// Overall flux scale.
    fn amplitude(&self) -> f64;

    fn set_amplitude(&mut self, amplitude: f64);

    /// Photon flux through `band` at `phase` [photons s⁻¹ cm⁻²].
    ///
    /// NaN when the band is not fully inside the model's wavelength range.
    fn band_flux(&self, band: &Bandpass, phase: f64) -> f64;

    /// Whether `band` lies inside the wavelength range.
    fn covers(&self, band: &Bandpass) -> bool {
        band.min_wave() >= self.min_wave() && band.max_wave() <= self.max_wave()
    }

    /// Band flux scaled to zero point `zp` in `magsys`.
    fn band_flux_zp(&self, band: &Bandpass, phase: f64, zp: f64, magsys: MagSystem) -> PhotometryResult<f64> {
        Ok(Photometer::new(band, magsys)?.flux_at_zp(self, phase, zp))
    }

    fn band_magnitude(&self, band: &Bandpass, magsys: MagSystem, phase: f64) -> PhotometryResult<f64> {
        Ok(Photometer::new(band, magsys)?.magnitude(self, phase))
    }

    /// Rescale the amplitude so the rest-frame peak in `band` equals
    /// `absolute_magnitude`, then dim by the distance modulus at the current
    /// redshift.
    fn pin_peak_absolute_magnitude(
        &mut self,
        absolute_magnitude: f64,
        band: &Bandpass,
        magsys: MagSystem,
        cosmology: &dyn Cosmology,
    ) -> PhotometryResult<()> {
        let z = self.redshift();
        let mut rest = self.clone();
        rest.set_redshift(0.0);
        let peak = locate_peak(&rest, band, magsys, DEFAULT_SAMPLING)?;

        let target = if z > 0.0 {
            absolute_magnitude + cosmology.distance_modulus(z)
        } else {
            absolute_magnitude
        };
        let amplitude = self.amplitude() * 10f64.powf(-0.4 * (target - peak.magnitude));
        self.set_amplitude(amplitude);
        Ok(())
    }
}
