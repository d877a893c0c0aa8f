//! Peak location on a band light curve.

use crate::bandpass::Bandpass;
use crate::error::{PhotometryError, PhotometryResult};
use crate::magsys::{MagSystem, Photometer};
use crate::model::TransientModel;
use rc_core::linspace;
use rc_solver::{MinimizeConfig, minimize_bounded};

/// Default phase sampling for the coarse grid [days].
pub const DEFAULT_SAMPLING: f64 = 1.0;

/// Zero point used while searching (keeps fluxes near unity).
const SEARCH_ZP: f64 = 30.0;

/// Time and brightness of maximum light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// Observer-frame phase [days]
    pub phase: f64,
    pub magnitude: f64,
}

/// Find the phase of maximum band flux.
///
/// A grid with step at most `sampling` over the model's phase window picks
/// the best sample; a bounded Brent search within one step on either side
/// refines it. Non-finite samples are ignored.
pub fn locate_peak<M: TransientModel>(
    model: &M,
    band: &Bandpass,
    magsys: MagSystem,
    sampling: f64,
) -> PhotometryResult<Peak> {
    if !(sampling.is_finite() && sampling > 0.0) {
        return Err(PhotometryError::InvalidArg {
            what: format!("peak sampling must be positive, got {sampling}"),
        });
    }
    let photometer = Photometer::new(band, magsys)?;
    let neg_flux = |phase: f64| -photometer.flux_at_zp(model, phase, SEARCH_ZP);

    let (t_min, t_max) = (model.min_time(), model.max_time());
    let n = ((t_max - t_min) / sampling).ceil() as usize + 1;
    let best = linspace(t_min, t_max, n.max(2))
        .into_iter()
        .map(|t| (t, neg_flux(t)))
        .filter(|(_, f)| f.is_finite())
        .min_by(|a, b| a.1.total_cmp(&b.1));
    let Some((t_grid, f_grid)) = best else {
        return Err(PhotometryError::NonFiniteFlux {
            band: band.name().to_string(),
        });
    };

    let lo = (t_grid - sampling).max(t_min);
    let hi = (t_grid + sampling).min(t_max);
    let refined = minimize_bounded(neg_flux, lo, hi, &MinimizeConfig::default())?;
    let (phase, f_best) = if refined.fx.is_finite() && refined.fx < f_grid {
        (refined.x, refined.fx)
    } else {
        (t_grid, f_grid)
    };

    if !(f_best < 0.0) {
        return Err(PhotometryError::NoPositiveFlux {
            band: band.name().to_string(),
        });
    }
    Ok(Peak {
        phase,
        magnitude: -2.5 * (-f_best).log10() + SEARCH_ZP,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_band;
    use crate::models::{BlackbodyPulse, PulseParams};

    fn pulse(peak_phase: f64) -> BlackbodyPulse {
        BlackbodyPulse::new(
            "test",
            PulseParams {
                peak_phase,
                ..PulseParams::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn finds_off_grid_peak() {
        let model = pulse(3.37);
        let band = find_band("bessellb").unwrap();
        let peak = locate_peak(&model, &band, MagSystem::Ab, 1.0).unwrap();
        assert!((peak.phase - 3.37).abs() < 1e-2, "phase {}", peak.phase);

        let direct = model.band_magnitude(&band, MagSystem::Ab, 3.37).unwrap();
        assert!((peak.magnitude - direct).abs() < 1e-6);
    }

    #[test]
    fn peak_phase_stretches_with_redshift() {
        let mut model = pulse(4.0);
        model.set_redshift(0.5);
        let band = find_band("bessellv").unwrap();
        let peak = locate_peak(&model, &band, MagSystem::Ab, 1.0).unwrap();
        assert!((peak.phase - 6.0).abs() < 1e-2);
    }

    #[test]
    fn uncovered_band_reports_non_finite_flux() {
        let model = BlackbodyPulse::default();
        let band = Bandpass::top_hat("far-uv", 500.0, 900.0).unwrap();
        let err = locate_peak(&model, &band, MagSystem::Ab, 1.0).unwrap_err();
        assert!(matches!(err, PhotometryError::NonFiniteFlux { .. }));
    }

    #[test]
    fn rejects_bad_sampling() {
        let model = BlackbodyPulse::default();
        let band = find_band("bessellb").unwrap();
        assert!(locate_peak(&model, &band, MagSystem::Ab, 0.0).is_err());
    }
}
