//! Sampled light curves.

use crate::bandpass::Bandpass;
use crate::error::{PhotometryError, PhotometryResult};
use crate::magsys::{MagSystem, Photometer};
use crate::model::TransientModel;
use rc_core::linspace;

#[derive(Clone, Debug, PartialEq)]
pub struct LightCurve {
    pub band: String,
    pub magsys: MagSystem,
    /// Observer-frame phases [days]
    pub phases: Vec<f64>,
    /// Magnitudes; +inf where the flux is zero
    pub magnitudes: Vec<f64>,
}

impl LightCurve {
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Brightest sample as `(phase, magnitude)`.
    pub fn brightest(&self) -> Option<(f64, f64)> {
        self.phases
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
            .filter(|(_, m)| m.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Magnitudes at `n_points` evenly spaced phases across the model window.
pub fn sample_light_curve<M: TransientModel>(
    model: &M,
    band: &Bandpass,
    magsys: MagSystem,
    n_points: usize,
) -> PhotometryResult<LightCurve> {
    if n_points < 2 {
        return Err(PhotometryError::InvalidArg {
            what: format!("light curve needs at least 2 points, got {n_points}"),
        });
    }
    if !model.covers(band) {
        return Err(PhotometryError::NonFiniteFlux {
            band: band.name().to_string(),
        });
    }

    let photometer = Photometer::new(band, magsys)?;
    let phases = linspace(model.min_time(), model.max_time(), n_points);
    let magnitudes = phases.iter().map(|&t| photometer.magnitude(model, t)).collect();

    Ok(LightCurve {
        band: band.name().to_string(),
        magsys,
        phases,
        magnitudes,
    })
}
