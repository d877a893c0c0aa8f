//! Time spent brighter than a limiting magnitude.

use crate::bandpass::Bandpass;
use crate::error::{PhotometryError, PhotometryResult};
use crate::magsys::{MagSystem, Photometer};
use crate::model::TransientModel;
use crate::peak::Peak;
use rc_solver::{BisectConfig, NewtonConfig, SolverError, bisect, newton};
use std::cell::RefCell;
use tracing::debug;

/// Interval over which a light curve is brighter than a limit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeAbove {
    /// The peak is fainter than the limit.
    Never,
    Interval { start: f64, end: f64 },
}

impl TimeAbove {
    /// Length of the interval [days]; zero for `Never`.
    pub fn duration(&self) -> f64 {
        match self {
            TimeAbove::Never => 0.0,
            TimeAbove::Interval { start, end } => end - start,
        }
    }
}

/// First and last phase at which the model is brighter than `limit`.
///
/// Each side of the peak is either the edge of the phase window (when the
/// light curve is still brighter there) or the crossing found by bisection
/// between the edge and the peak.
pub fn interval_above_threshold<M: TransientModel>(
    model: &M,
    band: &Bandpass,
    magsys: MagSystem,
    limit: f64,
    peak: &Peak,
) -> PhotometryResult<TimeAbove> {
    if peak.magnitude > limit {
        return Ok(TimeAbove::Never);
    }

    let photometer = Photometer::new(band, magsys)?;
    let excess = |phase: f64| photometer.magnitude(model, phase) - limit;
    let config = BisectConfig::default();

    let (t_min, t_max) = (model.min_time(), model.max_time());
    let start = if excess(t_min) < 0.0 {
        t_min
    } else {
        bisect(&excess, t_min, peak.phase, &config)?
    };
    let end = if excess(t_max) < 0.0 {
        t_max
    } else {
        bisect(&excess, peak.phase, t_max, &config)?
    };

    Ok(TimeAbove::Interval { start, end })
}

/// Limiting magnitude at which the model stays brighter for `duration` days.
///
/// Solved by derivative-free Newton iteration on the duration, seeded at the
/// peak magnitude. The duration is flat below the peak and again once both
/// ends reach the phase window, so when Newton stalls or settles off the
/// curve the limit is bisected between the peak and the fainter window-edge
/// magnitude. A zero duration is the peak magnitude itself.
pub fn magnitude_for_duration<M: TransientModel>(
    model: &M,
    band: &Bandpass,
    magsys: MagSystem,
    duration: f64,
    peak: &Peak,
) -> PhotometryResult<f64> {
    const DURATION_TOL: f64 = 1e-3;
    const FALLBACK: BisectConfig = BisectConfig {
        tol: 1e-9,
        max_iter: 200,
    };

    if !(duration.is_finite() && duration >= 0.0) {
        return Err(PhotometryError::InvalidArg {
            what: format!("duration must be non-negative, got {duration}"),
        });
    }
    if duration == 0.0 {
        return Ok(peak.magnitude);
    }
    let (t_min, t_max) = (model.min_time(), model.max_time());
    if duration > t_max - t_min {
        return Err(PhotometryError::InvalidArg {
            what: format!(
                "duration {duration} exceeds the {} day phase window of {}",
                t_max - t_min,
                model.name()
            ),
        });
    }

    let failure = RefCell::new(None);
    let residual = |limit: f64| match interval_above_threshold(model, band, magsys, limit, peak) {
        Ok(above) => above.duration() - duration,
        Err(err) => {
            failure.borrow_mut().get_or_insert(err);
            f64::NAN
        }
    };

    let solved = newton(&residual, peak.magnitude, &NewtonConfig::default());
    if let Some(err) = failure.borrow_mut().take() {
        return Err(err);
    }
    let stalled = match solved {
        Ok(limit) if limit >= peak.magnitude && residual(limit).abs() < DURATION_TOL => {
            return Ok(limit);
        }
        Ok(limit) => SolverError::ConvergenceFailed {
            what: format!("newton settled at {limit} where the duration misses {duration} days"),
        },
        Err(err) => err,
    };

    // Beyond this limit both ends sit on the window edges
    let photometer = Photometer::new(band, magsys)?;
    let saturated = photometer
        .magnitude(model, t_min)
        .max(photometer.magnitude(model, t_max));
    if !(saturated.is_finite() && saturated >= peak.magnitude) {
        return Err(stalled.into());
    }
    debug!(%stalled, peak = peak.magnitude, saturated, "bisecting duration limit");

    let limit = bisect(&residual, peak.magnitude, saturated, &FALLBACK)?;
    if let Some(err) = failure.borrow_mut().take() {
        return Err(err);
    }
    Ok(limit)
}
