//! Scalar root finders.

use crate::error::{SolverError, SolverResult};

/// Bisection configuration.
#[derive(Clone, Copy, Debug)]
pub struct BisectConfig {
    /// Half-width of the bracket below which the midpoint is accepted
    pub tol: f64,
    /// Maximum number of midpoint evaluations
    pub max_iter: usize,
}

impl Default for BisectConfig {
    fn default() -> Self {
        Self {
            tol: 1e-5,
            max_iter: 100,
        }
    }
}

/// Bracketing bisection on `[x0, x1]`.
///
/// The bracket is not checked for a sign change up front: each step keeps the
/// half whose endpoints have opposite signs according to `f(x2)·f(x0) > 0`.
/// An exact zero at a midpoint is accepted immediately.
pub fn bisect<F>(mut f: F, x0: f64, x1: f64, config: &BisectConfig) -> SolverResult<f64>
where
    F: FnMut(f64) -> f64,
{
    let (mut lo, mut hi) = (x0, x1);
    for _ in 0..config.max_iter {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);

        if f_mid == 0.0 || 0.5 * (hi - lo) < config.tol {
            return Ok(mid);
        }

        if f_mid * f(lo) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "bisection on [{x0}, {x1}] did not converge in {} iterations",
            config.max_iter
        ),
    })
}

/// Newton iteration configuration.
#[derive(Clone, Copy, Debug)]
pub struct NewtonConfig {
    /// Absolute step tolerance
    pub tol: f64,
    /// Maximum iterations
    pub max_iter: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            tol: 1.48e-8,
            max_iter: 50,
        }
    }
}

/// Derivative-free Newton iteration seeded at `x_guess`.
///
/// The derivative is replaced by the secant through the last two iterates;
/// the second iterate is a relative 1e-4 nudge of the seed.
pub fn newton<F>(mut f: F, x_guess: f64, config: &NewtonConfig) -> SolverResult<f64>
where
    F: FnMut(f64) -> f64,
{
    const NUDGE: f64 = 1e-4;

    let mut p0 = x_guess;
    let mut p1 = x_guess * (1.0 + NUDGE) + if x_guess >= 0.0 { NUDGE } else { -NUDGE };
    let mut q0 = finite(f(p0), "newton residual")?;
    let mut q1 = finite(f(p1), "newton residual")?;
    if q1.abs() < q0.abs() {
        std::mem::swap(&mut p0, &mut p1);
        std::mem::swap(&mut q0, &mut q1);
    }

    for iter in 0..config.max_iter {
        if q1 == q0 {
            if (p1 - p0).abs() < config.tol {
                return Ok(0.5 * (p0 + p1));
            }
            return Err(SolverError::ConvergenceFailed {
                what: format!("newton: zero slope at iteration {iter} (x={p1})"),
            });
        }

        let p = if q1.abs() > q0.abs() {
            (-q0 / q1 * p1 + p0) / (1.0 - q0 / q1)
        } else {
            (-q1 / q0 * p0 + p1) / (1.0 - q1 / q0)
        };
        finite(p, "newton iterate")?;

        if (p - p1).abs() < config.tol {
            return Ok(p);
        }

        p0 = p1;
        q0 = q1;
        p1 = p;
        q1 = finite(f(p1), "newton residual")?;
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "newton: maximum iterations {} reached from seed {x_guess}, last x = {p1}",
            config.max_iter
        ),
    })
}

fn finite(v: f64, what: &'static str) -> SolverResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SolverError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisect_linear_root() {
        let root = bisect(|x| x - 0.5, 0.0, 1.0, &BisectConfig::default()).unwrap();
        assert!((root - 0.5).abs() < 1e-5);
    }

    #[test]
    fn bisect_decreasing_function() {
        let root = bisect(|x| 2.0 - x * x, 0.0, 3.0, &BisectConfig::default()).unwrap();
        assert!((root - 2.0_f64.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn bisect_reports_exhausted_iterations() {
        let cfg = BisectConfig {
            tol: 1e-30,
            max_iter: 10,
        };
        let err = bisect(|x| x - 0.3, 0.0, 1.0, &cfg).unwrap_err();
        assert!(matches!(err, SolverError::ConvergenceFailed { .. }));
    }

    #[test]
    fn newton_quadratic() {
        // Solve x^2 - 4 = 0 from x = 3
        let root = newton(|x| x * x - 4.0, 3.0, &NewtonConfig::default()).unwrap();
        assert!((root - 2.0).abs() < 1e-6);
    }

    #[test]
    fn newton_negative_seed() {
        let root = newton(|x| x.powi(3) + 8.0, -1.0, &NewtonConfig::default()).unwrap();
        assert!((root + 2.0).abs() < 1e-6);
    }

    #[test]
    fn newton_flat_function_fails() {
        let err = newton(|_| 1.0, 0.5, &NewtonConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::ConvergenceFailed { .. }));
    }

    #[test]
    fn newton_non_finite_residual_fails() {
        let err = newton(|x| (x - 10.0).ln(), 1.0, &NewtonConfig::default()).unwrap_err();
        assert!(matches!(err, SolverError::NonFinite { .. }));
    }
}
