//! Bounded scalar minimization (Brent's method on a closed interval).

use crate::error::{SolverError, SolverResult};

/// Minimizer configuration.
#[derive(Clone, Copy, Debug)]
pub struct MinimizeConfig {
    /// Absolute tolerance on the abscissa
    pub xatol: f64,
    /// Maximum function evaluations
    pub max_evals: usize,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        Self {
            xatol: 1e-5,
            max_evals: 500,
        }
    }
}

/// Result of a bounded minimization.
#[derive(Clone, Copy, Debug)]
pub struct Minimum {
    pub x: f64,
    pub fx: f64,
    pub evaluations: usize,
}

/// Minimize `f` on `[lo, hi]` with golden-section steps accelerated by
/// parabolic interpolation. The returned point always lies inside the bounds.
pub fn minimize_bounded<F>(mut f: F, lo: f64, hi: f64, config: &MinimizeConfig) -> SolverResult<Minimum>
where
    F: FnMut(f64) -> f64,
{
    if !(lo.is_finite() && hi.is_finite()) || lo > hi {
        return Err(SolverError::InvalidInput {
            what: format!("minimization bounds [{lo}, {hi}]"),
        });
    }
    if lo == hi {
        let fx = f(lo);
        return Ok(Minimum {
            x: lo,
            fx,
            evaluations: 1,
        });
    }

    let sqrt_eps = f64::EPSILON.sqrt();
    let golden_mean = 0.5 * (3.0 - 5.0_f64.sqrt());

    let (mut a, mut b) = (lo, hi);
    let mut fulc = a + golden_mean * (b - a);
    let mut nfc = fulc;
    let mut xf = fulc;
    let mut rat = 0.0_f64;
    let mut e = 0.0_f64;
    let mut fx = f(xf);
    let mut evaluations = 1;
    let mut ffulc = fx;
    let mut fnfc = fx;

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + config.xatol / 3.0;
    let mut tol2 = 2.0 * tol1;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        let mut golden = true;

        if e.abs() > tol1 {
            // Parabolic step through the three best points
            golden = false;
            let mut r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = rat;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                rat = p / q;
                let x = xf + rat;
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = tol1 * sign_or_one(xm - xf);
                }
            } else {
                golden = true;
            }
        }

        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = golden_mean * e;
        }

        let x = xf + sign_or_one(rat) * rat.abs().max(tol1);
        let fu = f(x);
        evaluations += 1;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + config.xatol / 3.0;
        tol2 = 2.0 * tol1;

        if evaluations >= config.max_evals {
            return Err(SolverError::ConvergenceFailed {
                what: format!(
                    "bounded minimization on [{lo}, {hi}] exceeded {} evaluations",
                    config.max_evals
                ),
            });
        }
    }

    Ok(Minimum {
        x: xf,
        fx,
        evaluations,
    })
}

fn sign_or_one(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v.signum() }
}
