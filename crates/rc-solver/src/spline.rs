//! Monotone piecewise-cubic interpolation.
//!
//! Fritsch–Carlson (PCHIP) slopes: the interpolant never overshoots the data,
//! so monotone samples produce a monotone curve and the same samples with the
//! axes swapped produce its inverse. Outside the sampled range the curve is
//! continued linearly with the slope of the outermost secant.

use crate::error::{SolverError, SolverResult};

#[derive(Clone, Debug, PartialEq)]
pub struct MonotoneSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Slope at each knot
    d: Vec<f64>,
}

impl MonotoneSpline {
    /// Build the interpolant through `(x, y)`.
    ///
    /// `x` must be strictly increasing and every value finite. One point gives
    /// a constant, two points a straight line.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> SolverResult<Self> {
        if x.len() != y.len() {
            return Err(SolverError::InvalidInput {
                what: format!("spline x/y length mismatch ({} vs {})", x.len(), y.len()),
            });
        }
        if x.is_empty() {
            return Err(SolverError::InvalidInput {
                what: "spline needs at least one point".to_string(),
            });
        }
        if let Some(v) = x.iter().chain(y.iter()).find(|v| !v.is_finite()) {
            return Err(SolverError::NonFinite {
                what: "spline knot",
                value: *v,
            });
        }
        if let Some(i) = (1..x.len()).find(|&i| x[i] <= x[i - 1]) {
            return Err(SolverError::InvalidInput {
                what: format!(
                    "spline abscissae not strictly increasing at index {i} ({} <= {})",
                    x[i],
                    x[i - 1]
                ),
            });
        }

        let d = pchip_slopes(&x, &y);
        Ok(Self { x, y, d })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Sampled abscissa range.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.x.len();
        if n == 1 {
            return self.y[0];
        }

        if x < self.x[0] {
            return self.y[0] + (x - self.x[0]) * secant(&self.x, &self.y, 0);
        }
        if x > self.x[n - 1] {
            return self.y[n - 1] + (x - self.x[n - 1]) * secant(&self.x, &self.y, n - 2);
        }

        let k = self.find_segment(x);
        let h = self.x[k + 1] - self.x[k];
        let t = (x - self.x[k]) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        // Hermite basis functions
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * self.y[k] + h10 * h * self.d[k] + h01 * self.y[k + 1] + h11 * h * self.d[k + 1]
    }

    /// Index of the left knot of the segment containing `x` (clamped to the range).
    fn find_segment(&self, x: f64) -> usize {
        let idx = self.x.partition_point(|&xi| xi <= x);
        idx.saturating_sub(1).min(self.x.len() - 2)
    }
}

fn secant(x: &[f64], y: &[f64], k: usize) -> f64 {
    (y[k + 1] - y[k]) / (x[k + 1] - x[k])
}

fn pchip_slopes(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n == 1 {
        return vec![0.0];
    }
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|k| secant(x, y, k)).collect();
    if n == 2 {
        return vec![delta[0], delta[0]];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        if delta[k - 1] * delta[k] > 0.0 {
            // Weighted harmonic mean
            let w1 = 2.0 * h[k] + h[k - 1];
            let w2 = h[k] + 2.0 * h[k - 1];
            d[k] = (w1 + w2) / (w1 / delta[k - 1] + w2 / delta[k]);
        }
    }
    d[0] = end_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    d
}

/// Shape-preserving one-sided three-point slope.
fn end_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if d.signum() != m0.signum() || m0 == 0.0 {
        0.0
    } else if m0.signum() != m1.signum() && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_knots() {
        let x = vec![0.0, 1.0, 2.5, 4.0];
        let y = vec![1.0, 2.0, 2.2, 5.0];
        let s = MonotoneSpline::new(x.clone(), y.clone()).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert!((s.evaluate(*xi) - yi).abs() < 1e-12);
        }
    }

    #[test]
    fn reproduces_straight_line() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v - 1.0).collect();
        let s = MonotoneSpline::new(x, y).unwrap();
        assert!((s.evaluate(1.7) - 2.4).abs() < 1e-12);
        assert!((s.evaluate(5.0) - 9.0).abs() < 1e-12);
        assert!((s.evaluate(-1.0) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_point_is_constant() {
        let s = MonotoneSpline::new(vec![2.0], vec![7.0]).unwrap();
        assert_eq!(s.evaluate(-10.0), 7.0);
        assert_eq!(s.evaluate(10.0), 7.0);
    }

    #[test]
    fn no_overshoot_on_step_data() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = vec![0.0, 0.0, 1.0, 1.0, 1.0];
        let s = MonotoneSpline::new(x, y).unwrap();
        for i in 0..=400 {
            let v = s.evaluate(i as f64 * 0.01);
            assert!((-1e-12..=1.0 + 1e-12).contains(&v), "overshoot {v}");
        }
    }

    #[test]
    fn rejects_unsorted_abscissae() {
        assert!(MonotoneSpline::new(vec![0.0, 1.0, 1.0], vec![0.0, 1.0, 2.0]).is_err());
        assert!(MonotoneSpline::new(vec![0.0, 1.0], vec![0.0]).is_err());
        assert!(MonotoneSpline::new(vec![], vec![]).is_err());
        assert!(MonotoneSpline::new(vec![0.0, f64::NAN], vec![0.0, 1.0]).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn increasing_data_gives_increasing_curve(
            steps in prop::collection::vec((0.01_f64..2.0, 0.001_f64..3.0), 2..30)
        ) {
            let mut x = vec![0.0];
            let mut y = vec![0.0];
            for (dx, dy) in &steps {
                x.push(x[x.len() - 1] + dx);
                y.push(y[y.len() - 1] + dy);
            }
            let (lo, hi) = (x[0], x[x.len() - 1]);
            let s = MonotoneSpline::new(x, y).unwrap();
            let mut prev = s.evaluate(lo);
            for i in 1..=500 {
                let v = s.evaluate(lo + (hi - lo) * i as f64 / 500.0);
                prop_assert!(v >= prev - 1e-12);
                prev = v;
            }
        }
    }
}
