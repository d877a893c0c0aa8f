//! Detection completeness under Gaussian magnitude scatter.

use scilib::math::basic::erf;
use std::f64::consts::SQRT_2;

/// Probability that a source with mean magnitude `expected` and scatter
/// `sigma` is brighter than `limit`.
pub fn gaussian_completeness(limit: f64, expected: f64, sigma: f64) -> f64 {
    (0.5 * (1.0 + erf((limit - expected) / (SQRT_2 * sigma)))).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_at_the_limit() {
        assert!((gaussian_completeness(22.0, 22.0, 0.3) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn one_sigma_points() {
        assert!((gaussian_completeness(23.0, 22.0, 1.0) - 0.841_344_746).abs() < 1e-6);
        assert!((gaussian_completeness(21.0, 22.0, 1.0) - 0.158_655_254).abs() < 1e-6);
    }

    #[test]
    fn far_from_limit_saturates() {
        assert!(gaussian_completeness(25.0, 20.0, 0.5) > 0.999_999);
        assert!(gaussian_completeness(20.0, 25.0, 0.5) < 1e-6);
    }
}
