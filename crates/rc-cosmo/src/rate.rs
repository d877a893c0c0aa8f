//! Volumetric rate densities.

/// Volumetric event rate as a function of redshift [Mpc⁻³ yr⁻¹], rest frame.
pub trait RateFunction: Send + Sync {
    fn rate(&self, z: f64) -> f64;
}

impl<F> RateFunction for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn rate(&self, z: f64) -> f64 {
        self(z)
    }
}

/// Redshift-independent rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantRate(pub f64);

impl RateFunction for ConstantRate {
    fn rate(&self, _z: f64) -> f64 {
        self.0
    }
}

/// `r0 · (1+z)^alpha`, e.g. a rate tracking cosmic star formation at low z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerLawRate {
    pub r0: f64,
    pub alpha: f64,
}

impl RateFunction for PowerLawRate {
    fn rate(&self, z: f64) -> f64 {
        self.r0 * (1.0 + z).powf(self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_rate_functions() {
        let r = |z: f64| 1e-5 * (1.0 + z);
        assert!((r.rate(1.0) - 2e-5).abs() < 1e-20);
    }

    #[test]
    fn power_law_reduces_to_constant() {
        let p = PowerLawRate {
            r0: 3e-5,
            alpha: 0.0,
        };
        assert_eq!(p.rate(2.0), ConstantRate(3e-5).rate(2.0));
        let q = PowerLawRate {
            r0: 1.0,
            alpha: 2.0,
        };
        assert!((q.rate(1.0) - 4.0).abs() < 1e-12);
    }
}
