//! Shell integration against closed-form volumes.

use rc_cosmo::{ConstantRate, Cosmology, Exposure, FlatLambdaCdm, PowerLawRate, shell_rate};
use std::sync::Arc;

#[test]
fn one_year_full_sky_single_shell() {
    let cosmo = FlatLambdaCdm::planck15();
    let exposure = Exposure::from_percent(365.25, 100.0).unwrap();
    for z_max in [0.05, 0.5, 1.2] {
        let shells = shell_rate(0.0, z_max, &ConstantRate(2e-5), 1, &cosmo, &exposure).unwrap();
        let analytic = 2e-5 * cosmo.comoving_volume(z_max) / (1.0 + z_max / 2.0);
        assert!((shells.total() - analytic).abs() / analytic < 1e-9);
    }
}

#[test]
fn shells_partition_the_volume() {
    let cosmo = FlatLambdaCdm::planck15();
    // Cancel the time dilation divisor to recover the pure volume
    let undilated = |z: f64| 1.0 + z;
    let shells = shell_rate(0.0, 0.8, &undilated, 40, &cosmo, &Exposure::default()).unwrap();
    let volume = cosmo.comoving_volume(0.8);
    assert!((shells.total() - volume).abs() / volume < 1e-9);
}

#[test]
fn evolving_rate_adds_events() {
    let cosmo: Arc<dyn Cosmology> = Arc::new(FlatLambdaCdm::planck15());
    let flat = shell_rate(0.0, 1.0, &ConstantRate(1e-5), 100, cosmo.as_ref(), &Exposure::default())
        .unwrap();
    let rising = PowerLawRate {
        r0: 1e-5,
        alpha: 1.5,
    };
    let evolving = shell_rate(0.0, 1.0, &rising, 100, cosmo.as_ref(), &Exposure::default()).unwrap();
    assert!(evolving.total() > flat.total());
    assert!(evolving.rates.iter().zip(&flat.rates).all(|(e, f)| e >= f));
}
