use rc_cosmo::{Cosmology, FlatLambdaCdm};
use rc_photometry::{
    BlackbodyPulse, MagSystem, TimeAbove, TransientModel, find_band, interval_above_threshold,
    locate_peak,
};

#[test]
fn pinned_rest_frame_peak_matches_absolute_magnitude() {
    let cosmo = FlatLambdaCdm::planck15();
    let band = find_band("bessellb").unwrap();

    let mut model = BlackbodyPulse::default();
    model.pin_peak_absolute_magnitude(-18.0, &band, MagSystem::Vega, &cosmo).unwrap();
    let peak = locate_peak(&model, &band, MagSystem::Vega, 1.0).unwrap();
    assert!((peak.magnitude + 18.0).abs() < 1e-6, "peak {}", peak.magnitude);
}

#[test]
fn pinning_at_redshift_adds_distance_modulus() {
    let cosmo = FlatLambdaCdm::planck15();
    let band = find_band("bessellb").unwrap();
    let z = 0.05;

    let mut model = BlackbodyPulse::default();
    model.set_redshift(z);
    model.pin_peak_absolute_magnitude(-19.3, &band, MagSystem::Vega, &cosmo).unwrap();

    let mut rest = model.clone();
    rest.set_redshift(0.0);
    let peak = locate_peak(&rest, &band, MagSystem::Vega, 1.0).unwrap();
    let expected = -19.3 + cosmo.distance_modulus(z);
    assert!((peak.magnitude - expected).abs() < 1e-6);

    // Observed at z only the K-correction separates the two
    let observed = locate_peak(&model, &band, MagSystem::Vega, 1.0).unwrap();
    assert!((observed.magnitude - expected).abs() < 0.5);
}

#[test]
fn detection_window_grows_with_depth() {
    let band = find_band("bessellv").unwrap();
    let mut model = BlackbodyPulse::default();
    model.set_redshift(0.02);
    model.set_amplitude(1e-12);
    let peak = locate_peak(&model, &band, MagSystem::Ab, 1.0).unwrap();

    let shallow = interval_above_threshold(&model, &band, MagSystem::Ab, peak.magnitude + 0.5, &peak).unwrap();
    let deep = interval_above_threshold(&model, &band, MagSystem::Ab, peak.magnitude + 2.0, &peak).unwrap();
    assert!(matches!(shallow, TimeAbove::Interval { .. }));
    assert!(deep.duration() > shallow.duration());
}
