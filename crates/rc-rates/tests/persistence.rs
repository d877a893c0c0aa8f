use rc_cosmo::{ConstantRate, FlatLambdaCdm};
use rc_photometry::{BlackbodyPulse, find_band};
use rc_rates::{CalculatorConfig, CalculatorState, RateCalculator, RatesError};
use std::sync::Arc;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("rc-rates-{}", std::process::id()))
        .join(name)
}

fn calculator() -> RateCalculator<BlackbodyPulse> {
    RateCalculator::new(
        BlackbodyPulse::default(),
        find_band("bessellb").unwrap(),
        CalculatorConfig {
            magnitude_limit: 20.0,
            dispersion: Some(0.15),
            ..CalculatorConfig::default()
        },
        Arc::new(FlatLambdaCdm::planck15()),
        Arc::new(ConstantRate(3e-5)),
    )
    .unwrap()
}

#[test]
fn reload_reproduces_counts_exactly() {
    let mut calc = calculator();
    let before = calc.expected_count(20.5, 100).unwrap();

    let path = temp_path("round_trip.json");
    calc.save(&path).unwrap();
    let mut loaded = RateCalculator::load(
        &path,
        BlackbodyPulse::default(),
        Arc::new(FlatLambdaCdm::planck15()),
        Arc::new(ConstantRate(3e-5)),
    )
    .unwrap();

    assert_eq!(loaded.map().z_samples(), calc.map().z_samples());
    assert_eq!(loaded.map().mag_samples(), calc.map().mag_samples());
    assert_eq!(loaded.working_limit(), calc.working_limit());
    assert_eq!(loaded.expected_count(20.5, 100).unwrap(), before);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn state_carries_timestamp_and_config() {
    let calc = calculator();
    let state = calc.state();
    assert!(chrono::DateTime::parse_from_rfc3339(&state.saved_at).is_ok());
    assert_eq!(state.config, *calc.config());
    assert_eq!(state.band.name(), "bessellb");

    let json = state.to_json().unwrap();
    assert!(json.contains("\"z_samples\""));
    assert!(!json.contains("\"cosmology\""));
}

#[test]
fn corrupted_samples_are_rejected() {
    let mut state = calculator().state();
    state.mag_samples.reverse();
    let err = RateCalculator::from_state(
        state,
        BlackbodyPulse::default(),
        Arc::new(FlatLambdaCdm::planck15()),
        Arc::new(ConstantRate(3e-5)),
    )
    .err()
    .unwrap();
    assert!(matches!(err, RatesError::NonMonotonic { .. }));
}

#[test]
fn state_reloads_from_json() {
    let state = calculator().state();
    let back = CalculatorState::from_json(&state.to_json().unwrap()).unwrap();
    assert_eq!(back, state);
}
