//! Survey rate calculator.
//!
//! Lifecycle of the magnitude map:
//! - `Fresh`: only the seed sample
//! - `Covered`: samples reach the working magnitude limit
//! - `Exhausted`: the physical redshift ceiling stopped growth short of it
//!
//! Queries fainter than the working limit raise it and extend the map first.

use crate::completeness::gaussian_completeness;
use crate::config::{CalculatorConfig, EvaluationMode, ScalingPolicy};
use crate::error::{RatesError, RatesResult};
use crate::map::{Extension, MagnitudeRedshiftMap};
use crate::persist::CalculatorState;
use rc_core::units::constants::ABS_MAG_DISTANCE_PC;
use rc_core::units::in_pc;
use rc_cosmo::{Cosmology, Exposure, RateFunction, ShellRates, shell_rate};
use rc_photometry::{
    Bandpass, DEFAULT_SAMPLING, TransientModel, locate_peak, magnitude_for_duration,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    Fresh,
    Covered,
    Exhausted,
}

/// Expected count with the redshift it was integrated to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountEstimate {
    pub count: f64,
    pub z_max: f64,
    /// Integration stopped at the last sample below the redshift ceiling;
    /// `count` is a lower bound.
    pub truncated: bool,
}

/// Expected counts per redshift bin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedshiftDistribution {
    pub centers: Vec<f64>,
    pub counts: Vec<f64>,
    pub truncated: bool,
}

impl RedshiftDistribution {
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }
}

/// Computes the observable magnitude of the model at a trial redshift.
struct Evaluator<'a, M> {
    model: &'a M,
    band: &'a Bandpass,
    config: &'a CalculatorConfig,
    cosmology: &'a dyn Cosmology,
}

impl<M: TransientModel> Evaluator<'_, M> {
    fn scale(&self, z: f64) -> RatesResult<M> {
        let mut model = self.model.clone();
        model.set_redshift(z);
        match &self.config.scaling {
            ScalingPolicy::LuminosityDistance => {
                let d = in_pc(self.cosmology.luminosity_distance(z)) / ABS_MAG_DISTANCE_PC;
                model.set_amplitude(model.amplitude() / (d * d));
            }
            ScalingPolicy::PinPeak {
                absolute_magnitude,
                band,
                magsys,
            } => {
                model.pin_peak_absolute_magnitude(*absolute_magnitude, band, *magsys, self.cosmology)?;
            }
        }
        Ok(model)
    }

    fn magnitude(&self, z: f64) -> RatesResult<f64> {
        let model = self.scale(z)?;
        let magsys = self.config.magsys;
        let peak = locate_peak(&model, self.band, magsys, DEFAULT_SAMPLING)?;
        let magnitude = match self.config.mode {
            EvaluationMode::Peak => peak.magnitude,
            EvaluationMode::BeforePeak { offset_days } => {
                model.band_magnitude(self.band, magsys, peak.phase - offset_days)?
            }
            EvaluationMode::TimeAbove { duration_days } => {
                magnitude_for_duration(&model, self.band, magsys, duration_days, &peak)?
            }
        };
        Ok(magnitude)
    }
}

pub struct RateCalculator<M: TransientModel> {
    model: M,
    band: Bandpass,
    config: CalculatorConfig,
    exposure: Exposure,
    working_limit: f64,
    z_ceiling: f64,
    map: MagnitudeRedshiftMap,
    cosmology: Arc<dyn Cosmology>,
    rate: Arc<dyn RateFunction>,
}

impl<M: TransientModel> RateCalculator<M> {
    /// Seed the map at `10^logz_start` and extend it to the working limit.
    pub fn new(
        model: M,
        band: Bandpass,
        config: CalculatorConfig,
        cosmology: Arc<dyn Cosmology>,
        rate: Arc<dyn RateFunction>,
    ) -> RatesResult<Self> {
        config.validate()?;
        let exposure = config.exposure()?;
        let z_ceiling = MagnitudeRedshiftMap::max_physical_redshift(&band, model.min_wave());
        let z0 = config.grid.z_start();
        if !(z0 < z_ceiling) {
            return Err(RatesError::InvalidArg {
                what: format!(
                    "first redshift {z0} is beyond the ceiling {z_ceiling} of band {} for model {}",
                    band.name(),
                    model.name()
                ),
            });
        }

        let m0 = Evaluator {
            model: &model,
            band: &band,
            config: &config,
            cosmology: cosmology.as_ref(),
        }
        .magnitude(z0)?;
        let map = MagnitudeRedshiftMap::seed(z0, m0)?;

        let mut calc = Self {
            working_limit: config.working_limit(),
            model,
            band,
            config,
            exposure,
            z_ceiling,
            map,
            cosmology,
            rate,
        };
        calc.extend()?;
        debug!(
            model = calc.model.name(),
            band = calc.band.name(),
            samples = calc.map.len(),
            z_ceiling,
            "rate calculator ready"
        );
        Ok(calc)
    }

    /// Rebuild a calculator from a saved state and fresh collaborators.
    pub fn from_state(
        state: CalculatorState,
        model: M,
        cosmology: Arc<dyn Cosmology>,
        rate: Arc<dyn RateFunction>,
    ) -> RatesResult<Self> {
        state.config.validate()?;
        if !state.working_limit.is_finite() {
            return Err(RatesError::InvalidArg {
                what: format!("stored working limit {}", state.working_limit),
            });
        }
        let exposure = state.config.exposure()?;
        let z_ceiling = MagnitudeRedshiftMap::max_physical_redshift(&state.band, model.min_wave());
        let map = MagnitudeRedshiftMap::from_samples(state.z_samples, state.mag_samples)?;

        let mut calc = Self {
            model,
            band: state.band,
            config: state.config,
            exposure,
            working_limit: state.working_limit,
            z_ceiling,
            map,
            cosmology,
            rate,
        };
        calc.extend()?;
        Ok(calc)
    }

    pub fn state(&self) -> CalculatorState {
        CalculatorState {
            saved_at: chrono::Utc::now().to_rfc3339(),
            band: self.band.clone(),
            config: self.config.clone(),
            working_limit: self.working_limit,
            z_samples: self.map.z_samples().to_vec(),
            mag_samples: self.map.mag_samples().to_vec(),
        }
    }

    pub fn save(&self, path: &Path) -> RatesResult<()> {
        self.state().write(path)
    }

    pub fn load(
        path: &Path,
        model: M,
        cosmology: Arc<dyn Cosmology>,
        rate: Arc<dyn RateFunction>,
    ) -> RatesResult<Self> {
        Self::from_state(CalculatorState::read(path)?, model, cosmology, rate)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn band(&self) -> &Bandpass {
        &self.band
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn exposure(&self) -> &Exposure {
        &self.exposure
    }

    pub fn cosmology(&self) -> &Arc<dyn Cosmology> {
        &self.cosmology
    }

    pub fn map(&self) -> &MagnitudeRedshiftMap {
        &self.map
    }

    /// Magnitude the map currently has to cover.
    pub fn working_limit(&self) -> f64 {
        self.working_limit
    }

    /// Redshift beyond which the band leaves the model's spectral coverage.
    pub fn z_ceiling(&self) -> f64 {
        self.z_ceiling
    }

    pub fn coverage(&self) -> Coverage {
        let (_, m_last) = self.map.last();
        if m_last < self.working_limit {
            Coverage::Exhausted
        } else if self.map.len() == 1 {
            Coverage::Fresh
        } else {
            Coverage::Covered
        }
    }

    pub fn magnitude_of(&self, z: f64) -> f64 {
        self.map.magnitude_of(z)
    }

    pub fn redshift_of(&self, magnitude: f64) -> f64 {
        self.map.redshift_of(magnitude)
    }

    /// Model copy at redshift `z` with its flux scaled per the scaling policy.
    pub fn scale_model_to_redshift(&self, z: f64) -> RatesResult<M> {
        self.evaluator().scale(z)
    }

    /// Observable magnitude at `z` in the configured evaluation mode.
    pub fn magnitude_at(&self, z: f64) -> RatesResult<f64> {
        self.evaluator().magnitude(z)
    }

    /// Make sure the map covers `magnitude` (plus the scatter margin).
    pub fn check_magnitude_limit(&mut self, magnitude: f64) -> RatesResult<()> {
        let needed = magnitude + self.config.smear();
        if needed > self.working_limit {
            info!(
                from = self.working_limit,
                to = needed,
                "raising working magnitude limit"
            );
            self.working_limit = needed;
            self.extend()?;
        }
        Ok(())
    }

    /// Replace the nominal limiting magnitude.
    ///
    /// The map is extended if needed; it never shrinks.
    pub fn set_magnitude_limit(&mut self, magnitude: f64) -> RatesResult<()> {
        if !magnitude.is_finite() {
            return Err(RatesError::InvalidArg {
                what: format!("magnitude limit {magnitude}"),
            });
        }
        self.config.magnitude_limit = magnitude;
        self.working_limit = self.config.working_limit();
        self.extend()?;
        Ok(())
    }

    /// Expected number of events brighter than `magnitude`.
    ///
    /// Fails with `CoverageExhausted` when the model cannot be followed to
    /// that magnitude below the redshift ceiling.
    pub fn expected_count(&mut self, magnitude: f64, n_bins: usize) -> RatesResult<f64> {
        let estimate = self.count(magnitude, n_bins)?;
        if estimate.truncated {
            return Err(self.coverage_error(magnitude));
        }
        Ok(estimate.count)
    }

    /// Like [`expected_count`](Self::expected_count), but integrates up to
    /// the last sample and flags the result when coverage runs out.
    pub fn estimate_count(&mut self, magnitude: f64, n_bins: usize) -> RatesResult<CountEstimate> {
        let estimate = self.count(magnitude, n_bins)?;
        if estimate.truncated {
            warn!(
                magnitude,
                z_max = estimate.z_max,
                "count truncated at the redshift ceiling"
            );
        }
        Ok(estimate)
    }

    /// Expected events brighter than `magnitude` in redshift bins of width
    /// `z_bin`, integrated on a finer grid of step `z_step`.
    pub fn redshift_distribution(
        &mut self,
        magnitude: f64,
        z_bin: f64,
        z_step: f64,
    ) -> RatesResult<RedshiftDistribution> {
        let dist = self.distribution(magnitude, z_bin, z_step)?;
        if dist.truncated {
            return Err(self.coverage_error(magnitude));
        }
        Ok(dist)
    }

    /// Partial-result form of [`redshift_distribution`](Self::redshift_distribution).
    pub fn estimate_redshift_distribution(
        &mut self,
        magnitude: f64,
        z_bin: f64,
        z_step: f64,
    ) -> RatesResult<RedshiftDistribution> {
        let dist = self.distribution(magnitude, z_bin, z_step)?;
        if dist.truncated {
            warn!(magnitude, "redshift distribution truncated at the redshift ceiling");
        }
        Ok(dist)
    }

    fn evaluator(&self) -> Evaluator<'_, M> {
        Evaluator {
            model: &self.model,
            band: &self.band,
            config: &self.config,
            cosmology: self.cosmology.as_ref(),
        }
    }

    fn extend(&mut self) -> RatesResult<Extension> {
        let evaluator = Evaluator {
            model: &self.model,
            band: &self.band,
            config: &self.config,
            cosmology: self.cosmology.as_ref(),
        };
        let extension = self.map.extend_until(
            self.working_limit,
            self.z_ceiling,
            self.config.grid.logz_step,
            |z| evaluator.magnitude(z),
        )?;
        if extension == Extension::Ceiling {
            let (z_last, m_last) = self.map.last();
            debug!(z_last, m_last, target = self.working_limit, "magnitude map at redshift ceiling");
        }
        Ok(extension)
    }

    /// Redshift where the map reaches `target`, or the last sample if it
    /// never does. Targets brighter than the seed sample reach nothing.
    fn limiting_redshift(&self, target: f64) -> (f64, bool) {
        let (z_last, m_last) = self.map.last();
        if target < self.map.mag_samples()[0] {
            (0.0, false)
        } else if m_last < target {
            (z_last, true)
        } else {
            (self.map.redshift_of(target).max(0.0), false)
        }
    }

    fn coverage_error(&self, magnitude: f64) -> RatesError {
        RatesError::CoverageExhausted {
            requested: magnitude + self.config.smear(),
            reached: self.map.last().1,
            z_ceiling: self.z_ceiling,
        }
    }

    /// Shell counts out to `z_max`, weighted by completeness at `magnitude`
    /// when a dispersion is set.
    fn weighted_shells(&self, z_max: f64, n_bins: usize, magnitude: f64) -> RatesResult<ShellRates> {
        let mut shells = shell_rate(
            0.0,
            z_max,
            self.rate.as_ref(),
            n_bins,
            self.cosmology.as_ref(),
            &self.exposure,
        )?;
        if let Some(sigma) = self.config.dispersion {
            for (rate, &z) in shells.rates.iter_mut().zip(&shells.z_centers) {
                *rate *= gaussian_completeness(magnitude, self.map.magnitude_of(z), sigma);
            }
        }
        Ok(shells)
    }

    fn count(&mut self, magnitude: f64, n_bins: usize) -> RatesResult<CountEstimate> {
        self.check_magnitude_limit(magnitude)?;
        let (z_max, truncated) = self.limiting_redshift(magnitude + self.config.smear());
        let shells = self.weighted_shells(z_max, n_bins, magnitude)?;
        Ok(CountEstimate {
            count: shells.total(),
            z_max,
            truncated,
        })
    }

    fn distribution(&mut self, magnitude: f64, z_bin: f64, z_step: f64) -> RatesResult<RedshiftDistribution> {
        if !(z_bin.is_finite() && z_bin > 0.0 && z_step.is_finite() && z_step > 0.0) {
            return Err(RatesError::InvalidArg {
                what: format!("redshift bin {z_bin} and step {z_step} must be positive"),
            });
        }
        self.check_magnitude_limit(magnitude)?;
        let (z_max, truncated) = self.limiting_redshift(magnitude + self.config.smear());

        let n_fine = (z_max / z_step).floor() as usize;
        let n_coarse = (z_max / z_bin).ceil() as usize;
        if n_fine == 0 || n_coarse == 0 {
            return Ok(RedshiftDistribution {
                truncated,
                ..RedshiftDistribution::default()
            });
        }

        let fine = self.weighted_shells(n_fine as f64 * z_step, n_fine, magnitude)?;
        let edges: Vec<f64> = (0..=n_coarse).map(|k| k as f64 * z_bin).collect();
        let mut counts = vec![0.0; n_coarse];
        for (rate, &z) in fine.rates.iter().zip(&fine.z_centers) {
            let k = edges
                .partition_point(|&edge| edge <= z)
                .saturating_sub(1)
                .min(n_coarse - 1);
            counts[k] += rate;
        }
        let centers = edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();

        Ok(RedshiftDistribution {
            centers,
            counts,
            truncated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_cosmo::{ConstantRate, FlatLambdaCdm};
    use rc_photometry::{MagSystem, find_band};

    /// Gaussian flash with a flat spectrum in photon flux, M = -19.3 AB at 10 pc.
    #[derive(Clone, Debug)]
    struct Flash {
        z: f64,
        amplitude: f64,
        k: f64,
        min_wave: f64,
    }

    impl Flash {
        const WIDTH: f64 = 10.0;

        fn new(band: &Bandpass, min_wave: f64) -> Self {
            let zp = MagSystem::Ab.zero_point_flux(band).unwrap();
            Self {
                z: 0.0,
                amplitude: 1.0,
                k: zp * 10f64.powf(0.4 * 19.3),
                min_wave,
            }
        }
    }

    impl TransientModel for Flash {
        fn name(&self) -> &str {
            "flash"
        }
        fn min_time(&self) -> f64 {
            -50.0 * (1.0 + self.z)
        }
        fn max_time(&self) -> f64 {
            50.0 * (1.0 + self.z)
        }
        fn min_wave(&self) -> f64 {
            self.min_wave * (1.0 + self.z)
        }
        fn max_wave(&self) -> f64 {
            30_000.0 * (1.0 + self.z)
        }
        fn redshift(&self) -> f64 {
            self.z
        }
        fn set_redshift(&mut self, z: f64) {
            self.z = z;
        }
        fn amplitude(&self) -> f64 {
            self.amplitude
        }
        fn set_amplitude(&mut self, amplitude: f64) {
            self.amplitude = amplitude;
        }
        fn band_flux(&self, band: &Bandpass, phase: f64) -> f64 {
            if !self.covers(band) {
                return f64::NAN;
            }
            let x = phase / ((1.0 + self.z) * Self::WIDTH);
            self.amplitude * self.k * (-0.5 * x * x).exp() / (1.0 + self.z)
        }
    }

    fn calculator(config: CalculatorConfig, min_wave: f64) -> RateCalculator<Flash> {
        let band = find_band("bessellb").unwrap();
        let model = Flash::new(&band, min_wave);
        RateCalculator::new(
            model,
            band,
            config,
            Arc::new(FlatLambdaCdm::planck15()),
            Arc::new(ConstantRate(3e-5)),
        )
        .unwrap()
    }

    fn shallow() -> CalculatorConfig {
        CalculatorConfig {
            magnitude_limit: 18.0,
            ..CalculatorConfig::default()
        }
    }

    #[test]
    fn samples_follow_distance_modulus() {
        let calc = calculator(shallow(), 1000.0);
        assert_eq!(calc.coverage(), Coverage::Covered);
        let cosmo = FlatLambdaCdm::planck15();
        for (&z, &m) in calc.map().z_samples().iter().zip(calc.map().mag_samples()) {
            let expected = -19.3 + cosmo.distance_modulus(z) + 2.5 * (1.0 + z).log10();
            assert!((m - expected).abs() < 1e-6, "z={z}: {m} vs {expected}");
        }
    }

    #[test]
    fn fainter_queries_extend_the_map() {
        let mut calc = calculator(shallow(), 1000.0);
        let before = calc.map().len();
        calc.check_magnitude_limit(20.0).unwrap();
        assert_eq!(calc.working_limit(), 20.0);
        assert!(calc.map().len() > before);
        assert!(calc.map().last().1 >= 20.0);

        // Brighter queries leave everything alone
        let len = calc.map().len();
        calc.check_magnitude_limit(19.0).unwrap();
        assert_eq!(calc.working_limit(), 20.0);
        assert_eq!(calc.map().len(), len);
    }

    #[test]
    fn count_grows_with_depth() {
        let mut calc = calculator(shallow(), 1000.0);
        let mut previous = 0.0;
        for mag in [14.0, 16.0, 18.0, 19.0, 20.0] {
            let n = calc.expected_count(mag, 100).unwrap();
            assert!(n.is_finite() && n > previous, "mag {mag}: {n} <= {previous}");
            previous = n;
        }
    }

    #[test]
    fn ceiling_limits_coverage() {
        // Blue edge 3600 Å over a 3000 Å model edge: z < 0.2
        let mut calc = calculator(shallow(), 3000.0);
        assert!((calc.z_ceiling() - 0.2).abs() < 1e-12);

        let err = calc.expected_count(30.0, 100).unwrap_err();
        assert!(matches!(err, RatesError::CoverageExhausted { .. }));
        assert_eq!(calc.coverage(), Coverage::Exhausted);

        let estimate = calc.estimate_count(30.0, 100).unwrap();
        assert!(estimate.truncated);
        assert!(estimate.z_max < 0.2);
        assert!(estimate.count > 0.0);

        let dist = calc.estimate_redshift_distribution(30.0, 0.01, 1e-3).unwrap();
        assert!(dist.truncated);
        assert!(calc.redshift_distribution(30.0, 0.01, 1e-3).is_err());
    }

    #[test]
    fn seed_beyond_ceiling_is_rejected() {
        let band = find_band("bessellux").unwrap();
        let model = Flash::new(&band, 3000.0);
        let result = RateCalculator::new(
            model,
            band,
            shallow(),
            Arc::new(FlatLambdaCdm::planck15()),
            Arc::new(ConstantRate(3e-5)),
        );
        assert!(matches!(result, Err(RatesError::InvalidArg { .. })));
    }

    #[test]
    fn scaling_returns_a_new_model() {
        let calc = calculator(shallow(), 1000.0);
        let scaled = calc.scale_model_to_redshift(0.1).unwrap();
        assert_eq!(scaled.redshift(), 0.1);
        assert_eq!(calc.model().redshift(), 0.0);
        assert_eq!(calc.model().amplitude(), 1.0);

        let d = in_pc(calc.cosmology().luminosity_distance(0.1)) / 10.0;
        assert!((scaled.amplitude() * d * d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pinned_peak_ignores_model_amplitude() {
        let config = CalculatorConfig {
            scaling: ScalingPolicy::PinPeak {
                absolute_magnitude: -18.0,
                band: find_band("bessellb").unwrap(),
                magsys: MagSystem::Ab,
            },
            ..shallow()
        };
        let calc = calculator(config, 1000.0);
        let cosmo = FlatLambdaCdm::planck15();
        let z = 0.02;
        let expected = -18.0 + cosmo.distance_modulus(z) + 2.5 * (1.0 + z).log10();
        assert!((calc.magnitude_at(z).unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn before_peak_is_fainter() {
        let z = 0.05;
        let peak = calculator(shallow(), 1000.0).magnitude_at(z).unwrap();
        let config = CalculatorConfig {
            mode: EvaluationMode::BeforePeak { offset_days: 10.0 },
            ..shallow()
        };
        let early = calculator(config, 1000.0).magnitude_at(z).unwrap();
        // 2.5 log10(e) · x² / 2 with x = 10 / ((1+z) · 10)
        let expected = 2.5 * std::f64::consts::LOG10_E * 0.5 / (1.0 + z).powi(2);
        assert!((early - peak - expected).abs() < 1e-4);
    }

    #[test]
    fn zero_duration_matches_peak_mode() {
        let z = 0.03;
        let peak = calculator(shallow(), 1000.0).magnitude_at(z).unwrap();
        let config = CalculatorConfig {
            mode: EvaluationMode::TimeAbove { duration_days: 0.0 },
            ..shallow()
        };
        let above = calculator(config, 1000.0).magnitude_at(z).unwrap();
        assert_eq!(above, peak);
    }

    #[test]
    fn dispersion_weights_by_completeness() {
        let config = CalculatorConfig {
            dispersion: Some(0.3),
            ..shallow()
        };
        let mut scattered = calculator(config, 1000.0);
        assert!((scattered.working_limit() - 18.9).abs() < 1e-12);

        let mut sharp = calculator(shallow(), 1000.0);
        let n_sharp = sharp.expected_count(18.0, 200).unwrap();
        let n_scattered = scattered.expected_count(18.0, 200).unwrap();
        // Eddington bias: more volume leaks in than completeness removes
        assert!(n_scattered > n_sharp);
        assert!(n_scattered < 2.0 * n_sharp);
    }

    #[test]
    fn distribution_sums_to_count() {
        let mut calc = calculator(shallow(), 1000.0);
        let n = calc.expected_count(18.0, 400).unwrap();
        let dist = calc.redshift_distribution(18.0, 0.005, 1e-4).unwrap();
        assert!(!dist.truncated);
        assert_eq!(dist.centers.len(), dist.counts.len());
        assert!(dist.counts.iter().all(|c| *c >= 0.0));
        assert!((dist.total() - n).abs() / n < 0.05);
        assert!(dist.total() <= n * 1.001);
    }

    #[test]
    fn fresh_map_counts_nothing_brighter_than_seed() {
        let config = CalculatorConfig {
            magnitude_limit: 2.0,
            ..CalculatorConfig::default()
        };
        let mut fresh = calculator(config, 1000.0);
        assert_eq!(fresh.coverage(), Coverage::Fresh);
        assert_eq!(fresh.map().len(), 1);
        assert!(fresh.map().mag_samples()[0] > 2.0);

        let estimate = fresh.estimate_count(2.0, 10).unwrap();
        assert_eq!(estimate.z_max, 0.0);
        assert!(!estimate.truncated);
        assert_eq!(fresh.expected_count(2.0, 10).unwrap(), 0.0);
        assert!(fresh.redshift_distribution(2.0, 0.01, 1e-3).unwrap().is_empty());

        // Same answer as a calculator whose map already reaches further
        let mut extended = calculator(shallow(), 1000.0);
        assert_eq!(extended.expected_count(2.0, 10).unwrap(), 0.0);
    }

    #[test]
    fn very_bright_limit_counts_nothing() {
        let mut calc = calculator(shallow(), 1000.0);
        let first = calc.map().mag_samples()[0];
        let estimate = calc.estimate_count(first - 20.0, 10).unwrap();
        assert_eq!(estimate.z_max, 0.0);
        assert_eq!(estimate.count, 0.0);
        let dist = calc.redshift_distribution(first - 20.0, 0.01, 1e-3).unwrap();
        assert!(dist.is_empty());
    }
}
