//! YAML survey description: model, cosmology, rate and survey settings.

use crate::error::{CliError, CliResult};
use rc_cosmo::{ConstantRate, Cosmology, FlatLambdaCdm, PowerLawRate, RateFunction};
use rc_photometry::{BlackbodyPulse, MagSystem, PulseParams, TransientModel, find_band};
use rc_rates::{CalculatorConfig, EvaluationMode, RateCalculator, RedshiftGrid, ScalingPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyFile {
    pub model: ModelSpec,
    #[serde(default)]
    pub cosmology: CosmologyDef,
    #[serde(default)]
    pub rate: RateSpec,
    #[serde(default)]
    pub survey: SurveyDef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    BlackbodyPulse {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        params: PulseParams,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CosmologyDef {
    #[default]
    Planck15,
    FlatLambdaCdm {
        h0: f64,
        omega_m: f64,
        /// CMB temperature [K]; 0 leaves out photons and neutrinos
        #[serde(default)]
        tcmb0: f64,
        #[serde(default = "default_neff")]
        neff: f64,
        /// Massive neutrino masses [eV]
        #[serde(default)]
        m_nu: Vec<f64>,
    },
}

fn default_neff() -> f64 {
    3.046
}

/// Volumetric rate [Mpc⁻³ yr⁻¹].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RateSpec {
    Constant { rate: f64 },
    PowerLaw { r0: f64, alpha: f64 },
}

impl Default for RateSpec {
    fn default() -> Self {
        RateSpec::Constant { rate: 3e-7 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyDef {
    pub band: String,
    pub magsys: MagSystem,
    pub limit: f64,
    pub dispersion: Option<f64>,
    pub sigma_cut: f64,
    pub area_percent: f64,
    pub duration_days: f64,
    pub mode: EvaluationMode,
    /// Rest-frame peak to pin the model to. Without it the model amplitude is
    /// taken as a source at 10 pc.
    pub peak_magnitude: Option<PeakPinDef>,
    pub grid: RedshiftGrid,
}

impl Default for SurveyDef {
    fn default() -> Self {
        let config = CalculatorConfig::default();
        Self {
            band: "bessellux".to_string(),
            magsys: config.magsys,
            limit: config.magnitude_limit,
            dispersion: config.dispersion,
            sigma_cut: config.sigma_cut,
            area_percent: config.area_percent,
            duration_days: config.duration_days,
            mode: config.mode,
            peak_magnitude: None,
            grid: config.grid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakPinDef {
    pub magnitude: f64,
    #[serde(default = "default_pin_band")]
    pub band: String,
    #[serde(default = "default_pin_magsys")]
    pub magsys: MagSystem,
}

fn default_pin_band() -> String {
    "bessellb".to_string()
}

fn default_pin_magsys() -> MagSystem {
    MagSystem::Vega
}

pub fn load_survey(path: &Path) -> CliResult<SurveyFile> {
    let content = fs::read_to_string(path).map_err(|source| CliError::SurveyRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_survey(&content)
}

pub fn parse_survey(yaml: &str) -> CliResult<SurveyFile> {
    Ok(serde_yaml::from_str(yaml)?)
}

impl ModelSpec {
    pub fn build(&self) -> CliResult<BlackbodyPulse> {
        match self {
            ModelSpec::BlackbodyPulse { name, params } => {
                let name = name.as_deref().unwrap_or("blackbody-pulse");
                Ok(BlackbodyPulse::new(name, params.clone())?)
            }
        }
    }
}

impl CosmologyDef {
    pub fn build(&self) -> CliResult<Arc<dyn Cosmology>> {
        let cosmology = match self {
            CosmologyDef::Planck15 => FlatLambdaCdm::planck15(),
            CosmologyDef::FlatLambdaCdm {
                h0,
                omega_m,
                tcmb0,
                neff,
                m_nu,
            } => FlatLambdaCdm::with_radiation(*h0, *omega_m, *tcmb0, *neff, m_nu)?,
        };
        Ok(Arc::new(cosmology))
    }
}

impl RateSpec {
    pub fn build(&self) -> CliResult<Arc<dyn RateFunction>> {
        match *self {
            RateSpec::Constant { rate } => {
                check_rate(rate)?;
                Ok(Arc::new(ConstantRate(rate)))
            }
            RateSpec::PowerLaw { r0, alpha } => {
                check_rate(r0)?;
                if !alpha.is_finite() {
                    return Err(CliError::InvalidInput(format!(
                        "power-law rate exponent must be finite, got {alpha}"
                    )));
                }
                Ok(Arc::new(PowerLawRate { r0, alpha }))
            }
        }
    }
}

fn check_rate(rate: f64) -> CliResult<()> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "volumetric rate must be non-negative, got {rate}"
        )))
    }
}

impl SurveyDef {
    pub fn to_config(&self) -> CliResult<CalculatorConfig> {
        let scaling = match &self.peak_magnitude {
            Some(pin) => ScalingPolicy::PinPeak {
                absolute_magnitude: pin.magnitude,
                band: find_band(&pin.band)?,
                magsys: pin.magsys,
            },
            None => ScalingPolicy::LuminosityDistance,
        };
        let config = CalculatorConfig {
            magsys: self.magsys,
            magnitude_limit: self.limit,
            dispersion: self.dispersion,
            sigma_cut: self.sigma_cut,
            grid: self.grid,
            area_percent: self.area_percent,
            duration_days: self.duration_days,
            mode: self.mode,
            scaling,
        };
        config.validate()?;
        Ok(config)
    }
}

impl SurveyFile {
    pub fn build_calculator(&self) -> CliResult<RateCalculator<BlackbodyPulse>> {
        let model = self.model.build()?;
        let band = find_band(&self.survey.band)?;
        let config = self.survey.to_config()?;
        info!(
            model = model.name(),
            band = band.name(),
            limit = config.magnitude_limit,
            "building rate calculator"
        );
        let calc = RateCalculator::new(
            model,
            band,
            config,
            self.cosmology.build()?,
            self.rate.build()?,
        )?;
        Ok(calc)
    }
}
