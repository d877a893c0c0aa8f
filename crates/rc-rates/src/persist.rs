//! Calculator state dump.
//!
//! Only the calculator's own numbers are stored. The model, cosmology and
//! rate function are supplied again on load, and the splines are rebuilt
//! from the raw samples.

use crate::config::CalculatorConfig;
use crate::error::RatesResult;
use rc_photometry::Bandpass;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// RFC 3339 timestamp
    pub saved_at: String,
    pub band: Bandpass,
    pub config: CalculatorConfig,
    pub working_limit: f64,
    pub z_samples: Vec<f64>,
    pub mag_samples: Vec<f64>,
}

impl CalculatorState {
    pub fn to_json(&self) -> RatesResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> RatesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write(&self, path: &Path) -> RatesResult<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read(path: &Path) -> RatesResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvaluationMode;
    use rc_photometry::find_band;

    fn state() -> CalculatorState {
        CalculatorState {
            saved_at: "2024-01-01T00:00:00+00:00".to_string(),
            band: find_band("bessellux").unwrap(),
            config: CalculatorConfig {
                dispersion: Some(0.15),
                mode: EvaluationMode::BeforePeak { offset_days: 5.0 },
                ..CalculatorConfig::default()
            },
            working_limit: 24.45,
            z_samples: vec![10f64.powf(-3.5), 10f64.powf(-3.45), 0.1 + 0.2],
            mag_samples: vec![6.123456789012345, 6.373456789, 21.0 / 3.0],
        }
    }

    #[test]
    fn json_preserves_floats_exactly() {
        let s = state();
        let back = CalculatorState::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn writes_and_reads_file() {
        let dir = std::env::temp_dir().join(format!("rc-rates-persist-{}", std::process::id()));
        let path = dir.join("state.json");
        let s = state();
        s.write(&path).unwrap();
        assert_eq!(CalculatorState::read(&path).unwrap(), s);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CalculatorState::read(Path::new("/nonexistent/rc-state.json")).unwrap_err();
        assert!(matches!(err, crate::RatesError::Io(_)));
    }
}
