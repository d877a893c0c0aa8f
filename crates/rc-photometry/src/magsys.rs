//! Magnitude systems.

use crate::bandpass::Bandpass;
use crate::error::{PhotometryError, PhotometryResult};
use crate::model::TransientModel;
use rc_core::units::constants::{AB_FNU_ZERO, C_AA_S};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagSystem {
    /// Flat f_ν = 3631 Jy reference.
    #[default]
    Ab,
    /// Vega-relative, derived from the band's AB − Vega offset.
    Vega,
}

impl MagSystem {
    pub fn name(&self) -> &'static str {
        match self {
            MagSystem::Ab => "ab",
            MagSystem::Vega => "vega",
        }
    }

    /// Photon flux [photons s⁻¹ cm⁻²] of a zero-magnitude source in `band`.
    pub fn zero_point_flux(&self, band: &Bandpass) -> PhotometryResult<f64> {
        let ab = band.photon_flux(|wave| AB_FNU_ZERO * C_AA_S / (wave * wave));
        match self {
            MagSystem::Ab => Ok(ab),
            MagSystem::Vega => {
                let offset = band
                    .ab_minus_vega()
                    .ok_or_else(|| PhotometryError::UnsupportedMagSystem {
                        system: self.name().to_string(),
                        band: band.name().to_string(),
                    })?;
                Ok(ab * 10f64.powf(-0.4 * offset))
            }
        }
    }
}

impl fmt::Display for MagSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MagSystem {
    type Err = PhotometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ab" => Ok(MagSystem::Ab),
            "vega" => Ok(MagSystem::Vega),
            other => Err(PhotometryError::InvalidArg {
                what: format!("unknown magnitude system '{other}'"),
            }),
        }
    }
}

/// A band paired with its zero point, for repeated model photometry.
#[derive(Clone, Copy, Debug)]
pub struct Photometer<'a> {
    band: &'a Bandpass,
    zp_flux: f64,
}

impl<'a> Photometer<'a> {
    pub fn new(band: &'a Bandpass, magsys: MagSystem) -> PhotometryResult<Self> {
        let zp_flux = magsys.zero_point_flux(band)?;
        Ok(Self { band, zp_flux })
    }

    pub fn band(&self) -> &'a Bandpass {
        self.band
    }

    pub fn zp_flux(&self) -> f64 {
        self.zp_flux
    }

    /// Model flux scaled so that `zp` is the magnitude of unit flux.
    pub fn flux_at_zp<M: TransientModel>(&self, model: &M, phase: f64, zp: f64) -> f64 {
        model.band_flux(self.band, phase) * 10f64.powf(0.4 * zp) / self.zp_flux
    }

    pub fn magnitude<M: TransientModel>(&self, model: &M, phase: f64) -> f64 {
        -2.5 * (model.band_flux(self.band, phase) / self.zp_flux).log10()
    }
}
