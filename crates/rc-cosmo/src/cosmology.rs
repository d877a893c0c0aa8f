//! Cosmology trait and flat ΛCDM backend.

use crate::error::{CosmoError, CosmoResult};
use rc_core::units::constants::{ABS_MAG_DISTANCE_PC, C_KM_S};
use rc_core::units::{Length, in_pc, mpc};
use rc_solver::simpson;
use std::f64::consts::PI;

/// Trait for cosmological distance/volume models.
///
/// Implementations must be thread-safe (Send + Sync); a single instance is
/// shared read-only between rate calculators.
pub trait Cosmology: Send + Sync {
    /// Model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Line-of-sight comoving distance [Mpc].
    fn comoving_distance(&self, z: f64) -> f64;

    /// Comoving volume enclosed within redshift `z` over the full sky [Mpc³].
    fn comoving_volume(&self, z: f64) -> f64;

    /// Luminosity distance.
    fn luminosity_distance(&self, z: f64) -> Length {
        mpc((1.0 + z) * self.comoving_distance(z))
    }

    /// Distance modulus `5 log10(d_L / 10 pc)`.
    fn distance_modulus(&self, z: f64) -> f64 {
        5.0 * (in_pc(self.luminosity_distance(z)) / ABS_MAG_DISTANCE_PC).log10()
    }

    /// Comoving volumes at each redshift in `zs`.
    ///
    /// Backends that can integrate cumulatively should override this.
    fn comoving_volumes(&self, zs: &[f64]) -> Vec<f64> {
        zs.iter().map(|&z| self.comoving_volume(z)).collect()
    }
}

/// Ω_γ h² per K⁴ of CMB temperature.
const OMEGA_GAMMA_H2_PER_K4: f64 = 4.481_620e-7;
/// Boltzmann constant [eV/K].
const K_B_EV_K: f64 = 8.617_333_262e-5;
/// T_ν / T_CMB = (4/11)^(1/3).
const NU_TO_CMB_TEMPERATURE: f64 = 0.713_765_855_503_608_2;
/// 7/8 (4/11)^(4/3): energy density of one massless species relative to photons.
const NU_PER_SPECIES: f64 = 0.227_107_317_66;
const NU_SPECIES: usize = 3;

/// Spatially flat ΛCDM: matter, a cosmological constant and optionally the
/// photon and neutrino backgrounds.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatLambdaCdm {
    name: String,
    /// Hubble constant [km/s/Mpc]
    h0: f64,
    /// Matter density parameter today, massive neutrinos excluded
    omega_m: f64,
    /// Photon density parameter today
    omega_gamma: f64,
    /// Effective number of neutrino species
    neff: f64,
    /// m_ν / (k_B T_ν) today, one entry per species; massless species are 0
    nu_y: [f64; NU_SPECIES],
    /// Dark energy density parameter, closing the budget to flat
    omega_de: f64,
}

impl FlatLambdaCdm {
    /// Simpson sub-intervals per unit redshift.
    const INTERVALS_PER_UNIT_Z: f64 = 512.0;

    /// Matter and Λ only.
    pub fn new(h0: f64, omega_m: f64) -> CosmoResult<Self> {
        Self::with_radiation(h0, omega_m, 0.0, 0.0, &[])
    }

    /// Flat ΛCDM with a CMB at `tcmb0` [K] and `neff` neutrino species, of
    /// which `m_nu` [eV] lists the massive ones (up to three).
    ///
    /// A zero `tcmb0` drops both backgrounds.
    pub fn with_radiation(h0: f64, omega_m: f64, tcmb0: f64, neff: f64, m_nu: &[f64]) -> CosmoResult<Self> {
        if !(h0.is_finite() && h0 > 0.0) {
            return Err(CosmoError::InvalidParameter {
                what: "H0",
                value: h0,
            });
        }
        if !(omega_m.is_finite() && (0.0..=1.0).contains(&omega_m)) {
            return Err(CosmoError::InvalidParameter {
                what: "Om0",
                value: omega_m,
            });
        }
        if !(tcmb0.is_finite() && tcmb0 >= 0.0) {
            return Err(CosmoError::InvalidParameter {
                what: "Tcmb0",
                value: tcmb0,
            });
        }
        if !(neff.is_finite() && neff >= 0.0) {
            return Err(CosmoError::InvalidParameter {
                what: "Neff",
                value: neff,
            });
        }
        if m_nu.len() > NU_SPECIES {
            return Err(CosmoError::InvalidParameter {
                what: "number of massive neutrinos",
                value: m_nu.len() as f64,
            });
        }
        if let Some(&m) = m_nu.iter().find(|m| !(m.is_finite() && **m >= 0.0)) {
            return Err(CosmoError::InvalidParameter { what: "m_nu", value: m });
        }

        let name = if tcmb0 > 0.0 {
            format!("FlatLambdaCDM(H0={h0}, Om0={omega_m}, Tcmb0={tcmb0}, Neff={neff})")
        } else {
            format!("FlatLambdaCDM(H0={h0}, Om0={omega_m})")
        };
        let cosmology = Self::build(name, h0, omega_m, tcmb0, neff, m_nu);
        if cosmology.omega_de < 0.0 {
            return Err(CosmoError::InvalidParameter {
                what: "Ode0",
                value: cosmology.omega_de,
            });
        }
        Ok(cosmology)
    }

    /// Planck 2015 (H0 = 67.74, Om0 = 0.3075, Tcmb0 = 2.7255 K, Neff = 3.046,
    /// one 0.06 eV neutrino).
    pub fn planck15() -> Self {
        Self::build("Planck15".to_string(), 67.74, 0.3075, 2.7255, 3.046, &[0.06])
    }

    fn build(name: String, h0: f64, omega_m: f64, tcmb0: f64, neff: f64, m_nu: &[f64]) -> Self {
        let h = h0 / 100.0;
        let omega_gamma = OMEGA_GAMMA_H2_PER_K4 * tcmb0.powi(4) / (h * h);
        let mut nu_y = [0.0; NU_SPECIES];
        if tcmb0 > 0.0 {
            let kt_nu = K_B_EV_K * NU_TO_CMB_TEMPERATURE * tcmb0;
            for (y, m) in nu_y.iter_mut().zip(m_nu) {
                *y = m / kt_nu;
            }
        }
        let mut cosmology = Self {
            name,
            h0,
            omega_m,
            omega_gamma,
            neff,
            nu_y,
            omega_de: 0.0,
        };
        cosmology.omega_de = 1.0 - omega_m - cosmology.omega_gamma * (1.0 + cosmology.nu_relative_density(0.0));
        cosmology
    }

    pub fn h0(&self) -> f64 {
        self.h0
    }

    pub fn omega_m(&self) -> f64 {
        self.omega_m
    }

    pub fn omega_gamma(&self) -> f64 {
        self.omega_gamma
    }

    /// Neutrino density parameter today.
    pub fn omega_nu(&self) -> f64 {
        self.omega_gamma * self.nu_relative_density(0.0)
    }

    pub fn omega_de(&self) -> f64 {
        self.omega_de
    }

    /// Hubble distance c/H0 [Mpc].
    pub fn hubble_distance(&self) -> f64 {
        C_KM_S / self.h0
    }

    /// Neutrino to photon energy density at `z`, using the Komatsu et al.
    /// (2011) fit for the massive species.
    fn nu_relative_density(&self, z: f64) -> f64 {
        const P: f64 = 1.83;
        const K: f64 = 0.3173;
        let per_species: f64 = self
            .nu_y
            .iter()
            .map(|y| (1.0 + (K * y / (1.0 + z)).powf(P)).powf(1.0 / P))
            .sum();
        NU_PER_SPECIES * self.neff / NU_SPECIES as f64 * per_species
    }

    /// Dimensionless expansion rate E(z) = H(z)/H0.
    pub fn efunc(&self, z: f64) -> f64 {
        let zp1 = 1.0 + z;
        let matter = self.omega_m * zp1 * zp1 * zp1;
        let radiation = if self.omega_gamma > 0.0 {
            self.omega_gamma * (1.0 + self.nu_relative_density(z)) * zp1.powi(4)
        } else {
            0.0
        };
        (matter + radiation + self.omega_de).sqrt()
    }

    fn inv_efunc_integral(&self, z0: f64, z1: f64) -> f64 {
        let intervals = ((z1 - z0).abs() * Self::INTERVALS_PER_UNIT_Z).ceil() as usize;
        simpson(|z| 1.0 / self.efunc(z), z0, z1, intervals.max(2))
    }

    fn volume_from_distance(d_c: f64) -> f64 {
        4.0 / 3.0 * PI * d_c * d_c * d_c
    }
}

impl Default for FlatLambdaCdm {
    fn default() -> Self {
        Self::planck15()
    }
}

impl Cosmology for FlatLambdaCdm {
    fn name(&self) -> &str {
        &self.name
    }

    fn comoving_distance(&self, z: f64) -> f64 {
        self.hubble_distance() * self.inv_efunc_integral(0.0, z)
    }

    fn comoving_volume(&self, z: f64) -> f64 {
        Self::volume_from_distance(self.comoving_distance(z))
    }

    fn comoving_volumes(&self, zs: &[f64]) -> Vec<f64> {
        let sorted = zs.windows(2).all(|w| w[1] >= w[0]);
        if !sorted {
            return zs.iter().map(|&z| self.comoving_volume(z)).collect();
        }

        // Integrate piecewise between consecutive redshifts
        let d_h = self.hubble_distance();
        let mut out = Vec::with_capacity(zs.len());
        let mut z_prev = 0.0;
        let mut integral = 0.0;
        for &z in zs {
            integral += self.inv_efunc_integral(z_prev, z);
            z_prev = z;
            out.push(Self::volume_from_distance(d_h * integral));
        }
        out
    }
}
