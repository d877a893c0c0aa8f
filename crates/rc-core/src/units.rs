// rc-core/src/units.rs

use uom::si::f64::{Length as UomLength, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Time = UomTime;

#[inline]
pub fn pc(v: f64) -> Length {
    use uom::si::length::parsec;
    Length::new::<parsec>(v)
}

#[inline]
pub fn mpc(v: f64) -> Length {
    pc(v * 1.0e6)
}

#[inline]
pub fn angstrom(v: f64) -> Length {
    use uom::si::length::angstrom;
    Length::new::<angstrom>(v)
}

#[inline]
pub fn days(v: f64) -> Time {
    use uom::si::time::day;
    Time::new::<day>(v)
}

#[inline]
pub fn in_pc(l: Length) -> f64 {
    use uom::si::length::parsec;
    l.get::<parsec>()
}

#[inline]
pub fn in_mpc(l: Length) -> f64 {
    in_pc(l) * 1.0e-6
}

#[inline]
pub fn in_angstrom(l: Length) -> f64 {
    use uom::si::length::angstrom;
    l.get::<angstrom>()
}

#[inline]
pub fn in_days(t: Time) -> f64 {
    use uom::si::time::day;
    t.get::<day>()
}

/// Survey baseline expressed in Julian years.
#[inline]
pub fn in_julian_years(t: Time) -> f64 {
    in_days(t) / constants::DAYS_PER_JULIAN_YEAR
}

pub mod constants {
    /// Julian year, days.
    pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
    /// Speed of light, km/s.
    pub const C_KM_S: f64 = 299_792.458;
    /// Speed of light, Å/s.
    pub const C_AA_S: f64 = 2.997_924_58e18;
    /// h·c in erg·Å.
    pub const HC_ERG_AA: f64 = 1.986_445_857e-8;
    /// h·c/k_B in Å·K.
    pub const HC_OVER_K_AA_K: f64 = 1.438_776_877e8;
    /// AB zero point flux density, erg s⁻¹ cm⁻² Hz⁻¹ (3631 Jy).
    pub const AB_FNU_ZERO: f64 = 3631.0e-23;
    /// Reference distance for absolute magnitudes, pc.
    pub const ABS_MAG_DISTANCE_PC: f64 = 10.0;
}
