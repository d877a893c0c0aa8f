//! Built-in bandpasses.
//!
//! Approximate Bessell (1990) UX/B/V/R/I response curves sampled every
//! 50–100 Å, with the AB − Vega offsets of Blanton & Roweis (2007).

use crate::bandpass::Bandpass;
use crate::error::{PhotometryError, PhotometryResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandCatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    /// (wavelength [Å], transmission)
    pub table: &'static [(f64, f64)],
    pub ab_minus_vega: f64,
}

impl BandCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    /// Exact, case-insensitive match on the id or an alias.
    pub fn is_named(&self, name: &str) -> bool {
        let name = name.trim();
        self.canonical_id.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }

    pub fn bandpass(&self) -> PhotometryResult<Bandpass> {
        let (wave, trans) = self.table.iter().copied().unzip();
        Ok(Bandpass::new(self.canonical_id, wave, trans)?.with_ab_minus_vega(self.ab_minus_vega))
    }
}

const BESSELL_UX: [(f64, f64); 25] = [
    (3000.0, 0.000),
    (3050.0, 0.016),
    (3100.0, 0.068),
    (3150.0, 0.167),
    (3200.0, 0.287),
    (3250.0, 0.423),
    (3300.0, 0.560),
    (3350.0, 0.673),
    (3400.0, 0.772),
    (3450.0, 0.841),
    (3500.0, 0.905),
    (3550.0, 0.943),
    (3600.0, 0.981),
    (3650.0, 0.993),
    (3700.0, 1.000),
    (3750.0, 0.989),
    (3800.0, 0.916),
    (3850.0, 0.804),
    (3900.0, 0.625),
    (3950.0, 0.423),
    (4000.0, 0.238),
    (4050.0, 0.114),
    (4100.0, 0.051),
    (4150.0, 0.019),
    (4200.0, 0.000),
];

const BESSELL_B: [(f64, f64); 21] = [
    (3600.0, 0.000),
    (3700.0, 0.030),
    (3800.0, 0.134),
    (3900.0, 0.567),
    (4000.0, 0.920),
    (4100.0, 0.978),
    (4200.0, 1.000),
    (4300.0, 0.978),
    (4400.0, 0.935),
    (4500.0, 0.853),
    (4600.0, 0.740),
    (4700.0, 0.640),
    (4800.0, 0.536),
    (4900.0, 0.424),
    (5000.0, 0.325),
    (5100.0, 0.235),
    (5200.0, 0.150),
    (5300.0, 0.095),
    (5400.0, 0.043),
    (5500.0, 0.009),
    (5600.0, 0.000),
];

const BESSELL_V: [(f64, f64); 24] = [
    (4700.0, 0.000),
    (4800.0, 0.030),
    (4900.0, 0.163),
    (5000.0, 0.458),
    (5100.0, 0.780),
    (5200.0, 0.967),
    (5300.0, 1.000),
    (5400.0, 0.973),
    (5500.0, 0.898),
    (5600.0, 0.792),
    (5700.0, 0.684),
    (5800.0, 0.574),
    (5900.0, 0.461),
    (6000.0, 0.359),
    (6100.0, 0.270),
    (6200.0, 0.197),
    (6300.0, 0.135),
    (6400.0, 0.081),
    (6500.0, 0.045),
    (6600.0, 0.025),
    (6700.0, 0.017),
    (6800.0, 0.013),
    (6900.0, 0.009),
    (7000.0, 0.000),
];

const BESSELL_R: [(f64, f64); 24] = [
    (5500.0, 0.00),
    (5600.0, 0.23),
    (5700.0, 0.74),
    (5800.0, 0.91),
    (5900.0, 0.98),
    (6000.0, 1.00),
    (6100.0, 0.98),
    (6200.0, 0.96),
    (6300.0, 0.93),
    (6400.0, 0.90),
    (6500.0, 0.86),
    (6600.0, 0.81),
    (6700.0, 0.78),
    (6800.0, 0.72),
    (6900.0, 0.67),
    (7000.0, 0.61),
    (7100.0, 0.56),
    (7200.0, 0.51),
    (7300.0, 0.46),
    (7400.0, 0.40),
    (7500.0, 0.35),
    (8000.0, 0.14),
    (8500.0, 0.03),
    (9000.0, 0.00),
];

const BESSELL_I: [(f64, f64); 23] = [
    (7000.0, 0.000),
    (7100.0, 0.024),
    (7200.0, 0.232),
    (7300.0, 0.555),
    (7400.0, 0.785),
    (7500.0, 0.910),
    (7600.0, 0.965),
    (7700.0, 0.985),
    (7800.0, 0.990),
    (7900.0, 0.995),
    (8000.0, 1.000),
    (8100.0, 1.000),
    (8200.0, 0.990),
    (8300.0, 0.980),
    (8400.0, 0.950),
    (8500.0, 0.910),
    (8600.0, 0.860),
    (8700.0, 0.750),
    (8800.0, 0.560),
    (8900.0, 0.330),
    (9000.0, 0.150),
    (9100.0, 0.030),
    (9200.0, 0.000),
];

const BUILTIN_BANDS: [BandCatalogEntry; 5] = [
    BandCatalogEntry {
        canonical_id: "bessellux",
        display_name: "Bessell UX",
        aliases: &["ux", "u"],
        table: &BESSELL_UX,
        ab_minus_vega: 0.79,
    },
    BandCatalogEntry {
        canonical_id: "bessellb",
        display_name: "Bessell B",
        aliases: &["b"],
        table: &BESSELL_B,
        ab_minus_vega: -0.09,
    },
    BandCatalogEntry {
        canonical_id: "bessellv",
        display_name: "Bessell V",
        aliases: &["v"],
        table: &BESSELL_V,
        ab_minus_vega: 0.02,
    },
    BandCatalogEntry {
        canonical_id: "bessellr",
        display_name: "Bessell R",
        aliases: &["r"],
        table: &BESSELL_R,
        ab_minus_vega: 0.21,
    },
    BandCatalogEntry {
        canonical_id: "besselli",
        display_name: "Bessell I",
        aliases: &["i"],
        table: &BESSELL_I,
        ab_minus_vega: 0.45,
    },
];

pub fn builtin_bands() -> &'static [BandCatalogEntry] {
    &BUILTIN_BANDS
}

pub fn filter_builtin_bands(query: &str) -> Vec<BandCatalogEntry> {
    builtin_bands()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Resolve a band by id or alias.
pub fn find_band(name: &str) -> PhotometryResult<Bandpass> {
    builtin_bands()
        .iter()
        .find(|entry| entry.is_named(name))
        .ok_or_else(|| PhotometryError::UnknownBand {
            name: name.to_string(),
        })?
        .bandpass()
}
