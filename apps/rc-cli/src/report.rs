//! Plain-text tables for the CLI output.
//!
//! Each table starts with a `#` header line so the output can be loaded
//! directly by column-oriented plotting tools.

use rc_photometry::LightCurve;
use rc_rates::RedshiftDistribution;
use std::fmt::Write;

/// One row of an expected-count table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExpectedRow {
    pub magnitude: f64,
    pub count: f64,
    pub truncated: bool,
}

/// Cumulative counts against limiting magnitude. Rows cut short at the
/// redshift ceiling are marked with `*`.
pub fn expected_table(label: &str, rows: &[ExpectedRow]) -> String {
    let mut out = format!("# m_lim    n_{label}\n");
    for row in rows {
        let _ = write!(out, "{:>7.2}   {:>9.2e}", row.magnitude, row.count);
        if row.truncated {
            out.push_str(" *");
        }
        out.push('\n');
    }
    out
}

pub fn redshift_table(dist: &RedshiftDistribution) -> String {
    let mut out = String::from("# z_bincenter n_transient\n");
    for (z, n) in dist.centers.iter().zip(&dist.counts) {
        let _ = writeln!(out, "{z:>5.3}   {n:>9.2e}");
    }
    out
}

pub fn light_curve_table(curve: &LightCurve) -> String {
    let mut out = format!("# time    {}\n", curve.band);
    for (t, m) in curve.phases.iter().zip(&curve.magnitudes) {
        let _ = writeln!(out, "{t:>8.3}   {m:>7.2}");
    }
    out
}

/// Limiting magnitudes from `from` to `to` inclusive in steps of `step`.
pub fn magnitude_steps(from: f64, to: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || to < from {
        return vec![from];
    }
    let n = ((to - from) / step + 1e-9).floor() as usize;
    (0..=n).map(|i| from + step * i as f64).collect()
}
