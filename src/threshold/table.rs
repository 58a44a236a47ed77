//! Tabulation of Peirce's ratio R over grids of N and k.

use super::solver::ThresholdSolver;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One entry of a Peirce table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRow {
    /// Number of observations.
    pub n: usize,
    /// Number of doubtful observations.
    pub k: usize,
    /// Number of model unknowns.
    pub m: f64,
    /// Maximum deviation ratio R.
    pub ratio: f64,
    /// Squared ratio x² = R².
    pub x2: f64,
}

impl std::fmt::Display for ThresholdRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "N={}, k={}, m={}, R={:.4} (R²={:.4})",
            self.n, self.k, self.m, self.ratio, self.x2
        )
    }
}

/// Build a table of thresholds for every `(n, k)` pair with `k < n`.
///
/// Rows are ordered by `n`, then `k`, following the input order. Pairs with
/// `k >= n` have no defined threshold and are skipped.
pub fn threshold_table(ns: &[usize], ks: &[usize], m: f64) -> Result<Vec<ThresholdRow>> {
    threshold_table_with_solver(&ThresholdSolver::default(), ns, ks, m)
}

/// Build a threshold table with a specific solver.
pub fn threshold_table_with_solver(
    solver: &ThresholdSolver,
    ns: &[usize],
    ks: &[usize],
    m: f64,
) -> Result<Vec<ThresholdRow>> {
    let mut rows = Vec::with_capacity(ns.len() * ks.len());
    for &n in ns {
        for &k in ks.iter().filter(|&&k| k < n) {
            let solution = solver.solve_detailed(n as f64, k as f64, m)?;
            rows.push(ThresholdRow {
                n,
                k,
                m,
                ratio: solution.ratio,
                x2: solution.x2,
            });
        }
    }
    Ok(rows)
}
