//! Gould's fixed-point solver for Peirce's criterion.
//!
//! For a sample of `N` observations, an assumed number `k` of doubtful
//! observations and `m` fitted model unknowns, Peirce's criterion gives the
//! squared ratio x² = (max deviation / standard deviation)². Gould's
//! reformulation turns Peirce's transcendental system into a fixed-point
//! iteration on R:
//!
//! ```text
//! Q  = (k^(k/N) * (N-k)^((N-k)/N)) / N
//! λ  = (Q^N / R^k)^(1/(N-k))
//! x² = 1 + ((N-m-k)/k) * (1 - λ²)
//! R  = exp((x²-1)/2) * erfc(sqrt(x²)/√2)
//! ```
//!
//! iterated from R = 1 until successive R values agree to within `N * ε`.

use crate::error::{ensure_finite, PeirceError, Result};
use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;
use tracing::{debug, warn};

/// Default assumed outlier count (k).
pub const DEFAULT_OUTLIERS: f64 = 1.0;

/// Default number of fitted model unknowns (m).
pub const DEFAULT_UNKNOWNS: f64 = 1.0;

/// Default cap on fixed-point iterations.
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Per-observation convergence tolerance; the loop tolerance is `N * EPSILON`.
pub const EPSILON: f64 = 2e-16;

/// Replacement for R^k when it underflows to exactly zero.
pub const ZERO_DIVISOR_FLOOR: f64 = 1e-6;

/// Converged solution of the threshold iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSolution {
    /// Squared threshold deviation ratio x².
    pub x2: f64,
    /// Threshold deviation ratio R = sqrt(x²).
    pub ratio: f64,
    /// Fixed-point iterations performed.
    pub iterations: usize,
}

impl ThresholdSolution {
    fn trivial() -> Self {
        Self {
            x2: 0.0,
            ratio: 0.0,
            iterations: 0,
        }
    }
}

/// Fixed-point solver for the Peirce threshold x²(N, k, m).
///
/// The solver is a plain value: it holds only the iteration cap, and every
/// call to [`ThresholdSolver::solve`] is independent and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdSolver {
    max_iter: usize,
}

impl Default for ThresholdSolver {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

impl ThresholdSolver {
    /// Create a solver with the default iteration cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// The iteration cap.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Squared threshold x² for `n` observations, `k` doubtful observations
    /// and `m` model unknowns.
    ///
    /// Returns exactly `0.0` when `n < 2`. Fails with `InvalidArgument` on
    /// non-finite input, with `Domain` unless `1 <= k < n`, `m >= 1` and
    /// `n - m - k >= 0`, and with `Convergence` when the iteration cap is hit
    /// or the iteration diverges.
    pub fn solve(&self, n: f64, k: f64, m: f64) -> Result<f64> {
        self.solve_detailed(n, k, m).map(|s| s.x2)
    }

    /// Like [`ThresholdSolver::solve`], also reporting R and the iteration count.
    pub fn solve_detailed(&self, n: f64, k: f64, m: f64) -> Result<ThresholdSolution> {
        let n = ensure_finite("N", n)?;
        let k = ensure_finite("k", k)?;
        let m = ensure_finite("m", m)?;

        if n < 2.0 {
            return Ok(ThresholdSolution::trivial());
        }
        check_domain(n, k, m)?;

        // Nth root of Gould's equation B
        let q = k.powf(k / n) * (n - k).powf((n - k) / n) / n;
        let q_n = q.powf(n);
        let slope = (n - m - k) / k;
        let tolerance = n * EPSILON;

        let mut r_old = 0.0_f64;
        let mut r_new = 1.0_f64;
        let mut iterations = 0;

        loop {
            if iterations == self.max_iter {
                warn!(n, k, m, iterations, "Peirce threshold hit iteration cap");
                return Err(PeirceError::Convergence {
                    iterations,
                    reason: format!(
                        "|ΔR| = {:e} still above tolerance {:e} for N={}, k={}, m={}",
                        (r_new - r_old).abs(),
                        tolerance,
                        n,
                        k,
                        m
                    ),
                });
            }
            iterations += 1;

            let mut ldiv = r_new.powf(k);
            if ldiv == 0.0 {
                ldiv = ZERO_DIVISOR_FLOOR;
            }
            let lambda = (q_n / ldiv).powf(1.0 / (n - k));

            // Gould's equation C; with no free observations x² is 1 even once λ² overflows.
            let mut x2 = if slope == 0.0 {
                1.0
            } else {
                1.0 + slope * (1.0 - lambda * lambda)
            };
            if x2 < 0.0 {
                // R is left in place, so the next check sees ΔR = 0 and stops at x² = 0.
                x2 = 0.0;
                r_old = r_new;
            } else {
                // Gould's equation D
                r_old = r_new;
                r_new = ((x2 - 1.0) / 2.0).exp() * erfc(x2.sqrt() / SQRT_2);
            }

            if !x2.is_finite() || !r_new.is_finite() {
                warn!(n, k, m, iterations, "Peirce threshold iteration diverged");
                return Err(PeirceError::Convergence {
                    iterations,
                    reason: format!(
                        "iteration diverged (x² = {}, R = {}) for N={}, k={}, m={}",
                        x2, r_new, n, k, m
                    ),
                });
            }

            if (r_new - r_old).abs() <= tolerance {
                debug!(n, k, m, x2, iterations, "Peirce threshold converged");
                return Ok(ThresholdSolution {
                    x2,
                    ratio: x2.sqrt(),
                    iterations,
                });
            }
        }
    }
}

fn check_domain(n: f64, k: f64, m: f64) -> Result<()> {
    if k < 1.0 {
        return Err(PeirceError::Domain(format!(
            "Assumed outlier count k must be at least 1, got {}",
            k
        )));
    }
    if k >= n {
        return Err(PeirceError::Domain(format!(
            "Assumed outlier count k must be less than N (k={}, N={})",
            k, n
        )));
    }
    if m < 1.0 {
        return Err(PeirceError::Domain(format!(
            "Number of model unknowns m must be at least 1, got {}",
            m
        )));
    }
    if n - m - k < 0.0 {
        return Err(PeirceError::Domain(format!(
            "k + m must not exceed N (N={}, k={}, m={})",
            n, k, m
        )));
    }
    Ok(())
}

/// Squared threshold x²(N, k, m) using the default solver.
pub fn compute_threshold(n: f64, k: f64, m: f64) -> Result<f64> {
    ThresholdSolver::default().solve(n, k, m)
}

/// Squared threshold for one doubtful observation and one unknown.
pub fn compute_threshold_default(n: f64) -> Result<f64> {
    compute_threshold(n, DEFAULT_OUTLIERS, DEFAULT_UNKNOWNS)
}

/// Threshold ratio R = sqrt(x²), the value tabulated by Peirce.
pub fn compute_ratio(n: f64, k: f64, m: f64) -> Result<f64> {
    compute_threshold(n, k, m).map(f64::sqrt)
}
