//! Report describing the outcome of an outlier filtering session.

use serde::{Deserialize, Serialize};

/// Result of outlier rejection with statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Number of measurements before filtering.
    pub n_before: usize,
    /// Number of measurements retained.
    pub n_after: usize,
    /// Number of measurements rejected.
    pub n_removed: usize,
    /// Indices (into the original sample) of rejected measurements.
    pub removed_indices: Vec<usize>,
    /// Rejected measurements, in original order.
    pub removed_values: Vec<f64>,
    /// Mean of the original sample.
    pub mean: f64,
    /// Standard deviation of the original sample.
    pub std_dev: f64,
    /// Assumed outlier count (k) of the final round.
    pub assumed_outliers: usize,
    /// Squared threshold x² of the final round.
    pub x2: f64,
    /// Maximum allowed absolute deviation, sqrt(x²) * std_dev.
    pub max_deviation: f64,
    /// Number of threshold rounds evaluated.
    pub rounds: usize,
    /// Whether escalation stopped at the k guard rather than by self-consistency.
    pub stopped_by_guard: bool,
}

impl OutlierReport {
    /// Report for a sample that was returned untouched.
    pub fn unfiltered(n: usize, mean: f64, std_dev: f64) -> Self {
        Self {
            n_before: n,
            n_after: n,
            n_removed: 0,
            removed_indices: vec![],
            removed_values: vec![],
            mean,
            std_dev,
            assumed_outliers: 0,
            x2: 0.0,
            max_deviation: f64::INFINITY,
            rounds: 0,
            stopped_by_guard: false,
        }
    }

    /// Fraction of measurements rejected (0.0 to 1.0).
    pub fn removed_fraction(&self) -> f64 {
        if self.n_before == 0 {
            0.0
        } else {
            self.n_removed as f64 / self.n_before as f64
        }
    }

    /// Ratio R = sqrt(x²) of the final round.
    pub fn ratio(&self) -> f64 {
        self.x2.sqrt()
    }
}

impl std::fmt::Display for OutlierReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Peirce Outlier Report")?;
        writeln!(f, "  Measurements before: {}", self.n_before)?;
        writeln!(f, "  Measurements after:  {}", self.n_after)?;
        writeln!(f, "  Rejected:            {}", self.n_removed)?;
        if !self.removed_values.is_empty() {
            writeln!(f, "  Rejected values: {:?}", self.removed_values)?;
        }
        writeln!(f, "  Mean:    {:.6}", self.mean)?;
        writeln!(f, "  Std Dev: {:.6}", self.std_dev)?;
        writeln!(f, "  Assumed outliers (k): {}", self.assumed_outliers)?;
        writeln!(f, "  R: {:.4} (x² = {:.4})", self.ratio(), self.x2)?;
        writeln!(f, "  Max deviation: {:.6}", self.max_deviation)?;
        writeln!(f, "  Rounds: {}", self.rounds)?;
        if self.stopped_by_guard {
            writeln!(f, "  Stopped early: assumed outlier count reached its limit")?;
        }
        Ok(())
    }
}
