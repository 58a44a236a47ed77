//! Outlier rejection by Peirce's criterion.
//!
//! The mean and standard deviation of the original sample are computed once
//! and held fixed for the whole session. Each round assumes `k` doubtful
//! observations, derives the maximum allowed deviation `sqrt(x²(N, k, m)) * σ`
//! and partitions the original sample against it. While a round rejects more
//! observations than it assumed, the next round assumes one more than it
//! rejected.

use crate::config::PeirceConfig;
use crate::data::{OutlierReport, Sample};
use crate::error::Result;
use crate::profile::{summarize_sample, StatsSummary};
use crate::threshold::ThresholdSolver;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How rounds of rejection are run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionMode {
    /// Escalate the assumed outlier count until it is self-consistent.
    #[default]
    Iterative,
    /// A single round assuming one outlier.
    SinglePass,
}

/// One partition of the sample against a threshold.
#[derive(Debug, Clone)]
struct Round {
    k: usize,
    x2: f64,
    max_deviation: f64,
    kept: Vec<usize>,
}

impl Round {
    fn run(
        solver: &ThresholdSolver,
        sample: &Sample<'_>,
        summary: &StatsSummary,
        k: usize,
        m: f64,
    ) -> Result<Self> {
        let x2 = solver.solve(sample.len() as f64, k as f64, m)?;
        let max_deviation = x2.sqrt() * summary.std_dev;
        let kept = sample.indices_within(summary.mean, max_deviation);
        debug!(k, x2, removed = sample.len() - kept.len(), "Peirce rejection round");
        Ok(Self {
            k,
            x2,
            max_deviation,
            kept,
        })
    }

    fn removed(&self, n: usize) -> usize {
        n - self.kept.len()
    }
}

/// Peirce outlier filter over one configuration.
#[derive(Debug, Clone, Default)]
pub struct OutlierFilter {
    config: PeirceConfig,
}

impl OutlierFilter {
    /// Filter with default options (m = 1, iterative).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter with explicit options.
    pub fn with_config(config: PeirceConfig) -> Self {
        Self { config }
    }

    /// The options in use.
    pub fn config(&self) -> &PeirceConfig {
        &self.config
    }

    /// Retained measurements, in original order.
    pub fn filter(&self, values: &[f64]) -> Result<Vec<f64>> {
        self.filter_with_stats(values).map(|(kept, _)| kept)
    }

    /// Retained measurements together with a report of what was rejected.
    pub fn filter_with_stats(&self, values: &[f64]) -> Result<(Vec<f64>, OutlierReport)> {
        self.config.validate()?;
        let sample = Sample::new(values)?;
        let n = sample.len();

        // No threshold is defined below two observations.
        if n < 2 {
            let mean = values.first().copied().unwrap_or(0.0);
            return Ok((values.to_vec(), OutlierReport::unfiltered(n, mean, 0.0)));
        }

        let summary = summarize_sample(&sample)?;
        if summary.is_constant() {
            return Ok((values.to_vec(), OutlierReport::unfiltered(n, summary.mean, 0.0)));
        }

        let solver = self.config.solver();
        let m = self.config.unknowns;

        // A domain error here means the configuration does not fit the sample.
        let mut current = Round::run(&solver, &sample, &summary, 1, m)?;
        let mut rounds = 1;
        let mut stopped_by_guard = false;

        if self.config.mode == RejectionMode::Iterative {
            while current.removed(n) > current.k {
                let next_k = current.removed(n) + 1;
                if next_k + 1 >= n {
                    debug!(next_k, n, "Peirce escalation stopped: k would reach N - 1");
                    stopped_by_guard = true;
                    break;
                }
                match Round::run(&solver, &sample, &summary, next_k, m) {
                    Ok(round) => {
                        current = round;
                        rounds += 1;
                    }
                    Err(e) if e.is_domain() => {
                        debug!(next_k, n, error = %e, "Peirce escalation stopped on domain error");
                        stopped_by_guard = true;
                        break;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        let retained = sample.subset(&current.kept);

        let mut is_kept = vec![false; n];
        for &i in &current.kept {
            is_kept[i] = true;
        }
        let removed_indices: Vec<usize> = (0..n).filter(|&i| !is_kept[i]).collect();
        let removed_values = sample.subset(&removed_indices);

        let report = OutlierReport {
            n_before: n,
            n_after: retained.len(),
            n_removed: removed_indices.len(),
            removed_indices,
            removed_values,
            mean: summary.mean,
            std_dev: summary.std_dev,
            assumed_outliers: current.k,
            x2: current.x2,
            max_deviation: current.max_deviation,
            rounds,
            stopped_by_guard,
        };

        Ok((retained, report))
    }
}

/// Remove outliers with default options (m = 1, iterative).
///
/// # Example
///
/// ```
/// use peirce_criterion::filter::remove_outliers;
///
/// let kept = remove_outliers(&[1.0, 2.0, 3.0, 100.0]).unwrap();
/// assert_eq!(kept, vec![1.0, 2.0, 3.0]);
/// ```
pub fn remove_outliers(values: &[f64]) -> Result<Vec<f64>> {
    OutlierFilter::new().filter(values)
}

/// Remove outliers with explicit options.
pub fn remove_outliers_with_config(values: &[f64], config: &PeirceConfig) -> Result<Vec<f64>> {
    OutlierFilter::with_config(config.clone()).filter(values)
}

/// Remove outliers and report what was rejected.
pub fn remove_outliers_with_stats(
    values: &[f64],
    config: &PeirceConfig,
) -> Result<(Vec<f64>, OutlierReport)> {
    OutlierFilter::with_config(config.clone()).filter_with_stats(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PeirceError;

    #[test]
    fn test_single_outlier() {
        let kept = remove_outliers(&[1.0, 2.0, 3.0, 100.0]).unwrap();
        assert_eq!(kept, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_escalates_to_two_outliers() {
        let mut values = vec![100.0, 100.0];
        values.extend(std::iter::repeat(0.0).take(20));

        let (kept, report) = remove_outliers_with_stats(&values, &PeirceConfig::default()).unwrap();

        assert_eq!(kept, vec![0.0; 20]);
        assert_eq!(report.removed_indices, vec![0, 1]);
        assert_eq!(report.removed_values, vec![100.0, 100.0]);
        // k = 1 rejects both, so a second round assumes k = 3
        assert_eq!(report.rounds, 2);
        assert_eq!(report.assumed_outliers, 3);
        assert!(!report.stopped_by_guard);
    }

    #[test]
    fn test_symmetric_split_unchanged() {
        let values = [-1.0, -1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        assert_eq!(remove_outliers(&values).unwrap(), values.to_vec());
    }

    #[test]
    fn test_single_pass_keeps_first_round() {
        let mut values = vec![100.0, 100.0];
        values.extend(std::iter::repeat(0.0).take(20));
        let config = PeirceConfig::default().mode(RejectionMode::SinglePass);

        let (kept, report) = remove_outliers_with_stats(&values, &config).unwrap();

        assert_eq!(kept.len(), 20);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.assumed_outliers, 1);
    }

    #[test]
    fn test_small_samples_unchanged() {
        assert!(remove_outliers(&[]).unwrap().is_empty());
        assert_eq!(remove_outliers(&[5.0]).unwrap(), vec![5.0]);

        // Both points sit sd/√2 from the mean, inside R = 1
        assert_eq!(remove_outliers(&[0.0, 10.0]).unwrap(), vec![0.0, 10.0]);
    }

    #[test]
    fn test_constant_sample_unchanged() {
        let (kept, report) =
            remove_outliers_with_stats(&[3.0, 3.0, 3.0], &PeirceConfig::default()).unwrap();
        assert_eq!(kept, vec![3.0, 3.0, 3.0]);
        assert_eq!(report.n_removed, 0);
        assert_eq!(report.rounds, 0);
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let err = remove_outliers(&[1.0, 2.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(err, PeirceError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_config() {
        let config = PeirceConfig::default().unknowns(0.0);
        assert!(remove_outliers_with_config(&[1.0, 2.0, 3.0], &config)
            .unwrap_err()
            .is_domain());
    }

    #[test]
    fn test_iteration_cap_propagates() {
        let config = PeirceConfig::default().max_iter(2);
        let err = remove_outliers_with_config(&[1.0, 2.0, 3.0, 100.0], &config).unwrap_err();
        assert!(err.is_convergence());
    }

    #[test]
    fn test_guard_stops_before_k_reaches_n_minus_one() {
        // k = 1 rejects 0.0 and 20.0, so the next round would assume k = 3 = N - 1
        let config = PeirceConfig::default().unknowns(2.0);
        let (kept, report) = remove_outliers_with_stats(&[10.0, 10.0, 0.0, 20.0], &config).unwrap();

        assert_eq!(kept, vec![10.0, 10.0]);
        assert!(report.stopped_by_guard);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.assumed_outliers, 1);
        assert_eq!(report.removed_indices, vec![2, 3]);
    }

    #[test]
    fn test_domain_error_stops_escalation() {
        // With m = 4 the round at k = 3 has k + m > N
        let config = PeirceConfig::default().unknowns(4.0);
        let (kept, report) =
            remove_outliers_with_stats(&[-10.0, 0.0, 0.0, 20.0, 0.0], &config).unwrap();

        assert_eq!(kept, vec![0.0, 0.0, 0.0]);
        assert!(report.stopped_by_guard);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.x2, 1.0);
    }

    #[test]
    fn test_too_many_unknowns_for_first_round() {
        let config = PeirceConfig::default().unknowns(7.0);
        let err = remove_outliers_with_config(&[4.0, 1.0, 3.0, 2.0, 0.0, 0.0, 1.0], &config)
            .unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_report_threshold_matches_solver() {
        let (_, report) =
            remove_outliers_with_stats(&[1.0, 2.0, 3.0, 100.0], &PeirceConfig::default()).unwrap();
        let x2 = ThresholdSolver::new().solve(4.0, 1.0, 1.0).unwrap();

        assert_eq!(report.x2, x2);
        assert_eq!(report.assumed_outliers, 1);
        assert!((report.max_deviation - x2.sqrt() * report.std_dev).abs() < 1e-12);
        assert_eq!(report.removed_indices, vec![3]);
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let values = vec![10.0, 9.9, 10.1, 55.0, 10.05];
        let before = values.clone();
        let filter = OutlierFilter::new();
        let _ = filter.filter(&values).unwrap();
        assert_eq!(values, before);
        assert_eq!(filter.config(), &PeirceConfig::default());
    }
}
