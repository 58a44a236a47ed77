//! Descriptive summary of a sample: count, sum, mean, variance, std dev.

use crate::data::Sample;
use crate::error::{PeirceError, Result};
use serde::{Deserialize, Serialize};

/// Single-variable summary statistics of a sample.
///
/// Variance uses Bessel's correction (divisor `n - 1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Number of measurements.
    pub n: usize,
    /// Sum of measurements.
    pub sum: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample variance (Bessel-corrected).
    pub variance: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
}

impl StatsSummary {
    /// Absolute deviation of `x` from the mean.
    pub fn deviation(&self, x: f64) -> f64 {
        (x - self.mean).abs()
    }

    /// Check if every measurement is identical (zero spread).
    pub fn is_constant(&self) -> bool {
        self.std_dev == 0.0
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sample Summary")?;
        writeln!(f, "  N:        {}", self.n)?;
        writeln!(f, "  Sum:      {:.6}", self.sum)?;
        writeln!(f, "  Mean:     {:.6}", self.mean)?;
        writeln!(f, "  Variance: {:.6}", self.variance)?;
        writeln!(f, "  Std Dev:  {:.6}", self.std_dev)?;
        Ok(())
    }
}

/// Summarize a slice of measurements.
///
/// Fails with `InvalidArgument` on NaN or infinite values and with `Domain`
/// when fewer than two measurements are given, since the sample variance is
/// undefined there.
pub fn summarize(values: &[f64]) -> Result<StatsSummary> {
    summarize_sample(&Sample::new(values)?)
}

/// Summarize an already validated sample.
pub fn summarize_sample(sample: &Sample<'_>) -> Result<StatsSummary> {
    let n = sample.len();
    if n < 2 {
        return Err(PeirceError::Domain(format!(
            "Sample variance needs at least 2 measurements, got {}",
            n
        )));
    }

    let values = sample.values();
    let sum: f64 = values.iter().sum();
    let mean = sum / n as f64;

    let variance = values
        .iter()
        .map(|&x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1) as f64;

    Ok(StatsSummary {
        n,
        sum,
        mean,
        variance,
        std_dev: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_basic() {
        let s = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();

        assert_eq!(s.n, 4);
        assert_eq!(s.sum, 10.0);
        assert_eq!(s.mean, 2.5);
        // sum of squares = 2.25 + 0.25 + 0.25 + 2.25 = 5, / 3
        assert!((s.variance - 5.0 / 3.0).abs() < 1e-12);
        assert!((s.std_dev - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_too_small() {
        assert!(summarize(&[]).unwrap_err().is_domain());
        assert!(summarize(&[42.0]).unwrap_err().is_domain());
    }

    #[test]
    fn test_summarize_rejects_nan() {
        let err = summarize(&[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, PeirceError::InvalidArgument(_)));
    }

    #[test]
    fn test_constant_sample() {
        let s = summarize(&[7.0, 7.0, 7.0]).unwrap();
        assert!(s.is_constant());
        assert_eq!(s.deviation(9.0), 2.0);
    }

    #[test]
    fn test_display() {
        let s = summarize(&[1.0, 3.0]).unwrap();
        let text = s.to_string();
        assert!(text.contains("N:        2"));
        assert!(text.contains("Mean:     2.000000"));
    }
}
