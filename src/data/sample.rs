//! Validated view over a sample of measurements.

use crate::error::{PeirceError, Result};

/// A borrowed, read-only sample of real-valued measurements.
///
/// Construction checks that every value is finite, so downstream code can
/// compute means and deviations without re-checking for NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<'a> {
    values: &'a [f64],
}

impl<'a> Sample<'a> {
    /// Wrap a slice, rejecting NaN and infinite values.
    pub fn new(values: &'a [f64]) -> Result<Self> {
        if let Some((idx, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(PeirceError::InvalidArgument(format!(
                "Sample value at index {} is not a finite number: {}",
                idx, value
            )));
        }
        Ok(Self { values })
    }

    /// The underlying measurements, in their original order.
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Indices whose absolute deviation from `center` is strictly below `max_deviation`.
    pub fn indices_within(&self, center: f64, max_deviation: f64) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &x)| (x - center).abs() < max_deviation)
            .map(|(i, _)| i)
            .collect()
    }

    /// Values at the given indices, in index order.
    pub fn subset(&self, indices: &[usize]) -> Vec<f64> {
        indices.iter().map(|&i| self.values[i]).collect()
    }
}
