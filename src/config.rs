//! Configuration for outlier filtering sessions.

use crate::error::{ensure_finite, PeirceError, Result};
use crate::filter::RejectionMode;
use crate::threshold::{ThresholdSolver, DEFAULT_MAX_ITER, DEFAULT_UNKNOWNS};
use serde::{Deserialize, Serialize};

/// Options for Peirce outlier rejection.
///
/// Every field has a documented default, so a partial YAML or JSON document
/// only needs to name what it changes:
///
/// ```yaml
/// unknowns: 2.0
/// mode: SinglePass
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeirceConfig {
    /// Number of fitted model unknowns (m). Default: 1.
    pub unknowns: f64,
    /// Cap on fixed-point iterations per threshold. Default: 1000.
    pub max_iter: usize,
    /// How rounds of rejection are run. Default: iterative.
    pub mode: RejectionMode,
}

impl Default for PeirceConfig {
    fn default() -> Self {
        Self {
            unknowns: DEFAULT_UNKNOWNS,
            max_iter: DEFAULT_MAX_ITER,
            mode: RejectionMode::default(),
        }
    }
}

impl PeirceConfig {
    /// Set the number of model unknowns.
    pub fn unknowns(mut self, m: f64) -> Self {
        self.unknowns = m;
        self
    }

    /// Set the iteration cap.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the rejection mode.
    pub fn mode(mut self, mode: RejectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check the configuration before a filtering session.
    pub fn validate(&self) -> Result<()> {
        let m = ensure_finite("unknowns", self.unknowns)?;
        if m < 1.0 {
            return Err(PeirceError::Domain(format!(
                "Number of model unknowns must be at least 1, got {}",
                m
            )));
        }
        if self.max_iter == 0 {
            return Err(PeirceError::Domain(
                "max_iter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Solver configured with this iteration cap.
    pub fn solver(&self) -> ThresholdSolver {
        ThresholdSolver::new().with_max_iter(self.max_iter)
    }

    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(PeirceError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(PeirceError::from)
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(PeirceError::from)
    }

    /// Save to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(PeirceError::from)
    }
}
