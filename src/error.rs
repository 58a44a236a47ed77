//! Error types for the peirce-criterion library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum PeirceError {
    /// An input is not a usable number (NaN or infinite).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Inputs are numbers but fall outside the domain of the formula.
    #[error("Domain error: {0}")]
    Domain(String),

    #[error("No convergence after {iterations} iterations: {reason}")]
    Convergence { iterations: usize, reason: String },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PeirceError {
    /// Whether this is a domain error.
    pub fn is_domain(&self) -> bool {
        matches!(self, PeirceError::Domain(_))
    }

    /// Whether this is a convergence error.
    pub fn is_convergence(&self) -> bool {
        matches!(self, PeirceError::Convergence { .. })
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, PeirceError>;

/// Reject NaN and infinite values for a named argument.
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PeirceError::InvalidArgument(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}
