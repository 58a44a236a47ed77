//! Peirce's Criterion for Outlier Rejection
//!
//! This library identifies and rejects outliers from a sample of
//! measurements using Peirce's criterion, which derives the rejection cutoff
//! from the sample size alone instead of a user-chosen threshold.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Validated samples and filtering reports
//! - **profile**: Descriptive statistics (mean, Bessel-corrected variance)
//! - **threshold**: Gould's fixed-point solver for the squared threshold x²
//! - **filter**: Iterative Peirce rejection over a sample
//! - **config**: Serializable filtering options
//!
//! # Example
//!
//! ```
//! use peirce_criterion::prelude::*;
//!
//! // Squared threshold for 10 observations, 1 doubtful, 1 unknown
//! let x2 = compute_threshold(10.0, 1.0, 1.0).unwrap();
//! assert!((x2 - 3.525).abs() < 1e-3);
//!
//! // Reject outliers with the default options
//! let kept = remove_outliers(&[1.0, 2.0, 3.0, 100.0]).unwrap();
//! assert_eq!(kept, vec![1.0, 2.0, 3.0]);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod profile;
pub mod threshold;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::PeirceConfig;
    pub use crate::data::{OutlierReport, Sample};
    pub use crate::error::{PeirceError, Result};
    pub use crate::filter::{
        remove_outliers, remove_outliers_with_config, remove_outliers_with_stats, OutlierFilter,
        RejectionMode,
    };
    pub use crate::profile::{summarize, StatsSummary};
    pub use crate::threshold::{
        compute_ratio, compute_threshold, compute_threshold_default, threshold_table,
        ThresholdRow, ThresholdSolution, ThresholdSolver, DEFAULT_MAX_ITER, DEFAULT_OUTLIERS,
        DEFAULT_UNKNOWNS,
    };
}
