//! Outlier filtering primitives.

pub mod peirce;

pub use peirce::{
    remove_outliers, remove_outliers_with_config, remove_outliers_with_stats, OutlierFilter,
    RejectionMode,
};
