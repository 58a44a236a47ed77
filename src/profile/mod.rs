//! Descriptive profiling of samples.

mod summary;

pub use summary::{summarize, summarize_sample, StatsSummary};
