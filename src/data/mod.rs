//! Data structures for samples and filtering results.

mod report;
mod sample;

pub use report::OutlierReport;
pub use sample::Sample;
