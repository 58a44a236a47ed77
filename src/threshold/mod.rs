//! Peirce's criterion threshold computation.

mod solver;
mod table;

pub use solver::{
    compute_ratio, compute_threshold, compute_threshold_default, ThresholdSolution,
    ThresholdSolver, DEFAULT_MAX_ITER, DEFAULT_OUTLIERS, DEFAULT_UNKNOWNS, EPSILON,
    ZERO_DIVISOR_FLOOR,
};
pub use table::{threshold_table, threshold_table_with_solver, ThresholdRow};
