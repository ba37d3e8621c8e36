mod engine;
mod error;
mod solver;
mod types;

pub use engine::{allocate, allocate_properties, compare_shares};
pub use error::AllocationError;
pub use solver::solve_break_even_value;
pub use types::{Allocation, AllocationResult, Phase, Property, ShareComparison, ShareShift};
