use thiserror::Error;

use super::types::Phase;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("division by zero: {0} grand list sums to zero")]
    DivisionByZero(Phase),

    #[error("percent change undefined for property '{label}': pre-revaluation tax rounds to zero")]
    UndefinedPercentage { label: String },
}
