//! Projection error types.

use thiserror::Error;

/// Errors produced while validating projection inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// Target percentage outside `1..=100`.
    #[error("Target percentage must be between 1 and 100, got {0}")]
    InvalidTarget(u32),

    /// More leaves than classes held.
    #[error("Leaves taken ({leaves_taken}) cannot exceed total classes ({total_classes})")]
    LeavesExceedTotal { total_classes: u32, leaves_taken: u32 },

    /// Percentage outside the range accepted by a calculator mode.
    #[error("Percentage {0} is out of range")]
    InvalidPercentage(f64),

    /// A counter would not fit in 32 bits.
    #[error("Class count overflow")]
    Overflow,
}

/// Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;
