use thiserror::Error;

/// Failure of a single arithmetic operation. Reported by workers as a failed task
/// result; never raised inside the scheduler.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operator")]
    InvalidOperator,
}
