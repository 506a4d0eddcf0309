use thiserror::Error;

use crate::operations::{BinaryOperation, UnaryOperation};

/// Errors reported by the [`Calculator`](crate::Calculator).
///
/// Every failing call leaves the calculator exactly as it was before the call.
/// Division by zero and overflow are not errors; they produce IEEE-754
/// infinities or NaN.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CalculatorError {
    /// A digit outside `0..=9` was entered.
    #[error("invalid input: digit must be between 0 and 9, got {0}")]
    InvalidInput(u8),

    /// A unary function was applied outside its domain.
    #[error("calculation error: {operation} is undefined for {operand}")]
    UndefinedUnary {
        operation: UnaryOperation,
        operand: f64,
    },

    /// A binary function was applied outside its domain.
    #[error("calculation error: {operation} is undefined for {lhs} and {rhs}")]
    UndefinedBinary {
        operation: BinaryOperation,
        lhs: f64,
        rhs: f64,
    },
}

impl CalculatorError {
    /// `true` for the undefined-result errors, as opposed to rejected input.
    pub fn is_calculation_error(&self) -> bool {
        matches!(
            self,
            Self::UndefinedUnary { .. } | Self::UndefinedBinary { .. }
        )
    }
}
