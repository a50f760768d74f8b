//! Correlation evaluation errors.

use core::fmt;

use tc_core::CoreError;
use thiserror::Error;

/// Result type for correlation operations.
pub type CorrelationResult<T> = Result<T, CorrelationError>;

/// Operation requested from an equation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Derivative { order: u32 },
    Integral,
    /// Linear extrapolation needs a first derivative at the boundary.
    LinearExtrapolation,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Derivative { order } => write!(f, "derivative of order {order}"),
            Operation::Integral => f.write_str("definite integral"),
            Operation::LinearExtrapolation => f.write_str("linear extrapolation"),
        }
    }
}

/// Errors raised while constructing or evaluating a correlation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Malformed coefficients or validity range.
    #[error("Invalid {equation} correlation: {reason}")]
    Validation {
        equation: &'static str,
        reason: String,
    },

    /// Input outside the validity range with no extrapolation allowed.
    #[error("x = {x} outside valid range [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },

    /// Equation form has no closed form for the requested operation.
    #[error("{equation} has no closed-form {operation}")]
    Unsupported {
        equation: &'static str,
        operation: Operation,
    },

    /// Closed form evaluated to NaN or infinity (e.g. a slope at Tc).
    #[error("{equation} {operation} is not finite at x = {x}")]
    NonFinite {
        equation: &'static str,
        operation: Operation,
        x: f64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CorrelationError {
    pub(crate) fn validation(equation: &'static str, reason: impl Into<String>) -> Self {
        CorrelationError::Validation {
            equation,
            reason: reason.into(),
        }
    }
}
