//! Property layer errors.

use tc_core::{ChemicalId, CoreError, MethodId};
use tc_correlations::{Axis, CorrelationError, EquationKind, Operation};
use thiserror::Error;

use crate::kind::PropertyKind;
use crate::sweeps::SweepError;

/// Result type for property operations.
pub type PropertyResult<T> = Result<T, PropertyError>;

/// A coefficient record rejected at load time.
///
/// Fatal for that record only; the rest of the database still loads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid {field}: {source}")]
    InvalidIdentifier {
        field: &'static str,
        source: CoreError,
    },

    #[error("{compound} {property} [{method}]: {source}")]
    Correlation {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
        source: CorrelationError,
    },

    #[error("{compound} [{method}]: unknown property '{property}'")]
    UnknownProperty {
        compound: ChemicalId,
        method: MethodId,
        property: String,
    },

    #[error("{compound} {property} [{method}]: unknown equation '{equation}'")]
    UnknownEquation {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
        equation: String,
    },

    #[error("{compound} {property} [{method}]: unknown extrapolation policy '{policy}'")]
    UnknownExtrapolation {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
        policy: String,
    },

    #[error("{compound} {property} [{method}]: equation {equation} is not admitted for {property}")]
    EquationNotAllowed {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
        equation: EquationKind,
    },

    #[error("{compound} {property} [{method}]: range is on {} but {property} is on {}", .found.symbol(), .expected.symbol())]
    AxisMismatch {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
        expected: Axis,
        found: Axis,
    },

    #[error("{compound} {property} [{method}]: valid_range is required for {equation}")]
    MissingRange {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
        equation: EquationKind,
    },

    #[error("{compound} {property}: method {method} declared more than once")]
    DuplicateMethod {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
    },

    #[error("{compound} {property}: no candidate correlations")]
    NoCandidates {
        compound: ChemicalId,
        property: PropertyKind,
    },

    #[error("Compound {compound} declared more than once")]
    DuplicateCompound { compound: ChemicalId },

    #[error("Compound {compound}: molar mass must be positive and finite, got {value}")]
    InvalidMolarMass { compound: ChemicalId, value: f64 },
}

/// Errors surfaced by property evaluation and registry queries.
///
/// Evaluation errors carry the compound, property, attempted method and
/// requested input so the caller can diagnose without re-running.
#[derive(Error, Debug)]
pub enum PropertyError {
    #[error("Unknown compound: {compound}")]
    UnknownCompound { compound: ChemicalId },

    #[error("No {property} correlations for {compound}")]
    UnknownProperty {
        compound: ChemicalId,
        property: PropertyKind,
    },

    #[error("{compound} {property}: unknown method '{method}'")]
    UnknownMethod {
        compound: ChemicalId,
        property: PropertyKind,
        method: String,
    },

    #[error("{compound} {property}: no method valid at x = {x} and extrapolation is disabled")]
    NoApplicableMethod {
        compound: ChemicalId,
        property: PropertyKind,
        x: f64,
    },

    #[error("{compound} {property} [{method}]: x = {x} outside valid range [{min}, {max}]")]
    OutOfRange {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
        x: f64,
        min: f64,
        max: f64,
    },

    #[error("{compound} {property} [{method}]: {equation} has no closed-form {operation}")]
    Unsupported {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
        equation: &'static str,
        operation: Operation,
    },

    #[error("{compound} {property} [{method}]: {equation} {operation} is not finite at x = {x}")]
    NonFinite {
        compound: ChemicalId,
        property: PropertyKind,
        method: MethodId,
        equation: &'static str,
        operation: Operation,
        x: f64,
    },

    #[error("{property} needs a {} input", .axis.symbol())]
    MissingCondition { property: PropertyKind, axis: Axis },

    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error(transparent)]
    Sweep(#[from] SweepError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PropertyError {
    /// Attach property context to a correlation-level failure.
    pub(crate) fn from_correlation(
        err: CorrelationError,
        compound: &ChemicalId,
        property: PropertyKind,
        method: &MethodId,
    ) -> Self {
        match err {
            CorrelationError::OutOfRange { x, min, max } => PropertyError::OutOfRange {
                compound: compound.clone(),
                property,
                method: method.clone(),
                x,
                min,
                max,
            },
            CorrelationError::Unsupported {
                equation,
                operation,
            } => PropertyError::Unsupported {
                compound: compound.clone(),
                property,
                method: method.clone(),
                equation,
                operation,
            },
            CorrelationError::NonFinite {
                equation,
                operation,
                x,
            } => PropertyError::NonFinite {
                compound: compound.clone(),
                property,
                method: method.clone(),
                equation,
                operation,
                x,
            },
            other => PropertyError::InvalidInput {
                what: format!("{compound} {property} [{method}]: {other}"),
            },
        }
    }
}
