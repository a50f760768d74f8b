//! Correlation model: one equation form, its coefficients and validity domain.

use crate::equation::{Equation, EquationKind};
use crate::error::CorrelationResult;
use crate::range::ValidRange;

/// An empirical correlation fit over a bounded domain.
///
/// Immutable once constructed. Evaluation is a pure function of the
/// coefficients and `x`; the validity range is carried for the caller
/// (see [`crate::ExtrapolationPolicy`]) and is *not* enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationModel {
    equation: Equation,
    range: ValidRange,
    source: Option<String>,
}

impl CorrelationModel {
    /// Validate and build a model.
    ///
    /// Fails if the equation is not well defined across `range`.
    pub fn new(equation: Equation, range: ValidRange) -> CorrelationResult<Self> {
        equation.check_domain(&range)?;
        Ok(Self {
            equation,
            range,
            source: None,
        })
    }

    /// Build from a raw coefficient list (loader path).
    pub fn from_coefficients(
        kind: EquationKind,
        coefficients: &[f64],
        range: ValidRange,
    ) -> CorrelationResult<Self> {
        Self::new(Equation::from_coefficients(kind, coefficients)?, range)
    }

    /// Attach a literature reference.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn equation(&self) -> &Equation {
        &self.equation
    }

    pub fn kind(&self) -> EquationKind {
        self.equation.kind()
    }

    pub fn range(&self) -> &ValidRange {
        &self.range
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.equation.evaluate(x)
    }

    pub fn derivative(&self, x: f64, order: u32) -> CorrelationResult<f64> {
        self.equation.derivative(x, order)
    }

    pub fn definite_integral(&self, x_low: f64, x_high: f64) -> CorrelationResult<f64> {
        self.equation.integral(x_low, x_high)
    }
}
