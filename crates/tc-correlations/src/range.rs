//! Validity domain of a correlation.

use serde::{Deserialize, Serialize};

use crate::error::{CorrelationError, CorrelationResult};

/// Independent variable a correlation is fit against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Temperature [K]
    Temperature,
    /// Pressure [Pa]
    Pressure,
}

impl Axis {
    pub fn symbol(self) -> &'static str {
        match self {
            Axis::Temperature => "T",
            Axis::Pressure => "P",
        }
    }
}

/// Closed interval `[min, max]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    axis: Axis,
    min: f64,
    max: f64,
}

impl ValidRange {
    /// Finite, ordered range.
    pub fn new(axis: Axis, min: f64, max: f64) -> CorrelationResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(CorrelationError::validation(
                "range",
                format!("bounds must be finite, got [{min}, {max}]"),
            ));
        }
        Self::ordered(axis, min, max)
    }

    /// Range that covers the whole axis.
    pub fn unbounded(axis: Axis) -> Self {
        Self {
            axis,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Ordered range whose bounds may be infinite (never NaN).
    pub(crate) fn ordered(axis: Axis, min: f64, max: f64) -> CorrelationResult<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(CorrelationError::validation("range", "bounds must not be NaN"));
        }
        if min > max {
            return Err(CorrelationError::validation(
                "range",
                format!("min {min} exceeds max {max}"),
            ));
        }
        Ok(Self { axis, min, max })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_bounded(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// True if the whole interval between `a` and `b` lies inside.
    pub fn covers(&self, a: f64, b: f64) -> bool {
        self.contains(a) && self.contains(b)
    }

    /// Nearest boundary to an out-of-range `x` (`min` below, `max` above).
    pub fn nearest_boundary(&self, x: f64) -> f64 {
        if x < self.min { self.min } else { self.max }
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    pub(crate) fn out_of_range(&self, x: f64) -> CorrelationError {
        CorrelationError::OutOfRange {
            x,
            min: self.min,
            max: self.max,
        }
    }
}
