//! Behavior of a correlation outside its validity domain.
//!
//! The policy is applied by the caller that owns the model (the property
//! layer), so one model can be reused under different policies.

use serde::{Deserialize, Serialize};

use crate::error::{CorrelationError, CorrelationResult, Operation};
use crate::model::CorrelationModel;

/// What to do when `x` lies outside `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrapolationPolicy {
    /// Fail with `OutOfRange`.
    #[default]
    None,
    /// Return the value at the nearest boundary (flat output).
    Constant,
    /// Extend along the tangent at the nearest boundary.
    Linear,
    /// Clamp the input to the nearest boundary, then evaluate.
    Nearest,
}

/// Value produced under a policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrapolated {
    pub value: f64,
    /// Point the model was actually evaluated at.
    pub evaluated_at: f64,
    /// True if `x` was outside the domain.
    pub extrapolated: bool,
}

impl ExtrapolationPolicy {
    pub const ALL: [ExtrapolationPolicy; 4] = [
        ExtrapolationPolicy::None,
        ExtrapolationPolicy::Constant,
        ExtrapolationPolicy::Linear,
        ExtrapolationPolicy::Nearest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExtrapolationPolicy::None => "none",
            ExtrapolationPolicy::Constant => "constant",
            ExtrapolationPolicy::Linear => "linear",
            ExtrapolationPolicy::Nearest => "nearest",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|policy| policy.name() == name)
    }

    pub fn allows_extrapolation(self) -> bool {
        self != ExtrapolationPolicy::None
    }

    /// Evaluate `model` at `x`, extrapolating per policy if needed.
    pub fn evaluate(self, model: &CorrelationModel, x: f64) -> CorrelationResult<Extrapolated> {
        let range = model.range();
        if range.contains(x) {
            return Ok(Extrapolated {
                value: model.evaluate(x),
                evaluated_at: x,
                extrapolated: false,
            });
        }

        let boundary = range.nearest_boundary(x);
        let value = match self {
            ExtrapolationPolicy::None => return Err(range.out_of_range(x)),
            ExtrapolationPolicy::Constant => model.evaluate(boundary),
            ExtrapolationPolicy::Linear => {
                let slope = boundary_slope(model, boundary)?;
                model.evaluate(boundary) + slope * (x - boundary)
            }
            ExtrapolationPolicy::Nearest => {
                return Ok(Extrapolated {
                    value: model.evaluate(range.clamp(x)),
                    evaluated_at: range.clamp(x),
                    extrapolated: true,
                });
            }
        };
        Ok(Extrapolated {
            value,
            evaluated_at: x,
            extrapolated: true,
        })
    }

    /// `order`-th derivative at `x` under this policy.
    pub fn derivative(self, model: &CorrelationModel, x: f64, order: u32) -> CorrelationResult<f64> {
        let range = model.range();
        if order == 0 {
            return self.evaluate(model, x).map(|e| e.value);
        }
        if range.contains(x) {
            return model.derivative(x, order);
        }

        let boundary = range.nearest_boundary(x);
        match self {
            ExtrapolationPolicy::None => Err(range.out_of_range(x)),
            ExtrapolationPolicy::Constant => Ok(0.0),
            ExtrapolationPolicy::Linear => {
                if order == 1 {
                    boundary_slope(model, boundary)
                } else {
                    Ok(0.0)
                }
            }
            ExtrapolationPolicy::Nearest => model.derivative(range.clamp(x), order),
        }
    }

    /// ∫ y dx from `x_low` to `x_high`, using the policy outside the domain.
    ///
    /// Inside the domain the model's closed form is used; the pieces below
    /// `min` and above `max` follow the policy's extension of the curve.
    pub fn integral(self, model: &CorrelationModel, x_low: f64, x_high: f64) -> CorrelationResult<f64> {
        if x_low > x_high {
            return self.integral(model, x_high, x_low).map(|v| -v);
        }
        let range = model.range();
        if range.covers(x_low, x_high) {
            return model.definite_integral(x_low, x_high);
        }
        if self == ExtrapolationPolicy::None {
            let offending = if range.contains(x_low) { x_high } else { x_low };
            return Err(range.out_of_range(offending));
        }

        let (min, max) = (range.min(), range.max());
        let mut total = 0.0;

        if x_low < min {
            let upper = x_high.min(min);
            total += self.extension_integral(model, min, x_low, upper)?;
        }

        let inner_low = x_low.max(min);
        let inner_high = x_high.min(max);
        if inner_low < inner_high {
            total += model.definite_integral(inner_low, inner_high)?;
        }

        if x_high > max {
            let lower = x_low.max(max);
            total += self.extension_integral(model, max, lower, x_high)?;
        }
        Ok(total)
    }

    /// Integral of the out-of-domain extension anchored at `boundary` over `[a, b]`.
    fn extension_integral(self, model: &CorrelationModel, boundary: f64, a: f64, b: f64) -> CorrelationResult<f64> {
        let y_b = model.evaluate(boundary);
        match self {
            ExtrapolationPolicy::Constant | ExtrapolationPolicy::Nearest => Ok(y_b * (b - a)),
            ExtrapolationPolicy::Linear => {
                let slope = boundary_slope(model, boundary)?;
                let (da, db) = (a - boundary, b - boundary);
                Ok(y_b * (b - a) + 0.5 * slope * (db * db - da * da))
            }
            ExtrapolationPolicy::None => Err(model.range().out_of_range(a)),
        }
    }
}

fn boundary_slope(model: &CorrelationModel, boundary: f64) -> CorrelationResult<f64> {
    model.derivative(boundary, 1).map_err(|err| match err {
        CorrelationError::Unsupported { equation, .. } => CorrelationError::Unsupported {
            equation,
            operation: Operation::LinearExtrapolation,
        },
        CorrelationError::NonFinite { equation, x, .. } => CorrelationError::NonFinite {
            equation,
            operation: Operation::LinearExtrapolation,
            x,
        },
        other => other,
    })
}
