//! Property sweeps over a range of the independent variable.
//!
//! Used to tabulate a property for plots and comparison tables. Points that
//! fail (outside every domain with extrapolation disabled, for instance) are
//! recorded rather than aborting the sweep.

use core::fmt;

use serde::{Deserialize, Serialize};
use tc_correlations::Evaluator;
use thiserror::Error;

use crate::property::PropertyModel;

/// Spacing of sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Uniform in ln(x); both ends must be positive
    Logarithmic,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid sweep: {0}")]
    InvalidConfiguration(String),

    #[error("Every point failed ({failed} points)")]
    AllFailed { failed: usize },
}

/// Points to evaluate, in SI units of the property's axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepDefinition {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    #[serde(default)]
    pub spacing: Spacing,
}

impl SweepDefinition {
    pub fn new(start: f64, end: f64, num_points: usize, spacing: Spacing) -> Result<Self, SweepError> {
        let sweep = Self {
            start,
            end,
            num_points,
            spacing,
        };
        sweep.validate()?;
        Ok(sweep)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SweepError::InvalidConfiguration("bounds must be finite".into()));
        }
        if self.num_points < 2 {
            return Err(SweepError::InvalidConfiguration(
                "sweep must have at least 2 points".into(),
            ));
        }
        if (self.start - self.end).abs() < 1e-12 {
            return Err(SweepError::InvalidConfiguration(
                "start and end values must be different".into(),
            ));
        }
        if self.spacing == Spacing::Logarithmic && (self.start <= 0.0 || self.end <= 0.0) {
            return Err(SweepError::InvalidConfiguration(
                "logarithmic sweep needs positive bounds".into(),
            ));
        }
        Ok(())
    }

    /// All points, first and last exactly `start` and `end`.
    pub fn points(&self) -> Vec<f64> {
        let n = self.num_points.max(2);
        let mut points: Vec<f64> = match self.spacing {
            Spacing::Linear => {
                let delta = (self.end - self.start) / (n - 1) as f64;
                (0..n).map(|i| self.start + i as f64 * delta).collect()
            }
            Spacing::Logarithmic => {
                let (lo, hi) = (self.start.ln(), self.end.ln());
                let delta = (hi - lo) / (n - 1) as f64;
                (0..n).map(|i| (lo + i as f64 * delta).exp()).collect()
            }
        };
        points[0] = self.start;
        points[n - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({} points, {:?})",
            self.start, self.end, self.num_points, self.spacing
        )
    }
}

/// Values produced by a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub points: Vec<f64>,
    /// `None` where evaluation failed.
    pub values: Vec<Option<f64>>,
    /// Index and message of every failed point.
    pub failures: Vec<(usize, String)>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    /// (x, y) pairs for the points that succeeded.
    pub fn successful(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .zip(&self.values)
            .filter_map(|(&x, y)| y.map(|y| (x, y)))
            .collect()
    }
}

/// Evaluate `model` across `sweep` using `evaluator` for in-domain points.
pub fn sweep_property(
    model: &PropertyModel,
    sweep: &SweepDefinition,
    evaluator: &dyn Evaluator,
) -> Result<SweepResult, SweepError> {
    sweep.validate()?;
    let points = sweep.points();
    let outcomes = model.values_at(&points, evaluator);

    let mut values = Vec::with_capacity(points.len());
    let mut failures = Vec::new();
    for (i, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(v) => values.push(Some(v)),
            Err(err) => {
                values.push(None);
                failures.push((i, err.to_string()));
            }
        }
    }

    let num_failed = failures.len();
    let num_successful = points.len() - num_failed;
    if num_successful == 0 {
        return Err(SweepError::AllFailed { failed: num_failed });
    }
    if num_failed > 0 {
        tracing::debug!(
            compound = %model.compound(),
            property = %model.kind(),
            num_failed,
            num_successful,
            "sweep finished with failed points"
        );
    }

    Ok(SweepResult {
        points,
        values,
        failures,
        num_successful,
        num_failed,
    })
}
