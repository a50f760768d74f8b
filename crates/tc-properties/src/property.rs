//! One property of one compound: candidate correlations and method selection.
//!
//! Selection is deterministic:
//!
//! 1. A pinned method is used exclusively. Outside its domain its own
//!    extrapolation policy applies.
//! 2. Otherwise the first candidate (in priority order) whose range contains
//!    the input.
//! 3. Otherwise the highest-priority candidate, extrapolated under its policy.
//!    A `None` policy there means no method applies.
//!
//! Candidates are kept sorted by `(priority, method)`, so the order in which
//! records were stored never affects the result.

use std::collections::BTreeSet;

use tc_core::{ChemicalId, MethodId};
use tc_correlations::{CorrelationModel, Evaluator, ExtrapolationPolicy, ValidRange};
use tracing::{debug, trace};

use crate::error::{PropertyError, PropertyResult, ValidationError};
use crate::kind::PropertyKind;

/// A correlation offered for a property, with its ranking and policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    method: MethodId,
    priority: i32,
    model: CorrelationModel,
    policy: ExtrapolationPolicy,
}

impl Candidate {
    pub fn new(method: MethodId, priority: i32, model: CorrelationModel, policy: ExtrapolationPolicy) -> Self {
        Self {
            method,
            priority,
            model,
            policy,
        }
    }

    pub fn method(&self) -> &MethodId {
        &self.method
    }

    /// Lower is preferred.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn model(&self) -> &CorrelationModel {
        &self.model
    }

    pub fn policy(&self) -> ExtrapolationPolicy {
        self.policy
    }
}

/// Result of a single-point property evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    /// Method that produced the value.
    pub method: MethodId,
    /// Point the correlation was evaluated at (differs from the input under `Nearest`).
    pub evaluated_at: f64,
    pub extrapolated: bool,
}

/// Which candidate serves a request, and whether the request lies inside it.
#[derive(Debug, Clone, Copy)]
struct Selected {
    index: usize,
    in_domain: bool,
}

/// All candidate correlations for one (compound, property).
#[derive(Debug, Clone)]
pub struct PropertyModel {
    compound: ChemicalId,
    kind: PropertyKind,
    candidates: Vec<Candidate>,
    pinned: Option<usize>,
}

impl PropertyModel {
    /// Build from candidates in any order.
    ///
    /// Rejects an empty list, duplicate method ids and ranges on the wrong axis.
    pub fn new(compound: ChemicalId, kind: PropertyKind, mut candidates: Vec<Candidate>) -> Result<Self, ValidationError> {
        if candidates.is_empty() {
            return Err(ValidationError::NoCandidates {
                compound,
                property: kind,
            });
        }

        let mut seen = BTreeSet::new();
        for c in &candidates {
            if !seen.insert(c.method.clone()) {
                return Err(ValidationError::DuplicateMethod {
                    compound,
                    property: kind,
                    method: c.method.clone(),
                });
            }
            let found = c.model.range().axis();
            if found != kind.axis() {
                return Err(ValidationError::AxisMismatch {
                    compound,
                    property: kind,
                    method: c.method.clone(),
                    expected: kind.axis(),
                    found,
                });
            }
        }

        candidates.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.method.cmp(&b.method)));

        Ok(Self {
            compound,
            kind,
            candidates,
            pinned: None,
        })
    }

    pub fn compound(&self) -> &ChemicalId {
        &self.compound
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Candidates in selection order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Method ids in selection order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodId> + '_ {
        self.candidates.iter().map(|c| &c.method)
    }

    /// Methods whose validity range contains `x`, in selection order.
    pub fn methods_valid_at(&self, x: f64) -> Vec<&MethodId> {
        self.candidates
            .iter()
            .filter(|c| c.model.range().contains(x))
            .map(|c| &c.method)
            .collect()
    }

    /// Force `method` for every subsequent request.
    pub fn pin(&mut self, method: &str) -> PropertyResult<()> {
        let index = self
            .candidates
            .iter()
            .position(|c| c.method.as_str() == method.trim())
            .ok_or_else(|| PropertyError::UnknownMethod {
                compound: self.compound.clone(),
                property: self.kind,
                method: method.to_string(),
            })?;
        debug!(compound = %self.compound, property = %self.kind, method, "pinning method");
        self.pinned = Some(index);
        Ok(())
    }

    /// Return to automatic selection.
    pub fn unpin(&mut self) {
        self.pinned = None;
    }

    pub fn pinned(&self) -> Option<&MethodId> {
        self.pinned.map(|i| &self.candidates[i].method)
    }

    pub fn value_at(&self, x: f64) -> PropertyResult<f64> {
        self.evaluate(x).map(|e| e.value)
    }

    /// Evaluate at `x`, reporting which method was used.
    pub fn evaluate(&self, x: f64) -> PropertyResult<Evaluation> {
        self.check_input(x)?;
        let selected = self.select(x, |r| r.contains(x))?;
        self.evaluate_selected(selected, x)
    }

    /// `order`-th derivative with respect to the property's axis variable.
    pub fn derivative_at(&self, x: f64, order: u32) -> PropertyResult<f64> {
        self.check_input(x)?;
        let selected = self.select(x, |r| r.contains(x))?;
        let c = &self.candidates[selected.index];
        c.policy
            .derivative(&c.model, x, order)
            .map_err(|e| self.contextualize(e, c))
    }

    /// Definite integral over `[x_low, x_high]`.
    ///
    /// In automatic selection a candidate is only chosen in range if it covers
    /// the whole interval.
    pub fn integral_over(&self, x_low: f64, x_high: f64) -> PropertyResult<f64> {
        self.check_input(x_low)?;
        self.check_input(x_high)?;
        let selected = self.select(x_low, |r| r.covers(x_low, x_high))?;
        let c = &self.candidates[selected.index];
        c.policy
            .integral(&c.model, x_low, x_high)
            .map_err(|e| self.contextualize(e, c))
    }

    /// Evaluate many points, results in input order.
    ///
    /// Points inside a candidate's domain are batched per candidate and handed
    /// to `evaluator`; the rest go through the single-point path.
    pub fn values_at(&self, xs: &[f64], evaluator: &dyn Evaluator) -> Vec<PropertyResult<f64>> {
        let mut batches: Vec<Vec<usize>> = vec![Vec::new(); self.candidates.len()];
        let mut out: Vec<PropertyResult<f64>> = Vec::with_capacity(xs.len());

        for (i, &x) in xs.iter().enumerate() {
            let selected = self
                .check_input(x)
                .and_then(|_| self.select(x, |r| r.contains(x)));
            match selected {
                Ok(s) if s.in_domain => {
                    batches[s.index].push(i);
                    // Placeholder, filled from the batch below.
                    out.push(Ok(f64::NAN));
                }
                Ok(s) => out.push(self.evaluate_selected(s, x).map(|e| e.value)),
                Err(e) => out.push(Err(e)),
            }
        }

        for (index, members) in batches.iter().enumerate() {
            if members.is_empty() {
                continue;
            }
            let c = &self.candidates[index];
            let points: Vec<f64> = members.iter().map(|&i| xs[i]).collect();
            trace!(
                method = %c.method,
                points = points.len(),
                backend = evaluator.name(),
                "bulk evaluation"
            );
            let values = evaluator.evaluate_many(&c.model, &points);
            for (&i, value) in members.iter().zip(values) {
                out[i] = Ok(value);
            }
        }
        out
    }

    fn select(&self, x: f64, in_domain: impl Fn(&ValidRange) -> bool) -> PropertyResult<Selected> {
        if let Some(index) = self.pinned {
            return Ok(Selected {
                index,
                in_domain: in_domain(self.candidates[index].model.range()),
            });
        }

        if let Some(index) = self.candidates.iter().position(|c| in_domain(c.model.range())) {
            return Ok(Selected {
                index,
                in_domain: true,
            });
        }

        let first = &self.candidates[0];
        if !first.policy.allows_extrapolation() {
            return Err(PropertyError::NoApplicableMethod {
                compound: self.compound.clone(),
                property: self.kind,
                x,
            });
        }
        Ok(Selected {
            index: 0,
            in_domain: false,
        })
    }

    fn evaluate_selected(&self, selected: Selected, x: f64) -> PropertyResult<Evaluation> {
        let c = &self.candidates[selected.index];
        let result = c
            .policy
            .evaluate(&c.model, x)
            .map_err(|e| self.contextualize(e, c))?;
        if result.extrapolated {
            debug!(
                compound = %self.compound,
                property = %self.kind,
                method = %c.method,
                policy = ?c.policy,
                x,
                evaluated_at = result.evaluated_at,
                "extrapolating outside valid range"
            );
        }
        Ok(Evaluation {
            value: result.value,
            method: c.method.clone(),
            evaluated_at: result.evaluated_at,
            extrapolated: result.extrapolated,
        })
    }

    fn check_input(&self, x: f64) -> PropertyResult<()> {
        if x.is_finite() {
            Ok(())
        } else {
            Err(PropertyError::InvalidInput {
                what: format!("{} {}: non-finite {} = {x}", self.compound, self.kind, self.kind.axis().symbol()),
            })
        }
    }

    fn contextualize(&self, err: tc_correlations::CorrelationError, c: &Candidate) -> PropertyError {
        PropertyError::from_correlation(err, &self.compound, self.kind, &c.method)
    }
}
