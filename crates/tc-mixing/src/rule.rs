//! Mixing rules: how pure-component values combine into a mixture value.

use core::fmt;
use std::collections::BTreeMap;

use tc_properties::DEFAULT_COMPOSITION_TOLERANCE;

use crate::composition::validate_fractions;
use crate::error::{MixingError, MixingResult};

/// Combination function over `(fraction, value)` pairs.
///
/// Called only after the fractions have been validated.
pub type CombineFn = fn(&[(f64, f64)]) -> f64;

/// Σ xᵢ vᵢ
fn linear(pairs: &[(f64, f64)]) -> f64 {
    pairs.iter().map(|(x, v)| x * v).sum()
}

/// 1 / Σ (xᵢ / vᵢ), the Le Chatelier rule for flammability limits.
fn le_chatelier(pairs: &[(f64, f64)]) -> f64 {
    1.0 / pairs.iter().map(|(x, v)| x / v).sum::<f64>()
}

/// exp(Σ xᵢ ln vᵢ), used for liquid viscosity.
fn log_mole_fraction(pairs: &[(f64, f64)]) -> f64 {
    pairs.iter().map(|(x, v)| x * v.ln()).sum::<f64>().exp()
}

/// A named combination function.
#[derive(Clone)]
pub struct CustomRule {
    id: String,
    combine: CombineFn,
}

impl CustomRule {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule").field("id", &self.id).finish()
    }
}

impl PartialEq for CustomRule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Table of custom rules, resolved by id.
#[derive(Clone)]
pub struct CustomRules {
    rules: BTreeMap<String, CombineFn>,
}

impl Default for CustomRules {
    /// The built-in rules: `le_chatelier` and `log_mole_fraction`.
    fn default() -> Self {
        let mut rules = Self::empty();
        rules.register("le_chatelier", le_chatelier);
        rules.register("log_mole_fraction", log_mole_fraction);
        rules
    }
}

impl fmt::Debug for CustomRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.rules.keys()).finish()
    }
}

impl CustomRules {
    pub fn empty() -> Self {
        Self { rules: BTreeMap::new() }
    }

    /// Add or replace a rule.
    pub fn register(&mut self, id: impl Into<String>, combine: CombineFn) {
        self.rules.insert(id.into(), combine);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.keys().map(String::as_str)
    }

    /// Resolve `id` into a rule.
    pub fn resolve(&self, id: &str) -> MixingResult<MixingRule> {
        let combine = self
            .rules
            .get(id)
            .copied()
            .ok_or_else(|| MixingError::UnknownRule { id: id.to_string() })?;
        Ok(MixingRule::Custom(CustomRule {
            id: id.to_string(),
            combine,
        }))
    }
}

/// How component values are combined.
#[derive(Debug, Clone, PartialEq)]
pub enum MixingRule {
    /// Σ xᵢ vᵢ
    MoleFractionWeighted,
    /// Σ wᵢ vᵢ with mass fractions wᵢ = xᵢMᵢ / Σ xⱼMⱼ
    MassFractionWeighted,
    Custom(CustomRule),
}

impl MixingRule {
    /// Built-in custom rule by id.
    pub fn custom(id: &str) -> MixingResult<Self> {
        CustomRules::default().resolve(id)
    }

    pub fn name(&self) -> &str {
        match self {
            MixingRule::MoleFractionWeighted => "mole_fraction_weighted",
            MixingRule::MassFractionWeighted => "mass_fraction_weighted",
            MixingRule::Custom(rule) => &rule.id,
        }
    }

    pub fn needs_molar_masses(&self) -> bool {
        matches!(self, MixingRule::MassFractionWeighted)
    }

    /// Combine `(mole fraction, value)` pairs.
    pub fn combine(&self, pairs: &[(f64, f64)]) -> MixingResult<f64> {
        self.combine_within(pairs, None, DEFAULT_COMPOSITION_TOLERANCE)
    }

    /// Combine with per-component molar masses [kg/mol], in the order of `pairs`.
    pub fn combine_with(&self, pairs: &[(f64, f64)], molar_masses: &[f64]) -> MixingResult<f64> {
        self.combine_within(pairs, Some(molar_masses), DEFAULT_COMPOSITION_TOLERANCE)
    }

    /// Combine with an explicit composition tolerance.
    pub fn combine_within(
        &self,
        pairs: &[(f64, f64)],
        molar_masses: Option<&[f64]>,
        tolerance: f64,
    ) -> MixingResult<f64> {
        validate_fractions(pairs.iter().map(|(x, _)| *x), tolerance)?;

        let value = match self {
            MixingRule::MoleFractionWeighted => linear(pairs),
            MixingRule::MassFractionWeighted => {
                let masses = molar_masses.ok_or_else(|| MixingError::MissingAuxiliaryData {
                    what: "mass-fraction mixing needs molar masses".into(),
                })?;
                linear(&mass_weighted(pairs, masses)?)
            }
            MixingRule::Custom(rule) => (rule.combine)(pairs),
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(MixingError::NonFinite {
                rule: self.name().to_string(),
                values: pairs.iter().map(|(_, v)| *v).collect(),
            })
        }
    }
}

/// Replace mole fractions with mass fractions.
fn mass_weighted(pairs: &[(f64, f64)], molar_masses: &[f64]) -> MixingResult<Vec<(f64, f64)>> {
    if molar_masses.len() != pairs.len() {
        return Err(MixingError::MissingAuxiliaryData {
            what: format!(
                "{} molar masses for {} components",
                molar_masses.len(),
                pairs.len()
            ),
        });
    }
    if let Some(bad) = molar_masses.iter().find(|m| !m.is_finite() || **m <= 0.0) {
        return Err(MixingError::MissingAuxiliaryData {
            what: format!("molar mass must be positive and finite, got {bad}"),
        });
    }
    let total: f64 = pairs.iter().zip(molar_masses).map(|((x, _), m)| x * m).sum();
    Ok(pairs
        .iter()
        .zip(molar_masses)
        .map(|((x, v), m)| (x * m / total, *v))
        .collect())
}
