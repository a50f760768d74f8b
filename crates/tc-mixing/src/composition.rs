//! Mixture composition.

use std::collections::BTreeSet;

use tc_core::{ChemicalId, Tolerances, nearly_equal};

use crate::error::{MixingResult, invalid_composition};

/// Check a list of mole (or mass) fractions.
///
/// Fractions must be non-empty, finite, non-negative and sum to 1 within
/// `tolerance`. They are never rescaled.
pub fn validate_fractions(fractions: impl IntoIterator<Item = f64>, tolerance: f64) -> MixingResult<()> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for frac in fractions {
        if !frac.is_finite() {
            return Err(invalid_composition(format!("non-finite fraction {frac}")));
        }
        if frac < 0.0 {
            return Err(invalid_composition(format!("negative fraction {frac}")));
        }
        sum += frac;
        count += 1;
    }
    if count == 0 {
        return Err(invalid_composition("empty composition"));
    }
    if !nearly_equal(sum, 1.0, Tolerances::absolute(tolerance)) {
        return Err(invalid_composition(format!(
            "fractions sum to {sum}, expected 1 within {tolerance}"
        )));
    }
    Ok(())
}

/// Ordered (compound, mole fraction) pairs.
///
/// Fractions are stored exactly as given; a composition that does not sum
/// to 1 is rejected rather than normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    components: Vec<(ChemicalId, f64)>,
}

impl Mixture {
    /// Pure compound.
    pub fn pure(id: ChemicalId) -> Self {
        Self {
            components: vec![(id, 1.0)],
        }
    }

    /// Validate and build from mole fractions.
    pub fn new(components: Vec<(ChemicalId, f64)>, tolerance: f64) -> MixingResult<Self> {
        let mut seen = BTreeSet::new();
        for (id, _) in &components {
            if !seen.insert(id) {
                return Err(invalid_composition(format!("{id} listed more than once")));
            }
        }
        validate_fractions(components.iter().map(|(_, x)| *x), tolerance)?;
        Ok(Self { components })
    }

    pub fn components(&self) -> &[(ChemicalId, f64)] {
        &self.components
    }

    pub fn ids(&self) -> impl Iterator<Item = &ChemicalId> + '_ {
        self.components.iter().map(|(id, _)| id)
    }

    pub fn fractions(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().map(|(_, x)| *x)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Mole fraction of `id` (0.0 if absent).
    pub fn mole_fraction(&self, id: &ChemicalId) -> f64 {
        self.components
            .iter()
            .find(|(c, _)| c == id)
            .map(|(_, x)| *x)
            .unwrap_or(0.0)
    }

    /// `Some(id)` if the mixture is a single compound.
    pub fn is_pure(&self) -> Option<&ChemicalId> {
        match self.components.as_slice() {
            [(id, _)] => Some(id),
            _ => None,
        }
    }
}
