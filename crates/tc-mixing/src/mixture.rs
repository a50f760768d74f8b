//! Mixture properties evaluated from registry-owned component models.

use tc_correlations::Evaluator;
use tc_properties::{PropertyKind, PropertyModel, PropertyResult, Registry};
use tracing::trace;

use crate::composition::Mixture;
use crate::error::{MixingError, MixingResult};
use crate::rule::MixingRule;

/// A property of a mixture, borrowing each component's model from a registry.
///
/// Built per query; nothing is cached between evaluations.
#[derive(Debug)]
pub struct MixtureProperty<'r> {
    mixture: &'r Mixture,
    kind: PropertyKind,
    components: Vec<&'r PropertyModel>,
    rule: MixingRule,
    molar_masses: Option<Vec<f64>>,
    tolerance: f64,
    evaluator: &'r dyn Evaluator,
}

impl<'r> MixtureProperty<'r> {
    /// Resolve every component's model for `kind`.
    ///
    /// Fails if a component is unknown to the registry, or if `rule` needs
    /// molar masses the registry does not have.
    pub fn new(registry: &'r Registry, mixture: &'r Mixture, kind: PropertyKind, rule: MixingRule) -> MixingResult<Self> {
        let components = mixture
            .ids()
            .map(|id| registry.property(id, kind))
            .collect::<PropertyResult<Vec<_>>>()?;

        let molar_masses: Option<Vec<f64>> = mixture.ids().map(|id| registry.molar_mass(id)).collect();
        if rule.needs_molar_masses() && molar_masses.is_none() {
            let missing: Vec<String> = mixture
                .ids()
                .filter(|id| registry.molar_mass(id).is_none())
                .map(ToString::to_string)
                .collect();
            return Err(MixingError::MissingAuxiliaryData {
                what: format!("no molar mass for {}", missing.join(", ")),
            });
        }

        Ok(Self {
            mixture,
            kind,
            components,
            rule,
            molar_masses,
            tolerance: registry.config().composition_tolerance,
            evaluator: registry.evaluator(),
        })
    }

    pub fn mixture(&self) -> &Mixture {
        self.mixture
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn rule(&self) -> &MixingRule {
        &self.rule
    }

    /// Pure-component values at `x`, in mixture order.
    pub fn component_values(&self, x: f64) -> MixingResult<Vec<f64>> {
        Ok(self
            .components
            .iter()
            .map(|model| model.value_at(x))
            .collect::<PropertyResult<Vec<_>>>()?)
    }

    /// Mixture value at `x` on the property's axis.
    pub fn value_at(&self, x: f64) -> MixingResult<f64> {
        let values = self.component_values(x)?;
        self.combine(&values)
    }

    /// Mixture values at many points; each component is evaluated in bulk.
    pub fn values_at(&self, xs: &[f64]) -> Vec<MixingResult<f64>> {
        let per_component: Vec<Vec<PropertyResult<f64>>> = self
            .components
            .iter()
            .map(|model| model.values_at(xs, self.evaluator))
            .collect();
        trace!(
            property = %self.kind,
            rule = self.rule.name(),
            components = self.components.len(),
            points = xs.len(),
            "mixture bulk evaluation"
        );

        let mut columns: Vec<_> = per_component.into_iter().map(Vec::into_iter).collect();
        (0..xs.len())
            .map(|_| {
                let values = columns
                    .iter_mut()
                    .map(|column| column.next().unwrap_or(Ok(f64::NAN)))
                    .collect::<PropertyResult<Vec<_>>>()?;
                self.combine(&values)
            })
            .collect()
    }

    fn combine(&self, values: &[f64]) -> MixingResult<f64> {
        let pairs: Vec<(f64, f64)> = self.mixture.fractions().zip(values.iter().copied()).collect();
        self.rule
            .combine_within(&pairs, self.molar_masses.as_deref(), self.tolerance)
    }
}

/// Mixture queries on a [`Registry`].
pub trait MixtureQuery {
    /// Borrow the component models for a mixture property.
    fn mixture_property<'r>(
        &'r self,
        mixture: &'r Mixture,
        kind: PropertyKind,
        rule: MixingRule,
    ) -> MixingResult<MixtureProperty<'r>>;

    /// Mixture value at `x` (temperature, or pressure for pressure-axis kinds).
    fn get_mixture_property(&self, mixture: &Mixture, kind: PropertyKind, rule: MixingRule, x: f64) -> MixingResult<f64> {
        self.mixture_property(mixture, kind, rule)?.value_at(x)
    }
}

impl MixtureQuery for Registry {
    fn mixture_property<'r>(
        &'r self,
        mixture: &'r Mixture,
        kind: PropertyKind,
        rule: MixingRule,
    ) -> MixingResult<MixtureProperty<'r>> {
        MixtureProperty::new(self, mixture, kind, rule)
    }
}
