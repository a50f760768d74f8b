//! Which equation forms may represent which property.

use std::collections::{BTreeMap, BTreeSet};

use tc_correlations::EquationKind;

use crate::kind::PropertyKind;

/// Per-property set of admissible equation forms.
///
/// Records whose equation is not admitted for their property are rejected
/// at load time. `Constant` is admitted everywhere (tabulated point values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCatalog {
    allowed: BTreeMap<PropertyKind, BTreeSet<EquationKind>>,
}

impl Default for MethodCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl MethodCatalog {
    /// Catalog with no forms other than `Constant`.
    pub fn empty() -> Self {
        let allowed = PropertyKind::ALL
            .into_iter()
            .map(|kind| (kind, BTreeSet::from([EquationKind::Constant])))
            .collect();
        Self { allowed }
    }

    /// The forms shipped with thermocorr.
    pub fn standard() -> Self {
        use EquationKind::*;
        use PropertyKind::*;

        let mut catalog = Self::empty();
        catalog.allow(VaporPressure, [Antoine, Dippr101, Polynomial]);
        catalog.allow(
            HeatOfVaporization,
            [Dippr106, Watson, Pitzer, Velasco, MorganKobayashi, Clapeyron, Polynomial],
        );
        catalog.allow(LiquidDensity, [Dippr105, Polynomial]);
        catalog.allow(GasViscosity, [Sutherland, Polynomial]);
        catalog.allow(LiquidViscosity, [Dippr101, Polynomial]);
        catalog.allow(ThermalConductivity, [Polynomial]);
        catalog.allow(HeatCapacityGas, [Shomate, Polynomial]);
        catalog.allow(SurfaceTension, [Dippr106, Polynomial]);
        catalog.allow(SaturationTemperature, [AntoineInverse, Polynomial]);
        catalog
    }

    /// Admit additional forms for a property.
    pub fn allow(&mut self, property: PropertyKind, equations: impl IntoIterator<Item = EquationKind>) {
        self.allowed.entry(property).or_default().extend(equations);
    }

    pub fn allows(&self, property: PropertyKind, equation: EquationKind) -> bool {
        self.allowed
            .get(&property)
            .is_some_and(|set| set.contains(&equation))
    }

    /// Admitted forms for a property, in a stable order.
    pub fn equations_for(&self, property: PropertyKind) -> impl Iterator<Item = EquationKind> + '_ {
        self.allowed.get(&property).into_iter().flatten().copied()
    }
}
