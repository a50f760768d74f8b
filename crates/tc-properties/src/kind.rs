//! Physical property kinds.

use core::fmt;

use serde::{Deserialize, Serialize};
use tc_correlations::Axis;

/// A property that can be correlated for a pure compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    VaporPressure,
    HeatOfVaporization,
    LiquidDensity,
    GasViscosity,
    LiquidViscosity,
    ThermalConductivity,
    HeatCapacityGas,
    SurfaceTension,
    /// Boiling temperature as a function of pressure.
    SaturationTemperature,
    DipoleMoment,
    LowerFlammabilityLimit,
    UpperFlammabilityLimit,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 12] = [
        PropertyKind::VaporPressure,
        PropertyKind::HeatOfVaporization,
        PropertyKind::LiquidDensity,
        PropertyKind::GasViscosity,
        PropertyKind::LiquidViscosity,
        PropertyKind::ThermalConductivity,
        PropertyKind::HeatCapacityGas,
        PropertyKind::SurfaceTension,
        PropertyKind::SaturationTemperature,
        PropertyKind::DipoleMoment,
        PropertyKind::LowerFlammabilityLimit,
        PropertyKind::UpperFlammabilityLimit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PropertyKind::VaporPressure => "vapor_pressure",
            PropertyKind::HeatOfVaporization => "heat_of_vaporization",
            PropertyKind::LiquidDensity => "liquid_density",
            PropertyKind::GasViscosity => "gas_viscosity",
            PropertyKind::LiquidViscosity => "liquid_viscosity",
            PropertyKind::ThermalConductivity => "thermal_conductivity",
            PropertyKind::HeatCapacityGas => "heat_capacity_gas",
            PropertyKind::SurfaceTension => "surface_tension",
            PropertyKind::SaturationTemperature => "saturation_temperature",
            PropertyKind::DipoleMoment => "dipole_moment",
            PropertyKind::LowerFlammabilityLimit => "lower_flammability_limit",
            PropertyKind::UpperFlammabilityLimit => "upper_flammability_limit",
        }
    }

    /// Inverse of [`PropertyKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Independent variable of every correlation for this property.
    pub fn axis(self) -> Axis {
        match self {
            PropertyKind::SaturationTemperature => Axis::Pressure,
            _ => Axis::Temperature,
        }
    }

    /// Unit of the correlated value.
    pub fn unit(self) -> &'static str {
        match self {
            PropertyKind::VaporPressure => "Pa",
            PropertyKind::HeatOfVaporization => "J/mol",
            PropertyKind::LiquidDensity => "kmol/m^3",
            PropertyKind::GasViscosity | PropertyKind::LiquidViscosity => "Pa*s",
            PropertyKind::ThermalConductivity => "W/(m*K)",
            PropertyKind::HeatCapacityGas => "J/(mol*K)",
            PropertyKind::SurfaceTension => "N/m",
            PropertyKind::SaturationTemperature => "K",
            PropertyKind::DipoleMoment => "debye",
            PropertyKind::LowerFlammabilityLimit | PropertyKind::UpperFlammabilityLimit => {
                "mole fraction"
            }
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
