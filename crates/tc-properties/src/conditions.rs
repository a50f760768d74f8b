//! State conditions for a property query.

use tc_core::{Pressure, Temperature, kelvin_of, pascal_of};
use tc_correlations::Axis;

use crate::error::{PropertyError, PropertyResult};
use crate::kind::PropertyKind;

/// Temperature [K] and optional pressure [Pa] at which a property is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub temperature: f64,
    pub pressure: Option<f64>,
}

impl Conditions {
    pub fn at_temperature(temperature: f64) -> Self {
        Self {
            temperature,
            pressure: None,
        }
    }

    pub fn new(temperature: f64, pressure: f64) -> Self {
        Self {
            temperature,
            pressure: Some(pressure),
        }
    }

    /// Conditions from typed quantities, converted to SI.
    pub fn from_quantities(temperature: Temperature, pressure: Option<Pressure>) -> Self {
        Self {
            temperature: kelvin_of(temperature),
            pressure: pressure.map(pascal_of),
        }
    }

    /// The independent variable for `kind`.
    pub fn variable_for(&self, kind: PropertyKind) -> PropertyResult<f64> {
        match kind.axis() {
            Axis::Temperature => Ok(self.temperature),
            Axis::Pressure => self.pressure.ok_or(PropertyError::MissingCondition {
                property: kind,
                axis: Axis::Pressure,
            }),
        }
    }
}
