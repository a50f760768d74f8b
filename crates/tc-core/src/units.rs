// tc-core/src/units.rs

use uom::si::f64::{
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::kelvin;

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    Temperature::new::<kelvin>(v)
}

/// Temperature in kelvin.
#[inline]
pub fn kelvin_of(t: Temperature) -> f64 {
    t.get::<kelvin>()
}

/// Pressure in pascal.
#[inline]
pub fn pascal_of(p: Pressure) -> f64 {
    p.get::<pascal>()
}

pub mod constants {
    /// Molar gas constant [J/(mol·K)].
    pub const R: f64 = 8.314_462_618_153_24;

    /// Standard atmosphere [Pa].
    pub const P_ATM: f64 = 101_325.0;
}
