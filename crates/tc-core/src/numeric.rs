use crate::{CoreError, CoreResult};

/// Comparison bounds for correlation outputs and fraction sums.
///
/// Two values agree if they are within `abs` of each other, or within
/// `rel` of the larger magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Tolerances {
    pub const fn new(abs: f64, rel: f64) -> Self {
        Self { abs, rel }
    }

    /// Scale-free bound, for values spanning decades (pressures, viscosities).
    pub const fn relative(rel: f64) -> Self {
        Self::new(0.0, rel)
    }

    /// Fixed bound, for quantities of known scale such as mole fractions.
    pub const fn absolute(abs: f64) -> Self {
        Self::new(abs, 0.0)
    }
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Finite and strictly positive (molar masses, critical constants).
pub fn ensure_positive(value: f64, what: &'static str) -> CoreResult<f64> {
    if !value.is_finite() {
        return Err(CoreError::NonFinite { what, value });
    }
    if value <= 0.0 {
        return Err(CoreError::InvalidArg { what });
    }
    Ok(value)
}
