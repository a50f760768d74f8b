//! Closed set of empirical equation forms.
//!
//! Every form is a pure function of its coefficients and one independent
//! variable `x` (temperature in K, or pressure in Pa for `AntoineInverse`).
//! Coefficients are stored exactly as supplied.

use core::f64::consts::LN_10;

use serde::{Deserialize, Serialize};
use tc_core::constants::{P_ATM, R};

use crate::error::{CorrelationError, CorrelationResult, Operation};
use crate::range::{Axis, ValidRange};

/// Largest number of terms accepted for [`Equation::Polynomial`].
pub const MAX_POLYNOMIAL_TERMS: usize = 10;

const WATSON_EXPONENT: f64 = 0.38;

/// Morgan-Kobayashi reduced-temperature exponents.
const MK_EXPONENTS: [f64; 6] = [0.3333, 0.8333, 1.2083, 1.0, 2.0, 3.0];

/// Morgan-Kobayashi coefficients per exponent: (b0, b1 ω, b2 ω²).
const MK_COEFFS: [[f64; 3]; 6] = [
    [5.2804, 0.080022, 7.2543],
    [12.8650, 273.23, -346.45],
    [1.1710, 465.08, -610.48],
    [-13.1160, -638.51, 839.89],
    [0.4858, -145.12, 160.05],
    [-1.0880, 74.049, -50.711],
];

/// Tag of an equation form, as it appears in coefficient records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquationKind {
    Constant,
    Polynomial,
    Antoine,
    AntoineInverse,
    Dippr101,
    Dippr105,
    Dippr106,
    Watson,
    Pitzer,
    Velasco,
    MorganKobayashi,
    Clapeyron,
    Sutherland,
    Shomate,
}

/// Number of coefficients an equation form takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(k) => n == k,
            Arity::Between(lo, hi) => (lo..=hi).contains(&n),
        }
    }
}

impl core::fmt::Display for Arity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Arity::Exact(k) => write!(f, "{k}"),
            Arity::Between(lo, hi) => write!(f, "{lo}..={hi}"),
        }
    }
}

impl EquationKind {
    pub const ALL: [EquationKind; 14] = [
        EquationKind::Constant,
        EquationKind::Polynomial,
        EquationKind::Antoine,
        EquationKind::AntoineInverse,
        EquationKind::Dippr101,
        EquationKind::Dippr105,
        EquationKind::Dippr106,
        EquationKind::Watson,
        EquationKind::Pitzer,
        EquationKind::Velasco,
        EquationKind::MorganKobayashi,
        EquationKind::Clapeyron,
        EquationKind::Sutherland,
        EquationKind::Shomate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EquationKind::Constant => "constant",
            EquationKind::Polynomial => "polynomial",
            EquationKind::Antoine => "antoine",
            EquationKind::AntoineInverse => "antoine_inverse",
            EquationKind::Dippr101 => "dippr101",
            EquationKind::Dippr105 => "dippr105",
            EquationKind::Dippr106 => "dippr106",
            EquationKind::Watson => "watson",
            EquationKind::Pitzer => "pitzer",
            EquationKind::Velasco => "velasco",
            EquationKind::MorganKobayashi => "morgan_kobayashi",
            EquationKind::Clapeyron => "clapeyron",
            EquationKind::Sutherland => "sutherland",
            EquationKind::Shomate => "shomate",
        }
    }

    /// Inverse of [`EquationKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn arity(self) -> Arity {
        match self {
            EquationKind::Constant => Arity::Exact(1),
            EquationKind::Polynomial => Arity::Between(1, MAX_POLYNOMIAL_TERMS),
            EquationKind::Antoine | EquationKind::AntoineInverse => Arity::Exact(3),
            EquationKind::Dippr101 => Arity::Exact(5),
            EquationKind::Dippr105 => Arity::Exact(4),
            EquationKind::Dippr106 => Arity::Exact(6),
            EquationKind::Watson => Arity::Exact(3),
            EquationKind::Pitzer | EquationKind::Velasco | EquationKind::MorganKobayashi => Arity::Exact(2),
            EquationKind::Clapeyron => Arity::Between(2, 4),
            EquationKind::Sutherland => Arity::Exact(3),
            EquationKind::Shomate => Arity::Exact(5),
        }
    }

    /// Axis the form is written against; `None` means either axis.
    pub fn natural_axis(self) -> Option<Axis> {
        match self {
            EquationKind::Constant | EquationKind::Polynomial => None,
            EquationKind::AntoineInverse => Some(Axis::Pressure),
            _ => Some(Axis::Temperature),
        }
    }

    /// Highest derivative order with a closed form (`None` = any order).
    pub fn max_derivative_order(self) -> Option<u32> {
        match self {
            EquationKind::Constant | EquationKind::Polynomial | EquationKind::Shomate => None,
            _ => Some(1),
        }
    }

    pub fn has_integral(self) -> bool {
        matches!(
            self,
            EquationKind::Constant
                | EquationKind::Polynomial
                | EquationKind::Watson
                | EquationKind::Pitzer
                | EquationKind::Velasco
                | EquationKind::MorganKobayashi
                | EquationKind::Shomate
        )
    }
}

impl core::fmt::Display for EquationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One equation form with its typed coefficients.
#[derive(Debug, Clone, PartialEq)]
pub enum Equation {
    /// y = value
    Constant { value: f64 },
    /// y = Σ cᵢ xⁱ (c₀ first)
    Polynomial { coeffs: Vec<f64> },
    /// y = 10^(A − B/(x + C))
    Antoine { a: f64, b: f64, c: f64 },
    /// x = 10^(A − B/(y + C)) solved for y: y = B/(A − log10 x) − C
    AntoineInverse { a: f64, b: f64, c: f64 },
    /// y = exp(A + B/x + C ln x + D x^E)
    Dippr101 { a: f64, b: f64, c: f64, d: f64, e: f64 },
    /// y = A / B^(1 + (1 − x/C)^D)
    Dippr105 { a: f64, b: f64, c: f64, d: f64 },
    /// y = A (1 − Tr)^(B + C Tr + D Tr² + E Tr³), Tr = x/Tc
    Dippr106 {
        tc: f64,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
    },
    /// y = y_ref ((1 − x/Tc)/(1 − x_ref/Tc))^0.38
    Watson { y_ref: f64, x_ref: f64, tc: f64 },
    /// y = R Tc (7.08 (1 − Tr)^0.354 + 10.95 ω (1 − Tr)^0.456)
    Pitzer { tc: f64, omega: f64 },
    /// y = R Tc (7.2729 + 10.4962 ω + 0.6061 ω²)(1 − Tr)^0.38
    Velasco { tc: f64, omega: f64 },
    /// y = R Tc Σ (b0 + b1 ω + b2 ω²) τ^eᵢ, τ = 1 − x/Tc
    MorganKobayashi { tc: f64, omega: f64 },
    /// y = R x ΔZ ln(Pc/Psat) / (1 − x/Tc); ΔZ and Psat default to 1 and 1 atm
    Clapeyron {
        tc: f64,
        pc: f64,
        dz: f64,
        psat: f64,
    },
    /// y = y0 (x/T0)^1.5 (T0 + S)/(x + S)
    Sutherland { y0: f64, t0: f64, s: f64 },
    /// y = A + B t + C t² + D t³ + E/t², t = x/1000
    Shomate { a: f64, b: f64, c: f64, d: f64, e: f64 },
}

impl Equation {
    /// Build an equation from a record's ordered coefficient list.
    pub fn from_coefficients(kind: EquationKind, coeffs: &[f64]) -> CorrelationResult<Self> {
        let arity = kind.arity();
        if !arity.accepts(coeffs.len()) {
            return Err(CorrelationError::validation(
                kind.name(),
                format!("expected {arity} coefficients, got {}", coeffs.len()),
            ));
        }
        if let Some(i) = coeffs.iter().position(|c| !c.is_finite()) {
            return Err(CorrelationError::validation(
                kind.name(),
                format!("coefficient {i} is not finite ({})", coeffs[i]),
            ));
        }

        let c = coeffs;
        let equation = match kind {
            EquationKind::Constant => Equation::Constant { value: c[0] },
            EquationKind::Polynomial => Equation::Polynomial {
                coeffs: c.to_vec(),
            },
            EquationKind::Antoine => Equation::Antoine {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            EquationKind::AntoineInverse => Equation::AntoineInverse {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            EquationKind::Dippr101 => Equation::Dippr101 {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
                e: c[4],
            },
            EquationKind::Dippr105 => Equation::Dippr105 {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
            },
            EquationKind::Dippr106 => Equation::Dippr106 {
                tc: c[0],
                a: c[1],
                b: c[2],
                c: c[3],
                d: c[4],
                e: c[5],
            },
            EquationKind::Watson => Equation::Watson {
                y_ref: c[0],
                x_ref: c[1],
                tc: c[2],
            },
            EquationKind::Pitzer => Equation::Pitzer {
                tc: c[0],
                omega: c[1],
            },
            EquationKind::Velasco => Equation::Velasco {
                tc: c[0],
                omega: c[1],
            },
            EquationKind::MorganKobayashi => Equation::MorganKobayashi {
                tc: c[0],
                omega: c[1],
            },
            EquationKind::Clapeyron => Equation::Clapeyron {
                tc: c[0],
                pc: c[1],
                dz: c.get(2).copied().unwrap_or(1.0),
                psat: c.get(3).copied().unwrap_or(P_ATM),
            },
            EquationKind::Sutherland => Equation::Sutherland {
                y0: c[0],
                t0: c[1],
                s: c[2],
            },
            EquationKind::Shomate => Equation::Shomate {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
                e: c[4],
            },
        };
        Ok(equation)
    }

    pub fn kind(&self) -> EquationKind {
        match self {
            Equation::Constant { .. } => EquationKind::Constant,
            Equation::Polynomial { .. } => EquationKind::Polynomial,
            Equation::Antoine { .. } => EquationKind::Antoine,
            Equation::AntoineInverse { .. } => EquationKind::AntoineInverse,
            Equation::Dippr101 { .. } => EquationKind::Dippr101,
            Equation::Dippr105 { .. } => EquationKind::Dippr105,
            Equation::Dippr106 { .. } => EquationKind::Dippr106,
            Equation::Watson { .. } => EquationKind::Watson,
            Equation::Pitzer { .. } => EquationKind::Pitzer,
            Equation::Velasco { .. } => EquationKind::Velasco,
            Equation::MorganKobayashi { .. } => EquationKind::MorganKobayashi,
            Equation::Clapeyron { .. } => EquationKind::Clapeyron,
            Equation::Sutherland { .. } => EquationKind::Sutherland,
            Equation::Shomate { .. } => EquationKind::Shomate,
        }
    }

    /// Coefficients in record order, with defaulted trailing terms filled in.
    pub fn coefficients(&self) -> Vec<f64> {
        match *self {
            Equation::Constant { value } => vec![value],
            Equation::Polynomial { ref coeffs } => coeffs.clone(),
            Equation::Antoine { a, b, c } | Equation::AntoineInverse { a, b, c } => vec![a, b, c],
            Equation::Dippr101 { a, b, c, d, e } => vec![a, b, c, d, e],
            Equation::Dippr105 { a, b, c, d } => vec![a, b, c, d],
            Equation::Dippr106 { tc, a, b, c, d, e } => vec![tc, a, b, c, d, e],
            Equation::Watson { y_ref, x_ref, tc } => vec![y_ref, x_ref, tc],
            Equation::Pitzer { tc, omega }
            | Equation::Velasco { tc, omega }
            | Equation::MorganKobayashi { tc, omega } => vec![tc, omega],
            Equation::Clapeyron { tc, pc, dz, psat } => vec![tc, pc, dz, psat],
            Equation::Sutherland { y0, t0, s } => vec![y0, t0, s],
            Equation::Shomate { a, b, c, d, e } => vec![a, b, c, d, e],
        }
    }

    /// Check that the form is well defined over `range`.
    ///
    /// Catches ranges that cross a singularity (x + C = 0 for Antoine, the
    /// critical temperature for the reduced-temperature forms, x ≤ 0 under a
    /// logarithm or fractional power).
    pub fn check_domain(&self, range: &ValidRange) -> CorrelationResult<()> {
        let kind = self.kind();
        if let Some(axis) = kind.natural_axis()
            && axis != range.axis()
        {
            return Err(CorrelationError::validation(
                kind.name(),
                format!("written against {axis:?}, range is on {:?}", range.axis()),
            ));
        }
        if kind != EquationKind::Constant && !range.is_bounded() {
            return Err(CorrelationError::validation(kind.name(), "range must be bounded"));
        }

        let (min, max) = (range.min(), range.max());
        let fail = |reason: String| Err(CorrelationError::validation(kind.name(), reason));
        match *self {
            Equation::Constant { .. } | Equation::Polynomial { .. } => Ok(()),
            Equation::Antoine { c, .. } => {
                if min + c <= 0.0 {
                    return fail(format!("x + C must stay positive (min {min}, C {c})"));
                }
                Ok(())
            }
            Equation::AntoineInverse { a, .. } => {
                if min <= 0.0 {
                    return fail(format!("pressure must be positive (min {min})"));
                }
                if a - max.log10() <= 0.0 {
                    return fail(format!("log10(max) must stay below A (max {max}, A {a})"));
                }
                Ok(())
            }
            Equation::Dippr101 { .. } | Equation::Shomate { .. } => {
                if min <= 0.0 {
                    return fail(format!("x must be positive (min {min})"));
                }
                Ok(())
            }
            Equation::Dippr105 { b, c, .. } => {
                if b <= 0.0 || c <= 0.0 {
                    return fail(format!("B and C must be positive (B {b}, C {c})"));
                }
                if max > c {
                    return fail(format!("max {max} exceeds C {c}"));
                }
                Ok(())
            }
            Equation::Dippr106 { tc, .. }
            | Equation::Pitzer { tc, .. }
            | Equation::Velasco { tc, .. }
            | Equation::MorganKobayashi { tc, .. } => check_critical(kind, tc, min, max),
            Equation::Clapeyron { tc, pc, psat, .. } => {
                check_critical(kind, tc, min, max)?;
                if max >= tc {
                    return fail(format!("diverges at Tc, max {max} must stay below {tc}"));
                }
                if pc <= 0.0 || psat <= 0.0 {
                    return fail(format!("Pc and Psat must be positive (Pc {pc}, Psat {psat})"));
                }
                Ok(())
            }
            Equation::Watson { x_ref, tc, .. } => {
                check_critical(kind, tc, min, max)?;
                if x_ref >= tc {
                    return fail(format!("reference {x_ref} must be below Tc {tc}"));
                }
                Ok(())
            }
            Equation::Sutherland { t0, s, .. } => {
                if t0 <= 0.0 || min <= 0.0 || min + s <= 0.0 {
                    return fail(format!("T0, x and x + S must be positive (T0 {t0}, min {min}, S {s})"));
                }
                Ok(())
            }
        }
    }

    /// Value at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Equation::Constant { value } => value,
            Equation::Polynomial { ref coeffs } => horner(coeffs, x),
            Equation::Antoine { a, b, c } => 10f64.powf(a - b / (x + c)),
            Equation::AntoineInverse { a, b, c } => b / (a - x.log10()) - c,
            Equation::Dippr101 { a, b, c, d, e } => (a + b / x + c * x.ln() + d * x.powf(e)).exp(),
            Equation::Dippr105 { a, b, c, d } => a / b.powf(1.0 + (1.0 - x / c).powf(d)),
            Equation::Dippr106 { tc, a, b, c, d, e } => {
                let tr = x / tc;
                a * (1.0 - tr).powf(b + c * tr + d * tr * tr + e * tr * tr * tr)
            }
            Equation::Watson { y_ref, x_ref, tc } => {
                y_ref * ((1.0 - x / tc) / (1.0 - x_ref / tc)).powf(WATSON_EXPONENT)
            }
            Equation::Pitzer { tc, omega } => {
                let tau = 1.0 - x / tc;
                R * tc * (7.08 * tau.powf(0.354) + 10.95 * omega * tau.powf(0.456))
            }
            Equation::Velasco { tc, omega } => {
                velasco_factor(omega) * (1.0 - x / tc).powf(WATSON_EXPONENT) * R * tc
            }
            Equation::MorganKobayashi { tc, omega } => {
                let tau = 1.0 - x / tc;
                R * tc * mk_terms(omega).map(|(c, e)| c * tau.powf(e)).sum::<f64>()
            }
            Equation::Clapeyron { tc, pc, dz, psat } => R * x * dz * (pc / psat).ln() / (1.0 - x / tc),
            Equation::Sutherland { y0, t0, s } => y0 * (x / t0).powf(1.5) * (t0 + s) / (x + s),
            Equation::Shomate { a, b, c, d, e } => {
                let t = x / 1000.0;
                a + b * t + c * t * t + d * t * t * t + e / (t * t)
            }
        }
    }

    /// `order`-th derivative with respect to `x`; order 0 is the value.
    pub fn derivative(&self, x: f64, order: u32) -> CorrelationResult<f64> {
        if order == 0 {
            return Ok(self.evaluate(x));
        }
        let kind = self.kind();
        if let Some(max) = kind.max_derivative_order()
            && order > max
        {
            return Err(CorrelationError::Unsupported {
                equation: kind.name(),
                operation: Operation::Derivative { order },
            });
        }

        let d = match *self {
            Equation::Constant { .. } => 0.0,
            Equation::Polynomial { ref coeffs } => polynomial_derivative(coeffs, x, order),
            Equation::Shomate { a, b, c, d, e } => {
                let t = x / 1000.0;
                let poly = polynomial_derivative(&[a, b, c, d], t, order);
                let sign = if order % 2 == 0 { 1.0 } else { -1.0 };
                let inverse_square = sign * factorial(order + 1) * e * t.powi(-(order as i32 + 2));
                (poly + inverse_square) / 1000f64.powi(order as i32)
            }
            // Remaining forms only reach here with order == 1.
            Equation::Antoine { b, c, .. } => {
                let y = self.evaluate(x);
                y * LN_10 * b / ((x + c) * (x + c))
            }
            Equation::AntoineInverse { a, b, .. } => {
                let den = a - x.log10();
                b / (den * den) / (x * LN_10)
            }
            Equation::Dippr101 { b, c, d, e, .. } => {
                let y = self.evaluate(x);
                y * (-b / (x * x) + c / x + d * e * x.powf(e - 1.0))
            }
            Equation::Dippr105 { b, c, d, .. } => {
                let y = self.evaluate(x);
                let tau = 1.0 - x / c;
                y * b.ln() * d * tau.powf(d - 1.0) / c
            }
            Equation::Dippr106 { tc, b, c, d, e, .. } => {
                let y = self.evaluate(x);
                let tr = x / tc;
                let tau = 1.0 - tr;
                let exponent = b + c * tr + d * tr * tr + e * tr * tr * tr;
                let d_exponent = (c + 2.0 * d * tr + 3.0 * e * tr * tr) / tc;
                y * (d_exponent * tau.ln() - exponent / (tc * tau))
            }
            Equation::Watson { tc, .. } => {
                let y = self.evaluate(x);
                -WATSON_EXPONENT * y / (tc - x)
            }
            Equation::Pitzer { tc, omega } => {
                let tau = 1.0 - x / tc;
                -R * (7.08 * 0.354 * tau.powf(-0.646) + 10.95 * 0.456 * omega * tau.powf(-0.544))
            }
            Equation::Velasco { tc, omega } => {
                let tau = 1.0 - x / tc;
                -WATSON_EXPONENT * velasco_factor(omega) * R * tau.powf(WATSON_EXPONENT - 1.0)
            }
            Equation::MorganKobayashi { tc, omega } => {
                let tau = 1.0 - x / tc;
                -R * mk_terms(omega).map(|(c, e)| c * e * tau.powf(e - 1.0)).sum::<f64>()
            }
            Equation::Clapeyron { tc, pc, dz, psat } => {
                let k = R * dz * (pc / psat).ln();
                k * tc * tc / ((tc - x) * (tc - x))
            }
            Equation::Sutherland { s, .. } => {
                let y = self.evaluate(x);
                y * (1.5 / x - 1.0 / (x + s))
            }
        };
        if !d.is_finite() {
            return Err(CorrelationError::NonFinite {
                equation: kind.name(),
                operation: Operation::Derivative { order },
                x,
            });
        }
        Ok(d)
    }

    /// ∫ y dx from `x_low` to `x_high` (signed; reversed bounds negate).
    pub fn integral(&self, x_low: f64, x_high: f64) -> CorrelationResult<f64> {
        let kind = self.kind();
        if !kind.has_integral() {
            return Err(CorrelationError::Unsupported {
                equation: kind.name(),
                operation: Operation::Integral,
            });
        }
        if let Equation::Constant { value } = *self {
            // Avoids inf - inf for unbounded constants.
            return Ok(value * (x_high - x_low));
        }
        Ok(self.antiderivative(x_high) - self.antiderivative(x_low))
    }

    fn antiderivative(&self, x: f64) -> f64 {
        match *self {
            Equation::Constant { value } => value * x,
            Equation::Polynomial { ref coeffs } => {
                let lifted: Vec<f64> = coeffs
                    .iter()
                    .enumerate()
                    .map(|(i, c)| c / (i as f64 + 1.0))
                    .collect();
                x * horner(&lifted, x)
            }
            Equation::Watson { y_ref, x_ref, tc } => {
                let reference = (1.0 - x_ref / tc).powf(WATSON_EXPONENT);
                let p = WATSON_EXPONENT + 1.0;
                -y_ref * tc * (1.0 - x / tc).powf(p) / (p * reference)
            }
            Equation::Pitzer { tc, omega } => {
                let tau = 1.0 - x / tc;
                -R * tc * tc * (7.08 * tau.powf(1.354) / 1.354 + 10.95 * omega * tau.powf(1.456) / 1.456)
            }
            Equation::Velasco { tc, omega } => {
                let p = WATSON_EXPONENT + 1.0;
                -velasco_factor(omega) * R * tc * tc * (1.0 - x / tc).powf(p) / p
            }
            Equation::MorganKobayashi { tc, omega } => {
                let tau = 1.0 - x / tc;
                -R * tc * tc * mk_terms(omega).map(|(c, e)| c * tau.powf(e + 1.0) / (e + 1.0)).sum::<f64>()
            }
            Equation::Shomate { a, b, c, d, e } => {
                let t = x / 1000.0;
                1000.0 * (a * t + b * t * t / 2.0 + c * t * t * t / 3.0 + d * t * t * t * t / 4.0 - e / t)
            }
            // Filtered by `has_integral`.
            _ => f64::NAN,
        }
    }
}

fn check_critical(kind: EquationKind, tc: f64, min: f64, max: f64) -> CorrelationResult<()> {
    if tc <= 0.0 {
        return Err(CorrelationError::validation(
            kind.name(),
            format!("Tc must be positive, got {tc}"),
        ));
    }
    if min < 0.0 || max > tc {
        return Err(CorrelationError::validation(
            kind.name(),
            format!("range [{min}, {max}] must lie within [0, Tc = {tc}]"),
        ));
    }
    Ok(())
}

/// (coefficient at ω, exponent) for each Morgan-Kobayashi term.
fn mk_terms(omega: f64) -> impl Iterator<Item = (f64, f64)> {
    MK_COEFFS
        .iter()
        .zip(MK_EXPONENTS)
        .map(move |(b, e)| (b[0] + omega * (b[1] + omega * b[2]), e))
}

fn velasco_factor(omega: f64) -> f64 {
    7.2729 + 10.4962 * omega + 0.6061 * omega * omega
}

fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn polynomial_derivative(coeffs: &[f64], x: f64, order: u32) -> f64 {
    let k = order as usize;
    if k >= coeffs.len() {
        return 0.0;
    }
    let derived: Vec<f64> = coeffs[k..]
        .iter()
        .enumerate()
        .map(|(j, c)| c * falling_factorial(j + k, k))
        .collect();
    horner(&derived, x)
}

/// n (n−1) ... (n−k+1)
fn falling_factorial(n: usize, k: usize) -> f64 {
    ((n + 1 - k)..=n).map(|i| i as f64).product()
}

fn factorial(n: u32) -> f64 {
    (1..=n).map(f64::from).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::{Tolerances, nearly_equal};

    fn tight() -> Tolerances {
        Tolerances::relative(1e-12)
    }

    #[test]
    fn arity_is_enforced() {
        assert!(Equation::from_coefficients(EquationKind::Antoine, &[1.0, 2.0]).is_err());
        assert!(Equation::from_coefficients(EquationKind::Polynomial, &[]).is_err());
        assert!(Equation::from_coefficients(EquationKind::Polynomial, &[1.0; 11]).is_err());
        assert!(Equation::from_coefficients(EquationKind::Polynomial, &[1.0; 10]).is_ok());
    }

    #[test]
    fn non_finite_coefficient_rejected() {
        let err = Equation::from_coefficients(EquationKind::Pitzer, &[645.6, f64::NAN]).unwrap_err();
        assert!(err.to_string().contains("coefficient 1"));
    }

    #[test]
    fn coefficients_round_trip_in_order() {
        for kind in EquationKind::ALL {
            let n = match kind.arity() {
                Arity::Exact(n) => n,
                Arity::Between(_, hi) => hi,
            };
            let coeffs: Vec<f64> = (0..n).map(|i| i as f64 + 0.5).collect();
            let eq = Equation::from_coefficients(kind, &coeffs).unwrap();
            assert_eq!(eq.kind(), kind);
            assert_eq!(eq.coefficients(), coeffs);
            assert_eq!(EquationKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn watson_reference_value() {
        let eq = Equation::from_coefficients(EquationKind::Watson, &[43908.0, 300.0, 647.14]).unwrap();
        assert!(nearly_equal(eq.evaluate(320.0), 42928.990094915454, tight()));
    }

    #[test]
    fn pitzer_reference_value() {
        let eq = Equation::from_coefficients(EquationKind::Pitzer, &[645.6, 0.35017]).unwrap();
        assert!(nearly_equal(eq.evaluate(452.0), 36696.749078320056, tight()));
    }

    #[test]
    fn velasco_reference_values() {
        let eq = Equation::from_coefficients(EquationKind::Velasco, &[751.35, 0.302]).unwrap();
        assert!(nearly_equal(eq.evaluate(553.15), 39524.251054691274, tight()));
        let eq = Equation::from_coefficients(EquationKind::Velasco, &[476.0, 0.5559]).unwrap();
        assert!(nearly_equal(eq.evaluate(333.2), 33299.428636069264, tight()));
    }

    #[test]
    fn morgan_kobayashi_reference_values() {
        let eq = Equation::from_coefficients(EquationKind::MorganKobayashi, &[751.35, 0.302]).unwrap();
        assert!(nearly_equal(eq.evaluate(553.15), 38728.00667307733, tight()));
        let eq = Equation::from_coefficients(EquationKind::MorganKobayashi, &[469.69, 0.2507]).unwrap();
        assert!(nearly_equal(eq.evaluate(298.15), 25940.988533726406, tight()));
    }

    #[test]
    fn clapeyron_reference_values() {
        // ΔZ = 1 and Psat = 1 atm when omitted.
        let eq = Equation::from_coefficients(EquationKind::Clapeyron, &[466.0, 5.55e6]).unwrap();
        assert!(nearly_equal(eq.evaluate(294.0), 26512.36357131963, tight()));
        assert_eq!(eq.coefficients(), vec![466.0, 5.55e6, 1.0, 101_325.0]);

        let eq = Equation::from_coefficients(EquationKind::Clapeyron, &[466.0, 5.55e6, 0.98, 5e4]).unwrap();
        assert!(nearly_equal(eq.evaluate(264.0), 23370.947571814384, tight()));
    }

    #[test]
    fn slope_at_critical_point_is_an_error() {
        let tc = 647.14;
        let cases = [
            (EquationKind::Watson, vec![43908.0, 300.0, tc]),
            (EquationKind::Pitzer, vec![tc, 0.344]),
            (EquationKind::Velasco, vec![tc, 0.344]),
            (EquationKind::MorganKobayashi, vec![tc, 0.344]),
            (EquationKind::Dippr106, vec![tc, 5.2053e7, 0.3199, -0.212, 0.25795, 0.0]),
        ];
        for (kind, coeffs) in cases {
            let eq = Equation::from_coefficients(kind, &coeffs).unwrap();
            assert!(eq.evaluate(tc).is_finite(), "{kind}");
            assert!(
                matches!(
                    eq.derivative(tc, 1),
                    Err(CorrelationError::NonFinite {
                        operation: Operation::Derivative { order: 1 },
                        ..
                    })
                ),
                "{kind}"
            );
        }
    }

    #[test]
    fn clapeyron_range_must_stop_below_critical() {
        let eq = Equation::from_coefficients(EquationKind::Clapeyron, &[466.0, 5.55e6]).unwrap();
        let t = |min, max| ValidRange::new(Axis::Temperature, min, max).unwrap();
        assert!(eq.check_domain(&t(200.0, 460.0)).is_ok());
        assert!(eq.check_domain(&t(200.0, 466.0)).is_err());
        let bad_pc = Equation::from_coefficients(EquationKind::Clapeyron, &[466.0, -1.0]).unwrap();
        assert!(bad_pc.check_domain(&t(200.0, 460.0)).is_err());
    }

    #[test]
    fn polynomial_derivatives_and_integral() {
        // y = 1 + 2x + 3x²
        let eq = Equation::from_coefficients(EquationKind::Polynomial, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(eq.evaluate(2.0), 17.0);
        assert_eq!(eq.derivative(2.0, 1).unwrap(), 14.0);
        assert_eq!(eq.derivative(2.0, 2).unwrap(), 6.0);
        assert_eq!(eq.derivative(2.0, 3).unwrap(), 0.0);
        // ∫₀² = x + x² + x³ = 14
        assert_eq!(eq.integral(0.0, 2.0).unwrap(), 14.0);
        assert_eq!(eq.integral(2.0, 0.0).unwrap(), -14.0);
    }

    #[test]
    fn constant_is_flat() {
        let eq = Equation::from_coefficients(EquationKind::Constant, &[1.44]).unwrap();
        assert_eq!(eq.evaluate(1e6), 1.44);
        assert_eq!(eq.derivative(10.0, 5).unwrap(), 0.0);
        assert_eq!(eq.integral(100.0, 300.0).unwrap(), 1.44 * 200.0);
    }

    #[test]
    fn higher_order_derivative_unsupported() {
        let eq = Equation::from_coefficients(EquationKind::Antoine, &[10.196, 1730.63, -39.724]).unwrap();
        assert!(eq.derivative(350.0, 1).is_ok());
        let err = eq.derivative(350.0, 2).unwrap_err();
        assert!(matches!(
            err,
            CorrelationError::Unsupported {
                operation: Operation::Derivative { order: 2 },
                ..
            }
        ));
        assert!(matches!(
            eq.integral(300.0, 350.0),
            Err(CorrelationError::Unsupported {
                operation: Operation::Integral,
                ..
            })
        ));
    }

    #[test]
    fn antoine_inverse_undoes_antoine() {
        let (a, b, c) = (10.19621302, 1730.63, -39.724);
        let forward = Equation::from_coefficients(EquationKind::Antoine, &[a, b, c]).unwrap();
        let inverse = Equation::from_coefficients(EquationKind::AntoineInverse, &[a, b, c]).unwrap();
        let p = forward.evaluate(373.15);
        assert!(nearly_equal(inverse.evaluate(p), 373.15, Tolerances::relative(1e-10)));
    }

    #[test]
    fn domain_checks() {
        let t = |min, max| ValidRange::new(Axis::Temperature, min, max).unwrap();
        let eq = Equation::from_coefficients(EquationKind::Pitzer, &[645.6, 0.35]).unwrap();
        assert!(eq.check_domain(&t(300.0, 645.6)).is_ok());
        assert!(eq.check_domain(&t(300.0, 700.0)).is_err());

        let antoine = Equation::from_coefficients(EquationKind::Antoine, &[10.0, 1700.0, -40.0]).unwrap();
        assert!(antoine.check_domain(&t(30.0, 400.0)).is_err());

        let inverse = Equation::from_coefficients(EquationKind::AntoineInverse, &[10.0, 1700.0, -40.0]).unwrap();
        assert!(inverse.check_domain(&t(300.0, 400.0)).is_err(), "wrong axis");

        let constant = Equation::from_coefficients(EquationKind::Constant, &[1.0]).unwrap();
        assert!(constant.check_domain(&ValidRange::unbounded(Axis::Temperature)).is_ok());
        let poly = Equation::from_coefficients(EquationKind::Polynomial, &[1.0]).unwrap();
        assert!(poly.check_domain(&ValidRange::unbounded(Axis::Temperature)).is_err());
    }

    #[test]
    fn evaluation_is_bit_reproducible() {
        let eq = Equation::from_coefficients(EquationKind::Dippr101, &[73.649, -7258.2, -7.3037, 4.1653e-6, 2.0]).unwrap();
        let first = eq.evaluate(373.15);
        for _ in 0..10 {
            assert_eq!(eq.evaluate(373.15).to_bits(), first.to_bits());
        }
    }
}
