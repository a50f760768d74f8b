//! Closed-form derivatives and integrals checked against numerical estimates.
//!
//! Coefficients are realistic literature sets (mostly water) so the checks
//! exercise the forms over the ranges they are actually used on.

use proptest::prelude::*;
use tc_core::{Tolerances, nearly_equal};
use tc_correlations::{Axis, CorrelationModel, EquationKind, ExtrapolationPolicy, ValidRange};

fn model(kind: EquationKind, coeffs: &[f64], axis: Axis, min: f64, max: f64) -> CorrelationModel {
    let range = ValidRange::new(axis, min, max).unwrap();
    CorrelationModel::from_coefficients(kind, coeffs, range).unwrap()
}

fn catalog() -> Vec<CorrelationModel> {
    use Axis::*;
    use EquationKind::*;
    vec![
        model(Constant, &[1.85], Temperature, 200.0, 400.0),
        model(Polynomial, &[1.0, 0.02, -3e-5, 1e-8], Temperature, 200.0, 600.0),
        model(Antoine, &[10.19621302, 1730.63, -39.724], Temperature, 280.0, 440.0),
        model(AntoineInverse, &[10.19621302, 1730.63, -39.724], Pressure, 1.0e3, 1.0e6),
        model(Dippr101, &[73.649, -7258.2, -7.3037, 4.1653e-6, 2.0], Temperature, 273.16, 647.1),
        model(Dippr105, &[5.459, 0.30542, 647.13, 0.081], Temperature, 273.16, 640.0),
        model(Dippr106, &[647.13, 5.2053e7, 0.3199, -0.212, 0.25795, 0.0], Temperature, 273.16, 640.0),
        model(Watson, &[43908.0, 300.0, 647.14], Temperature, 273.16, 640.0),
        model(Pitzer, &[645.6, 0.35017], Temperature, 300.0, 640.0),
        model(Velasco, &[751.35, 0.302], Temperature, 300.0, 740.0),
        model(MorganKobayashi, &[469.69, 0.2507], Temperature, 250.0, 460.0),
        model(Clapeyron, &[466.0, 5.55e6], Temperature, 200.0, 450.0),
        model(Sutherland, &[1.716e-5, 273.15, 110.4], Temperature, 200.0, 1000.0),
        model(Shomate, &[30.092, 6.832514, 6.793435, -2.53448, 0.082139], Temperature, 500.0, 1700.0),
    ]
}

fn central_difference(m: &CorrelationModel, x: f64) -> f64 {
    let h = x.abs() * 1e-6;
    (m.evaluate(x + h) - m.evaluate(x - h)) / (2.0 * h)
}

fn simpson(m: &CorrelationModel, a: f64, b: f64) -> f64 {
    let n = 2000;
    let h = (b - a) / n as f64;
    let mut sum = m.evaluate(a) + m.evaluate(b);
    for i in 1..n {
        let w = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += w * m.evaluate(a + i as f64 * h);
    }
    sum * h / 3.0
}

#[test]
fn first_derivatives_match_finite_differences() {
    let tol = Tolerances {
        abs: 1e-12,
        rel: 1e-6,
    };
    for m in catalog() {
        let (lo, hi) = (m.range().min(), m.range().max());
        for frac in [0.25, 0.5, 0.75] {
            let x = lo + frac * (hi - lo);
            let analytic = m.derivative(x, 1).unwrap();
            let numeric = central_difference(&m, x);
            assert!(
                nearly_equal(analytic, numeric, tol),
                "{}: d/dx at {x} analytic {analytic} numeric {numeric}",
                m.kind()
            );
        }
    }
}

#[test]
fn second_derivatives_where_supported() {
    let tol = Tolerances {
        abs: 1e-12,
        rel: 1e-5,
    };
    for m in catalog() {
        let x = 0.5 * (m.range().min() + m.range().max());
        match m.kind().max_derivative_order() {
            Some(1) => assert!(m.derivative(x, 2).is_err(), "{}", m.kind()),
            _ => {
                let h = x * 1e-5;
                let numeric = (m.derivative(x + h, 1).unwrap() - m.derivative(x - h, 1).unwrap()) / (2.0 * h);
                let analytic = m.derivative(x, 2).unwrap();
                assert!(
                    nearly_equal(analytic, numeric, tol),
                    "{}: analytic {analytic} numeric {numeric}",
                    m.kind()
                );
            }
        }
    }
}

#[test]
fn integrals_match_simpson() {
    let tol = Tolerances {
        abs: 1e-12,
        rel: 1e-8,
    };
    for m in catalog() {
        let (lo, hi) = (m.range().min(), m.range().max());
        let (a, b) = (lo + 0.1 * (hi - lo), lo + 0.9 * (hi - lo));
        match m.definite_integral(a, b) {
            Ok(analytic) => {
                let numeric = simpson(&m, a, b);
                assert!(
                    nearly_equal(analytic, numeric, tol),
                    "{}: analytic {analytic} numeric {numeric}",
                    m.kind()
                );
            }
            Err(_) => assert!(!m.kind().has_integral(), "{} should integrate", m.kind()),
        }
    }
}

#[test]
fn water_vapor_pressure_near_normal_boiling_point() {
    let catalog = catalog();
    let dippr = catalog.iter().find(|m| m.kind() == EquationKind::Dippr101).unwrap();
    let antoine = catalog.iter().find(|m| m.kind() == EquationKind::Antoine).unwrap();
    for m in [dippr, antoine] {
        let p = m.evaluate(373.15);
        assert!((p - 101_325.0).abs() / 101_325.0 < 0.005, "{}: {p}", m.kind());
    }
}

proptest! {
    #[test]
    fn linear_extrapolation_is_continuous_at_lower_bound(eps in 1e-9_f64..1e-2) {
        let m = model(
            EquationKind::Dippr101,
            &[73.649, -7258.2, -7.3037, 4.1653e-6, 2.0],
            Axis::Temperature,
            273.16,
            647.1,
        );
        let lo = m.range().min();
        let expected = m.evaluate(lo) - eps * m.derivative(lo, 1).unwrap();
        let got = ExtrapolationPolicy::Linear.evaluate(&m, lo - eps).unwrap().value;
        prop_assert!(nearly_equal(got, expected, Tolerances::new(1e-12, 1e-12)));

        // Approaching from inside gives the same limit.
        let inside = m.evaluate(lo + eps);
        prop_assert!((got - inside).abs() <= 3.0 * eps * m.derivative(lo, 1).unwrap().abs() + 1e-9);
    }

    #[test]
    fn evaluation_is_deterministic(x in 273.16_f64..647.1) {
        let m = model(
            EquationKind::Dippr106,
            &[647.13, 5.2053e7, 0.3199, -0.212, 0.25795, 0.0],
            Axis::Temperature,
            273.16,
            640.0,
        );
        let x = x.min(640.0);
        prop_assert_eq!(m.evaluate(x).to_bits(), m.evaluate(x).to_bits());
    }
}
