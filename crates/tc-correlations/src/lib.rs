//! tc-correlations: empirical correlation models for thermocorr.
//!
//! Provides:
//! - A closed set of equation forms (`Equation`, `EquationKind`)
//! - Correlation models with a validity domain (`CorrelationModel`, `ValidRange`)
//! - Extrapolation policies applied outside that domain
//! - Interchangeable bulk evaluation backends (`Evaluator`)
//!
//! # Example
//!
//! ```
//! use tc_correlations::{Axis, CorrelationModel, EquationKind, ExtrapolationPolicy, ValidRange};
//!
//! let range = ValidRange::new(Axis::Temperature, 300.0, 640.0).unwrap();
//! let hvap = CorrelationModel::from_coefficients(EquationKind::Pitzer, &[645.6, 0.35017], range).unwrap();
//!
//! let inside = hvap.evaluate(452.0);
//! let clamped = ExtrapolationPolicy::Constant.evaluate(&hvap, 250.0).unwrap();
//! assert_eq!(clamped.value, hvap.evaluate(300.0));
//! assert!(inside > 0.0);
//! ```

pub mod equation;
pub mod error;
pub mod evaluator;
pub mod extrapolation;
pub mod model;
pub mod range;

pub use equation::{Arity, Equation, EquationKind, MAX_POLYNOMIAL_TERMS};
pub use error::{CorrelationError, CorrelationResult, Operation};
pub use evaluator::{
    DEFAULT_PARALLEL_MIN_LEN, Evaluator, EvaluatorBackend, ParallelEvaluator, SerialEvaluator,
};
pub use extrapolation::{Extrapolated, ExtrapolationPolicy};
pub use model::CorrelationModel;
pub use range::{Axis, ValidRange};
