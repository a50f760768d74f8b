//! tc-mixing: mixture properties from pure-component correlations.
//!
//! A [`MixtureProperty`] borrows each component's
//! [`PropertyModel`](tc_properties::PropertyModel) from the registry,
//! evaluates them at the requested point and reduces the values with a
//! [`MixingRule`]. Compositions are validated but never renormalized.
//!
//! # Example
//!
//! ```
//! use tc_core::ChemicalId;
//! use tc_mixing::{Mixture, MixingRule, MixtureQuery};
//! use tc_properties::{Database, EngineConfig, PropertyKind, Registry};
//!
//! let db = Database::from_yaml_str(r#"
//! correlations:
//!   - { compound: A, property: thermal_conductivity, method: M, equation: constant, coefficients: [10.0] }
//!   - { compound: B, property: thermal_conductivity, method: M, equation: constant, coefficients: [20.0] }
//! "#).unwrap();
//! let (registry, _) = Registry::bootstrap(db, EngineConfig::default()).unwrap();
//!
//! let a = ChemicalId::new("A").unwrap();
//! let b = ChemicalId::new("B").unwrap();
//! let mixture = Mixture::new(vec![(a, 0.3), (b, 0.7)], 1e-9).unwrap();
//! let k = registry
//!     .get_mixture_property(&mixture, PropertyKind::ThermalConductivity, MixingRule::MoleFractionWeighted, 300.0)
//!     .unwrap();
//! assert!((k - 17.0).abs() < 1e-12);
//! ```

pub mod composition;
pub mod error;
pub mod mixture;
pub mod rule;

pub use composition::{Mixture, validate_fractions};
pub use error::{MixingError, MixingResult};
pub use mixture::{MixtureProperty, MixtureQuery};
pub use rule::{CombineFn, CustomRule, CustomRules, MixingRule};
