//! tc-properties: pure-compound property models and the registry that owns them.
//!
//! A [`Registry`] is bootstrapped once from a coefficient [`Database`]. Each
//! (compound, property) pair becomes a [`PropertyModel`] holding its candidate
//! correlations in priority order; queries pick a method deterministically
//! and apply that method's extrapolation policy outside its domain.
//!
//! # Example
//!
//! ```
//! use tc_core::ChemicalId;
//! use tc_properties::{Database, EngineConfig, PropertyKind, Registry};
//!
//! let db = Database::from_yaml_str(r#"
//! correlations:
//!   - compound: 7732-18-5
//!     property: vapor_pressure
//!     method: DIPPR_101
//!     equation: dippr101
//!     coefficients: [73.649, -7258.2, -7.3037, 4.1653e-6, 2]
//!     valid_range: [273.16, 647.1]
//! "#).unwrap();
//!
//! let (registry, report) = Registry::bootstrap(db, EngineConfig::default()).unwrap();
//! assert!(report.is_clean());
//!
//! let water = ChemicalId::cas("7732-18-5").unwrap();
//! let p = registry.get_property(&water, PropertyKind::VaporPressure, 373.15, None).unwrap();
//! assert!((p - 101_325.0).abs() < 1_000.0);
//! ```

pub mod catalog;
pub mod conditions;
pub mod config;
pub mod error;
pub mod kind;
pub mod property;
pub mod record;
pub mod registry;
pub mod sweeps;

pub use catalog::MethodCatalog;
pub use conditions::Conditions;
pub use config::{DEFAULT_COMPOSITION_TOLERANCE, EngineConfig};
pub use error::{PropertyError, PropertyResult, ValidationError};
pub use kind::PropertyKind;
pub use property::{Candidate, Evaluation, PropertyModel};
pub use record::{CompoundRecord, CorrelationRecord, Database};
pub use registry::{CompoundInfo, LoadReport, RecordSection, Registry, SkippedRecord};
pub use sweeps::{Spacing, SweepDefinition, SweepError, SweepResult, sweep_property};
