//! tc-core: stable foundation for thermocorr.
//!
//! Contains:
//! - ids (chemical identifiers, CAS validation, method names)
//! - numeric (comparison tolerances, positivity checks)
//! - units (uom SI types + constructors + gas constant)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
