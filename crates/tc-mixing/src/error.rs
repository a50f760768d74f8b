//! Mixing errors.

use tc_properties::PropertyError;
use thiserror::Error;

pub type MixingResult<T> = Result<T, MixingError>;

#[derive(Error, Debug)]
pub enum MixingError {
    /// Empty, negative, non-finite, duplicated or not summing to 1.
    #[error("Invalid composition: {what}")]
    InvalidComposition { what: String },

    /// A rule needs per-component data the registry does not have.
    #[error("Missing auxiliary data: {what}")]
    MissingAuxiliaryData { what: String },

    #[error("Unknown mixing rule: '{id}'")]
    UnknownRule { id: String },

    #[error("Mixing rule {rule} produced a non-finite value from component values {values:?}")]
    NonFinite { rule: String, values: Vec<f64> },

    #[error(transparent)]
    Property(#[from] PropertyError),
}

pub(crate) fn invalid_composition(what: impl Into<String>) -> MixingError {
    MixingError::InvalidComposition { what: what.into() }
}
