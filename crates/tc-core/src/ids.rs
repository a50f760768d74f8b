use core::fmt;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};

/// Immutable key identifying a compound.
///
/// Usually a CAS registry number, but any non-empty canonical string is
/// accepted by [`ChemicalId::new`]. Cloning is cheap (shared string).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChemicalId(Arc<str>);

impl ChemicalId {
    /// Create an identifier from any non-empty string (whitespace trimmed).
    pub fn new(value: impl AsRef<str>) -> CoreResult<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidIdentifier {
                value: value.as_ref().to_string(),
                reason: "identifier is empty",
            });
        }
        Ok(Self(Arc::from(trimmed)))
    }

    /// Create an identifier that must be a valid CAS registry number.
    pub fn cas(value: impl AsRef<str>) -> CoreResult<Self> {
        let trimmed = value.as_ref().trim();
        check_cas(trimmed)?;
        Ok(Self(Arc::from(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the identifier is a well-formed CAS number with a valid check digit.
    pub fn is_cas(&self) -> bool {
        check_cas(&self.0).is_ok()
    }
}

impl fmt::Debug for ChemicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChemicalId({})", self.0)
    }
}

impl fmt::Display for ChemicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ChemicalId {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ChemicalId {
    type Error = CoreError;

    fn try_from(value: &str) -> CoreResult<Self> {
        Self::new(value)
    }
}

impl From<ChemicalId> for String {
    fn from(id: ChemicalId) -> Self {
        id.0.to_string()
    }
}

/// Name of a correlation method (data source or estimation scheme).
///
/// Unique within one (compound, property) candidate list.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(Arc<str>);

impl MethodId {
    pub fn new(value: impl AsRef<str>) -> CoreResult<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidIdentifier {
                value: value.as_ref().to_string(),
                reason: "method name is empty",
            });
        }
        Ok(Self(Arc::from(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodId({})", self.0)
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MethodId {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for MethodId {
    type Error = CoreError;

    fn try_from(value: &str) -> CoreResult<Self> {
        Self::new(value)
    }
}

impl From<MethodId> for String {
    fn from(id: MethodId) -> Self {
        id.0.to_string()
    }
}

/// Validate a CAS registry number (`NNNNNNN-NN-N`).
///
/// The first group has 2 to 7 digits, the second exactly 2, the last is the
/// check digit: sum of digit * position over the other digits read right to
/// left, modulo 10.
pub fn check_cas(value: &str) -> CoreResult<()> {
    let invalid = |reason| CoreError::InvalidIdentifier {
        value: value.to_string(),
        reason,
    };

    let mut parts = value.split('-');
    let (Some(first), Some(second), Some(check), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid("CAS number must have three dash-separated groups"));
    };

    if !(2..=7).contains(&first.len()) || second.len() != 2 || check.len() != 1 {
        return Err(invalid("CAS number groups have wrong lengths"));
    }

    let digits: Option<Vec<u32>> = first
        .chars()
        .chain(second.chars())
        .map(|c| c.to_digit(10))
        .collect();
    let (Some(digits), Some(check_digit)) = (digits, check.chars().next().and_then(|c| c.to_digit(10)))
    else {
        return Err(invalid("CAS number contains non-digit characters"));
    };

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| (i as u32 + 1) * d)
        .sum();

    if sum % 10 != check_digit {
        return Err(invalid("CAS check digit mismatch"));
    }
    Ok(())
}
