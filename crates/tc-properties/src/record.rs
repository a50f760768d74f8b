//! Coefficient records: the serialized form of a correlation database.
//!
//! Records are deliberately loose (plain strings and numbers) so one bad
//! entry fails validation at bootstrap instead of failing the whole parse.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PropertyResult;

/// A full coefficient database as handed to [`crate::Registry::bootstrap`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub compounds: Vec<CompoundRecord>,
    #[serde(default)]
    pub correlations: Vec<CorrelationRecord>,
}

/// Per-compound metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// kg/mol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molar_mass: Option<f64>,
}

/// One fitted correlation for one (compound, property, method).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRecord {
    pub compound: String,
    /// Property name, e.g. `vapor_pressure`.
    pub property: String,
    pub method: String,
    /// Equation form name, e.g. `dippr101`.
    pub equation: String,
    pub coefficients: Vec<f64>,
    /// `[min, max]` on the property's axis. Optional only for `constant`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_range: Option<[f64; 2]>,
    /// Lower value is preferred.
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Overrides the engine's default policy for this correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrapolation: Option<String>,
}

impl Database {
    pub fn from_json_str(content: &str) -> PropertyResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> PropertyResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read a database file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> PropertyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn save(&self, path: &Path) -> PropertyResult<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Append another database's records after this one's.
    pub fn merge(&mut self, other: Database) {
        self.compounds.extend(other.compounds);
        self.correlations.extend(other.correlations);
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
