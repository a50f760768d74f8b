//! Engine configuration.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tc_correlations::{DEFAULT_PARALLEL_MIN_LEN, Evaluator, EvaluatorBackend, ExtrapolationPolicy};

use crate::error::{PropertyError, PropertyResult};
use crate::record::is_json;

/// Default allowed deviation of a mixture's mole fraction sum from 1.
pub const DEFAULT_COMPOSITION_TOLERANCE: f64 = 1e-6;

/// Settings applied when a registry is bootstrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Policy for records that do not name one.
    pub default_extrapolation: ExtrapolationPolicy,
    /// Backend for bulk evaluation.
    pub evaluator: EvaluatorBackend,
    /// Minimum points per parallel work item.
    pub parallel_min_len: usize,
    /// Allowed |Σx − 1| for mixture compositions.
    pub composition_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_extrapolation: ExtrapolationPolicy::None,
            evaluator: EvaluatorBackend::Serial,
            parallel_min_len: DEFAULT_PARALLEL_MIN_LEN,
            composition_tolerance: DEFAULT_COMPOSITION_TOLERANCE,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(content: &str) -> PropertyResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> PropertyResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> PropertyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn validate(&self) -> PropertyResult<()> {
        let tol = self.composition_tolerance;
        if !tol.is_finite() || tol <= 0.0 || tol >= 0.1 {
            return Err(PropertyError::Config(format!(
                "composition_tolerance must be in (0, 0.1), got {tol}"
            )));
        }
        if self.parallel_min_len == 0 {
            return Err(PropertyError::Config("parallel_min_len must be at least 1".into()));
        }
        Ok(())
    }

    /// Instantiate the configured evaluator backend.
    pub fn build_evaluator(&self) -> Arc<dyn Evaluator> {
        self.evaluator.build(self.parallel_min_len)
    }
}
