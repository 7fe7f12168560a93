//! Validator configuration
//!
//! Loaded from JSON or built in code. Every field has a default, so `{}` is
//! a valid configuration that reproduces the plain `verify` behavior.

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Deepest nesting level the walker descends into (default: 64)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Report declared `required` attributes that are absent (default: false)
    #[serde(default)]
    pub enforce_required: bool,

    /// Emit structured log events for each run (default: false)
    #[serde(default)]
    pub log_events: bool,
}

fn default_max_depth() -> usize {
    64
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            enforce_required: false,
            log_events: false,
        }
    }
}

impl ValidatorConfig {
    /// Parses a JSON configuration document and validates it
    pub fn from_json(text: &str) -> SchemaResult<Self> {
        let config: ValidatorConfig = serde_json::from_str(text)
            .map_err(|e| SchemaError::InvalidConfig(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Checks field values
    pub fn validate(&self) -> SchemaResult<()> {
        if self.max_depth == 0 {
            return Err(SchemaError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Config with a different depth limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Config that enforces required attributes
    pub fn strict() -> Self {
        Self {
            enforce_required: true,
            ..Default::default()
        }
    }
}
