//! Engine configuration.
//!
//! Callers configure the trigger engine at startup via `EngineConfig`.
//! The configuration is plain data: it can be built in code with the
//! builder methods or loaded from JSON.
//!
//! ```
//! use drone_ccg::core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "max_chain_depth": 8 }"#).unwrap();
//! assert_eq!(config.max_chain_depth, 8);
//!
//! let default = EngineConfig::default();
//! assert_eq!(default.max_chain_depth, EngineConfig::DEFAULT_MAX_CHAIN_DEPTH);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The cascade ceiling must allow at least the outermost call.
    #[error("max_chain_depth must be at least 1")]
    ZeroChainDepth,

    /// The configuration JSON could not be parsed.
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Trigger engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Recursion ceiling for nested cascades.
    ///
    /// A call whose chain depth has reached this value fires nothing.
    /// With the default of 20 the outermost call runs at depth 0 and the
    /// deepest nested cascade at depth 19.
    pub max_chain_depth: u32,
}

impl EngineConfig {
    /// Default recursion ceiling.
    pub const DEFAULT_MAX_CHAIN_DEPTH: u32 = 20;

    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recursion ceiling (builder pattern).
    #[must_use]
    pub fn with_max_chain_depth(mut self, depth: u32) -> Self {
        self.max_chain_depth = depth;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chain_depth == 0 {
            return Err(ConfigError::ZeroChainDepth);
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: Self::DEFAULT_MAX_CHAIN_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::new();
        assert_eq!(config.max_chain_depth, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new().with_max_chain_depth(3);
        assert_eq!(config.max_chain_depth, 3);
    }

    #[test]
    fn test_from_json_missing_fields_use_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = EngineConfig::from_json(r#"{ "max_chain_depth": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroChainDepth));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
