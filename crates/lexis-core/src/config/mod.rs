//! Configuration for every subsystem, loadable from TOML.

pub mod defaults;
mod learning_config;
mod observability_config;
mod storage_config;

use serde::{Deserialize, Serialize};

pub use learning_config::LearningConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;

use crate::errors::{LexisError, LexisResult};

/// Root configuration. Missing sections and fields fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexisConfig {
    pub storage: StorageConfig,
    pub learning: LearningConfig,
    pub observability: ObservabilityConfig,
}

impl LexisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> LexisResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| LexisError::ConfigError(e.to_string()))?;
        config.learning.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> LexisResult<String> {
        toml::to_string_pretty(self).map_err(|e| LexisError::ConfigError(e.to_string()))
    }
}
