//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::core::errors::{Result, TranslationError};
use crate::core::injection::DEFAULT_MAX_SEQUENCE_LENGTH;
use crate::core::tag::DepthMode;

/// Prefix for environment overrides, e.g. `TAGTREE_DEPTH_MODE=incremented`
pub const ENV_PREFIX: &str = "TAGTREE";

/// Marker that freezes a whole input line
pub const DEFAULT_UNTRANSLATABLE_MARKER: &str = "non-translatable";

/// Configuration for the tag translator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Parents longer than this many chars skip injection
    pub max_sequence_length: usize,
    pub depth_mode: DepthMode,
    /// Translate sibling subtrees concurrently on the per-child path
    pub concurrent_siblings: bool,
    pub untranslatable_marker: String,
    /// Parse `[...]` / `{...}` spans in input lines
    pub markup: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            depth_mode: DepthMode::Literal,
            concurrent_siblings: false,
            untranslatable_marker: DEFAULT_UNTRANSLATABLE_MARKER.to_string(),
            markup: false,
        }
    }
}

impl EngineConfig {
    /// Load defaults, then an optional config file, then `TAGTREE_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(TranslationError::ConfigError {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            builder = builder.add_source(config::File::from(path));
            info!("Loading config file: {}", path.display());
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TranslationError::FileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_sequence_length == 0 {
            return Err(TranslationError::ConfigError {
                message: "max_sequence_length must be greater than 0".to_string(),
            });
        }

        if self.untranslatable_marker.is_empty() {
            return Err(TranslationError::ConfigError {
                message: "untranslatable_marker must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
