//! YAML configuration for named diffusion strategies.

use errdiff_core::{Diffusion, KernelDiffusion, KernelEntry, NoDiffusion};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

/// Dithering configuration loaded from YAML
///
/// ```yaml
/// default_strategy: fs
/// strategies:
///   none:
///     type: none
///   fs:
///     type: kernel
///     name: Floyd-Steinberg
///     tag: _FS
///     divisor: 16
///     entries: [[1, 0, 7], [-1, 1, 3], [0, 1, 5], [1, 1, 1]]
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DitherConfig {
    /// Named strategy definitions
    #[serde(default)]
    pub strategies: HashMap<String, StrategyConfig>,

    /// Strategy used when the caller does not name one
    #[serde(default = "default_strategy")]
    pub default_strategy: Option<String>,
}

fn default_strategy() -> Option<String> {
    Some("none".to_string())
}

/// Definition of a single diffusion strategy
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Plain color reduction, error is discarded
    None,

    /// Weight-table diffusion
    Kernel {
        /// Descriptive name
        name: String,

        /// Short tag for output naming
        tag: String,

        /// Divisor applied to every weight
        divisor: u32,

        /// `[dx, dy, weight]` triples
        entries: Vec<KernelEntry>,
    },
}

impl StrategyConfig {
    /// Build the strategy this entry describes.
    pub fn build(&self) -> Result<Box<dyn Diffusion + Send + Sync>, errdiff_core::BufferError> {
        match self {
            StrategyConfig::None => Ok(Box::new(NoDiffusion)),
            StrategyConfig::Kernel {
                name,
                tag,
                divisor,
                entries,
            } => Ok(Box::new(KernelDiffusion::new(
                name.clone(),
                tag.clone(),
                entries.clone(),
                *divisor,
            )?)),
        }
    }
}

impl DitherConfig {
    /// Parse configuration from a YAML string.
    ///
    /// The built-in `none` strategy is always available unless the file
    /// redefines it. Every strategy is built once and the default must name
    /// one of them, so invalid kernels and dangling defaults are rejected
    /// here rather than on first use.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config
            .strategies
            .entry("none".to_string())
            .or_insert(StrategyConfig::None);
        config.validate()?;
        Ok(config)
    }

    /// Read and parse configuration from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    strategies = config.strategies.len(),
                    default_strategy = ?config.default_strategy,
                    "Loaded dithering configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, strategy) in &self.strategies {
            strategy
                .build()
                .map_err(|source| ConfigError::InvalidStrategy {
                    name: name.clone(),
                    source,
                })?;
        }
        if let Some(name) = &self.default_strategy {
            if !self.strategies.contains_key(name) {
                return Err(ConfigError::UnknownDefault(name.clone()));
            }
        }
        Ok(())
    }

    /// Get a strategy definition by name
    pub fn strategy(&self, name: &str) -> Option<&StrategyConfig> {
        self.strategies.get(name)
    }

    /// Get the default strategy definition
    pub fn get_default_strategy(&self) -> Option<&StrategyConfig> {
        self.default_strategy
            .as_ref()
            .and_then(|name| self.strategies.get(name))
    }
}

impl Default for DitherConfig {
    fn default() -> Self {
        let mut strategies = HashMap::new();
        strategies.insert("none".to_string(), StrategyConfig::None);

        Self {
            strategies,
            default_strategy: Some("none".to_string()),
        }
    }
}
