//! YAML configuration for sampling defaults.
//!
//! ```yaml
//! version: 1
//! sampler:
//!   tolerance: 0.001
//!   max_depth: 16
//!   non_finite: keep
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::sampling::{AdaptiveSampler, NonFinitePolicy, DEFAULT_MAX_DEPTH, DEFAULT_TOLERANCE};

/// Sampler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Midpoint error tolerance.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum subdivision depth.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// What to do with non-finite function values.
    #[serde(default)]
    pub non_finite: NonFinitePolicy,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}
fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}
fn default_version() -> u32 {
    1
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_depth: default_max_depth(),
            non_finite: NonFinitePolicy::default(),
        }
    }
}

impl SamplerConfig {
    /// Build a validated sampler.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a negative or NaN tolerance or
    /// a depth above the supported limit.
    pub fn sampler(&self) -> Result<AdaptiveSampler> {
        let sampler = AdaptiveSampler::new()
            .tolerance(self.tolerance)
            .max_depth(self.max_depth)
            .non_finite(self.non_finite);
        sampler.validate()?;
        Ok(sampler)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config format version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Sampler settings.
    #[serde(default)]
    pub sampler: SamplerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            sampler: SamplerConfig::default(),
        }
    }
}

impl Config {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded configuration");
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::Config {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Serializes the configuration to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::Config {
            line: 0,
            message: e.to_string(),
        })
    }
}
