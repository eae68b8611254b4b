//! Engine configuration loaded from `~/.huetag/config.toml`.
//!
//! The file is optional; absent fields fall back to their defaults. Set
//! `HUETAG_HOME` to point the engine at an isolated directory (tests and
//! CI use this to avoid touching real user data).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::color::{LuminanceBand, DEFAULT_MAX_LUMINANCE, DEFAULT_MIN_LUMINANCE};
use crate::tag::ColorTagPattern;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid luminance band [{min}, {max}]: bounds must satisfy 0 <= min < max <= 1")]
    InvalidBand { min: f64, max: f64 },
}

/// Engine settings.
///
/// All fields are optional at the TOML level; missing fields resolve to
/// the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Lower edge of the acceptable display-luminance band.
    #[serde(default = "default_min_luminance")]
    pub min_luminance: f64,

    /// Upper edge of the acceptable display-luminance band.
    #[serde(default = "default_max_luminance")]
    pub max_luminance: f64,

    /// Quantize assigned colors to the reduced 512-color palette.
    #[serde(default)]
    pub limit_palette: bool,

    /// Fixed prefix for color-tag labels (empty by default).
    #[serde(default)]
    pub tag_prefix: String,
}

fn default_min_luminance() -> f64 {
    DEFAULT_MIN_LUMINANCE
}

fn default_max_luminance() -> f64 {
    DEFAULT_MAX_LUMINANCE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_luminance: DEFAULT_MIN_LUMINANCE,
            max_luminance: DEFAULT_MAX_LUMINANCE,
            limit_palette: false,
            tag_prefix: String::new(),
        }
    }
}

impl EngineConfig {
    /// Load the configuration from `config.toml` under [`config_home`],
    /// returning defaults when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_home().join("config.toml");
        if !path.exists() {
            debug!("config not found at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the luminance band invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = self.min_luminance >= 0.0
            && self.max_luminance <= 1.0
            && self.min_luminance < self.max_luminance;
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidBand {
                min: self.min_luminance,
                max: self.max_luminance,
            })
        }
    }

    pub fn luminance_band(&self) -> LuminanceBand {
        LuminanceBand {
            min: self.min_luminance,
            max: self.max_luminance,
        }
    }

    pub fn color_tag_pattern(&self) -> ColorTagPattern {
        ColorTagPattern::new(&self.tag_prefix)
    }
}

/// The engine's user-scoped data directory: `HUETAG_HOME` when set,
/// `~/.huetag` otherwise.
pub fn config_home() -> PathBuf {
    if let Ok(home) = std::env::var("HUETAG_HOME") {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".huetag")
}
