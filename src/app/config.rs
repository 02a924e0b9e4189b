//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::frame::AnalyzerConfig;
use crate::gesture::wheelstop::WheelstopConfig;
use crate::session::SessionConfig;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification thresholds
    pub analyzer: AnalyzerConfig,
    /// Idle-delay timing
    pub wheelstop: WheelstopConfig,
    /// Host-facing session settings
    pub session: SessionConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.analyzer.velocity <= 0.0 {
            return Err(crate::Error::Config(format!(
                "velocity must be > 0, got {}",
                self.analyzer.velocity
            )));
        }
        if self.analyzer.wheelstop_max_velocity <= 0.0 {
            return Err(crate::Error::Config(format!(
                "wheelstop_max_velocity must be > 0, got {}",
                self.analyzer.wheelstop_max_velocity
            )));
        }
        if self.wheelstop.wheelstop_delay < 0.0 {
            return Err(crate::Error::Config(format!(
                "wheelstop_delay must be >= 0, got {}",
                self.wheelstop.wheelstop_delay
            )));
        }
        if self.wheelstop.wheelstop_delay_max < self.wheelstop.wheelstop_delay {
            return Err(crate::Error::Config(format!(
                "wheelstop_delay_max must be >= wheelstop_delay, got {} < {}",
                self.wheelstop.wheelstop_delay_max, self.wheelstop.wheelstop_delay
            )));
        }
        if self.session.event_prefix.trim().is_empty() {
            return Err(crate::Error::Config(
                "event_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".wheelwatch").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
