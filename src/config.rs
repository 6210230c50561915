//! Runtime configuration
//!
//! Loaded from TOML; every field has a default so a partial (or missing)
//! file works. CLI flags override what the file sets.
//!
//! ```toml
//! flourish_ms = 2500
//! hide_policy = "restart"
//!
//! [server]
//! addr = "127.0.0.1:3000"
//!
//! [scorer]
//! damping = 1.0
//! ```

use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::core::HidePolicy;
use crate::error::{MoodError, Result};
use crate::{FLOURISH_DURATION_MS, LEXICON_DAMPING};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flourish visibility after an analysis (milliseconds)
    pub flourish_ms: u64,
    /// Pending hide handling on repeated analyses
    pub hide_policy: HidePolicy,
    pub server: ServerConfig,
    pub scorer: ScorerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub damping: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flourish_ms: FLOURISH_DURATION_MS,
            hide_policy: HidePolicy::default(),
            server: ServerConfig::default(),
            scorer: ScorerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            damping: LEXICON_DAMPING,
        }
    }
}

impl Config {
    /// Read and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| MoodError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| MoodError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.flourish_ms == 0 {
            return Err(MoodError::InvalidConfig("flourish_ms must be greater than 0".into()));
        }
        if !self.scorer.damping.is_finite() || self.scorer.damping < 0.0 {
            return Err(MoodError::InvalidConfig(format!(
                "scorer.damping must be a finite value >= 0, got {}",
                self.scorer.damping
            )));
        }
        if self.server.addr.trim().is_empty() {
            return Err(MoodError::InvalidConfig("server.addr must not be empty".into()));
        }
        Ok(())
    }

    pub fn flourish_duration(&self) -> Duration {
        Duration::from_millis(self.flourish_ms)
    }
}
