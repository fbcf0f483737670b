//! Engine configuration.
//!
//! Precedence, lowest first: built-in defaults, a JSON config file, the
//! `SLOTS_UNIT_MINUTES` environment variable, then explicit caller overrides.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::units::DEFAULT_UNIT_MINUTES;

pub const UNIT_MINUTES_ENV: &str = "SLOTS_UNIT_MINUTES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Length of each bookable unit offered on the reselection path.
    pub unit_minutes: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            unit_minutes: DEFAULT_UNIT_MINUTES,
        }
    }
}

impl EngineConfig {
    /// # Errors
    /// Returns `SlotError::InvalidConfig` unless `unit_minutes` is within `1..=1440`.
    pub fn validate(self) -> Result<Self> {
        if self.unit_minutes == 0 || self.unit_minutes > 24 * 60 {
            return Err(SlotError::InvalidConfig(format!(
                "unit_minutes must be between 1 and 1440, got {}",
                self.unit_minutes
            )));
        }
        Ok(self)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| SlotError::InvalidConfig(format!("config JSON: {}", e)))?;
        config.validate()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SlotError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Apply `SLOTS_UNIT_MINUTES` from the process environment, if set.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, which maps a variable name to its value.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(UNIT_MINUTES_ENV) {
            self.unit_minutes = raw.trim().parse().map_err(|_| {
                SlotError::InvalidConfig(format!("{} is not a minute count: {:?}", UNIT_MINUTES_ENV, raw))
            })?;
        }
        self.validate()
    }
}
