//! Service configuration parameters
//!
//! Which GPIO line drives the status LED, its polarity, and the base
//! interval between pattern steps. Loaded from JSON by the binary; any
//! missing field falls back to its default.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default base interval between pattern steps.
pub const DEFAULT_BASE_INTERVAL_MS: u32 = 500;

/// LED service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedConfig {
    // --- Line selection ---
    /// GPIO controller identifier, e.g. `gpiochip0`
    pub gpio_chip: String,
    /// Line offset on that controller
    pub line: u32,

    // --- Output ---
    /// Active-low LED: logical 1 drives the line low
    pub invert: bool,

    // --- Timing ---
    /// Time the LED stays in one pattern step (milliseconds)
    pub base_interval_ms: u32,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            gpio_chip: String::from("gpiochip0"),
            line: 0,
            invert: false,
            base_interval_ms: DEFAULT_BASE_INTERVAL_MS,
        }
    }
}

impl LedConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("config parse failed: {}", e);
            Error::Config("malformed JSON")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.gpio_chip.trim().is_empty() {
            return Err(Error::Config("gpio_chip must not be empty"));
        }
        if self.base_interval_ms == 0 {
            return Err(Error::Config("base_interval_ms must be > 0"));
        }
        Ok(())
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.base_interval_ms))
    }
}
