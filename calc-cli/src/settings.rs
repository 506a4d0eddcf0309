//! User settings read from a TOML file.
//!
//! ```toml
//! trig_mode = "degrees"
//! precision = 12
//! log_level = "debug"
//! seed = 7
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::{fs, path::Path};

use calc_core::TrigMode;
use serde::{Deserialize, Serialize};

use crate::display::{DEFAULT_PRECISION, MAX_PRECISION};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("precision must be between 1 and {max}, got {0}", max = MAX_PRECISION)]
    InvalidPrecision(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Angle unit the session starts in.
    pub trig_mode: TrigMode,
    /// Significant digits shown on the display.
    pub precision: usize,
    /// A level (`info`) or a full `EnvFilter` directive (`calc_core=trace`).
    pub log_level: String,
    /// Seeds the random-number key for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trig_mode: TrigMode::default(),
            precision: DEFAULT_PRECISION,
            log_level: "warn".to_string(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if (1..=MAX_PRECISION).contains(&self.precision) {
            Ok(())
        } else {
            Err(SettingsError::InvalidPrecision(self.precision))
        }
    }
}
