//! TOML-based configuration for the driver.
//!
//! Every setting can be given on the command line; a config file is
//! convenient for system services where the unit file should stay short:
//!
//! ```toml
//! [serial]
//! port = "/dev/ttyS0"
//! baud = 9600
//!
//! [touch]
//! click_only = false
//! sniff = false
//! pressure_max = 255
//! ```
//!
//! # Precedence
//!
//! Command-line values win over file values, file values win over the
//! built-in defaults.  `--click-only` and `--sniff` can only switch a
//! setting on; to switch it off, remove it from the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::serial::{SerialSettings, DEFAULT_BAUD_RATE, READ_TIMEOUT};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// No serial port was given on the command line or in the file.
    #[error("no serial port configured (use --port or [serial] port = ...)")]
    MissingPort,

    /// The baud rate is zero.
    #[error("invalid baud rate: {0}")]
    InvalidBaud(u32),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level driver configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverConfig {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub touch: TouchConfig,
}

/// Serial line settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SerialConfig {
    /// Device path of the serial port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// Line speed in bits per second.
    #[serde(default = "default_baud")]
    pub baud: u32,
}

/// Touch forwarding settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TouchConfig {
    /// Only forward contact changes (edge triggering).
    #[serde(default)]
    pub click_only: bool,
    /// Decode and log only; do not create a virtual input device.
    #[serde(default)]
    pub sniff: bool,
    /// Upper bound advertised for the pressure axis.
    #[serde(default = "default_pressure_max")]
    pub pressure_max: i32,
}

fn default_baud() -> u32 {
    DEFAULT_BAUD_RATE
}
fn default_pressure_max() -> i32 {
    255
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: default_baud(),
        }
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            click_only: false,
            sniff: false,
            pressure_max: default_pressure_max(),
        }
    }
}

/// Values taken from the command line; `None`/`false` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub port: Option<String>,
    pub baud: Option<u32>,
    pub click_only: bool,
    pub sniff: bool,
}

impl DriverConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed or a field
    /// has the wrong type.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies command-line overrides on top of this configuration.
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(port) = overrides.port {
            self.serial.port = Some(port);
        }
        if let Some(baud) = overrides.baud {
            self.serial.baud = baud;
        }
        self.touch.click_only |= overrides.click_only;
        self.touch.sniff |= overrides.sniff;
        self
    }

    /// Resolves the settings needed to open the port.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingPort`] when no port is configured and
    /// [`ConfigError::InvalidBaud`] for a zero baud rate.
    pub fn serial_settings(&self) -> Result<SerialSettings, ConfigError> {
        let port = self.serial.port.clone().ok_or(ConfigError::MissingPort)?;
        if self.serial.baud == 0 {
            return Err(ConfigError::InvalidBaud(self.serial.baud));
        }
        Ok(SerialSettings {
            port,
            baud: self.serial.baud,
            timeout: READ_TIMEOUT,
        })
    }
}

/// Loads a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<DriverConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    DriverConfig::from_toml(&content)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
