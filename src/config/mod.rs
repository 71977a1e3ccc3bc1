//! Configuration module for SerialVis-RS
//!
//! This module handles application configuration including:
//! - Serial line settings (port, baud rate, framing)
//! - Display settings (delimiter, chart mode, border label)
//! - Optional TOML configuration files, overridden by command-line flags
//!
//! A configuration is resolved and validated before acquisition starts and is
//! never modified while the pipeline runs.
//!
//! # App Data Location
//!
//! Log files are written to the platform-appropriate data directory:
//! - **Linux**: `~/.local/share/dev.serialvis.serialvis-rs/logs/`
//! - **macOS**: `~/Library/Application Support/dev.serialvis.serialvis-rs/logs/`
//! - **Windows**: `%APPDATA%\dev.serialvis.serialvis-rs\logs\`
//!
//! # Example
//!
//! ```ignore
//! use serialvis_rs::config::AppConfig;
//!
//! let mut config = AppConfig::load("plotter.toml")?;
//! config.serial.baud_rate = 115_200;
//! config.validate()?;
//! ```

pub mod serial;

pub use serial::*;

use crate::error::{Result, ResultExt, SerialVisError};
use crate::types::ChartMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.serialvis.serialvis-rs";

/// Log file name
pub const LOG_FILE_NAME: &str = "serialvis.log";

/// Default token delimiter
pub const DEFAULT_DELIMITER: &str = "\n";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Directory that receives log files
///
/// Falls back to the system temp directory when no data directory exists.
pub fn default_log_dir() -> PathBuf {
    app_data_dir()
        .unwrap_or_else(|| std::env::temp_dir().join(APP_ID))
        .join("logs")
}

// ==================== Delimiter Escapes ====================

/// Expand `\n`, `\r`, `\t` and `\\` escapes in a delimiter typed on a shell
///
/// Unknown escapes are kept verbatim, backslash included.
pub fn unescape_delimiter(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

// ==================== Display Config ====================

/// Settings for how incoming data is split and drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Delimiter separating readings in the byte stream
    pub delimiter: String,

    /// Chart rendering mode
    pub mode: ChartMode,

    /// Chart border label (defaults to the port name)
    pub label: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            mode: ChartMode::default(),
            label: None,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(SerialVisError::Config(
                "delimiter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ==================== App Config ====================

/// Complete configuration for one plotting session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Serial connection configuration
    #[serde(default)]
    pub serial: SerialConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(SerialVisError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save the configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        tracing::info!("Saved configuration to {:?}", path.as_ref());
        Ok(())
    }

    /// Validate everything needed to open a real serial port
    pub fn validate(&self) -> Result<()> {
        self.serial.validate()?;
        self.display.validate()
    }

    /// Validate everything except the port identity
    ///
    /// Used when the data source is not a serial port (e.g. the mock device).
    pub fn validate_without_port(&self) -> Result<()> {
        self.serial.validate_framing()?;
        self.display.validate()
    }

    /// Label drawn on the chart border
    pub fn border_label(&self) -> String {
        self.display
            .label
            .clone()
            .unwrap_or_else(|| self.serial.port_name().to_string())
    }
}
