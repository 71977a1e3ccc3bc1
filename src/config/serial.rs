//! Serial line settings
//!
//! [`SerialConfig`] holds everything needed to open the port. The numeric
//! fields are kept as plain integers so they round-trip through TOML and the
//! command line; [`SerialConfig::data_bits`] and friends convert them into
//! `serialport` types after validation.

use crate::error::{Result, SerialVisError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of data bits
pub const DEFAULT_DATA_BITS: u8 = 8;

/// Default number of stop bits
pub const DEFAULT_STOP_BITS: u8 = 1;

/// Default read timeout in milliseconds
///
/// Bounds how long a pending quit request can wait behind a blocking read.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 100;

/// Parity checking mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

impl From<Parity> for serialport::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => serialport::Parity::None,
            Parity::Odd => serialport::Parity::Odd,
            Parity::Even => serialport::Parity::Even,
        }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::None => write!(f, "none"),
            Parity::Odd => write!(f, "odd"),
            Parity::Even => write!(f, "even"),
        }
    }
}

/// Serial port connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Port identifier (e.g., "/dev/ttyUSB0" or "COM3")
    pub port: Option<String>,

    /// Baud rate; 0 means "not set"
    pub baud_rate: u32,

    /// Number of data bits (5-8)
    pub data_bits: u8,

    /// Parity mode
    pub parity: Parity,

    /// Number of stop bits (1-2)
    pub stop_bits: u8,

    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: 0,
            data_bits: DEFAULT_DATA_BITS,
            parity: Parity::None,
            stop_bits: DEFAULT_STOP_BITS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl SerialConfig {
    /// Create a configuration for the given port and baud rate
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: Some(port.into()),
            baud_rate,
            ..Self::default()
        }
    }

    /// Check that the framing parameters are in range
    pub fn validate_framing(&self) -> Result<()> {
        self.data_bits()?;
        self.stop_bits()?;
        if self.read_timeout_ms == 0 {
            return Err(SerialVisError::Config(
                "read timeout must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that a port can actually be opened with this configuration
    pub fn validate(&self) -> Result<()> {
        if self.port.as_deref().map_or(true, str::is_empty) || self.baud_rate == 0 {
            return Err(SerialVisError::Config(
                "the required options `-b, --baud` and `-p, --port` were not specified"
                    .to_string(),
            ));
        }
        self.validate_framing()
    }

    /// Port name, or an empty string if none was configured
    pub fn port_name(&self) -> &str {
        self.port.as_deref().unwrap_or_default()
    }

    pub fn data_bits(&self) -> Result<serialport::DataBits> {
        match self.data_bits {
            5 => Ok(serialport::DataBits::Five),
            6 => Ok(serialport::DataBits::Six),
            7 => Ok(serialport::DataBits::Seven),
            8 => Ok(serialport::DataBits::Eight),
            other => Err(SerialVisError::Config(format!(
                "invalid data bits: {} (expected 5-8)",
                other
            ))),
        }
    }

    pub fn stop_bits(&self) -> Result<serialport::StopBits> {
        match self.stop_bits {
            1 => Ok(serialport::StopBits::One),
            2 => Ok(serialport::StopBits::Two),
            other => Err(SerialVisError::Config(format!(
                "invalid stop bits: {} (expected 1 or 2)",
                other
            ))),
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
