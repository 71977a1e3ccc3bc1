//! Error handling for the SerialVis-RS application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application.
//!
//! Malformed readings never show up here: a token that does not parse as a
//! number is dropped inside the sample parser. Everything in this enum is
//! either a configuration problem (reported before acquisition starts) or a
//! fatal I/O failure that ends the acquisition loop.

use thiserror::Error;

/// Main error type for SerialVis-RS operations
#[derive(Error, Debug)]
pub enum SerialVisError {
    /// Errors raised by the serial port library (open, configure, enumerate)
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// A transport read failed for a reason other than a timeout
    #[error("Read error: {0}")]
    Read(#[source] std::io::Error),

    /// Releasing the transport failed
    #[error("Close error: {0}")]
    Close(String),

    /// Drawing to the terminal failed
    #[error("Render error: {0}")]
    Render(#[source] std::io::Error),

    /// Errors related to configuration loading and validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SerialVisError>,
    },
}

impl SerialVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SerialVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for SerialVisError {
    fn from(err: toml::de::Error) -> Self {
        SerialVisError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for SerialVisError {
    fn from(err: toml::ser::Error) -> Self {
        SerialVisError::Serialization(err.to_string())
    }
}

/// Result type alias for SerialVis-RS operations
pub type Result<T> = std::result::Result<T, SerialVisError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, serialport::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| SerialVisError::Serial(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| SerialVisError::Serial(e).with_context(f()))
    }
}
