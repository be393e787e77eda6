//! Unified error type for configuration and setup.
//!
//! Delivery-path I/O failures never surface here: a log call must not fail
//! the caller's own operation, so those are reported to stderr instead.

/// Error type for rotolog setup and configuration.
#[derive(Debug)]
pub enum Error {
    /// I/O error while loading configuration or opening a sink.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Invalid log level string.
    InvalidLevel(String),
    /// Invalid header flag name.
    InvalidFlag(String),
    /// Invalid size notation (expected e.g. "64K", "1M").
    InvalidSize(String),
    /// Invalid compression method name.
    InvalidCompression(String),
    /// Unknown backend kind in config.
    InvalidBackend(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::InvalidLevel(s) => write!(f, "invalid log level: '{s}'"),
            Self::InvalidFlag(s) => write!(f, "invalid header flag: '{s}'"),
            Self::InvalidSize(s) => write!(f, "invalid size: '{s}'"),
            Self::InvalidCompression(s) => write!(f, "invalid compression method: '{s}'"),
            Self::InvalidBackend(s) => write!(f, "unknown backend kind: '{s}'"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
