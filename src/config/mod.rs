//! TOML configuration: one logger, one backend table.
//!
//! ```toml
//! level = "debug"
//! prefix = ""
//! flags = ["date", "time", "sequence"]
//!
//! [backend]
//! kind = "rotate"
//! path = "app.log"
//! max_size = "64K"
//! max_files = 32
//! compression = "gzip"
//! ```

mod size;

pub use size::parse_size;

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::level::Level;
use crate::record::Flags;

/// Logger-wide settings plus the backend table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum log level.
    pub level: String,
    /// Literal prefix rendered before every header.
    pub prefix: String,
    /// Header flag names; empty means the date/time default.
    pub flags: Vec<String>,
    /// Backend selection and parameters.
    pub backend: BackendConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            prefix: String::new(),
            flags: Vec::new(),
            backend: BackendConfig::default(),
        }
    }
}

/// One backend table; fields beyond `kind`'s needs are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// One of `sync`, `queued`, `rotate`, `syslog`.
    pub kind: String,
    /// Sink for sync/queued: `stderr`, `stdout`, or a file path.
    pub target: String,
    /// Base log file path for rotate; defaults to `<process name>.log`.
    pub path: Option<String>,
    /// Rotation threshold in size notation ("64K", "10M").
    pub max_size: String,
    /// Retained rotated generations.
    pub max_files: usize,
    /// One of `none`, `gzip`, `zlib`, `lzw`.
    pub compression: String,
    /// Syslog identifier; defaults to the process name.
    pub ident: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: "sync".to_string(),
            target: "stderr".to_string(),
            path: None,
            max_size: "10M".to_string(),
            max_files: 32,
            compression: "none".to_string(),
            ident: None,
        }
    }
}

impl Config {
    /// Loads and parses a TOML config file.
    ///
    /// # Errors
    /// I/O errors reading the file, or TOML parse errors.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// The configured minimum level.
    ///
    /// # Errors
    /// [`Error::InvalidLevel`] for unknown level strings.
    pub fn parse_level(&self) -> Result<Level, Error> {
        self.level.parse()
    }

    /// The configured header flags; an empty list keeps the default.
    ///
    /// # Errors
    /// [`Error::InvalidFlag`] on the first unknown name.
    pub fn parse_flags(&self) -> Result<Flags, Error> {
        if self.flags.is_empty() {
            Ok(Flags::default())
        } else {
            Flags::parse_names(&self.flags)
        }
    }
}
