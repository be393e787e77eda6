//! Building a logger from a loaded [`Config`].

use std::fs::OpenOptions;

use super::{Logger, process_name};
use crate::backend::{Compression, Sink};
use crate::config::{Config, parse_size};
use crate::error::Error;

impl Logger {
    /// Builds and starts a logger from a loaded config.
    ///
    /// # Errors
    /// Invalid level/flag/size/compression strings, unknown backend kinds,
    /// or I/O errors opening a file target.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut builder = Self::builder()
            .level(config.parse_level()?)
            .flags(config.parse_flags()?);
        if !config.prefix.is_empty() {
            builder = builder.prefix(&config.prefix);
        }

        let backend = &config.backend;
        let builder = match backend.kind.as_str() {
            "sync" => builder.sync(sink_from_target(&backend.target)?),
            "queued" | "async" => builder.queued(sink_from_target(&backend.target)?),
            "rotate" => {
                let max_size = parse_size(&backend.max_size)
                    .ok_or_else(|| Error::InvalidSize(backend.max_size.clone()))?;
                let compress: Compression = backend.compression.parse()?;
                let mut rotate = builder
                    .rotate()
                    .max_files(backend.max_files)
                    .max_size(max_size)
                    .compression(compress);
                if let Some(path) = &backend.path {
                    rotate = rotate.path(path);
                }
                rotate.done()
            }
            #[cfg(unix)]
            "syslog" => {
                let ident = backend.ident.clone().unwrap_or_else(process_name);
                builder.syslog(&ident)
            }
            kind => return Err(Error::InvalidBackend(kind.to_string())),
        };

        Ok(builder.build())
    }
}

/// `stderr` and `stdout` map to the std streams; anything else is opened as
/// an append-mode file.
fn sink_from_target(target: &str) -> Result<Box<dyn Sink>, Error> {
    match target {
        "stderr" => Ok(Box::new(std::io::stderr())),
        "stdout" => Ok(Box::new(std::io::stdout())),
        path => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(Box::new(file))
        }
    }
}
