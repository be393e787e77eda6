//! Direct Logger construction would require knowing every backend's
//! internals; the builder hides that behind a stepwise API.

use super::{Logger, process_name};
use crate::backend::{AsyncBackend, Backend, Compression, MB, RotateBackend, Sink, SyncBackend};
use crate::level::Level;
use crate::record::Flags;

/// Configures one backend and the logger around it. Without an explicit
/// backend choice, `build` falls back to synchronous stderr delivery.
pub struct LoggerBuilder {
    min_level: Level,
    prefix: Option<String>,
    name: Option<String>,
    flags: Flags,
    backend: Option<Box<dyn Backend>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// Info is a safe default for production; Debug is opt-in.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Level::Info,
            prefix: None,
            name: None,
            flags: Flags::default(),
            backend: None,
        }
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Literal text rendered before every header field.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The module field; defaults to the process name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Header field selection; defaults to date and time.
    #[must_use]
    pub const fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Direct synchronous delivery to the given sink.
    #[must_use]
    pub fn sync(mut self, sink: Box<dyn Sink>) -> Self {
        self.backend = Some(Box::new(SyncBackend::new(sink)));
        self
    }

    /// Queued asynchronous delivery to the given sink.
    #[must_use]
    pub fn queued(mut self, sink: Box<dyn Sink>) -> Self {
        self.backend = Some(Box::new(AsyncBackend::new(sink)));
        self
    }

    /// Rotation has its own concerns (path, generations, size threshold,
    /// compression) needing a dedicated sub-builder.
    #[must_use]
    pub fn rotate(self) -> RotateBuilder {
        RotateBuilder {
            parent: self,
            path: None,
            max_files: 32,
            max_size: 10 * MB,
            compress: Compression::None,
        }
    }

    /// System log delivery under the given identifier.
    #[cfg(unix)]
    #[must_use]
    pub fn syslog(mut self, ident: &str) -> Self {
        self.backend = Some(Box::new(crate::backend::SyslogBackend::new(ident)));
        self
    }

    /// The built-in backends can't cover every use case.
    #[must_use]
    pub fn backend(mut self, backend: impl Backend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Starts the backend's background processing (if any) and returns the
    /// logger. The backend is started exactly once, here.
    #[must_use]
    pub fn build(self) -> Logger {
        let name = self.name.unwrap_or_else(process_name);
        let backend = self
            .backend
            .unwrap_or_else(|| Box::new(SyncBackend::new(Box::new(std::io::stderr()))));
        backend.start();
        Logger::new(self.min_level, self.prefix, name, self.flags, backend)
    }
}

/// Rotation parameters, separate from the logger-wide settings.
pub struct RotateBuilder {
    parent: LoggerBuilder,
    path: Option<String>,
    max_files: usize,
    max_size: u64,
    compress: Compression,
}

impl RotateBuilder {
    /// Base log file path; defaults to `<process name>.log` in the working
    /// directory.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// How many rotated generations to retain.
    #[must_use]
    pub const fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Size threshold that triggers rotation, in bytes.
    #[must_use]
    pub const fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Compression applied when archiving a just-closed file.
    #[must_use]
    pub const fn compression(mut self, compress: Compression) -> Self {
        self.compress = compress;
        self
    }

    /// Sub-builder consumes self, so there must be a way back to the parent.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        let path = self
            .path
            .unwrap_or_else(|| format!("{}.log", process_name()));
        self.parent.backend = Some(Box::new(RotateBackend::new(
            path,
            self.max_files,
            self.max_size,
            self.compress,
        )));
        self.parent
    }
}
