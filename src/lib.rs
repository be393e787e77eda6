// Unsafe is confined to the syslog backend's libc calls.
#![cfg_attr(not(unix), forbid(unsafe_code))]

//! `rotolog` - Leveled logging with interchangeable delivery backends.
//!
//! Rendered log lines ship through one of four backends:
//! - **sync**: direct write on the caller's thread
//! - **queued**: bounded queue drained by a background thread
//! - **rotate**: size-rotated files with optional gzip/zlib/LZW archiving
//! - **syslog**: the OS system log (unix)
//!
//! # Example
//!
//! ```no_run
//! use rotolog::{Compression, Flags, Level, Logger, KB};
//!
//! let logger = Logger::builder()
//!     .level(Level::Debug)
//!     .flags(Flags::STD | Flags::SEQUENCE)
//!     .rotate()
//!         .path("app.log")
//!         .max_size(64 * KB)
//!         .compression(Compression::Gzip)
//!         .done()
//!     .build();
//!
//! logger.info("application started");
//! logger.warnf("retrying {} of {}", &[&1, &3]);
//! logger.flush();
//! ```
//!
//! Or install a process-wide logger once and use the ambient macros:
//!
//! ```no_run
//! use rotolog::{Level, Logger};
//!
//! rotolog::global::init(Logger::builder().level(Level::Debug).build());
//! rotolog::info!("listening on {}", "0.0.0.0:4222");
//! rotolog::global::shutdown();
//! ```

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod global;
pub mod level;
pub mod logger;
mod macros;
pub mod record;

// Re-exports for convenience
#[cfg(unix)]
pub use backend::SyslogBackend;
pub use backend::{
    AsyncBackend, Backend, Compression, EB, GB, KB, MB, PB, QUEUE_CAPACITY, RotateBackend, Sink,
    SyncBackend, TB,
};
pub use config::{Config, parse_size};
pub use error::Error;
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, RotateBuilder};
pub use record::{Body, Caller, Flags, Record};
