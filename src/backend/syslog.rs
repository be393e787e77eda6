//! Thin passthrough to the OS system log.

use std::ffi::CString;
use std::io;
use std::sync::Mutex;

use super::{Backend, Sink};
use crate::level::Level;
use crate::record::Record;

/// Delivers records through `syslog(3)`. Synchronous, no queue; severity is
/// mapped from the record's level and the facility appends its own newline.
pub struct SyslogBackend {
    // openlog keeps a pointer to the ident string; it must stay alive for
    // the lifetime of this backend.
    _ident: CString,
    // syslog(3) is thread-safe, but serializing calls keeps record order
    // deterministic per backend instance.
    mu: Mutex<()>,
}

impl SyslogBackend {
    /// Opens the system log connection with the given identifier.
    #[must_use]
    pub fn new(ident: &str) -> Self {
        let ident = CString::new(ident.replace('\0', "")).unwrap_or_default();
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, libc::LOG_USER);
        }
        Self {
            _ident: ident,
            mu: Mutex::new(()),
        }
    }
}

impl Drop for SyslogBackend {
    fn drop(&mut self) {
        unsafe {
            libc::closelog();
        }
    }
}

const fn severity(level: Option<Level>) -> libc::c_int {
    match level {
        Some(Level::Fatal) => libc::LOG_CRIT,
        Some(Level::Error) => libc::LOG_ERR,
        Some(Level::Warn) => libc::LOG_WARNING,
        Some(Level::Info) => libc::LOG_INFO,
        Some(Level::Debug) => libc::LOG_DEBUG,
        None => libc::LOG_NOTICE,
    }
}

impl Backend for SyslogBackend {
    fn log(&self, mut record: Record) {
        // syslog terminates lines itself; a trailing newline would double up.
        record.set_newline(false);
        let priority = severity(record.level());
        let bytes: Vec<u8> = record
            .render()
            .iter()
            .copied()
            .filter(|&b| b != 0)
            .collect();
        let Ok(message) = CString::new(bytes) else {
            return;
        };
        let _guard = self.mu.lock();
        unsafe {
            libc::syslog(priority, c"%s".as_ptr(), message.as_ptr());
        }
    }

    /// Delivery goes through `syslog(3)`, not a byte sink.
    fn write(&self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn flush(&self) {}

    fn is_tty(&self) -> bool {
        false
    }

    fn raw_fd(&self) -> Option<i32> {
        None
    }

    /// Not supported; the system log connection is the only destination.
    fn set_sink(&self, _sink: Box<dyn Sink>) -> Option<Box<dyn Sink>> {
        None
    }
}
