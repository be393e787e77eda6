//! Delivery backends and the sink abstraction they write through.
//!
//! Every backend satisfies one contract: accept a record (`log`), physically
//! write bytes (`write`), start background processing (`start`), and shut
//! down gracefully (`flush`). The tty/fd capability queries exist for color
//! rendering collaborators.

mod queued;
mod rotate;
mod sync;
#[cfg(unix)]
mod syslog;

pub use queued::{AsyncBackend, QUEUE_CAPACITY};
pub use rotate::{Compression, EB, GB, KB, MB, PB, RotateBackend, TB};
pub use sync::SyncBackend;
#[cfg(unix)]
pub use syslog::SyslogBackend;

use std::fs::File;
use std::io::{self, IsTerminal, Stderr, Stdout, Write};

use crate::record::Record;

/// A write destination with the capability queries the delivery path needs.
///
/// `close` releases the underlying resource where that makes sense; the std
/// stream impls keep it a flush-only no-op because stdout/stderr must never
/// be closed.
pub trait Sink: Write + Send {
    /// Whether the sink is a terminal, for color rendering.
    fn is_tty(&self) -> bool {
        false
    }

    /// The raw file descriptor, if the sink has one.
    fn raw_fd(&self) -> Option<i32> {
        None
    }

    /// Whether `close` actually releases a resource. Backends that must own
    /// their file (rotation) reject non-closable sinks.
    fn closable(&self) -> bool {
        false
    }

    /// Releases the underlying resource.
    ///
    /// # Errors
    /// I/O errors from flushing or syncing the sink.
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Sink for File {
    fn is_tty(&self) -> bool {
        IsTerminal::is_terminal(self)
    }

    #[cfg(unix)]
    fn raw_fd(&self) -> Option<i32> {
        Some(std::os::fd::AsRawFd::as_raw_fd(self))
    }

    fn closable(&self) -> bool {
        true
    }

    fn close(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

impl Sink for Stdout {
    fn is_tty(&self) -> bool {
        IsTerminal::is_terminal(self)
    }

    #[cfg(unix)]
    fn raw_fd(&self) -> Option<i32> {
        Some(std::os::fd::AsRawFd::as_raw_fd(self))
    }
}

impl Sink for Stderr {
    fn is_tty(&self) -> bool {
        IsTerminal::is_terminal(self)
    }

    #[cfg(unix)]
    fn raw_fd(&self) -> Option<i32> {
        Some(std::os::fd::AsRawFd::as_raw_fd(self))
    }
}

/// The contract every delivery backend satisfies.
///
/// `flush` is the graceful shutdown: it stops new admissions, drains every
/// record already accepted, and only then returns. It is idempotent, and it
/// must be the final operation against the instance.
pub trait Backend: Send + Sync {
    /// Accepts a record for delivery. May write immediately, enqueue, or
    /// block the caller for backpressure; never fails the caller.
    fn log(&self, record: Record);

    /// Physical write to the current sink.
    ///
    /// # Errors
    /// I/O errors from the sink.
    fn write(&self, bytes: &[u8]) -> io::Result<()>;

    /// Begins background processing. No-op for synchronous variants.
    fn start(&self) {}

    /// Graceful, blocking shutdown. No queued record is ever dropped.
    fn flush(&self);

    /// Whether the current sink is a terminal.
    fn is_tty(&self) -> bool;

    /// The current sink's file descriptor, if any.
    fn raw_fd(&self) -> Option<i32>;

    /// Swaps the sink under the backend's lock, returning the previous one
    /// where the backend supports swapping.
    fn set_sink(&self, sink: Box<dyn Sink>) -> Option<Box<dyn Sink>>;
}

/// Sink plus capability fields, cached at swap time so the hot path never
/// re-queries the OS. Guarded by each backend's mutex.
pub(crate) struct SinkState {
    pub sink: Box<dyn Sink>,
    pub tty: bool,
    pub fd: Option<i32>,
}

impl SinkState {
    pub fn new(sink: Box<dyn Sink>) -> Self {
        let tty = sink.is_tty();
        let fd = sink.raw_fd();
        Self { sink, tty, fd }
    }

    pub fn swap(&mut self, sink: Box<dyn Sink>) -> Box<dyn Sink> {
        let old = std::mem::replace(self, Self::new(sink));
        old.sink
    }
}

/// Colors the record when the sink is a terminal, renders it, and writes it.
/// I/O failures are reported, never propagated: logging must not fail the
/// caller's own operation.
pub(crate) fn deliver(state: &mut SinkState, mut record: Record) {
    if state.tty {
        record.set_color(crate::color::sequence(record.level(), false));
    }
    if let Err(e) = state.sink.write_all(record.render()) {
        report("writing record", &e);
    }
}

/// Delivery-path failures go to the diagnostic stream.
pub(crate) fn report(context: &str, err: &dyn std::fmt::Display) {
    eprintln!("rotolog: error {context}: {err}");
}
