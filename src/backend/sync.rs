//! Direct synchronous delivery on the caller's thread.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use super::{Backend, Sink, SinkState, deliver};
use crate::record::Record;

/// Renders and writes on the calling thread. No queue, no background thread;
/// one mutex makes concurrent writes and sink swaps safe.
pub struct SyncBackend {
    state: Mutex<SinkState>,
}

impl SyncBackend {
    #[must_use]
    pub fn new(sink: Box<dyn Sink>) -> Self {
        Self {
            state: Mutex::new(SinkState::new(sink)),
        }
    }
}

impl Backend for SyncBackend {
    fn log(&self, record: Record) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        deliver(&mut state, record);
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.sink.write_all(bytes)
    }

    /// Nothing to drain.
    fn flush(&self) {}

    fn is_tty(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .tty
    }

    fn raw_fd(&self) -> Option<i32> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).fd
    }

    fn set_sink(&self, sink: Box<dyn Sink>) -> Option<Box<dyn Sink>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Some(state.swap(sink))
    }
}
