//! Queued asynchronous delivery: a bounded queue drained by one thread.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, bounded};

use super::{Backend, Sink, SinkState, deliver};
use crate::record::Record;

/// Queue capacity; a full queue blocks producers, which is the backpressure
/// mechanism.
pub const QUEUE_CAPACITY: usize = 1024;

/// Bounded queue plus a single drain thread.
///
/// The sender lives in an `RwLock<Option<_>>`: producers send under the read
/// lock, `flush` removes the sender under the write lock. The stop transition
/// and the enqueue decision are therefore atomic with respect to each other,
/// so no producer can observe "accepting" and then enqueue into a closed
/// queue.
pub struct AsyncBackend {
    shared: Arc<Mutex<SinkState>>,
    tx: RwLock<Option<Sender<Record>>>,
    rx: Mutex<Option<Receiver<Record>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl AsyncBackend {
    #[must_use]
    pub fn new(sink: Box<dyn Sink>) -> Self {
        let (tx, rx) = bounded(QUEUE_CAPACITY);
        Self {
            shared: Arc::new(Mutex::new(SinkState::new(sink))),
            tx: RwLock::new(Some(tx)),
            rx: Mutex::new(Some(rx)),
            worker: Mutex::new(None),
        }
    }
}

impl Backend for AsyncBackend {
    /// Enqueues the record, blocking the caller while the queue is full.
    /// After `flush` the sender slot is empty and the record is discarded.
    fn log(&self, record: Record) {
        let tx = self.tx.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = tx.as_ref() {
            let _ = tx.send(record);
        }
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        state.sink.write_all(bytes)
    }

    /// Spawns the drain thread. Called exactly once, by the logger builder.
    fn start(&self) {
        let Some(rx) = self
            .rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return;
        };
        let shared = Arc::clone(&self.shared);
        let handle = std::thread::spawn(move || {
            // The iterator ends once all senders are gone and the queue is
            // empty; thread exit is the drain-completion signal.
            for record in rx {
                let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                deliver(&mut state, record);
            }
        });
        *self.worker.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    /// Removes the sender (closing the queue to new input), then joins the
    /// drain thread. Every already-accepted record is written before this
    /// returns. Idempotent: a second call finds both slots empty.
    fn flush(&self) {
        let tx = self
            .tx
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(tx);
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    fn is_tty(&self) -> bool {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .tty
    }

    fn raw_fd(&self) -> Option<i32> {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fd
    }

    fn set_sink(&self, sink: Box<dyn Sink>) -> Option<Box<dyn Sink>> {
        let mut state = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        Some(state.swap(sink))
    }
}
