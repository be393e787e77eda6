//! Size-rotated, optionally compressed file delivery.
//!
//! The queue is a rendezvous channel: every `log` call hands its record
//! directly to the drain thread, which serializes all writers through one
//! thread and keeps the size accounting single-writer without an extra lock.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, bounded};
use flate2::write::{GzEncoder, ZlibEncoder};

use super::{Backend, Sink, report};
use crate::error::Error;
use crate::record::Record;

/// 1 KiB.
pub const KB: u64 = 1 << 10;
/// 1 MiB.
pub const MB: u64 = 1 << 20;
/// 1 GiB.
pub const GB: u64 = 1 << 30;
/// 1 TiB.
pub const TB: u64 = 1 << 40;
/// 1 PiB.
pub const PB: u64 = 1 << 50;
/// 1 EiB.
pub const EB: u64 = 1 << 60;

/// Compression applied when archiving a just-closed log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Rotate the plain file without archiving.
    #[default]
    None,
    Gzip,
    Zlib,
    /// LZW with MSB bit order and 8-bit codes.
    Lzw,
}

impl Compression {
    /// The file extension appended to archived generations.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Gzip => ".gz",
            Self::Zlib => ".zlib",
            Self::Lzw => ".lz",
        }
    }
}

impl FromStr for Compression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "gzip" | "gz" => Ok(Self::Gzip),
            "zlib" => Ok(Self::Zlib),
            "lzw" | "lz" => Ok(Self::Lzw),
            _ => Err(Error::InvalidCompression(s.to_string())),
        }
    }
}

/// Touched only with the state mutex held. The size counter is written only
/// by the drain thread (and reset by a sink swap).
struct RotateState {
    sink: Option<Box<dyn Sink>>,
    fd: Option<i32>,
    written: u64,
}

struct RotateShared {
    path: PathBuf,
    max_files: usize,
    max_size: u64,
    compress: Compression,
    state: Mutex<RotateState>,
}

/// Rendezvous queue plus a single drain thread with rotation and archiving.
pub struct RotateBackend {
    shared: Arc<RotateShared>,
    tx: RwLock<Option<Sender<Record>>>,
    rx: Mutex<Option<Receiver<Record>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl RotateBackend {
    /// The base file is not opened here; the drain thread performs the
    /// initial rotation when `start` runs, guaranteeing a fresh file.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        max_files: usize,
        max_size: u64,
        compress: Compression,
    ) -> Self {
        let (tx, rx) = bounded(0);
        Self {
            shared: Arc::new(RotateShared {
                path: path.into(),
                max_files,
                max_size,
                compress,
                state: Mutex::new(RotateState {
                    sink: None,
                    fd: None,
                    written: 0,
                }),
            }),
            tx: RwLock::new(Some(tx)),
            rx: Mutex::new(Some(rx)),
            worker: Mutex::new(None),
        }
    }
}

impl Backend for RotateBackend {
    /// Blocks until the drain thread receives the record (strict hand-off).
    /// After `flush` the sender slot is empty and the record is discarded.
    fn log(&self, record: Record) {
        let tx = self.tx.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = tx.as_ref() {
            let _ = tx.send(record);
        }
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let mut state = self
            .shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match state.sink.as_mut() {
            Some(sink) => {
                sink.write_all(bytes)?;
                state.written += bytes.len() as u64;
                Ok(())
            }
            None => Err(io::Error::other("log sink is not open")),
        }
    }

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
        let handle = std::thread::spawn(move || drain(&shared, &rx));
        *self.worker.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    /// Removes the sender, joins the drain thread, then closes the sink.
    /// The sink is always a file this backend opened itself, so closing is
    /// safe. Idempotent.
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
        let mut state = self
            .shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(mut sink) = state.sink.take()
            && let Err(e) = sink.close()
        {
            report("closing log file", &e);
        }
        state.fd = None;
    }

    /// Rotating sinks are files, never terminals.
    fn is_tty(&self) -> bool {
        false
    }

    fn raw_fd(&self) -> Option<i32> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fd
    }

    /// Swapping is permitted while the drain thread runs: the swap happens
    /// under the state mutex and resets the size counter, so the next
    /// threshold check starts from zero against the new sink.
    ///
    /// # Panics
    /// A non-closable sink (a std stream) is a programmer error: rotation
    /// must be able to close what it writes to.
    fn set_sink(&self, sink: Box<dyn Sink>) -> Option<Box<dyn Sink>> {
        assert!(
            sink.closable(),
            "RotateBackend requires a closable sink, not a std stream"
        );
        let mut state = self
            .shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state.fd = sink.raw_fd();
        state.written = 0;
        state.sink.replace(sink)
    }
}

fn drain(shared: &RotateShared, rx: &Receiver<Record>) {
    {
        let mut state = shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        shared.rotate(&mut state);
    }
    for record in rx {
        // Rendered outside the lock; rotating sinks are never ttys, so no
        // color pass is needed.
        let bytes = record.render();
        let size = bytes.len() as u64;
        let mut state = shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if state.written + size > shared.max_size {
            shared.rotate(&mut state);
        }
        match state.sink.as_mut() {
            Some(sink) => {
                if let Err(e) = sink.write_all(bytes) {
                    report("writing record", &e);
                } else {
                    state.written += size;
                }
            }
            None => report("writing record", &"log sink is not open"),
        }
    }
}

impl RotateShared {
    fn generation_path(&self, i: i64) -> PathBuf {
        let ext = self.compress.extension();
        if i < 0 {
            PathBuf::from(format!("{}{ext}", self.path.display()))
        } else {
            PathBuf::from(format!("{}.{i}{ext}", self.path.display()))
        }
    }

    /// Close the current file, archive it if compression is configured,
    /// shift the retained generations, and open a fresh base file.
    fn rotate(&self, state: &mut RotateState) {
        if let Some(sink) = state.sink.as_mut() {
            if let Err(e) = sink.close() {
                report("closing current log file", &e);
                return;
            }
            state.sink = None;
            state.fd = None;
        }

        if self.compress != Compression::None {
            self.archive();
        }

        // Oldest slot first so no generation is clobbered before it moves;
        // i = -1 is the just-produced <base><ext> (or the plain base file).
        // The oldest retained generation is max_files - 1: renaming into that
        // slot overwrites whatever was there, which is the retention bound.
        #[allow(clippy::cast_possible_wrap)]
        for i in (-1..self.max_files as i64 - 1).rev() {
            let from = self.generation_path(i);
            if !from.exists() {
                continue;
            }
            let to = self.generation_path(i + 1);
            if let Err(e) = fs::rename(&from, &to) {
                report(&format!("moving {}", from.display()), &e);
            }
        }

        match open_base(&self.path) {
            Ok(file) => {
                state.fd = file.raw_fd();
                state.sink = Some(Box::new(file));
                state.written = 0;
            }
            Err(e) => {
                // A writable log destination is a hard requirement; going
                // silently dark is worse than dying loudly.
                report(&format!("opening {}", self.path.display()), &e);
                process::exit(1);
            }
        }
    }

    /// Whole-file archive of the just-closed base log into `<base><ext>`.
    /// Non-streaming: bounded by memory relative to file size.
    fn archive(&self) {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) => {
                report(&format!("reading {}", self.path.display()), &e);
                return;
            }
        };

        let target = self.generation_path(-1);
        let out = match OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&target)
        {
            Ok(out) => out,
            Err(e) => {
                report(&format!("opening {}", target.display()), &e);
                return;
            }
        };

        let result = match self.compress {
            Compression::Gzip => {
                let mut enc = GzEncoder::new(out, flate2::Compression::default());
                enc.write_all(&content).and_then(|()| enc.finish().map(drop))
            }
            Compression::Zlib => {
                let mut enc = ZlibEncoder::new(out, flate2::Compression::default());
                enc.write_all(&content).and_then(|()| enc.finish().map(drop))
            }
            Compression::Lzw => {
                let mut enc = weezl::encode::Encoder::new(weezl::BitOrder::Msb, 8);
                enc.into_stream(out)
                    .encode_all(&content[..])
                    .status
                    .map(drop)
                    .map_err(io::Error::other)
            }
            Compression::None => (&out).write_all(&content),
        };

        if let Err(e) = result {
            report(&format!("compressing {}", self.path.display()), &e);
        }
    }
}

fn open_base(path: &Path) -> io::Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .read(true)
        .open(path)
}
