//! The logging façade: level filter, sequence assignment, record
//! construction, and dispatch to the configured backend.

mod builder;
mod from_config;

pub use builder::{LoggerBuilder, RotateBuilder};

use std::fmt;
use std::panic::Location;
use std::process;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use crate::backend::Backend;
use crate::level::Level;
use crate::record::{Body, Caller, Flags, Record};

/// Owns exactly one backend. Cheap to share behind an `Arc`; the level can be
/// raised or lowered at runtime, everything else is fixed at build time.
pub struct Logger {
    min_level: AtomicU8,
    prefix: Option<String>,
    name: String,
    flags: Flags,
    seq: AtomicU64,
    backend: Box<dyn Backend>,
}

impl Logger {
    /// Direct construction would expose backend internals; the builder
    /// provides a guided API instead.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn new(
        min_level: Level,
        prefix: Option<String>,
        name: String,
        flags: Flags,
        backend: Box<dyn Backend>,
    ) -> Self {
        Self {
            min_level: AtomicU8::new(min_level as u8),
            prefix,
            name,
            flags,
            seq: AtomicU64::new(0),
            backend,
        }
    }

    /// The active severity threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    /// Raises or lowers the threshold at runtime.
    pub fn set_level(&self, level: Level) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    /// Cheap pre-check so callers (and the macros) can skip argument
    /// stringification for filtered-out levels.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// The backend, for capability queries (`is_tty`, `raw_fd`) and sink swaps.
    #[must_use]
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Graceful, blocking shutdown of the backend. Must be the final
    /// operation; a repeated call is a no-op.
    pub fn flush(&self) {
        self.backend.flush();
    }

    // Leveled single-message calls (concatenation mode).

    #[track_caller]
    pub fn debug(&self, msg: impl fmt::Display) {
        self.message(Level::Debug, msg);
    }

    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) {
        self.message(Level::Info, msg);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) {
        self.message(Level::Warn, msg);
    }

    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) {
        self.message(Level::Error, msg);
    }

    /// Delivers the record, flushes the backend so queued variants drain it,
    /// and terminates the process. The only level that affects control flow.
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) -> ! {
        self.message(Level::Fatal, msg);
        // message() exits for Fatal; this only satisfies the `!` return.
        process::exit(1)
    }

    // Leveled format-mode calls: `{}` placeholders substituted at render time.

    #[track_caller]
    pub fn debugf(&self, fmt: &str, parts: &[&dyn fmt::Display]) {
        self.messagef(Level::Debug, fmt, parts);
    }

    #[track_caller]
    pub fn infof(&self, fmt: &str, parts: &[&dyn fmt::Display]) {
        self.messagef(Level::Info, fmt, parts);
    }

    #[track_caller]
    pub fn warnf(&self, fmt: &str, parts: &[&dyn fmt::Display]) {
        self.messagef(Level::Warn, fmt, parts);
    }

    #[track_caller]
    pub fn errorf(&self, fmt: &str, parts: &[&dyn fmt::Display]) {
        self.messagef(Level::Error, fmt, parts);
    }

    #[track_caller]
    pub fn fatalf(&self, fmt: &str, parts: &[&dyn fmt::Display]) -> ! {
        self.messagef(Level::Fatal, fmt, parts);
        process::exit(1)
    }

    // Leveled line-mode calls: parts joined with spaces, newline-terminated.

    #[track_caller]
    pub fn debugln(&self, parts: &[&dyn fmt::Display]) {
        self.messageln(Level::Debug, parts);
    }

    #[track_caller]
    pub fn infoln(&self, parts: &[&dyn fmt::Display]) {
        self.messageln(Level::Info, parts);
    }

    #[track_caller]
    pub fn warnln(&self, parts: &[&dyn fmt::Display]) {
        self.messageln(Level::Warn, parts);
    }

    #[track_caller]
    pub fn errorln(&self, parts: &[&dyn fmt::Display]) {
        self.messageln(Level::Error, parts);
    }

    #[track_caller]
    pub fn fatalln(&self, parts: &[&dyn fmt::Display]) -> ! {
        self.messageln(Level::Fatal, parts);
        process::exit(1)
    }

    // Level-less plain prints: never filtered, no `[LEVEL]` tag.

    #[track_caller]
    pub fn print(&self, parts: &[&dyn fmt::Display]) {
        self.emit(None, Body::Concat(stringify(parts)), None);
    }

    #[track_caller]
    pub fn printf(&self, fmt: &str, parts: &[&dyn fmt::Display]) {
        self.emit(None, Body::Format(fmt.to_string(), stringify(parts)), None);
    }

    #[track_caller]
    pub fn println(&self, parts: &[&dyn fmt::Display]) {
        self.emit(None, Body::Line(stringify(parts)), None);
    }

    /// Macro entry point: pre-stringified body plus full caller info
    /// (including the function name, which only a macro can capture).
    /// Filters like the leveled methods do.
    pub fn output(&self, level: Option<Level>, body: Body, caller: Option<Caller>) {
        if let Some(level) = level
            && !self.enabled(level)
        {
            return;
        }
        let caller = if self.flags.wants_caller() {
            caller
        } else {
            None
        };
        self.dispatch(level, body, caller);
    }

    #[track_caller]
    fn message(&self, level: Level, msg: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }
        self.emit(Some(level), Body::Concat(vec![msg.to_string()]), None);
    }

    #[track_caller]
    fn messagef(&self, level: Level, fmt: &str, parts: &[&dyn fmt::Display]) {
        if !self.enabled(level) {
            return;
        }
        self.emit(
            Some(level),
            Body::Format(fmt.to_string(), stringify(parts)),
            None,
        );
    }

    #[track_caller]
    fn messageln(&self, level: Level, parts: &[&dyn fmt::Display]) {
        if !self.enabled(level) {
            return;
        }
        self.emit(Some(level), Body::Line(stringify(parts)), None);
    }

    /// Captures the caller location when the flags ask for it, then hands off.
    #[track_caller]
    fn emit(&self, level: Option<Level>, body: Body, function: Option<&'static str>) {
        let caller = if self.flags.wants_caller() {
            let location = Location::caller();
            Some(Caller {
                file: location.file(),
                line: location.line(),
                function,
            })
        } else {
            None
        };
        self.dispatch(level, body, caller);
    }

    /// Sequence assignment happens here, after every filter, so accepted
    /// records carry contiguous indices.
    fn dispatch(&self, level: Option<Level>, body: Body, caller: Option<Caller>) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let mut record = Record::new(seq, level, body, self.flags).with_module(&self.name);
        if let Some(prefix) = &self.prefix {
            record = record.with_prefix(prefix.clone());
        }
        if let Some(caller) = caller {
            record = record.with_caller(caller);
        }
        self.backend.log(record);

        if level == Some(Level::Fatal) {
            self.backend.flush();
            process::exit(1);
        }
    }
}

fn stringify(parts: &[&dyn fmt::Display]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

/// The running process's name, used as the default module field and the
/// default rotating log filename stem.
pub(crate) fn process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "rotolog".to_string())
}
