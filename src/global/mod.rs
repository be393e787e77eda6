//! The process-wide logger slot behind the ambient logging calls.
//!
//! The slot holds an explicit handle (`Arc<Logger>`) rather than hiding the
//! logger entirely: replacement hands the previous instance back so exactly
//! one owner is responsible for flushing it. `init` flushes the displaced
//! logger itself; `replace` leaves that to the caller.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::level::Level;
use crate::logger::Logger;

static CURRENT: RwLock<Option<Arc<Logger>>> = RwLock::new(None);

/// Installs the logger as the process-wide current one and returns its
/// handle. A previously installed logger is flushed before being dropped, so
/// its background thread and queued records are not leaked.
pub fn init(logger: Logger) -> Arc<Logger> {
    let handle = Arc::new(logger);
    let previous = swap(Some(Arc::clone(&handle)));
    if let Some(previous) = previous {
        previous.flush();
    }
    handle
}

/// Swaps in a new logger and returns the previous one unflushed; stopping
/// it becomes the caller's responsibility.
pub fn replace(logger: Logger) -> Option<Arc<Logger>> {
    swap(Some(Arc::new(logger)))
}

/// The currently installed logger, if any.
#[must_use]
pub fn current() -> Option<Arc<Logger>> {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Removes the current logger and flushes it. The final ambient operation;
/// calls after shutdown are silently dropped.
pub fn shutdown() {
    if let Some(logger) = swap(None) {
        logger.flush();
    }
}

fn swap(logger: Option<Arc<Logger>>) -> Option<Arc<Logger>> {
    let mut slot = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, logger)
}

// Ambient wrappers: thin, and silently inert when no logger is installed.

#[track_caller]
pub fn debug(msg: impl fmt::Display) {
    if let Some(logger) = current() {
        logger.debug(msg);
    }
}

#[track_caller]
pub fn info(msg: impl fmt::Display) {
    if let Some(logger) = current() {
        logger.info(msg);
    }
}

#[track_caller]
pub fn warn(msg: impl fmt::Display) {
    if let Some(logger) = current() {
        logger.warn(msg);
    }
}

#[track_caller]
pub fn error(msg: impl fmt::Display) {
    if let Some(logger) = current() {
        logger.error(msg);
    }
}

/// Terminates the process after delivery when a logger is installed; with no
/// logger it still terminates, staying true to the level's contract.
#[track_caller]
pub fn fatal(msg: impl fmt::Display) -> ! {
    if let Some(logger) = current() {
        logger.fatal(msg);
    }
    std::process::exit(1)
}

#[track_caller]
pub fn print(parts: &[&dyn fmt::Display]) {
    if let Some(logger) = current() {
        logger.print(parts);
    }
}

#[track_caller]
pub fn println(parts: &[&dyn fmt::Display]) {
    if let Some(logger) = current() {
        logger.println(parts);
    }
}

#[track_caller]
pub fn printf(fmt: &str, parts: &[&dyn fmt::Display]) {
    if let Some(logger) = current() {
        logger.printf(fmt, parts);
    }
}

/// Adjusts the current logger's threshold; inert when none is installed.
pub fn set_level(level: Level) {
    if let Some(logger) = current() {
        logger.set_level(level);
    }
}
