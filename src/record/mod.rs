//! One log event plus its lazily computed rendered byte form.
//!
//! A `Record` is immutable after the backend takes ownership; the rendered
//! buffer is computed at most once no matter how many times it is queried.

mod flags;

pub use flags::Flags;

use std::fmt::Write as _;
use std::sync::OnceLock;
use std::thread;

use chrono::{DateTime, Local, Timelike};

use crate::color;
use crate::level::Level;

/// Caller location captured at the log call site.
///
/// File and line come from `#[track_caller]` or the `file!`/`line!` macros;
/// the function name can only be supplied by the logging macros, so it stays
/// optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
    pub function: Option<&'static str>,
}

/// How the argument list becomes the message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Parts concatenated directly, no separator.
    Concat(Vec<String>),
    /// `{}` placeholders in the format string substituted left to right;
    /// surplus parts are appended space-separated.
    Format(String, Vec<String>),
    /// Parts joined with single spaces and terminated with a newline,
    /// matching multi-value print semantics.
    Line(Vec<String>),
}

impl Body {
    fn render(&self) -> String {
        match self {
            Self::Concat(parts) => parts.concat(),
            Self::Format(fmt, parts) => substitute(fmt, parts),
            Self::Line(parts) => {
                let mut s = parts.join(" ");
                s.push('\n');
                s
            }
        }
    }
}

/// Replaces each `{}` in `fmt` with the next part; placeholders beyond the
/// part list stay literal, surplus parts are appended space-separated.
fn substitute(fmt: &str, parts: &[String]) -> String {
    let mut out = String::with_capacity(fmt.len());
    let mut next = 0;
    let mut rest = fmt;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        if let Some(part) = parts.get(next) {
            out.push_str(part);
            next += 1;
        } else {
            out.push_str("{}");
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    for part in &parts[next.min(parts.len())..] {
        out.push(' ');
        out.push_str(part);
    }
    out
}

/// An immutable-after-creation log event with a compute-once rendered buffer.
#[derive(Debug)]
pub struct Record {
    seq: u64,
    time: DateTime<Local>,
    level: Option<Level>,
    prefix: Option<String>,
    module: Option<String>,
    caller: Option<Caller>,
    body: Body,
    flags: Flags,
    color: Option<&'static str>,
    newline: bool,
    rendered: OnceLock<Vec<u8>>,
}

impl Record {
    /// A minimal record; the logger adds prefix, module, and caller via the
    /// `with_*` methods before handing ownership to the backend.
    #[must_use]
    pub fn new(seq: u64, level: Option<Level>, body: Body, flags: Flags) -> Self {
        Self {
            seq,
            time: Local::now(),
            level,
            prefix: None,
            module: None,
            caller: None,
            body,
            flags,
            color: None,
            newline: true,
            rendered: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    #[must_use]
    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Syslog appends its own line terminator, so that backend switches this
    /// off before the first render.
    pub const fn set_newline(&mut self, newline: bool) {
        self.newline = newline;
    }

    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub const fn level(&self) -> Option<Level> {
        self.level
    }

    /// Must be set by the consuming backend before the first `render` call;
    /// a later call has no effect on the already-memoized buffer.
    pub fn set_color(&mut self, color: &'static str) {
        self.color = Some(color);
    }

    /// Renders the record, memoizing the result.
    ///
    /// Idempotent: every call returns the same bytes, computed at most once
    /// even under concurrent observers.
    pub fn render(&self) -> &[u8] {
        self.rendered.get_or_init(|| self.compose())
    }

    fn compose(&self) -> Vec<u8> {
        let mut out = String::new();
        if let Some(color) = self.color {
            out.push_str(color);
        }
        self.header(&mut out);
        let body = self.body.render();
        out.push_str(&body);
        if self.newline && !body.ends_with('\n') {
            out.push('\n');
        }
        if self.color.is_some() {
            out.push_str(color::RESET);
        }
        out.into_bytes()
    }

    /// Header fields in fixed order: prefix, date/time, sequence, level tag,
    /// module, file:line, function.
    fn header(&self, out: &mut String) {
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
        }

        if self
            .flags
            .intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS)
        {
            let t = if self.flags.contains(Flags::UTC) {
                self.time.naive_utc()
            } else {
                self.time.naive_local()
            };
            if self.flags.contains(Flags::DATE) {
                let _ = write!(out, "{} ", t.format("%Y/%m/%d"));
            }
            if self.flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
                let _ = write!(out, "{}", t.format("%H:%M:%S"));
                if self.flags.contains(Flags::MICROSECONDS) {
                    let _ = write!(out, ".{:06}", t.nanosecond() / 1_000);
                }
                out.push(' ');
            }
        }

        if self.flags.contains(Flags::SEQUENCE) {
            let _ = write!(out, "[{}] ", self.seq);
        }

        if let Some(level) = self.level {
            let _ = write!(out, "[{}] ", level.tag());
        }

        if self.flags.contains(Flags::MODULE)
            && let Some(module) = &self.module
            && !module.is_empty()
        {
            out.push_str(module);
            if self.flags.contains(Flags::THREAD_ID) {
                let _ = write!(out, "-{}", current_thread_id());
            }
            out.push(' ');
        }

        let wants_file = self.flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE);
        let wants_function = self
            .flags
            .intersects(Flags::SHORT_FUNCTION | Flags::LONG_FUNCTION);

        if let Some(caller) = &self.caller {
            if wants_file {
                let file = if self.flags.contains(Flags::SHORT_FILE) {
                    caller
                        .file
                        .rsplit(['/', '\\'])
                        .next()
                        .unwrap_or(caller.file)
                } else {
                    caller.file
                };
                let _ = write!(out, "{file}:{}:", caller.line);
                if !wants_function {
                    out.push(' ');
                }
            }
            if wants_function {
                let function = caller.function.unwrap_or("???");
                let function = if self.flags.contains(Flags::SHORT_FUNCTION) {
                    function.rsplit("::").next().unwrap_or(function)
                } else {
                    function
                };
                let _ = write!(out, "{function}: ");
            }
        }
    }
}

/// Numeric id of the current thread, for the `-<thread id>` module suffix.
///
/// `ThreadId` exposes no stable numeric accessor, so this leans on its Debug
/// form (`ThreadId(N)`).
fn current_thread_id() -> String {
    let id = format!("{:?}", thread::current().id());
    id.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitute_fills_placeholders_in_order() {
        let parts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(substitute("x {} y {}", &parts), "x a y b");
    }

    #[test]
    fn substitute_keeps_unmatched_placeholders() {
        let parts = vec!["a".to_string()];
        assert_eq!(substitute("{} {}", &parts), "a {}");
    }

    #[test]
    fn substitute_appends_surplus_parts() {
        let parts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(substitute("only {}", &parts), "only a b");
    }

    #[test]
    fn thread_id_is_numeric() {
        let id = current_thread_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}
