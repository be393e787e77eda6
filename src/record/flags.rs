//! Header composition flags.
//!
//! Each flag enables one optional header field; the composition order itself
//! is fixed (see [`Record::render`](super::Record::render)).

use bitflags::bitflags;

use crate::error::Error;

bitflags! {
    /// Selects which header fields are rendered in front of the message body.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        /// Date as `YYYY/MM/DD`.
        const DATE = 1;
        /// Time as `HH:MM:SS`.
        const TIME = 1 << 1;
        /// Microsecond resolution for the time field; implies TIME.
        const MICROSECONDS = 1 << 2;
        /// Normalize date/time to UTC instead of local time.
        const UTC = 1 << 3;
        /// Per-process record sequence number as `[N]`.
        const SEQUENCE = 1 << 4;
        /// Logger module name.
        const MODULE = 1 << 5;
        /// Suffix the module name with `-<thread id>`.
        const THREAD_ID = 1 << 6;
        /// Caller file name without its directory, plus line number.
        const SHORT_FILE = 1 << 7;
        /// Full caller file path plus line number.
        const LONG_FILE = 1 << 8;
        /// Caller function name without its module path.
        const SHORT_FUNCTION = 1 << 9;
        /// Fully qualified caller function name.
        const LONG_FUNCTION = 1 << 10;

        /// Date and time, the common default.
        const STD = Self::DATE.bits() | Self::TIME.bits();
        /// Everything, with the short file/function forms.
        const FULL = Self::STD.bits()
            | Self::MICROSECONDS.bits()
            | Self::SEQUENCE.bits()
            | Self::MODULE.bits()
            | Self::SHORT_FILE.bits()
            | Self::SHORT_FUNCTION.bits();
    }
}

impl Flags {
    /// True when any caller-location field is requested; the logger only
    /// pays for caller capture if this holds.
    #[must_use]
    pub const fn wants_caller(self) -> bool {
        self.intersects(
            Self::SHORT_FILE
                .union(Self::LONG_FILE)
                .union(Self::SHORT_FUNCTION)
                .union(Self::LONG_FUNCTION),
        )
    }

    /// Parses one config-file flag name.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFlag`] for unknown names.
    pub fn parse_name(name: &str) -> Result<Self, Error> {
        match name.to_lowercase().as_str() {
            "date" => Ok(Self::DATE),
            "time" => Ok(Self::TIME),
            "microseconds" => Ok(Self::MICROSECONDS),
            "utc" => Ok(Self::UTC),
            "sequence" => Ok(Self::SEQUENCE),
            "module" => Ok(Self::MODULE),
            "thread_id" => Ok(Self::THREAD_ID),
            "short_file" => Ok(Self::SHORT_FILE),
            "long_file" => Ok(Self::LONG_FILE),
            "short_function" => Ok(Self::SHORT_FUNCTION),
            "long_function" => Ok(Self::LONG_FUNCTION),
            "std" => Ok(Self::STD),
            "full" => Ok(Self::FULL),
            _ => Err(Error::InvalidFlag(name.to_string())),
        }
    }

    /// Parses a list of config-file flag names into one mask.
    ///
    /// # Errors
    /// Returns [`Error::InvalidFlag`] on the first unknown name.
    pub fn parse_names<I, S>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::empty();
        for name in names {
            flags |= Self::parse_name(name.as_ref())?;
        }
        Ok(flags)
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::STD
    }
}
