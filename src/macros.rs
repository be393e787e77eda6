//! Ambient logging macros.
//!
//! These go through the process-wide logger and capture what plain methods
//! cannot: the caller's function name. Arguments are only stringified when
//! the level passes the filter.

/// The fully qualified name of the enclosing function.
///
/// Works by reading the type name of a local item, which carries the path of
/// the function it was defined in.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        if let Some(logger) = $crate::global::current() {
            if $level.is_none_or(|level| logger.enabled(level)) {
                logger.output(
                    $level,
                    $crate::Body::Format($fmt.to_string(), vec![$($arg.to_string()),*]),
                    Some($crate::Caller {
                        file: file!(),
                        line: line!(),
                        function: Some($crate::function_name!()),
                    }),
                );
            }
        }
    };
}

/// Logs at Debug through the process-wide logger.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::__log_at!(Some($crate::Level::Debug), $($arg)*) };
}

/// Logs at Info through the process-wide logger.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::__log_at!(Some($crate::Level::Info), $($arg)*) };
}

/// Logs at Warn through the process-wide logger.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::__log_at!(Some($crate::Level::Warn), $($arg)*) };
}

/// Logs at Error through the process-wide logger.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::__log_at!(Some($crate::Level::Error), $($arg)*) };
}

/// Logs at Fatal through the process-wide logger, then terminates the
/// process, with or without an installed logger.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        $crate::__log_at!(Some($crate::Level::Fatal), $($arg)*);
        ::std::process::exit(1)
    }};
}

/// Level-less plain print through the process-wide logger; never filtered.
#[macro_export]
macro_rules! log_print {
    ($($arg:tt)*) => { $crate::__log_at!(Option::<$crate::Level>::None, $($arg)*) };
}
