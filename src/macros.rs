//! Logging macros
//!
//! The level macros capture the call site of the statement they are written
//! in and box their arguments for deferred formatting. Arguments are owned
//! values; they are formatted on a worker, and only if the record is written.
//!
//! # Examples
//!
//! ```
//! use rust_pattern_logger::prelude::*;
//! use rust_pattern_logger::{error, info};
//! use std::sync::Arc;
//!
//! let service = Arc::new(
//!     LogService::builder()
//!         .workers(Arc::new(InlineExecutor))
//!         .build()
//!         .unwrap(),
//! );
//! let logger = service.logger("app::server");
//!
//! // Basic logging
//! info!(logger, "Server started").unwrap();
//!
//! // With deferred arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).unwrap();
//!
//! // With an error attached
//! let err = std::io::Error::other("disk full");
//! error!(logger, exception = err, "Failed to persist {} records", 12).unwrap();
//! ```

/// Capture the [`CallSite`](crate::CallSite) of the enclosing statement.
///
/// ```
/// use rust_pattern_logger::{call_site, StackFrame};
///
/// fn handle_request() -> StackFrame {
///     StackFrame::resolve(Some(&call_site!())).unwrap()
/// }
///
/// let frame = handle_request();
/// assert_eq!(frame.method_name, "handle_request");
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __log_call_site() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::CallSite::new(
            ::std::module_path!(),
            __type_name_of(__log_call_site),
            ::std::file!(),
            ::std::line!(),
        )
    }};
}

/// Box values into a `Vec<Argument>` for `{}` substitution.
///
/// ```
/// use rust_pattern_logger::arguments;
///
/// let args = arguments!["alice", 42, 1.5];
/// assert_eq!(args[1].to_string(), "42");
/// assert!(arguments![].is_empty());
/// ```
#[macro_export]
macro_rules! arguments {
    () => {
        ::std::vec::Vec::<$crate::Argument>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$(::std::boxed::Box::new($arg) as $crate::Argument),+]
    };
}

/// Log at an explicit level.
///
/// Evaluates to `Result<()>`: `Ok` when the record was handed off or the
/// logger is disabled, and an error when caller detail is required but could
/// not be resolved. Arguments are not boxed when the logger is disabled.
///
/// ```
/// # use rust_pattern_logger::prelude::*;
/// # use std::sync::Arc;
/// # let service = Arc::new(LogService::builder().workers(Arc::new(InlineExecutor)).build().unwrap());
/// # let logger = service.logger("app");
/// use rust_pattern_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, exception = $exception:expr, $message:expr $(, $arg:expr)* $(,)?) => {{
        let __logger = $logger.at($level);
        if __logger.is_enabled() {
            __logger.log_enabled(
                &$crate::call_site!(),
                ::std::option::Option::Some(::std::convert::Into::<$crate::Exception>::into($exception)),
                $message,
                $crate::arguments![$($arg),*],
            )
        } else {
            ::std::result::Result::<(), $crate::LoggerError>::Ok(())
        }
    }};
    ($logger:expr, $level:expr, $message:expr $(, $arg:expr)* $(,)?) => {{
        let __logger = $logger.at($level);
        if __logger.is_enabled() {
            __logger.log_enabled(
                &$crate::call_site!(),
                ::std::option::Option::None,
                $message,
                $crate::arguments![$($arg),*],
            )
        } else {
            ::std::result::Result::<(), $crate::LoggerError>::Ok(())
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($rest)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($rest)+)
    };
}

/// Log an info-level message.
///
/// ```
/// # use rust_pattern_logger::prelude::*;
/// # use std::sync::Arc;
/// # let service = Arc::new(LogService::builder().workers(Arc::new(InlineExecutor)).build().unwrap());
/// # let logger = service.logger("app");
/// use rust_pattern_logger::info;
/// info!(logger, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($rest)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($rest)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($rest)+)
    };
}
