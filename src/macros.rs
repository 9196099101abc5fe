//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, plus an optional trailing field list:
//!
//! ```
//! use svclog::prelude::*;
//! use svclog::{info, warn};
//!
//! let config = LoggingConfig::builder().stream(std::io::sink()).build().unwrap();
//! let logger = config.logger("api");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With structured fields
//! warn!(logger, "Slow request"; path = "/search", elapsed_ms = 1250);
//! ```

/// Log a message with automatic formatting.
///
/// Fields after a `;` become structured event fields:
///
/// ```
/// # use svclog::prelude::*;
/// # let config = LoggingConfig::builder().stream(std::io::sink()).build().unwrap();
/// # let logger = config.logger("api");
/// use svclog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Upstream failed"; status = 502);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($key:ident = $value:expr),+ $(,)?) => {{
        let mut fields = $crate::EventFields::new();
        $(fields.insert(stringify!($key), $crate::EventValue::from($value));)+
        $logger.log_with_fields($level, $msg, fields)
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Record a traceback frame at the call site.
///
/// ```
/// use svclog::{frame, ExceptionInfo};
///
/// let exc = ExceptionInfo::new("TimeoutError", "upstream timed out")
///     .with_frame(frame!());
/// assert!(exc.frames[0].file.ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! frame {
    () => {
        $crate::TracebackFrame::new(file!(), line!(), module_path!())
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, LoggingConfig};

    fn logger() -> crate::core::Logger {
        let config = LoggingConfig::builder()
            .stream(std::io::sink())
            .build()
            .unwrap();
        config.logger("macros")
    }

    #[test]
    fn test_log_macro() {
        let logger = logger();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
    }

    #[test]
    fn test_log_macro_with_fields() {
        let logger = logger();
        log!(logger, LogLevel::Error, "Upstream failed"; status = 502, retried = true);
    }

    #[test]
    fn test_level_macros() {
        let logger = logger();
        debug!(logger, "Debug message");
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        critical!(logger, "Critical failure: {}", "disk full");
    }

    #[test]
    fn test_level_macros_with_fields() {
        let logger = logger();
        info!(logger, "Request done"; path = "/health", status = 200);
        error!(logger, "Request failed"; path = "/search");
    }

    #[test]
    fn test_frame_macro() {
        let frame = frame!();
        assert!(frame.file.ends_with("macros.rs"));
        assert!(frame.line > 0);
        assert!(frame.function.contains("macros"));
    }
}
