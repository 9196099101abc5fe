//! # svclog
//!
//! Consistent logging configuration for services: one call at process
//! start wires per-logger level thresholds, structured event rendering
//! (single-line plaintext or JSON), and atomic one-write-per-record
//! output on a shared stream.
//!
//! ## Usage
//!
//! ```no_run
//! use svclog::prelude::*;
//!
//! // Levels from SVCLOG_LEVELS, format from SVCLOG_FORMAT, stderr output.
//! let config = svclog::configure().expect("logging misconfigured");
//!
//! let log = config.logger("api.http");
//! log.info("listening");
//! ```
//!
//! Misconfiguration (unknown format selector, unknown severity name)
//! fails at startup. Once configured, a failing log call is reported on
//! the fallback channel and dropped; it never reaches the caller.

pub mod core;
pub mod host;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        configure, ConfigBuilder, ConfigError, EmitError, EventFields, EventValue, ExceptionInfo,
        LevelOverrides, LevelValue, LogEvent, LogFormat, LogLevel, Logger, LoggingConfig, Sink,
        TracebackFrame,
    };
    pub use crate::sinks::AtomicStreamSink;
}

pub use crate::core::{
    configure, default_levels, iso8601, merged_levels, parse_overrides, resolve, sorted_levels,
    ConfigBuilder, ConfigError, EmitError, EventFields, EventValue, ExceptionInfo, LevelOverrides,
    LevelValue, LogEvent, LogFormat, LogLevel, Logger, LoggingConfig, Sink, TracebackFrame,
    DEFAULT_FORMAT, DELIMITER, ENV_FORMAT, ENV_LEVELS,
};
pub use crate::host::{host_logconfig, LogConfigFragment, LoggerDirective};
pub use crate::sinks::AtomicStreamSink;
