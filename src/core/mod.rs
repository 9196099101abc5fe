//! Core types: events, levels, rendering, resolution, configuration

pub mod error;
pub mod event;
pub mod exception;
pub mod log_level;
pub mod logger;
pub mod renderer;
pub mod resolver;
pub mod sink;

pub use error::{ConfigError, EmitError};
pub use event::{iso8601, EventFields, EventValue, LogEvent};
pub use exception::{ExceptionInfo, TracebackFrame};
pub use log_level::LogLevel;
pub use logger::{
    configure, ConfigBuilder, Logger, LoggingConfig, DEFAULT_FORMAT, ENV_FORMAT, ENV_LEVELS,
};
pub use renderer::LogFormat;
pub use resolver::{
    default_levels, merged_levels, parse_overrides, resolve, sorted_levels, LevelOverrides,
    LevelValue, DELIMITER,
};
pub use sink::Sink;
