//! Process-wide logging configuration and named logger handles
//!
//! `LoggingConfig` is the explicit handle owned by the process startup
//! routine: it holds the per-logger severity registry, the renderer
//! resolved at configure time, and the installed sink list. Loggers are
//! cheap named handles bound to a config; nothing here relies on ambient
//! global lookup.
//!
//! The contract is configure-once-at-process-start. Log calls from many
//! threads are safe; concurrent `configure` calls are caller
//! responsibility and the last one wins.

use crate::core::error::{ConfigError, EmitError};
use crate::core::event::{EventFields, LogEvent};
use crate::core::exception::ExceptionInfo;
use crate::core::log_level::LogLevel;
use crate::core::renderer::LogFormat;
use crate::core::resolver::{resolve, LevelOverrides};
use crate::core::sink::Sink;
use crate::sinks::AtomicStreamSink;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

/// Environment variable consulted when no level overrides are passed
pub const ENV_LEVELS: &str = "SVCLOG_LEVELS";

/// Environment variable consulted when no format selector is passed
pub const ENV_FORMAT: &str = "SVCLOG_FORMAT";

/// Format used when neither an argument nor the environment selects one
pub const DEFAULT_FORMAT: &str = "json";

struct ConfigState {
    /// Severity thresholds by logger name; "" is the root entry
    levels: HashMap<String, u32>,
    format: LogFormat,
    sinks: Vec<Box<dyn Sink>>,
    configured: bool,
}

/// Handle to the process-wide logging configuration.
///
/// Cheap to clone; clones share the same underlying state.
#[derive(Clone)]
pub struct LoggingConfig {
    state: Arc<RwLock<ConfigState>>,
}

impl LoggingConfig {
    /// Create an unconfigured handle. Events logged through it are
    /// discarded until `configure` runs.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(ConfigState {
                levels: HashMap::new(),
                format: LogFormat::default(),
                sinks: Vec::new(),
                configured: false,
            })),
        }
    }

    /// Create a builder for a configured handle
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Configure all logging on this handle.
    ///
    /// `levels` falls back to `SVCLOG_LEVELS`, `format` to
    /// `SVCLOG_FORMAT` and then `"json"`. The sink list is replaced
    /// wholesale on every call, so configuring twice never stacks
    /// duplicate outputs. Level application is fail-fast: an unknown
    /// severity name aborts mid-sequence with prior assignments left in
    /// place.
    pub fn configure(
        &self,
        stream: Box<dyn Write + Send>,
        levels: Option<LevelOverrides>,
        format: Option<&str>,
    ) -> Result<(), ConfigError> {
        let selector = match format {
            Some(selector) => selector.to_string(),
            None => std::env::var(ENV_FORMAT).unwrap_or_else(|_| DEFAULT_FORMAT.to_string()),
        };
        let format = selector.parse::<LogFormat>()?;

        let levels = match levels {
            Some(levels) => Some(levels),
            None => std::env::var(ENV_LEVELS).ok().map(LevelOverrides::from),
        };

        {
            let mut state = self.state.write();
            state.format = format;
            state.sinks = vec![Box::new(AtomicStreamSink::new(stream))];
            state.configured = true;
        }

        self.apply_levels(levels.as_ref())
    }

    /// Resolve overrides and apply each `(name, severity)` pair to the
    /// registry in configuration order. No rollback on partial failure.
    pub fn apply_levels(&self, overrides: Option<&LevelOverrides>) -> Result<(), ConfigError> {
        for (name, level) in resolve(overrides) {
            let severity = level.severity()?;
            self.set_level(&name, severity);
        }
        Ok(())
    }

    /// Set one logger's severity threshold
    pub fn set_level(&self, name: &str, severity: u32) {
        self.state.write().levels.insert(name.to_string(), severity);
    }

    /// Effective threshold for a logger name: the most specific registry
    /// entry walking the dot-separated name up to the root. NOTSET
    /// entries defer to their parent; an empty registry defaults to
    /// WARNING.
    pub fn effective_severity(&self, name: &str) -> u32 {
        let state = self.state.read();
        let mut current = name;
        loop {
            if let Some(&severity) = state.levels.get(current) {
                if severity > LogLevel::Notset.severity() {
                    return severity;
                }
            }
            if current.is_empty() {
                return LogLevel::Warning.severity();
            }
            current = match current.rsplit_once('.') {
                Some((parent, _)) => parent,
                None => "",
            };
        }
    }

    /// Whether a record at `level` from logger `name` would be emitted
    pub fn is_enabled(&self, name: &str, level: LogLevel) -> bool {
        level.severity() >= self.effective_severity(name)
    }

    /// Create a named logger bound to this configuration
    pub fn logger(&self, name: impl Into<String>) -> Logger {
        Logger {
            name: name.into(),
            config: self.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.state.read().configured
    }

    pub fn format(&self) -> LogFormat {
        self.state.read().format
    }

    /// Number of installed sinks. Stays at one across repeated
    /// `configure` calls.
    pub fn sink_count(&self) -> usize {
        self.state.read().sinks.len()
    }

    /// Replace the installed sink list with a single sink
    pub fn install_sink(&self, sink: Box<dyn Sink>) {
        let mut state = self.state.write();
        state.sinks = vec![sink];
        state.configured = true;
    }

    /// Flush all installed sinks
    pub fn flush(&self) -> Result<(), EmitError> {
        let mut state = self.state.write();
        for sink in state.sinks.iter_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    /// Render and emit one event. Failures are reported through the
    /// fallback channel, never returned: a bad record or a transient
    /// write failure must not take down the code that logged it.
    fn dispatch(&self, logger: &str, level: LogLevel, event: &LogEvent) {
        let format = self.state.read().format;

        let line = match format.render(Some(logger), level, event) {
            Ok(line) => line,
            Err(err) => {
                Self::report_failure(&err);
                return;
            }
        };

        let mut state = self.state.write();
        for sink in state.sinks.iter_mut() {
            if let Err(err) = sink.emit(&line) {
                Self::report_failure(&err);
            }
        }
    }

    /// Fallback error channel for emit failures: one stderr line per
    /// failed record, no retry.
    fn report_failure(err: &EmitError) {
        eprintln!("[LOGGING ERROR] failed to emit log record: {}", err);
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Named logger handle bound to a [`LoggingConfig`].
#[derive(Clone)]
pub struct Logger {
    name: String,
    config: LoggingConfig,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.config.is_enabled(&self.name, level)
    }

    /// Log a message at `level`
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_event(level, LogEvent::new(message));
    }

    /// Log a message with structured fields
    pub fn log_with_fields(&self, level: LogLevel, message: impl Into<String>, fields: EventFields) {
        self.log_event(level, LogEvent::with_fields(message, fields));
    }

    /// Log a fully built event. The event is stamped with this logger's
    /// name, the level's lowercase name, and the current timestamp,
    /// unless the caller already set those fields.
    pub fn log_event(&self, level: LogLevel, mut event: LogEvent) {
        if !self.is_enabled(level) {
            return;
        }
        event.stamp(&self.name, level, Utc::now());
        self.config.dispatch(&self.name, level, &event);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    /// Helper for structured info logging
    pub fn info_with_fields(&self, message: impl Into<String>, fields: EventFields) {
        self.log_with_fields(LogLevel::Info, message, fields);
    }

    /// Helper for structured error logging
    pub fn error_with_fields(&self, message: impl Into<String>, fields: EventFields) {
        self.log_with_fields(LogLevel::Error, message, fields);
    }

    /// Log at ERROR with a captured exception attached
    pub fn exception(&self, message: impl Into<String>, exc_info: ExceptionInfo) {
        self.log_event(LogLevel::Error, LogEvent::new(message).with_exc_info(exc_info));
    }
}

/// Builder for a configured [`LoggingConfig`].
///
/// # Example
/// ```
/// use svclog::prelude::*;
///
/// let config = LoggingConfig::builder()
///     .stream(std::io::sink())
///     .levels("root:debug,api:info")
///     .format("plain")
///     .build()
///     .expect("logging misconfigured");
/// let log = config.logger("api.http");
/// log.info("listening");
/// ```
pub struct ConfigBuilder {
    stream: Option<Box<dyn Write + Send>>,
    levels: Option<LevelOverrides>,
    format: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            stream: None,
            levels: None,
            format: None,
        }
    }

    /// Set the output stream. Defaults to standard error.
    #[must_use = "builder methods return a new value"]
    pub fn stream(mut self, stream: impl Write + Send + 'static) -> Self {
        self.stream = Some(Box::new(stream));
        self
    }

    /// Set level overrides (a delimited string or a map)
    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, overrides: impl Into<LevelOverrides>) -> Self {
        self.levels = Some(overrides.into());
        self
    }

    /// Set the format selector (`"plain"` or `"json"`)
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, selector: impl Into<String>) -> Self {
        self.format = Some(selector.into());
        self
    }

    /// Build the configured handle. Fails on an unknown format selector
    /// or severity name; both signal deployment misconfiguration and
    /// should crash startup.
    pub fn build(self) -> Result<LoggingConfig, ConfigError> {
        let stream = self
            .stream
            .unwrap_or_else(|| Box::new(std::io::stderr()));
        let config = LoggingConfig::new();
        config.configure(stream, self.levels, self.format.as_deref())?;
        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure all logging with environment defaults: levels from
/// `SVCLOG_LEVELS`, format from `SVCLOG_FORMAT` (falling back to JSON),
/// output on standard error.
pub fn configure() -> Result<LoggingConfig, ConfigError> {
    LoggingConfig::builder().build()
}
