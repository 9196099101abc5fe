//! Event rendering
//!
//! Converts one structured event into its final output line. The format
//! is resolved from its selector string once at configuration time and
//! dispatched as an enum afterwards. Both variants are pure with respect
//! to the event: they work on a clone and never mutate caller state.

use crate::core::error::{ConfigError, EmitError};
use crate::core::event::LogEvent;
use crate::core::log_level::LogLevel;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Output format for rendered events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line human-readable text
    ///
    /// Example: `2018-08-16T08:50:55.711270Z [INFO   ] [test] test-event`
    Plain,

    /// Single-line JSON object, keys sorted
    ///
    /// Example: `{"event":"test-event","level":"info","logger":"test","timestamp":"..."}`
    #[default]
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Plain => "plain",
            LogFormat::Json => "json",
        }
    }

    /// Render an event. `logger` and `ambient_level` supply defaults for
    /// events that do not carry their own `logger`/`level` fields.
    pub fn render(
        &self,
        logger: Option<&str>,
        ambient_level: LogLevel,
        event: &LogEvent,
    ) -> Result<String, EmitError> {
        match self {
            LogFormat::Plain => self.render_plain(logger, ambient_level, event),
            LogFormat::Json => self.render_json(event),
        }
    }

    /// `{timestamp} [{level:<7}] [{logger}] {message}` plus leftover
    /// key-value pairs in insertion order, plus a stripped traceback when
    /// an exception is attached. The width-7 level field pads but never
    /// truncates.
    fn render_plain(
        &self,
        logger: Option<&str>,
        ambient_level: LogLevel,
        event: &LogEvent,
    ) -> Result<String, EmitError> {
        let mut fields = event.fields().clone();

        let timestamp = fields
            .remove("timestamp")
            .ok_or(EmitError::MissingField("timestamp"))?;
        let logger_name = match fields.remove("logger") {
            Some(value) => value.to_string(),
            None => logger.unwrap_or("UNKNOWN").to_string(),
        };
        let level = match fields.remove("level") {
            Some(value) => value.to_string().to_uppercase(),
            None => ambient_level.to_str().to_string(),
        };
        let message = fields
            .remove("event")
            .ok_or(EmitError::MissingField("event"))?;

        let mut out = format!(
            "{} [{:<7}] [{}] {}",
            timestamp, level, logger_name, message
        );

        if !fields.is_empty() {
            out.push_str(&format!(" [{}]", fields.format_pairs()));
        }

        if let Some(exc) = event.exc_info() {
            out.push('\n');
            out.push_str(exc.format_traceback().trim_matches('\n'));
        }

        Ok(out)
    }

    /// One JSON object per event, keys sorted lexicographically. No field
    /// is dropped; an attached exception is merged in as rendered
    /// traceback text under the `exception` key.
    fn render_json(&self, event: &LogEvent) -> Result<String, EmitError> {
        let mut object = BTreeMap::new();
        for (key, value) in event.fields().iter() {
            object.insert(key.to_string(), value.to_json_value());
        }
        if let Some(exc) = event.exc_info() {
            object.insert(
                "exception".to_string(),
                serde_json::Value::String(exc.format_traceback()),
            );
        }
        Ok(serde_json::to_string(&object)?)
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid_format(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::exception::ExceptionInfo;

    fn fixed_event(level: &str) -> LogEvent {
        LogEvent::new("test-event")
            .with_field("timestamp", "2018-08-16T08:50:55.711270Z")
            .with_field("logger", "test")
            .with_field("level", level)
    }

    #[test]
    fn test_plain_fixed_event() {
        let rendered = LogFormat::Plain
            .render(None, LogLevel::Notset, &fixed_event("info"))
            .unwrap();
        assert_eq!(
            rendered,
            "2018-08-16T08:50:55.711270Z [INFO   ] [test] test-event"
        );
    }

    #[test]
    fn test_plain_extra_field() {
        let event = fixed_event("warning").with_field("extra", "foo");
        let rendered = LogFormat::Plain
            .render(None, LogLevel::Notset, &event)
            .unwrap();
        assert_eq!(
            rendered,
            "2018-08-16T08:50:55.711270Z [WARNING] [test] test-event [extra=foo]"
        );
    }

    #[test]
    fn test_plain_extras_keep_insertion_order() {
        let event = fixed_event("info")
            .with_field("zeta", 1)
            .with_field("alpha", 2);
        let rendered = LogFormat::Plain
            .render(None, LogLevel::Notset, &event)
            .unwrap();
        assert!(rendered.ends_with(" [zeta=1, alpha=2]"));
    }

    #[test]
    fn test_plain_defaults_from_ambient() {
        let event = LogEvent::new("boot").with_field("timestamp", "t");
        let rendered = LogFormat::Plain
            .render(Some("svc.main"), LogLevel::Error, &event)
            .unwrap();
        assert_eq!(rendered, "t [ERROR  ] [svc.main] boot");

        let rendered = LogFormat::Plain
            .render(None, LogLevel::Error, &event)
            .unwrap();
        assert_eq!(rendered, "t [ERROR  ] [UNKNOWN] boot");
    }

    #[test]
    fn test_plain_with_exception() {
        let event = LogEvent::new("err")
            .with_field("timestamp", "2018-08-16T08:50:55.711270Z")
            .with_field("logger", "test")
            .with_field("level", "error")
            .with_exc_info(ExceptionInfo::new("Exception", "test"));

        let rendered = LogFormat::Plain
            .render(None, LogLevel::Notset, &event)
            .unwrap();
        let lines: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(lines[0], "2018-08-16T08:50:55.711270Z [ERROR  ] [test] err");
        assert_eq!(lines[1], "Traceback (most recent call last):");
        assert_eq!(*lines.last().unwrap(), "Exception: test");
    }

    #[test]
    fn test_plain_missing_timestamp() {
        let event = LogEvent::new("no stamp");
        let err = LogFormat::Plain
            .render(None, LogLevel::Info, &event)
            .unwrap_err();
        assert!(matches!(err, EmitError::MissingField("timestamp")));
    }

    #[test]
    fn test_json_sorted_keys() {
        let event = fixed_event("info").with_field("request_id", "abc");
        let rendered = LogFormat::Json
            .render(None, LogLevel::Notset, &event)
            .unwrap();
        assert_eq!(
            rendered,
            "{\"event\":\"test-event\",\"level\":\"info\",\"logger\":\"test\",\
             \"request_id\":\"abc\",\"timestamp\":\"2018-08-16T08:50:55.711270Z\"}"
        );
    }

    #[test]
    fn test_json_exception_merged() {
        let event = fixed_event("error").with_exc_info(ExceptionInfo::new("Exception", "test"));
        let rendered = LogFormat::Json
            .render(None, LogLevel::Notset, &event)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            parsed["exception"],
            "Traceback (most recent call last):\nException: test"
        );
        // original fields survive alongside the merged traceback
        assert_eq!(parsed["event"], "test-event");
    }

    #[test]
    fn test_render_does_not_mutate_event() {
        let event = fixed_event("info").with_field("extra", "foo");
        let before = event.clone();

        let first = LogFormat::Json
            .render(None, LogLevel::Notset, &event)
            .unwrap();
        let second = LogFormat::Json
            .render(None, LogLevel::Notset, &event)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(event, before);

        let plain_first = LogFormat::Plain
            .render(None, LogLevel::Notset, &event)
            .unwrap();
        let plain_second = LogFormat::Plain
            .render(None, LogLevel::Notset, &event)
            .unwrap();
        assert_eq!(plain_first, plain_second);
        assert_eq!(event, before);
    }

    #[test]
    fn test_format_selector() {
        assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Plain);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(ConfigError::InvalidFormat(_))
        ));
        // selector is case sensitive, matching the deployment contract
        assert!("JSON".parse::<LogFormat>().is_err());
    }
}
