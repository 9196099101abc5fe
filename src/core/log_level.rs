//! Log level definitions
//!
//! Severities carry the numeric values used by the wider service fleet
//! (NOTSET=0 through CRITICAL=50), so thresholds supplied as raw numbers
//! interoperate with thresholds supplied as names.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    /// Defer to the parent logger's threshold
    Notset = 0,
    Debug = 10,
    #[default]
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

impl LogLevel {
    /// Uppercase name, as rendered in plaintext output
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Notset => "NOTSET",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Lowercase name, as stamped into the `level` event field
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Notset => "notset",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }

    /// Numeric severity used for threshold comparisons
    pub fn severity(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NOTSET" => Ok(LogLevel::Notset),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            _ => Err(ConfigError::invalid_level(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_values() {
        assert_eq!(LogLevel::Notset.severity(), 0);
        assert_eq!(LogLevel::Debug.severity(), 10);
        assert_eq!(LogLevel::Info.severity(), 20);
        assert_eq!(LogLevel::Warning.severity(), 30);
        assert_eq!(LogLevel::Error.severity(), 40);
        assert_eq!(LogLevel::Critical.severity(), 50);
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Critical);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel(_)));
    }

    #[test]
    fn test_display_matches_to_str() {
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
        assert_eq!(LogLevel::Critical.to_string(), "CRITICAL");
    }
}
