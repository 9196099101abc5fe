//! Per-logger level resolution
//!
//! Turns user-supplied level overrides (a delimited string or a mapping)
//! into the final per-logger-name severity set, merged with the built-in
//! defaults and emitted in configuration order: least specific first so
//! broader settings never clobber more specific ones applied after them.

use crate::core::error::ConfigError;
use crate::core::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Delimiter for string-form overrides
pub const DELIMITER: char = ',';

/// A level threshold as supplied by the user: either a severity name
/// (resolved case-insensitively) or an already-numeric severity that
/// passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelValue {
    Severity(u32),
    Named(String),
}

impl LevelValue {
    /// Normalize to a numeric severity
    pub fn severity(&self) -> Result<u32, ConfigError> {
        match self {
            LevelValue::Severity(n) => Ok(*n),
            LevelValue::Named(name) => Ok(name.parse::<LogLevel>()?.severity()),
        }
    }
}

impl From<&str> for LevelValue {
    fn from(s: &str) -> Self {
        LevelValue::Named(s.to_string())
    }
}

impl From<String> for LevelValue {
    fn from(s: String) -> Self {
        LevelValue::Named(s)
    }
}

impl From<LogLevel> for LevelValue {
    fn from(level: LogLevel) -> Self {
        LevelValue::Severity(level.severity())
    }
}

impl From<u32> for LevelValue {
    fn from(n: u32) -> Self {
        LevelValue::Severity(n)
    }
}

/// User input for level overrides: a delimited string or an explicit map
#[derive(Debug, Clone, PartialEq)]
pub enum LevelOverrides {
    Str(String),
    Map(HashMap<String, LevelValue>),
}

impl From<&str> for LevelOverrides {
    fn from(s: &str) -> Self {
        LevelOverrides::Str(s.to_string())
    }
}

impl From<String> for LevelOverrides {
    fn from(s: String) -> Self {
        LevelOverrides::Str(s)
    }
}

impl From<HashMap<String, LevelValue>> for LevelOverrides {
    fn from(map: HashMap<String, LevelValue>) -> Self {
        LevelOverrides::Map(map)
    }
}

impl<const N: usize> From<[(&str, LevelValue); N]> for LevelOverrides {
    fn from(pairs: [(&str, LevelValue); N]) -> Self {
        LevelOverrides::Map(
            pairs
                .into_iter()
                .map(|(name, level)| (name.to_string(), level))
                .collect(),
        )
    }
}

/// Built-in defaults applied before user overrides: root at INFO plus
/// warnings-only thresholds for noisy third-party client stacks.
pub fn default_levels() -> HashMap<String, LevelValue> {
    HashMap::from([
        (String::new(), LevelValue::from(LogLevel::Info)),
        ("requests".to_string(), LevelValue::from(LogLevel::Warning)),
        ("urllib3".to_string(), LevelValue::from(LogLevel::Warning)),
    ])
}

/// Parse a delimited override string into `{logger_name: level}`.
///
/// Each part is `name:level` or a bare `level` (bare applies to the root
/// logger `""`). A name literally equal to `root` normalizes to `""`.
/// Duplicate names keep the last occurrence.
pub fn parse_overrides(var: &str, delimiter: char) -> HashMap<String, LevelValue> {
    let mut loggers = HashMap::new();
    for part in var.split(delimiter) {
        let (logger, level) = match part.split_once(':') {
            Some((logger, level)) => (logger, level),
            None => ("", part),
        };

        let logger = if logger == "root" { "" } else { logger };

        loggers.insert(logger.to_string(), LevelValue::from(level));
    }
    loggers
}

/// Construct the complete `{logger_name: level}` set from user input.
///
/// Starts from a copy of the defaults. An override set that names the
/// root logger replaces the defaults entirely; anything else merges in
/// key-by-key with the override winning.
pub fn merged_levels(overrides: Option<&LevelOverrides>) -> HashMap<String, LevelValue> {
    let mut loggers = default_levels();
    if let Some(overrides) = overrides {
        let overrides = match overrides {
            LevelOverrides::Str(s) => parse_overrides(s, DELIMITER),
            LevelOverrides::Map(map) => map.clone(),
        };
        // setting the root level signals "full control": replace the
        // default set instead of appending to it
        if overrides.contains_key("") {
            loggers = overrides;
        } else {
            loggers.extend(overrides);
        }
    }
    loggers
}

/// Order a level set for configuration: root first, then remaining names
/// compared as their `.`-split segment sequences. Segment comparison, not
/// raw string comparison; the two disagree for names like `foo.bar` vs
/// `foobar`.
pub fn sorted_levels(levels: HashMap<String, LevelValue>) -> Vec<(String, LevelValue)> {
    let mut levels = levels;
    let mut ordered = Vec::with_capacity(levels.len());
    if let Some(root) = levels.remove("") {
        ordered.push((String::new(), root));
    }

    let mut rest: Vec<(String, LevelValue)> = levels.into_iter().collect();
    rest.sort_by(|(a, _), (b, _)| {
        let a_segments: Vec<&str> = a.split('.').collect();
        let b_segments: Vec<&str> = b.split('.').collect();
        a_segments.cmp(&b_segments)
    });
    ordered.extend(rest);
    ordered
}

/// Resolve user overrides into ordered `(name, level)` configuration
/// pairs: merge with defaults, then sort least specific first.
pub fn resolve(overrides: Option<&LevelOverrides>) -> Vec<(String, LevelValue)> {
    sorted_levels(merged_levels(overrides))
}
