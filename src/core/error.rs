//! Error types for the logging facade

/// Fatal configuration errors.
///
/// Raised while `configure` runs, before any log record is accepted.
/// A misconfigured deployment must crash at startup rather than degrade
/// silently, so these are returned to the caller instead of being
/// reported through the emit-failure channel.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Unknown renderer selector
    #[error("unknown log format: {0:?}")]
    InvalidFormat(String),

    /// Unknown severity name during level resolution
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),
}

/// Failures while rendering or emitting an already-accepted log record.
///
/// Never propagated to the code that issued the log call; reported once
/// through the facade's fallback error channel and the record is dropped.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A required event field was absent at render time
    #[error("event is missing required field {0:?}")]
    MissingField(&'static str),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error during write or flush
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A single write accepted fewer bytes than the full record.
    /// Continuing would split the record across two writes, so the
    /// record is dropped instead.
    #[error("short write: {written}/{len} bytes accepted")]
    ShortWrite { written: usize, len: usize },
}

impl ConfigError {
    /// Create an invalid-format error
    pub fn invalid_format(selector: impl Into<String>) -> Self {
        ConfigError::InvalidFormat(selector.into())
    }

    /// Create an invalid-level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        ConfigError::InvalidLevel(name.into())
    }
}

impl EmitError {
    /// Create a short-write error
    pub fn short_write(written: usize, len: usize) -> Self {
        EmitError::ShortWrite { written, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid_format("yaml");
        assert_eq!(err.to_string(), "unknown log format: \"yaml\"");

        let err = ConfigError::invalid_level("loud");
        assert_eq!(err.to_string(), "invalid log level: \"loud\"");
    }

    #[test]
    fn test_emit_error_display() {
        let err = EmitError::MissingField("timestamp");
        assert_eq!(
            err.to_string(),
            "event is missing required field \"timestamp\""
        );

        let err = EmitError::short_write(4096, 9000);
        assert_eq!(err.to_string(), "short write: 4096/9000 bytes accepted");
    }

    #[test]
    fn test_emit_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = EmitError::from(io_err);
        assert!(matches!(err, EmitError::Io(_)));
    }
}
