//! Structured exception descriptors
//!
//! An exception attached to a log event is captured at the call site as a
//! value: type name, message, and an ordered list of frame descriptions.
//! The renderer turns it into traceback text; nothing here inspects the
//! live call stack.

use serde::{Deserialize, Serialize};
use std::error::Error;

/// One frame of a captured traceback, innermost last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracebackFrame {
    pub file: String,
    pub line: u32,
    pub function: String,
    /// Source text for the frame, if the call site recorded it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TracebackFrame {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Captured exception: type name, message, ordered frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub kind: String,
    pub message: String,
    pub frames: Vec<TracebackFrame>,
}

impl ExceptionInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            frames: Vec::new(),
        }
    }

    /// Capture from any error value. The kind is the error's unqualified
    /// type name; frames start empty and can be added at the call site.
    pub fn from_error<E: Error>(err: &E) -> Self {
        let type_name = std::any::type_name::<E>();
        let kind = type_name.rsplit("::").next().unwrap_or(type_name);
        Self::new(kind, err.to_string())
    }

    #[must_use]
    pub fn with_frame(mut self, frame: TracebackFrame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Render as traceback text, no trailing newline:
    ///
    /// ```text
    /// Traceback (most recent call last):
    ///   File "src/worker.rs", line 42, in app::worker
    ///     handle(request)?
    /// Kind: message
    /// ```
    pub fn format_traceback(&self) -> String {
        let mut out = String::from("Traceback (most recent call last):");
        for frame in &self.frames {
            out.push_str(&format!(
                "\n  File \"{}\", line {}, in {}",
                frame.file, frame.line, frame.function
            ));
            if let Some(ref source) = frame.source {
                out.push_str(&format!("\n    {}", source));
            }
        }
        out.push_str(&format!("\n{}: {}", self.kind, self.message));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_without_frames() {
        let exc = ExceptionInfo::new("Exception", "test");
        assert_eq!(
            exc.format_traceback(),
            "Traceback (most recent call last):\nException: test"
        );
    }

    #[test]
    fn test_format_with_frames() {
        let exc = ExceptionInfo::new("TimeoutError", "upstream timed out")
            .with_frame(
                TracebackFrame::new("src/worker.rs", 42, "app::worker")
                    .with_source("handle(request)?"),
            )
            .with_frame(TracebackFrame::new("src/client.rs", 17, "app::client"));

        let traceback = exc.format_traceback();
        let lines: Vec<&str> = traceback.split('\n').collect();
        assert_eq!(lines[0], "Traceback (most recent call last):");
        assert_eq!(lines[1], "  File \"src/worker.rs\", line 42, in app::worker");
        assert_eq!(lines[2], "    handle(request)?");
        assert_eq!(lines[3], "  File \"src/client.rs\", line 17, in app::client");
        assert_eq!(lines[4], "TimeoutError: upstream timed out");
    }

    #[test]
    fn test_from_error_uses_type_name() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let exc = ExceptionInfo::from_error(&io_err);
        assert_eq!(exc.kind, "Error");
        assert_eq!(exc.message, "no such file");
        assert!(exc.frames.is_empty());
    }
}
