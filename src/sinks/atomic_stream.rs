//! Atomic stream sink
//!
//! Writes each rendered record with exactly one `write` call so that one
//! record stays on one line when several writers share a descriptor.
//!
//! Pre-forked worker processes inherit the parent's stderr/stdout and
//! write into it concurrently. The kernel adjusts the file offset and
//! performs the write as an atomic step for a single bounded `write`, so
//! records from different workers do not interleave as long as each
//! record is handed over in one call. This sink upholds its side of that
//! bargain: the newline is part of the same buffer, a short write is an
//! error rather than a second call, and the stream is flushed after
//! every record.

use crate::core::error::EmitError;
use crate::core::sink::Sink;
use std::io::Write;

pub struct AtomicStreamSink {
    stream: Box<dyn Write + Send>,
}

impl AtomicStreamSink {
    pub fn new(stream: Box<dyn Write + Send>) -> Self {
        Self { stream }
    }

    /// Convenience constructor over any writer
    pub fn from_writer(stream: impl Write + Send + 'static) -> Self {
        Self::new(Box::new(stream))
    }
}

impl Sink for AtomicStreamSink {
    fn emit(&mut self, line: &str) -> Result<(), EmitError> {
        let mut record = Vec::with_capacity(line.len() + 1);
        record.extend_from_slice(line.as_bytes());
        record.push(b'\n');

        // one write call per record; a partial write cannot be resumed
        // without splitting the record, so it is dropped instead
        let written = self.stream.write(&record)?;
        if written != record.len() {
            return Err(EmitError::short_write(written, record.len()));
        }
        self.stream.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), EmitError> {
        self.stream.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "atomic-stream"
    }
}
