//! Sink implementations

pub mod atomic_stream;

pub use atomic_stream::AtomicStreamSink;

// Re-export the trait next to its implementations
pub use crate::core::Sink;
