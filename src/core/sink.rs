//! Sink trait for rendered-line output destinations

use super::error::EmitError;

/// Output seam the configuration installs rendered lines through.
///
/// A sink receives fully rendered lines, never raw events; rendering
/// happens before the sink so one record maps to one `emit` call.
pub trait Sink: Send {
    fn emit(&mut self, line: &str) -> Result<(), EmitError>;
    fn flush(&mut self) -> Result<(), EmitError>;
    fn name(&self) -> &str;
}
