//! Debug trace sink
//!
//! Human-readable tracing only. The focuser never makes control decisions
//! based on anything written here.

/// Destination for trace output
pub trait DebugSink {
    /// Write raw trace bytes
    fn write(&mut self, bytes: &[u8]);

    /// Mute the sink; later writes are dropped
    fn disable(&mut self);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDebug;

impl DebugSink for NullDebug {
    fn write(&mut self, _bytes: &[u8]) {}

    fn disable(&mut self) {}
}
