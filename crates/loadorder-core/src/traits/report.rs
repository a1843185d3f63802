//! Non-fatal diagnostic sink.

/// Receives user-facing diagnostics the engine does not treat as fatal,
/// such as plugin names that cannot be encoded for the game engine.
///
/// Hosts typically surface these in their UI; [`TracingReport`] forwards
/// them to the log instead.
pub trait ReportSink {
    /// Reports a non-fatal error message.
    fn report_error(&self, message: &str);
}

/// [`ReportSink`] that forwards every message to `tracing::error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReport;

impl ReportSink for TracingReport {
    fn report_error(&self, message: &str) {
        tracing::error!("{message}");
    }
}
