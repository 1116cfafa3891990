//! The [`Log`] trait shared by the scanner, the merger and the command layer.

/// Abstraction over logging backends.
///
/// Library code logs through `&dyn Log` so that it never depends on the
/// concrete [`Logger`](super::logger::Logger) or on a subscriber being
/// installed.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
}
