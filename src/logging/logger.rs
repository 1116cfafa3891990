//! Structured logger with dry-run awareness and warning collection.
use std::sync::Mutex;

use super::types::Log;

/// Implement the methods of [`Log`] by delegating to inherent methods of the
/// same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger backed by [`tracing`].
///
/// Every message becomes a tracing event; stage headers and dry-run notes use
/// the `aqua_sync::stage` and `aqua_sync::dry_run` targets so the console
/// formatter can style them. Warnings are also retained so the command can
/// report how many were raised during the run.
#[derive(Debug, Default)]
pub struct Logger {
    warnings: Mutex<Vec<String>>,
}

impl Logger {
    /// Create a new logger with an empty warning list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message and remember it.
    pub fn warn(&self, msg: &str) {
        if let Ok(mut guard) = self.warnings.lock() {
            guard.push(msg.to_string());
        }
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "aqua_sync::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "aqua_sync::dry_run", "{msg}");
    }

    /// Number of warnings raised so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.lock().map_or(0, |guard| guard.len())
    }

    /// Return a copy of every warning raised so far, in order.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .map_or_else(|_| Vec::new(), |guard| guard.clone())
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);
}
