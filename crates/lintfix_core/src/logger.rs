//! Logging sink for rendered reports.

use tracing::info;

/// Receives the rendered lint report.
pub trait TaskLogger {
    /// Emits an informational message.
    fn info(&self, message: &str);
}

/// Forwards reports to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TaskLogger for TracingLogger {
    fn info(&self, message: &str) {
        info!("{}", message);
    }
}

impl<T: TaskLogger + ?Sized> TaskLogger for &T {
    fn info(&self, message: &str) {
        (**self).info(message)
    }
}

impl<T: TaskLogger + ?Sized> TaskLogger for std::sync::Arc<T> {
    fn info(&self, message: &str) {
        (**self).info(message)
    }
}
