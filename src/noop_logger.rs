use crate::logger::{Level, Logger};

/// A logger that simply drops all messages.
///
/// Useful for measuring the overhead of the interceptor itself, and for
/// unit tests that don't care about passthru output.
#[derive(Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: Level, _message: &str) {}
}
