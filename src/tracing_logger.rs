use crate::logger::{Level, Logger};

/// Production [`Logger`] that forwards to the `tracing` macros.
///
/// This is the default original/passthru logger: whatever subscriber the
/// process installed (see [`init`](crate::init)) receives every forwarded
/// message exactly as if application code had called the macros directly.
#[derive(Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!("{message}"),
            Level::Info => tracing::info!("{message}"),
            Level::Warn => tracing::warn!("{message}"),
            Level::Error => tracing::error!("{message}"),
        }
    }
}
