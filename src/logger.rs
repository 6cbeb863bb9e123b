/// Severity of a captured message.
///
/// Deliberately smaller than the full `tracing` level set: the capture
/// pipeline only distinguishes the four levels the rendered line can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Single-character code used in rendered capture lines
    /// (`"debug"` becomes `d`, and so on).
    pub fn code(self) -> char {
        match self {
            Level::Debug => 'd',
            Level::Info => 'i',
            Level::Warn => 'w',
            Level::Error => 'e',
        }
    }

    /// Full lowercase name, as forwarded to the underlying logger.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability interface for the logger active on a request.
///
/// This is the seam the interceptor composes over: instead of subclassing a
/// concrete logger, [`InterceptingLogger`](crate::interceptor::InterceptingLogger)
/// wraps any `Arc<dyn Logger>` and delegates to it when passthru is enabled.
/// The surrounding framework hands the currently-active logger to the
/// lifecycle hooks through this trait and receives the replacement the same
/// way.
///
/// Implementations must be cheap and non-blocking; the capture pipeline calls
/// `log` synchronously on the request path.
pub trait Logger: Send + Sync {
    /// Record one message at the given level.
    fn log(&self, level: Level, message: &str);
}
