use std::fmt;
use std::panic::Location;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::buffer::MessageBuffer;
use crate::config::ConfigSnapshot;
use crate::logger::{Level, Logger};
use crate::record::LogEntry;
use crate::timefmt::TimeFormatter;

/// Which caller-aware operation a short alias is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    /// Plain messages, see [`InterceptingLogger::log_with_caller`].
    WithCaller,
    /// Format-style call, see [`InterceptingLogger::log_formatted_with_caller`].
    FormattedWithCaller,
}

/// Drop-in replacement for the active logger during one request.
///
/// Every leveled call is rendered to a `"[<time>] [<c>] <text>"` line and
/// appended to the request buffer; when `passthru` is enabled the original
/// call is also forwarded to the wrapped logger so normal log output is
/// unaffected (tee mode). The caller-aware convenience operations write to
/// the buffer only.
///
/// The buffer and the memoized time formatter live behind one mutex, so a
/// single interceptor can be shared across threads handling the same
/// request; distinct requests never share an interceptor.
pub struct InterceptingLogger {
    passthru: Arc<dyn Logger>,
    config: ConfigSnapshot,
    inner: Mutex<Inner>,
}

struct Inner {
    buffer: MessageBuffer,
    clock: TimeFormatter,
}

fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

impl InterceptingLogger {
    /// Wrap `passthru` (the logger active before interception) with the
    /// behavior selected by `config`.
    pub fn new(passthru: Arc<dyn Logger>, config: ConfigSnapshot) -> Self {
        Self {
            passthru,
            config,
            inner: Mutex::new(Inner {
                buffer: MessageBuffer::new(),
                clock: TimeFormatter::new(),
            }),
        }
    }

    pub fn config(&self) -> &ConfigSnapshot {
        &self.config
    }

    /// Record one or more messages at `level`.
    ///
    /// The messages are joined with `\n` into a single buffered line; the
    /// joined text is also forwarded to the wrapped logger when passthru is
    /// enabled. A call with no messages is a no-op.
    pub fn log(&self, level: Level, messages: &[&str]) {
        if messages.is_empty() {
            return;
        }
        let text = messages.join("\n");
        if let Ok(mut inner) = self.inner.lock() {
            let stamp = inner.clock.format(now_epoch());
            let entry = LogEntry { stamp, level, text: text.clone() };
            inner.buffer.append(&entry.render());
        }
        if self.config.passthru {
            self.passthru.log(level, &text);
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, &[message]);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, &[message]);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, &[message]);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, &[message]);
    }

    /// Append pre-formatted strings to the request buffer as-is (modulo
    /// newline normalization). Never forwarded to the wrapped logger.
    pub fn add_messages(&self, messages: &[&str]) {
        if messages.is_empty() {
            return;
        }
        if let Ok(mut inner) = self.inner.lock() {
            inner.buffer.append_all(messages);
        }
    }

    /// Capture the immediate caller's source location, then buffer a header
    /// line plus the given messages.
    #[track_caller]
    pub fn log_with_caller(&self, messages: &[&str]) {
        let loc = Location::caller();
        self.emit_with_caller_info(loc.file(), loc.line(), messages);
    }

    /// Format-style variant of [`log_with_caller`](Self::log_with_caller);
    /// call as `logger.log_formatted_with_caller(format_args!("x={}", x))`.
    #[track_caller]
    pub fn log_formatted_with_caller(&self, args: fmt::Arguments<'_>) {
        let loc = Location::caller();
        let message = args.to_string();
        self.emit_with_caller_info(loc.file(), loc.line(), &[&message]);
    }

    /// Shared emit routine behind the caller-aware operations.
    ///
    /// With `addcaller` enabled the header is `"<time>:  (<file>,<line>)"`,
    /// with `file` optionally stripped of the configured root prefix, and
    /// every message follows on its own line. With `addcaller` disabled the
    /// first message doubles as the header (`"<time>:  <first>"`) and the
    /// remaining messages are appended unchanged.
    pub fn emit_with_caller_info(&self, file: &str, line: u32, messages: &[&str]) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        let stamp = inner.clock.format(now_epoch());
        if self.config.add_caller {
            let file = match &self.config.strip_prefix {
                Some(prefix) => file.strip_prefix(prefix.as_str()).unwrap_or(file),
                None => file,
            };
            inner.buffer.append(&format!("{stamp}:  ({file},{line})\n"));
            inner.buffer.append_all(messages);
        } else {
            let Some((first, rest)) = messages.split_first() else {
                return;
            };
            inner.buffer.append(&format!("{stamp}:  {first}"));
            inner.buffer.append_all(rest);
        }
    }

    /// Look up which operation a short alias is bound to for this request,
    /// if aliases are enabled at all.
    pub fn alias_kind(&self, name: &str) -> Option<AliasKind> {
        let (short, short_fmt) = self.config.short_names.as_ref()?;
        if name == short {
            Some(AliasKind::WithCaller)
        } else if name == short_fmt {
            Some(AliasKind::FormattedWithCaller)
        } else {
            None
        }
    }

    /// Dispatch a short alias bound to the plain caller-aware operation.
    /// Returns `false` (and captures nothing) when `name` is not bound.
    #[track_caller]
    pub fn call_alias(&self, name: &str, messages: &[&str]) -> bool {
        match self.alias_kind(name) {
            Some(AliasKind::WithCaller) => {
                self.log_with_caller(messages);
                true
            }
            _ => false,
        }
    }

    /// Dispatch a short alias bound to the format-style operation.
    #[track_caller]
    pub fn call_alias_formatted(&self, name: &str, args: fmt::Arguments<'_>) -> bool {
        match self.alias_kind(name) {
            Some(AliasKind::FormattedWithCaller) => {
                self.log_formatted_with_caller(args);
                true
            }
            _ => false,
        }
    }

    /// Snapshot of the buffered entries, in insertion order.
    pub fn entries(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.buffer.entries().to_vec())
            .unwrap_or_default()
    }

    /// All buffered entries concatenated, ready for splicing.
    pub fn render(&self) -> String {
        self.inner
            .lock()
            .map(|inner| inner.buffer.render())
            .unwrap_or_default()
    }
}

/// The interceptor is itself a [`Logger`], so the host can install it as the
/// active logger for the request without knowing the concrete type.
impl Logger for InterceptingLogger {
    fn log(&self, level: Level, message: &str) {
        InterceptingLogger::log(self, level, &[message]);
    }
}
