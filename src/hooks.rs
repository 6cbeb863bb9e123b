use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ConfigSnapshot;
use crate::interceptor::InterceptingLogger;
use crate::logger::{Level, Logger};

/// Name of the config section the hooks read, unless overridden.
pub const CONFIG_SECTION: &str = "logcapture";

/// Per-request capture state, created at request start and stored on the
/// request by the host.
///
/// Exactly one context exists per in-flight request. It holds the
/// interceptor for the request and a reference to the logger that was active
/// before interception, so finalize can restore it. The context (and the
/// buffer inside the interceptor) is discarded along with the request; no
/// teardown beyond the restore is needed.
pub struct RequestLogContext {
    interceptor: Arc<InterceptingLogger>,
    original: Arc<dyn Logger>,
    finalized: bool,
}

impl RequestLogContext {
    pub fn new(interceptor: Arc<InterceptingLogger>, original: Arc<dyn Logger>) -> Self {
        Self {
            interceptor,
            original,
            finalized: false,
        }
    }

    pub fn interceptor(&self) -> &Arc<InterceptingLogger> {
        &self.interceptor
    }

    pub fn original(&self) -> Arc<dyn Logger> {
        self.original.clone()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn mark_finalized(&mut self) {
        self.finalized = true;
    }
}

/// Collaborator interface to the surrounding request-handling framework.
///
/// One implementation exists per framework integration (see the `axum`
/// adapter in [`middleware`](crate::middleware)); tests drive the hooks with
/// an in-memory host. All methods refer to a single in-flight request.
pub trait RequestHost {
    /// Logger application code currently logs through for this request.
    fn active_logger(&self) -> Arc<dyn Logger>;
    /// Swap the logger used by application code. Must be a plain pointer
    /// swap: no log call may observe a half-installed state.
    fn set_active_logger(&mut self, logger: Arc<dyn Logger>);

    /// Response body, if one has been produced. `None` and `Some("")` are
    /// treated identically by the hooks.
    fn response_body(&self) -> Option<&str>;
    fn set_response_body(&mut self, body: String);
    /// Declared response content type, e.g. `"text/html; charset=utf-8"`.
    fn response_content_type(&self) -> Option<&str>;

    /// Static configuration lookup by section name.
    fn config_section(&self, name: &str) -> Option<&HashMap<String, String>>;

    /// Capture context stored on this request, if any.
    fn context(&self) -> Option<&RequestLogContext>;
    fn take_context(&mut self) -> Option<RequestLogContext>;
    fn store_context(&mut self, ctx: RequestLogContext);
}

/// The two request-lifecycle entry points of the capture core.
///
/// Per request the hooks move through `Idle -> Active -> Finalized`:
/// start installs the interceptor (or bypasses everything when disabled),
/// finalize restores the original logger and splices the captured output
/// into HTML responses. Finalize is idempotent; the hooks never re-enter
/// the active state for a request.
pub struct RequestLifecycleHooks {
    section: String,
}

impl Default for RequestLifecycleHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLifecycleHooks {
    pub fn new() -> Self {
        Self {
            section: CONFIG_SECTION.to_string(),
        }
    }

    /// Read configuration from a differently-named section.
    pub fn with_section(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
        }
    }

    /// Install capture for a request.
    ///
    /// Resolves a [`ConfigSnapshot`] from the host's config section. When
    /// capture is disabled this logs a single warning through the original
    /// logger and leaves the request untouched; otherwise it swaps in a
    /// fresh [`InterceptingLogger`] and stores the context on the request.
    pub fn on_request_start(&self, host: &mut dyn RequestHost) {
        if host.context().is_some() {
            // Already active for this request.
            return;
        }

        let original = host.active_logger();
        let section = host.config_section(&self.section);
        // A disabled request emits this one warning and nothing else; the
        // rest of the options (and their validation warnings) are only
        // resolved once the master switch is known to be on.
        if !crate::config::is_enabled(section) {
            original.log(Level::Warn, "request log capture disabled by config");
            return;
        }
        let config = ConfigSnapshot::resolve(section, original.as_ref());

        let interceptor = Arc::new(InterceptingLogger::new(original.clone(), config));
        host.set_active_logger(interceptor.clone());
        host.store_context(RequestLogContext::new(interceptor, original));
    }

    /// Finalize capture for a request.
    ///
    /// No-op when no context exists (capture was disabled or never started)
    /// or when the request was already finalized. Otherwise the original
    /// logger is restored unconditionally, and the buffered entries are
    /// appended to the response body inside `<pre>..</pre>` when the
    /// response has a non-empty body with an HTML content type. Message
    /// content is spliced verbatim, without HTML escaping; callers are
    /// trusted to log pre-escaped or non-markup text.
    pub fn on_request_finalize(&self, host: &mut dyn RequestHost) {
        let Some(mut ctx) = host.take_context() else {
            return;
        };
        if ctx.is_finalized() {
            host.store_context(ctx);
            return;
        }

        host.set_active_logger(ctx.original());

        let spliced = match (host.response_body(), host.response_content_type()) {
            (Some(body), Some(ct)) if !body.is_empty() && is_html(ct) => {
                let captured = ctx.interceptor().render();
                let mut out = String::with_capacity(body.len() + captured.len() + 11);
                out.push_str(body);
                out.push_str("<pre>");
                out.push_str(&captured);
                out.push_str("</pre>");
                Some(out)
            }
            _ => None,
        };
        if let Some(body) = spliced {
            host.set_response_body(body);
        }

        ctx.mark_finalized();
        host.store_context(ctx);
    }
}

/// Shared content-type gate for the splice decision; the framework
/// adapters reuse this so their pre-checks cannot drift from the hooks.
pub(crate) fn is_html(content_type: &str) -> bool {
    content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("text/html")
}
