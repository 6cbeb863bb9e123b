//! Axum adapter for the capture lifecycle.
//!
//! The core stays framework-agnostic behind [`RequestHost`]; this module
//! implements that interface over one in-flight axum request and exposes the
//! interceptor to handlers through a request extension.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::middleware::Next;
use axum::response::Response;

use crate::hooks::{is_html, RequestHost, RequestLifecycleHooks, RequestLogContext};
use crate::interceptor::InterceptingLogger;
use crate::logger::Logger;
use crate::tracing_logger::TracingLogger;

/// Router-wide state for the [`capture`] middleware.
///
/// Carries the lifecycle hooks, the static configuration (section name to
/// key/value map, as the host framework would load it from its config file)
/// and the root logger that acts as the "original" logger for every request.
#[derive(Clone)]
pub struct CaptureState {
    hooks: Arc<RequestLifecycleHooks>,
    config: Arc<HashMap<String, HashMap<String, String>>>,
    root_logger: Arc<dyn Logger>,
}

impl CaptureState {
    /// State with [`TracingLogger`] as the root logger, so passthru output
    /// lands on the process-wide `tracing` subscriber.
    pub fn new(config: HashMap<String, HashMap<String, String>>) -> Self {
        Self::with_logger(config, Arc::new(TracingLogger))
    }

    pub fn with_logger(
        config: HashMap<String, HashMap<String, String>>,
        root_logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            hooks: Arc::new(RequestLifecycleHooks::new()),
            config: Arc::new(config),
            root_logger,
        }
    }
}

/// Request extension giving handlers access to the request's interceptor
/// while capture is active. Absent when capture is disabled, so handlers
/// take `Option<Extension<CaptureHandle>>` and treat `None` as "capture not
/// available".
#[derive(Clone)]
pub struct CaptureHandle(pub Arc<InterceptingLogger>);

struct MiddlewareHost<'a> {
    state: &'a CaptureState,
    active: Arc<dyn Logger>,
    context: Option<RequestLogContext>,
    body: Option<String>,
    content_type: Option<String>,
    body_replaced: bool,
}

impl RequestHost for MiddlewareHost<'_> {
    fn active_logger(&self) -> Arc<dyn Logger> {
        self.active.clone()
    }

    fn set_active_logger(&mut self, logger: Arc<dyn Logger>) {
        self.active = logger;
    }

    fn response_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    fn set_response_body(&mut self, body: String) {
        self.body = Some(body);
        self.body_replaced = true;
    }

    fn response_content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn config_section(&self, name: &str) -> Option<&HashMap<String, String>> {
        self.state.config.get(name)
    }

    fn context(&self) -> Option<&RequestLogContext> {
        self.context.as_ref()
    }

    fn take_context(&mut self) -> Option<RequestLogContext> {
        self.context.take()
    }

    fn store_context(&mut self, ctx: RequestLogContext) {
        self.context = Some(ctx);
    }
}

/// Capture middleware; install with
/// `axum::middleware::from_fn_with_state(state, capture)`.
///
/// Drives the request-start hook before handing off to the inner service and
/// the finalize hook after it responds. The response body is collected only
/// when capture is active for the request and the response declares an HTML
/// content type; everything else (JSON, streams, non-UTF-8 payloads) passes
/// through untouched.
pub async fn capture(State(state): State<CaptureState>, mut req: Request, next: Next) -> Response {
    let mut host = MiddlewareHost {
        state: &state,
        active: state.root_logger.clone(),
        context: None,
        body: None,
        content_type: None,
        body_replaced: false,
    };

    state.hooks.on_request_start(&mut host);
    if let Some(ctx) = host.context() {
        req.extensions_mut()
            .insert(CaptureHandle(ctx.interceptor().clone()));
    }

    let res = next.run(req).await;
    let (mut parts, body) = res.into_parts();

    host.content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let splice_candidate = host.context().is_some()
        && host.content_type.as_deref().is_some_and(is_html);

    // Collected only for HTML responses under active capture; anything else
    // keeps its original (possibly streaming) body.
    let untouched: Option<Body> = if splice_candidate {
        match to_bytes(body, usize::MAX).await {
            Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => {
                    host.body = Some(text);
                    None
                }
                Err(_) => Some(Body::from(bytes)),
            },
            Err(_) => {
                // Body lost mid-read; the declared length no longer holds.
                parts.headers.remove(CONTENT_LENGTH);
                Some(Body::empty())
            }
        }
    } else {
        Some(body)
    };

    state.hooks.on_request_finalize(&mut host);

    let body = match untouched {
        Some(body) => body,
        None => {
            let text = host.body.take().unwrap_or_default();
            if host.body_replaced {
                // Splicing changed the length; let hyper recompute it.
                parts.headers.remove(CONTENT_LENGTH);
            }
            Body::from(text)
        }
    };

    Response::from_parts(parts, body)
}
