//! Lifecycle scenarios driven through an in-memory request host.

use std::collections::HashMap;
use std::sync::Arc;

use request_log_tee::hooks::{RequestHost, RequestLifecycleHooks, RequestLogContext, CONFIG_SECTION};
use request_log_tee::interceptor::InterceptingLogger;
use request_log_tee::logger::{Level, Logger};
use request_log_tee::memory_logger::MemoryLogger;

struct FakeHost {
    active: Arc<dyn Logger>,
    body: Option<String>,
    content_type: Option<String>,
    config: HashMap<String, HashMap<String, String>>,
    context: Option<RequestLogContext>,
}

impl FakeHost {
    fn new(original: Arc<dyn Logger>) -> Self {
        Self {
            active: original,
            body: None,
            content_type: None,
            config: HashMap::new(),
            context: None,
        }
    }

    fn with_section(mut self, pairs: &[(&str, &str)]) -> Self {
        let section = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.config.insert(CONFIG_SECTION.to_string(), section);
        self
    }

    fn with_html_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self.content_type = Some("text/html; charset=utf-8".to_string());
        self
    }

    fn interceptor(&self) -> Arc<InterceptingLogger> {
        self.context
            .as_ref()
            .expect("capture not active")
            .interceptor()
            .clone()
    }
}

impl RequestHost for FakeHost {
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
    }

    fn response_content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn config_section(&self, name: &str) -> Option<&HashMap<String, String>> {
        self.config.get(name)
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

#[test]
fn scenario_a_enabled_capture_splices_and_tees() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original.clone())
        .with_section(&[("enabled", "1"), ("passthru", "1"), ("addcaller", "1")])
        .with_html_body("<html><body>ok</body></html>");
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_start(&mut host);
    let active = host.active_logger();
    active.log(Level::Info, "starting");
    active.log(Level::Warn, "low disk");
    hooks.on_request_finalize(&mut host);

    let body = host.body.clone().expect("body");
    assert!(body.starts_with("<html><body>ok</body></html><pre>["));
    assert!(body.ends_with("</pre>"));
    assert!(body.contains("] [i] starting\n"));
    assert!(body.contains("] [w] low disk\n"));
    assert_eq!(original.messages(), ["starting", "low disk"]);
}

#[test]
fn scenario_b_disabled_capture_warns_and_leaves_body_alone() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original.clone())
        .with_section(&[("enabled", "0")])
        .with_html_body("<html><body>ok</body></html>");
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_start(&mut host);
    assert!(host.context().is_none());
    hooks.on_request_finalize(&mut host);

    assert_eq!(host.body.as_deref(), Some("<html><body>ok</body></html>"));
    let records = original.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, Level::Warn);
    assert!(records[0].1.contains("disabled by config"));
}

#[test]
fn disabled_capture_warns_exactly_once_despite_bad_shortnames() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original.clone())
        .with_section(&[("enabled", "0"), ("shortnames", "not a valid pair")]);
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_start(&mut host);

    let records = original.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].1.contains("disabled by config"));
}

#[test]
fn scenario_c_aliases_off_long_form_still_works() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original).with_section(&[("shortnames", "no")]);
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_start(&mut host);
    let logger = host.interceptor();
    assert!(!logger.call_alias("dbg", &["hello"]));
    assert!(logger.entries().is_empty());

    logger.log_with_caller(&["hello"]);
    let entries = logger.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1], "hello\n");
}

#[test]
fn scenario_d_json_body_is_untouched() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original);
    host.body = Some(r#"{"ok":true}"#.to_string());
    host.content_type = Some("application/json".to_string());
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_start(&mut host);
    host.interceptor().info("buffered but never spliced");
    hooks.on_request_finalize(&mut host);

    assert_eq!(host.body.as_deref(), Some(r#"{"ok":true}"#));
}

#[test]
fn scenario_e_custom_alias_matches_long_form() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original).with_section(&[("shortnames", "xdbg, xdbgf")]);
    let hooks = RequestLifecycleHooks::new();
    hooks.on_request_start(&mut host);
    let via_alias = host.interceptor();

    let original2 = MemoryLogger::shared();
    let mut host2 = FakeHost::new(original2).with_section(&[("shortnames", "xdbg, xdbgf")]);
    hooks.on_request_start(&mut host2);
    let via_long = host2.interceptor();

    // Same line, so both capture the same caller location.
    assert!(via_alias.call_alias("xdbg", &["test"])); via_long.log_with_caller(&["test"]);

    let a = via_alias.entries();
    let b = via_long.entries();
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 2);
    // Ignore the leading timestamp on the header line.
    assert_eq!(a[0].split_once(':').map(|x| x.1), b[0].split_once(':').map(|x| x.1));
    assert_eq!(a[1], b[1]);
}

#[test]
fn finalize_is_idempotent() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original)
        .with_section(&[])
        .with_html_body("<html></html>");
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_start(&mut host);
    host.interceptor().info("once");
    hooks.on_request_finalize(&mut host);
    let after_first = host.body.clone();
    hooks.on_request_finalize(&mut host);

    assert_eq!(host.body, after_first);
    assert_eq!(host.body.as_deref().unwrap().matches("<pre>").count(), 1);
}

#[test]
fn finalize_without_context_is_a_noop() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original.clone()).with_html_body("<html></html>");
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_finalize(&mut host);

    assert_eq!(host.body.as_deref(), Some("<html></html>"));
    assert!(original.records().is_empty());
}

#[test]
fn finalize_restores_original_logger_even_without_splice() {
    let original = MemoryLogger::shared();
    let original_dyn: Arc<dyn Logger> = original.clone();
    let mut host = FakeHost::new(original_dyn.clone());
    host.content_type = Some("text/plain".to_string());
    host.body = Some("plain".to_string());
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_start(&mut host);
    assert!(!Arc::ptr_eq(&host.active_logger(), &original_dyn));
    hooks.on_request_finalize(&mut host);
    assert!(Arc::ptr_eq(&host.active_logger(), &original_dyn));
    assert_eq!(host.body.as_deref(), Some("plain"));
}

#[test]
fn empty_and_absent_bodies_both_skip_splicing() {
    let hooks = RequestLifecycleHooks::new();

    let mut host = FakeHost::new(MemoryLogger::shared());
    host.content_type = Some("text/html".to_string());
    host.body = Some(String::new());
    hooks.on_request_start(&mut host);
    host.interceptor().info("buffered");
    hooks.on_request_finalize(&mut host);
    assert_eq!(host.body.as_deref(), Some(""));

    let mut host = FakeHost::new(MemoryLogger::shared());
    host.content_type = Some("text/html".to_string());
    hooks.on_request_start(&mut host);
    host.interceptor().info("buffered");
    hooks.on_request_finalize(&mut host);
    assert_eq!(host.body, None);
}

#[test]
fn start_is_not_reentrant_for_one_request() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original);
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_start(&mut host);
    let first = host.interceptor();
    hooks.on_request_start(&mut host);
    assert!(Arc::ptr_eq(&first, &host.interceptor()));
}

#[test]
fn splice_with_empty_buffer_appends_empty_pre_block() {
    let mut host = FakeHost::new(MemoryLogger::shared()).with_html_body("<html></html>");
    let hooks = RequestLifecycleHooks::new();

    hooks.on_request_start(&mut host);
    hooks.on_request_finalize(&mut host);

    assert_eq!(host.body.as_deref(), Some("<html></html><pre></pre>"));
}

#[test]
fn custom_section_name_is_honored() {
    let original = MemoryLogger::shared();
    let mut host = FakeHost::new(original.clone());
    let mut section = HashMap::new();
    section.insert("enabled".to_string(), "0".to_string());
    host.config.insert("weblog".to_string(), section);
    let hooks = RequestLifecycleHooks::with_section("weblog");

    hooks.on_request_start(&mut host);

    assert!(host.context().is_none());
    assert_eq!(original.records().len(), 1);
}
