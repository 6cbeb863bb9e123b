//! Minimal axum service with capture enabled.
//!
//! Run with `cargo run --example serve`, then open http://127.0.0.1:3000/
//! to see the captured messages spliced under the page content. The same
//! messages also reach the console through the passthru subscriber.

use std::collections::HashMap;

use axum::middleware::from_fn_with_state;
use axum::response::Html;
use axum::routing::get;
use axum::{Extension, Router};
use request_log_tee::env::{env_or, section_from_env};
use request_log_tee::hooks::CONFIG_SECTION;
use request_log_tee::init::init_passthru_output;
use request_log_tee::middleware::{capture, CaptureHandle, CaptureState};

async fn page(handle: Option<Extension<CaptureHandle>>) -> Html<String> {
    if let Some(Extension(CaptureHandle(logger))) = handle {
        logger.info("rendering front page");
        logger.log_with_caller(&["template resolved"]);
        logger.log_formatted_with_caller(format_args!("items={}", 3));
    }
    Html("<html><body><h1>hello</h1></body></html>".to_string())
}

#[tokio::main]
async fn main() {
    init_passthru_output();

    let mut config = HashMap::new();
    config.insert(CONFIG_SECTION.to_string(), section_from_env());
    let state = CaptureState::new(config);

    let app = Router::new()
        .route("/", get(page))
        .layer(from_fn_with_state(state, capture));

    let addr = env_or("LOG_TEE_DEMO_ADDR", "127.0.0.1:3000");
    let listener = tokio::net::TcpListener::bind(&addr).await.expect("bind");
    axum::serve(listener, app).await.expect("serve");
}
