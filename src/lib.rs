pub mod buffer;
pub mod config;
pub mod env;
pub mod hooks;
pub mod init;
pub mod interceptor;
pub mod logger;
pub mod memory_logger;
pub mod noop_logger;
pub mod record;
pub mod timefmt;
pub mod tracing_logger;

#[cfg(feature = "axum")]
pub mod middleware;
