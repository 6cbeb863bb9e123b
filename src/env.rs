//! Environment variable names used by this crate for convenient
//! configuration of capture from services that don't carry a config file.
//!
//! These are purely helpers; the core types remain decoupled from
//! environment access and read their options through
//! [`RequestHost::config_section`](crate::hooks::RequestHost::config_section).

use std::collections::HashMap;

use crate::config::{
    ADD_CALLER_KEY, ENABLED_KEY, PASSTHRU_KEY, SHORT_NAMES_KEY, STRIP_PREFIX_KEY,
};

/// Master switch, e.g. `LOG_TEE_ENABLED=0` to bypass capture entirely.
pub const LOG_TEE_ENABLED_ENV: &str = "LOG_TEE_ENABLED";

/// Forwarding of captured calls to the normal log output.
pub const LOG_TEE_PASSTHRU_ENV: &str = "LOG_TEE_PASSTHRU";

/// Caller `(file,line)` headers on the convenience operations.
pub const LOG_TEE_ADDCALLER_ENV: &str = "LOG_TEE_ADDCALLER";

/// Short alias configuration, same grammar as the `shortnames` key.
pub const LOG_TEE_SHORTNAMES_ENV: &str = "LOG_TEE_SHORTNAMES";

/// Path prefix stripped from caller file names.
pub const LOG_TEE_STRIP_PREFIX_ENV: &str = "LOG_TEE_STRIP_PREFIX";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Build a raw capture config section from the process environment.
///
/// Only variables that are actually set produce keys, so defaults keep
/// applying for everything else during resolution.
pub fn section_from_env() -> HashMap<String, String> {
    let vars = [
        (LOG_TEE_ENABLED_ENV, ENABLED_KEY),
        (LOG_TEE_PASSTHRU_ENV, PASSTHRU_KEY),
        (LOG_TEE_ADDCALLER_ENV, ADD_CALLER_KEY),
        (LOG_TEE_SHORTNAMES_ENV, SHORT_NAMES_KEY),
        (LOG_TEE_STRIP_PREFIX_ENV, STRIP_PREFIX_KEY),
    ];

    let mut section = HashMap::new();
    for (var, key) in vars {
        if let Ok(value) = std::env::var(var) {
            section.insert(key.to_string(), value);
        }
    }
    section
}
