use std::collections::HashMap;

use crate::logger::{Level, Logger};

/// Default short alias pair bound to the caller-aware operations.
pub const DEFAULT_SHORT_NAMES: (&str, &str) = ("dbg", "dbgf");

/// Recognized keys in the capture config section.
pub const ENABLED_KEY: &str = "enabled";
pub const PASSTHRU_KEY: &str = "passthru";
pub const ADD_CALLER_KEY: &str = "addcaller";
pub const SHORT_NAMES_KEY: &str = "shortnames";
pub const STRIP_PREFIX_KEY: &str = "strip_prefix";

/// Options resolved once per request from the host's raw config section.
/// Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    /// Master switch; when false no interception happens for the request.
    pub enabled: bool,
    /// Forward every leveled call to the original logger (tee mode).
    pub passthru: bool,
    /// Prefix caller-aware entries with a `(<file>,<line>)` header.
    pub add_caller: bool,
    /// Alias pair for the caller-aware operations, or `None` when aliases
    /// are disabled (explicitly or by an invalid setting).
    pub short_names: Option<(String, String)>,
    /// Path prefix stripped from caller file names for brevity.
    pub strip_prefix: Option<String>,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        let (short, short_fmt) = DEFAULT_SHORT_NAMES;
        Self {
            enabled: true,
            passthru: true,
            add_caller: true,
            short_names: Some((short.to_string(), short_fmt.to_string())),
            strip_prefix: None,
        }
    }
}

/// Error returned when a `shortnames` value matches none of the accepted
/// forms.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ShortNamesError {
    #[error("expected `yes`, `no` or two comma-separated names, got {0:?}")]
    Malformed(String),
}

/// Parse a raw `shortnames` setting.
///
/// Accepted forms (case-insensitive, surrounding whitespace ignored):
/// - `no` — aliases disabled,
/// - `yes` — default pair `dbg,dbgf`,
/// - `name,name` — two alphanumeric/underscore tokens.
pub fn parse_short_names(raw: &str) -> Result<Option<(String, String)>, ShortNamesError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("no") {
        return Ok(None);
    }
    if trimmed.eq_ignore_ascii_case("yes") {
        let (short, short_fmt) = DEFAULT_SHORT_NAMES;
        return Ok(Some((short.to_string(), short_fmt.to_string())));
    }
    if let Some((left, right)) = trimmed.split_once(',') {
        let (left, right) = (left.trim(), right.trim());
        if is_name(left) && is_name(right) {
            return Ok(Some((left.to_string(), right.to_string())));
        }
    }
    Err(ShortNamesError::Malformed(raw.to_string()))
}

fn is_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A present-but-falsy value disables the corresponding flag; an absent key
/// keeps the default of `true`.
fn flag(section: Option<&HashMap<String, String>>, key: &str) -> bool {
    match section.and_then(|s| s.get(key)) {
        None => true,
        Some(value) => !is_falsy(value),
    }
}

fn is_falsy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

/// Cheap check of the master switch alone.
///
/// The lifecycle hooks consult this before resolving the full snapshot, so
/// a disabled request skips all remaining resolution steps (including the
/// `shortnames` validation warning).
pub fn is_enabled(section: Option<&HashMap<String, String>>) -> bool {
    flag(section, ENABLED_KEY)
}

impl ConfigSnapshot {
    /// Resolve a snapshot from a raw config section.
    ///
    /// Invalid `shortnames` values are reported as a warning through `warn`
    /// (the logger active before interception) and degrade to disabled
    /// aliases; nothing here fails hard.
    pub fn resolve(section: Option<&HashMap<String, String>>, warn: &dyn Logger) -> Self {
        let short_names = match section.and_then(|s| s.get(SHORT_NAMES_KEY)) {
            None => {
                let (short, short_fmt) = DEFAULT_SHORT_NAMES;
                Some((short.to_string(), short_fmt.to_string()))
            }
            Some(raw) => match parse_short_names(raw) {
                Ok(names) => names,
                Err(err) => {
                    warn.log(Level::Warn, &format!("ignoring shortnames setting: {err}"));
                    None
                }
            },
        };

        Self {
            enabled: flag(section, ENABLED_KEY),
            passthru: flag(section, PASSTHRU_KEY),
            add_caller: flag(section, ADD_CALLER_KEY),
            short_names,
            strip_prefix: section
                .and_then(|s| s.get(STRIP_PREFIX_KEY))
                .map(|s| s.to_string()),
        }
    }
}
