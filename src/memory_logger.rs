use std::sync::{Arc, Mutex};

use crate::logger::{Level, Logger};

/// A [`Logger`] that keeps every record in memory.
///
/// Intended for tests that need to assert what reached the original logger,
/// and for embedding scenarios where stderr is unavailable. Thread-safe;
/// share it with `Arc` and read the records back at any point.
#[derive(Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor returning the shared form most call sites
    /// want.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// All records in arrival order.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Message texts only, in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, message.to_string()));
        }
    }
}
