use crate::logger::Level;

/// One captured log line, kept structured until it is appended to the
/// request buffer.
///
/// The buffer itself stores rendered text (see
/// [`MessageBuffer`](crate::buffer::MessageBuffer)); this type exists so the
/// formatting policy lives in one place instead of being scattered over the
/// interceptor's call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Compact `MMDD.HHMMSS` timestamp, shared by messages logged within
    /// the same second.
    pub stamp: String,
    pub level: Level,
    /// Message text; multi-argument calls arrive pre-joined with `\n`.
    pub text: String,
}

impl LogEntry {
    /// Render to the buffered line shape: `"[<time>] [<c>] <text>\n"`.
    pub fn render(&self) -> String {
        format!("[{}] [{}] {}\n", self.stamp, self.level.code(), self.text)
    }
}
