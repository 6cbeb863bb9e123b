/// Ordered, append-only sequence of rendered message strings, scoped to one
/// request.
///
/// Insertion order is chronological log order; entries are never reordered
/// or deduplicated. Growth is unbounded for the duration of the request —
/// the buffer's lifetime is strictly bounded by the request's lifetime, so
/// no capacity limit is enforced.
#[derive(Debug, Default)]
pub struct MessageBuffer {
    entries: Vec<String>,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message, normalized to end with a line terminator.
    ///
    /// A message without a trailing `\n` gets exactly one appended; a
    /// message that already ends in `\n` is stored unchanged, including any
    /// extra trailing newlines the caller supplied.
    pub fn append(&mut self, message: &str) {
        if message.ends_with('\n') {
            self.entries.push(message.to_string());
        } else {
            self.entries.push(format!("{message}\n"));
        }
    }

    /// Append each message in order. An empty slice is a no-op.
    pub fn append_all(&mut self, messages: &[&str]) {
        for message in messages {
            self.append(message);
        }
    }

    /// All buffered entries in insertion order, without consuming them.
    /// This is the read-only drain used by the finalize phase.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Concatenate all entries with no separator (each entry is already
    /// newline-terminated).
    pub fn render(&self) -> String {
        self.entries.concat()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
