//! Message definitions and the append-only message log.
//!
//! A `Message` is created by a successful publish and never changes afterwards.
//! The `MessageLog` assigns each message a stable index; clients track their
//! progress through the log by that index.

/// A published message.
///
/// - `sender_id`: identity of the publisher (may be empty)
/// - `text`: the decoded payload, never empty
/// - `timestamp`: milliseconds since UNIX epoch; set by the broker on publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender_id: String,
    pub text: String,
    pub timestamp: i64,
}

/// Capacity-bounded, append-only sequence of messages.
///
/// Once `capacity` messages are stored, further appends are rejected; nothing is
/// ever evicted or rewritten.
#[derive(Debug)]
pub struct MessageLog {
    entries: Vec<Message>,
    capacity: usize,
}

impl MessageLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Appends a message. Returns `false` without touching the log if `text` is
    /// empty or the log is full.
    pub fn append(&mut self, sender_id: String, text: String) -> bool {
        if text.is_empty() || self.is_full() {
            return false;
        }
        self.entries.push(Message {
            sender_id,
            text,
            timestamp: chrono::Utc::now().timestamp_millis(),
        });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Messages from `from` up to the current end. An index at or past the end
    /// yields an empty slice.
    pub fn slice(&self, from: usize) -> &[Message] {
        self.entries.get(from..).unwrap_or(&[])
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.entries.get(index)
    }
}
