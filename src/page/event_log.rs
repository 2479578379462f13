//! Generic analytics event log
//!
//! The append-only sequence consumed by generic analytics tooling (the
//! dataLayer equivalent). This crate only appends; it never reads entries
//! back for its own behavior and never clears the log.

use tokio::sync::RwLock;

use crate::vendor::call::{EventPayload, FieldValue};

/// One appended log entry: a discriminator plus flattened payload fields
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Event-type discriminator, e.g. `reservation_made`
    pub event: String,
    /// Payload fields in payload order
    pub fields: Vec<(String, FieldValue)>,
}

impl LogEntry {
    /// Build an entry from a discriminator and a payload
    pub fn new(event: impl Into<String>, payload: &EventPayload) -> Self {
        Self {
            event: event.into(),
            fields: payload
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    /// Look up a flattened field by name
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Append-only event log shared with external analytics consumers
#[derive(Debug, Default)]
pub struct EventLog {
    entries: RwLock<Vec<LogEntry>>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry
    pub async fn push(&self, entry: LogEntry) {
        self.entries.write().await.push(entry);
    }

    /// Number of entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the log is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Snapshot of the entries, oldest first
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_snapshot() {
        let log = EventLog::new();
        assert!(log.is_empty().await);

        let payload = EventPayload::new().with("full_name", "Jane Doe");
        log.push(LogEntry::new("reservation_made", &payload)).await;
        log.push(LogEntry::new("reservation_checkin", &payload)).await;

        let entries = log.entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, "reservation_made");
        assert_eq!(entries[1].event, "reservation_checkin");
    }

    #[tokio::test]
    async fn test_entry_flattens_payload_fields() {
        let payload = EventPayload::new()
            .with("reservation_code", "R-42")
            .with("full_name", "Jane Doe");
        let entry = LogEntry::new("reservation_made", &payload);

        assert_eq!(entry.field("reservation_code").and_then(|v| v.as_text()), Some("R-42"));
        assert_eq!(entry.field("full_name").and_then(|v| v.as_text()), Some("Jane Doe"));
        assert_eq!(entry.field("missing"), None);
    }
}
