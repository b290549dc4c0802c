use serde::{Deserialize, Serialize};

/// One alert state transition rendered as a log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertStateLogEntry {
    /// Nanoseconds since the Unix epoch.
    pub timestamp: i64,
    pub line: String,
}

/// Response of the alert state query; `entries` is never absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub entries: Vec<AlertStateLogEntry>,
}

impl QueryResponse {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
