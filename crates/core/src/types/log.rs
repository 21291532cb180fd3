//! Security log entry type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the security log.
///
/// The log file is line-delimited JSON: each entry is serialized as a
/// single object with an ISO-8601 UTC timestamp and free-form event text.
/// Entries are append-only and never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityLogEntry {
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// Human-readable event description. May embed serialized data such
    /// as a created customer record.
    pub event: String,
}

impl SecurityLogEntry {
    /// Create an entry stamped with the current time.
    #[must_use]
    pub fn now(event: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            event: event.into(),
        }
    }
}
