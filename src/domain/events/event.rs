use crate::domain::events::values::{EventId, Timestamp};

use serde::{Deserialize, Serialize};

/// One recorded honeypot interaction, as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoneypotEvent {
    pub id: EventId,
    pub timestamp: Timestamp,
    #[serde(rename = "sourceIP")]
    pub source_ip: String,
    pub service: String,
    pub action: String,
}

/// The writable half of a [`HoneypotEvent`]; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHoneypotEvent {
    pub timestamp: Timestamp,
    #[serde(rename = "sourceIP")]
    pub source_ip: String,
    pub service: String,
    pub action: String,
}

impl NewHoneypotEvent {
    /// Stamps the event with the current time.
    pub fn new(
        source_ip: impl Into<String>,
        service: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Timestamp::now(),
            source_ip: source_ip.into(),
            service: service.into(),
            action: action.into(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn into_event(self, id: EventId) -> HoneypotEvent {
        HoneypotEvent {
            id,
            timestamp: self.timestamp,
            source_ip: self.source_ip,
            service: self.service,
            action: self.action,
        }
    }
}
