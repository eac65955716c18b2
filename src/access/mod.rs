use std::sync::Arc;

use tracing::{error, info};

use crate::domain::events::{EventId, HoneypotEvent, NewHoneypotEvent};
use crate::storage::event_store::{EventStore, EventStoreError};

/// The only door to the event collection.
///
/// Failures are logged here, once, and handed back unchanged: no retries
/// and no partial snapshots.
#[derive(Clone)]
pub struct EventAccess {
    storage: Arc<dyn EventStore>,
    collection: String,
}

impl EventAccess {
    pub fn new(storage: Arc<dyn EventStore>, collection: impl Into<String>) -> Self {
        Self {
            storage,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    #[tracing::instrument(skip(self), fields(collection = %self.collection))]
    pub async fn list_events(&self) -> Result<Vec<HoneypotEvent>, EventStoreError> {
        match self.storage.list_events().await {
            Ok(events) => {
                info!(count = events.len(), "fetched honeypot events");
                Ok(events)
            }
            Err(e) => {
                error!("Error fetching honeypot events: {}", e);
                Err(e)
            }
        }
    }

    #[tracing::instrument(
        skip(self, event),
        fields(collection = %self.collection, source_ip = %event.source_ip, service = %event.service)
    )]
    pub async fn create_event(&self, event: NewHoneypotEvent) -> Result<EventId, EventStoreError> {
        match self.storage.create_event(event).await {
            Ok(id) => {
                info!(%id, "added honeypot event");
                Ok(id)
            }
            Err(e) => {
                error!("Error adding honeypot event: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryEventStore;

    #[tokio::test]
    async fn test_created_event_is_listed() {
        let access = EventAccess::new(Arc::new(InMemoryEventStore::new()), "honeypots");

        let fields = NewHoneypotEvent::new("203.0.113.5", "ssh", "login-attempt");
        let id = access.create_event(fields.clone()).await.expect("create");

        let events = access.list_events().await.expect("list");
        assert!(events.contains(&fields.into_event(id)));
        assert_eq!(access.collection(), "honeypots");
    }
}
