use std::sync::RwLock;
use async_trait::async_trait;

use crate::{
    domain::events::{EventId, HoneypotEvent, NewHoneypotEvent, Timestamp},
    storage::event_store::{EventStore, EventStoreError},
};

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    // Insertion order is the snapshot order.
    events: RwLock<Vec<HoneypotEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    /// Seeds the store with events that already carry their ids.
    pub fn from_events(events: Vec<HoneypotEvent>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    /// A handful of plausible events for running without a backend.
    pub fn demo() -> Self {
        let base = Timestamp::now().as_millis();
        let seed = [
            (0, "203.0.113.5", "ssh", "SSH_LOGIN_ATTEMPT"),
            (42_000, "198.51.100.23", "http", "GET /wp-login.php"),
            (97_000, "203.0.113.5", "ssh", "SSH_COMMAND uname -a"),
            (180_000, "192.0.2.77", "redis", "CONFIG SET dir"),
        ];

        let events = seed
            .into_iter()
            .map(|(offset, ip, service, action)| {
                NewHoneypotEvent::new(ip, service, action)
                    .with_timestamp(Timestamp(base - 180_000 + offset))
                    .into_event(EventId::generate())
            })
            .collect();

        Self::from_events(events)
    }

    pub fn len(&self) -> usize {
        self.events.read().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn list_events(&self) -> Result<Vec<HoneypotEvent>, EventStoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| EventStoreError::ReadFailure("Lock poison".to_string()))?;

        Ok(events.clone())
    }

    async fn create_event(&self, event: NewHoneypotEvent) -> Result<EventId, EventStoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| EventStoreError::WriteFailure("Lock poison".to_string()))?;

        let id = EventId::generate();
        events.push(event.into_event(id.clone()));

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list() {
        let store = InMemoryEventStore::new();
        let event = NewHoneypotEvent::new("203.0.113.5", "ssh", "login-attempt");

        let id = store.create_event(event.clone()).await.expect("Create failed");

        let loaded = store.list_events().await.expect("List failed");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], event.into_event(id));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let store = InMemoryEventStore::new();
        let loaded = store.list_events().await.expect("List failed");
        assert!(loaded.is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_keeps_insertion_order() {
        let store = InMemoryEventStore::new();
        let first = store
            .create_event(NewHoneypotEvent::new("192.0.2.1", "ftp", "USER anonymous"))
            .await
            .expect("Create failed");
        let second = store
            .create_event(NewHoneypotEvent::new("192.0.2.2", "telnet", "login"))
            .await
            .expect("Create failed");

        assert_ne!(first, second);

        let ids: Vec<EventId> = store
            .list_events()
            .await
            .expect("List failed")
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_demo_has_unique_ids() {
        let store = InMemoryEventStore::demo();
        let events = store.events.read().expect("lock").clone();
        let mut ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), events.len());
        assert_eq!(store.len(), 4);
    }
}
