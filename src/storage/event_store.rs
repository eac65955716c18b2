use crate::domain::events::{EventId, HoneypotEvent, NewHoneypotEvent};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventStoreError {
    #[error("Read failure: {0}")]
    ReadFailure(String),
    #[error("Write failure: {0}")]
    WriteFailure(String),
}

/// A collection of honeypot events held by some backend.
///
/// Reads are full snapshots with no ordering guarantee; writes append one
/// document and hand back the id the backend assigned to it.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list_events(&self) -> Result<Vec<HoneypotEvent>, EventStoreError>;
    async fn create_event(&self, event: NewHoneypotEvent) -> Result<EventId, EventStoreError>;
}
