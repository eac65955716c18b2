pub mod event_store;
pub mod firestore;
pub mod memory;

pub use event_store::{EventStore, EventStoreError};
