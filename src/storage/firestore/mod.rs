pub mod document;
pub mod event_store;

pub use event_store::FirestoreEventStore;
