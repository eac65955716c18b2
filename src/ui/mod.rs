pub mod table;
pub mod time;

pub use table::{TableRow, TableStatus, TableView};

use crate::controller::FetchState;

/// Machine-readable alternative to the table, in the store's field names.
///
/// Only a loaded snapshot has a JSON form. Loading and failed states yield
/// `None` so stdout stays empty instead of looking like an empty store.
pub fn events_json(state: &FetchState) -> serde_json::Result<Option<String>> {
    match state {
        FetchState::Loaded(events) => serde_json::to_string_pretty(events).map(Some),
        FetchState::Loading | FetchState::Failed(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{EventId, NewHoneypotEvent, Timestamp};

    #[test]
    fn test_events_json() {
        let events = vec![NewHoneypotEvent::new("203.0.113.5", "ssh", "login-attempt")
            .with_timestamp(Timestamp(1_700_000_000_000))
            .into_event(EventId::from("a1"))];

        let rendered = events_json(&FetchState::Loaded(events))
            .expect("serializes")
            .expect("loaded state has json");
        let json: serde_json::Value = serde_json::from_str(&rendered).expect("parses");
        assert_eq!(json[0]["id"], "a1");
        assert_eq!(json[0]["sourceIP"], "203.0.113.5");

        assert_eq!(
            events_json(&FetchState::Loaded(Vec::new())).expect("serializes"),
            Some("[]".to_string())
        );
    }

    #[test]
    fn test_unsettled_or_failed_state_has_no_json() {
        let failed = FetchState::Failed("Read failure: offline".to_string());
        assert_eq!(events_json(&failed).expect("serializes"), None);
        assert_eq!(events_json(&FetchState::Loading).expect("serializes"), None);
    }
}
