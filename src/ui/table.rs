use std::fmt::Display;

use chrono::TimeZone;

use crate::controller::FetchState;
use crate::domain::events::{EventId, HoneypotEvent};
use crate::ui::time::format_timestamp;

pub const TITLE: &str = "ZecX Honeypot Dashboard";
pub const CAPTION: &str = "Live Attack Feed";
pub const HEADERS: [&str; 5] = ["ID", "Timestamp", "Source IP", "Service", "Action"];
pub const LOADING_LINE: &str = "Loading...";

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub key: EventId,
    pub cells: [String; 5],
}

impl TableRow {
    pub fn from_event<Tz>(event: &HoneypotEvent, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            key: event.id.clone(),
            cells: [
                event.id.to_string(),
                format_timestamp(event.timestamp, tz),
                event.source_ip.clone(),
                event.service.clone(),
                event.action.clone(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Display-ready snapshot of a [`FetchState`]. Rows keep store order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub status: TableStatus,
}

impl TableView {
    pub fn from_state<Tz>(state: &FetchState, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let status = match state {
            FetchState::Loading => TableStatus::Loading,
            FetchState::Loaded(_) => TableStatus::Ready,
            FetchState::Failed(reason) => TableStatus::Failed(reason.clone()),
        };

        Self {
            rows: state
                .events()
                .iter()
                .map(|event| TableRow::from_event(event, tz))
                .collect(),
            status,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn render(&self) -> String {
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = format!("{TITLE}\n\n{CAPTION}\n");
        push_line(&mut out, &widths, HEADERS.iter().copied());
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &widths, rule.iter().map(String::as_str));
        for row in &self.rows {
            push_line(&mut out, &widths, row.cells.iter().map(String::as_str));
        }

        match &self.status {
            TableStatus::Loading => out.push_str(&format!("{LOADING_LINE}\n")),
            TableStatus::Failed(reason) => {
                out.push_str(&format!("Failed to load events: {reason}\n"))
            }
            TableStatus::Ready => {}
        }

        out
    }
}

fn push_line<'a>(out: &mut String, widths: &[usize; 5], cells: impl Iterator<Item = &'a str>) {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.zip(widths.iter()).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(&format!("{cell:<width$}"));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::{NewHoneypotEvent, Timestamp};
    use chrono::Utc;

    fn event(id: &str, millis: i64, ip: &str, service: &str, action: &str) -> HoneypotEvent {
        NewHoneypotEvent::new(ip, service, action)
            .with_timestamp(Timestamp(millis))
            .into_event(EventId::from(id))
    }

    #[test]
    fn test_one_row_per_event_in_store_order() {
        let events = vec![
            event("b2", 1_700_000_100_000, "192.0.2.1", "http", "GET /"),
            event("a1", 1_700_000_000_000, "203.0.113.5", "ssh", "login-attempt"),
            event("c3", 1_600_000_000_000, "198.51.100.4", "redis", "INFO"),
        ];
        let view = TableView::from_state(&FetchState::Loaded(events.clone()), &Utc);

        assert_eq!(view.row_count(), events.len());
        let keys: Vec<&str> = view.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b2", "a1", "c3"]);
        assert_eq!(view.status, TableStatus::Ready);
    }

    #[test]
    fn test_render_aligns_columns() {
        let view = TableView::from_state(
            &FetchState::Loaded(vec![event(
                "a1",
                1_700_000_000_000,
                "203.0.113.5",
                "ssh",
                "login-attempt",
            )]),
            &Utc,
        );

        let rendered = view.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], TITLE);
        assert_eq!(lines[2], CAPTION);
        assert_eq!(
            lines[3],
            "ID  Timestamp                       Source IP    Service  Action"
        );
        assert_eq!(
            lines[5],
            "a1  11/14/2023, 10:13:20 PM +00:00  203.0.113.5  ssh      login-attempt"
        );
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_loading_and_failed_have_no_rows() {
        let loading = TableView::from_state(&FetchState::Loading, &Utc);
        assert_eq!(loading.row_count(), 0);
        assert!(loading.render().ends_with("Loading...\n"));

        let failed = TableView::from_state(&FetchState::Failed("Read failure: offline".into()), &Utc);
        assert_eq!(failed.row_count(), 0);
        assert!(failed
            .render()
            .contains("Failed to load events: Read failure: offline"));
    }

    #[test]
    fn test_duplicate_ids_render_as_is() {
        let view = TableView::from_state(
            &FetchState::Loaded(vec![
                event("dup", 0, "192.0.2.1", "ssh", "a"),
                event("dup", 0, "192.0.2.1", "ssh", "b"),
            ]),
            &Utc,
        );
        assert_eq!(view.row_count(), 2);
    }
}
