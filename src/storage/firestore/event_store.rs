use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::config::settings::FirestoreSettings;
use crate::domain::events::{EventId, HoneypotEvent, NewHoneypotEvent};
use crate::storage::event_store::{EventStore, EventStoreError};
use crate::storage::firestore::document::{self, Document, ListDocumentsResponse};

/// Reads and writes one Firestore collection through the REST API.
pub struct FirestoreEventStore {
    client: Client,
    settings: FirestoreSettings,
}

impl FirestoreEventStore {
    pub fn new(settings: FirestoreSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn collection_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.project_id,
            self.settings.collection
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.settings.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        };

        match &self.settings.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_page(&self, page_token: Option<&str>) -> Result<ListDocumentsResponse, String> {
        let mut request = self
            .authorize(self.client.get(self.collection_url()))
            .query(&[("pageSize", self.settings.page_size.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let response = ensure_success("GET", response).await?;

        response
            .json::<ListDocumentsResponse>()
            .await
            .map_err(|e| format!("malformed list response: {e}"))
    }
}

async fn ensure_success(method: &str, response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(format!("{method} returned {status} ({}): {body}", error_status(&body)))
}

// Firestore error bodies carry a `status` string that is more telling than
// the HTTP code alone.
fn error_status(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["status"].as_str().map(str::to_string))
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

#[async_trait]
impl EventStore for FirestoreEventStore {
    async fn list_events(&self) -> Result<Vec<HoneypotEvent>, EventStoreError> {
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        // The REST list endpoint is paged; callers still get one snapshot.
        loop {
            let page = self
                .fetch_page(page_token.as_deref())
                .await
                .map_err(EventStoreError::ReadFailure)?;

            for doc in &page.documents {
                let event = document::decode_event(doc).map_err(|e| {
                    EventStoreError::ReadFailure(format!("document {}: {e}", doc.name))
                })?;
                events.push(event);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => {
                    debug!(fetched = events.len(), "following Firestore page token");
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        Ok(events)
    }

    async fn create_event(&self, event: NewHoneypotEvent) -> Result<EventId, EventStoreError> {
        let body = document::encode_event(&event);

        let response = self
            .authorize(self.client.post(self.collection_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| EventStoreError::WriteFailure(e.to_string()))?;
        let response = ensure_success("POST", response)
            .await
            .map_err(EventStoreError::WriteFailure)?;

        let created: Document = response
            .json()
            .await
            .map_err(|e| EventStoreError::WriteFailure(format!("malformed create response: {e}")))?;

        created.id().ok_or_else(|| {
            EventStoreError::WriteFailure("create response did not name the new document".to_string())
        })
    }
}
