//! Shared fakes for unit tests: scripted transport, failing storage,
//! recording theme surface.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::net::api::AggregateClient;
use crate::net::transport::{RawResponse, Transport, TransportError};
use crate::state::theme::{Theme, ThemeSurface};
use crate::storage::{PreferenceBackend, StoreError};

pub(crate) const TEST_BASE: &str = "https://api.example.test";

// =========================================================================
// MockTransport
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

struct Scripted {
    delay: Option<Duration>,
    result: Result<RawResponse, TransportError>,
}

/// Transport that replays canned responses in order and records requests.
///
/// Each request takes the next scripted response when it is issued, then
/// waits out that response's own delay (or the transport-wide one).
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self { responses: Mutex::new(VecDeque::new()), requests: Mutex::new(Vec::new()), delay: None }
    }

    /// Every response arrives after `delay` (use with paused tokio time).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push_text(status, &body.to_string());
    }

    /// Like [`Self::push_json`], but this response alone arrives after `delay`.
    pub fn push_json_after(&self, delay: Duration, status: u16, body: Value) {
        self.push(Some(delay), Ok(RawResponse { status, body: body.to_string() }));
    }

    pub fn push_text(&self, status: u16, body: &str) {
        self.push(None, Ok(RawResponse { status, body: body.to_string() }));
    }

    pub fn push_network_error(&self) {
        self.push(None, Err(TransportError::Request("connection refused".into())));
    }

    pub fn push_network_error_after(&self, delay: Duration) {
        self.push(Some(delay), Err(TransportError::Request("connection reset".into())));
    }

    fn push(&self, delay: Option<Duration>, result: Result<RawResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(Scripted { delay, result });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.method == "POST").collect()
    }

    pub fn get_count(&self) -> usize {
        self.requests().iter().filter(|r| r.method == "GET").count()
    }

    async fn respond(&self, method: &'static str, url: &str, body: Option<Value>) -> Result<RawResponse, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push(RecordedRequest { method, url: url.to_string(), body });
        let next = self.responses.lock().unwrap().pop_front();
        let Some(scripted) = next else {
            return Err(TransportError::Request("no scripted response".into()));
        };
        if let Some(delay) = scripted.delay.or(self.delay) {
            tokio::time::sleep(delay).await;
        }
        scripted.result
    }
}

#[cfg_attr(not(feature = "hydrate"), async_trait::async_trait)]
#[cfg_attr(feature = "hydrate", async_trait::async_trait(?Send))]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        self.respond("GET", url, None).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, TransportError> {
        self.respond("POST", url, Some(body.clone())).await
    }
}

pub(crate) fn test_client(mock: &Arc<MockTransport>) -> AggregateClient {
    let config = ClientConfig::new(TEST_BASE).unwrap();
    AggregateClient::new(config, mock.clone())
}

/// A successful page-1 body reporting `total` words.
pub(crate) fn page_json(total: u64) -> Value {
    serde_json::json!({
        "success": true,
        "message": "ok",
        "links": { "next": null, "previous": null },
        "total_items": total,
        "total_pages": total.div_ceil(20),
        "page_size": 20,
        "current_page": 1,
        "data": []
    })
}

// =========================================================================
// FailingBackend
// =========================================================================

/// Backend whose storage is switched off, like a browser in privacy mode.
pub(crate) struct FailingBackend;

impl PreferenceBackend for FailingBackend {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("quota exceeded".into()))
    }
}

// =========================================================================
// RecordingSurface
// =========================================================================

/// Theme surface that remembers every marker applied to it.
#[derive(Default)]
pub(crate) struct RecordingSurface {
    applied: Mutex<Vec<Theme>>,
}

impl RecordingSurface {
    pub fn applied(&self) -> Vec<Theme> {
        self.applied.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Theme> {
        self.applied().last().copied()
    }
}

impl ThemeSurface for RecordingSurface {
    fn apply(&self, theme: Theme) {
        self.applied.lock().unwrap().push(theme);
    }
}
