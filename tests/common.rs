//! Shared test utilities for net-triage crate tests
//!
//! Centralized fixture builders and mock implementations used by the unit
//! and integration test suites.

use chrono::{DateTime, TimeZone, Utc};
use net_triage::{
    config::SettingsStore, error::Result, CaptureEvent, CapturedExchange, RequestPayload,
};
use std::collections::HashMap;

/// Fixed capture instant so classified records compare deterministically
pub fn capture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

/// Helper function to create a CapturedExchange with specific status and body
pub fn create_exchange(
    url: &str,
    method: &str,
    status: Option<u16>,
    body: Option<&str>,
) -> CapturedExchange {
    let mut exchange = CapturedExchange::new(url, method, status, capture_time());
    exchange.response_body = body.map(|b| b.to_string());
    exchange
}

/// Helper function to create a CapturedExchange carrying a request payload
pub fn create_exchange_with_payload(
    url: &str,
    method: &str,
    status: Option<u16>,
    body: Option<&str>,
    payload: RequestPayload,
) -> CapturedExchange {
    let mut exchange = create_exchange(url, method, status, body);
    exchange.request_body = payload;
    exchange
}

/// Helper function to create a pipeline event with an already-resolved body
pub fn create_event(
    url: &str,
    method: &str,
    status: Option<u16>,
    body: Option<&str>,
) -> CaptureEvent<Option<String>> {
    CaptureEvent {
        url: url.to_string(),
        method: method.to_string(),
        status,
        request_headers: Vec::new(),
        response_headers: Vec::new(),
        request_body: RequestPayload::None,
        captured_at: capture_time(),
        body: body.map(|b| b.to_string()),
    }
}

/// In-memory settings store mock for config loading tests
pub struct MockSettingsStore {
    values: HashMap<String, String>,
}

impl MockSettingsStore {
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }
}

impl SettingsStore for MockSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }
}
