//! Shared payload formatting utilities
//!
//! Every body rendered anywhere in the panel core goes through the same
//! three-tier fallback: pretty-printed JSON when parseable, raw text
//! otherwise, and a fixed sentinel when nothing was captured.

use crate::types::RequestPayload;

/// Sentinel substituted for an absent or empty response body
pub const NO_RESPONSE_BODY_SENTINEL: &str = "No response body available";

/// Sentinel substituted for an absent request payload
pub const NO_REQUEST_PAYLOAD_SENTINEL: &str = "No request payload";

/// Marker phrase left by the capture layer when a request failed upstream
pub const FAILED_BEFORE_RESPONSE_MARKER: &str = "failed before response";

/// Pretty-print a JSON value with stable 2-space indentation
pub fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Pretty-print text if it parses as JSON, otherwise return it verbatim
pub fn pretty_print_if_json(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => pretty_json(&value),
        Err(_) => text.to_string(),
    }
}

/// Format a request payload for display.
///
/// JSON-parseable text is pretty-printed, other text passes through
/// verbatim, decoded parameters render as a JSON object, and an absent
/// payload yields the sentinel.
pub fn format_request_payload(payload: &RequestPayload) -> String {
    match payload {
        RequestPayload::Text(text) => pretty_print_if_json(text),
        RequestPayload::Params(params) => {
            let map: serde_json::Map<String, serde_json::Value> = params
                .iter()
                .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
                .collect();
            pretty_json(&serde_json::Value::Object(map))
        }
        RequestPayload::None => NO_REQUEST_PAYLOAD_SENTINEL.to_string(),
    }
}

/// Normalize a response body, substituting the sentinel for absent or
/// empty bodies so downstream code never handles "missing" separately
pub fn normalize_response_body(body: Option<&str>) -> String {
    match body {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NO_RESPONSE_BODY_SENTINEL.to_string(),
    }
}
