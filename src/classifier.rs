//! Failure classification for captured HTTP/GraphQL exchanges
//!
//! This module applies a layered failure-detection policy to one captured
//! request/response pair and produces a normalized record for the panel:
//! independent boolean signals (HTTP status, missing body, GraphQL errors,
//! error keywords) combined with OR, plus summary/detail synthesis.

use crate::config::ClassifierConfig;
use crate::formatter::{
    format_request_payload, normalize_response_body, pretty_json, FAILED_BEFORE_RESPONSE_MARKER,
    NO_RESPONSE_BODY_SENTINEL,
};
use crate::types::{CapturedExchange, ClassifiedExchange, FailureReason};

/// Keywords whose presence in a response body flags a coarse failure signal
const ERROR_KEYWORDS: &[&str] = &["error", "fail", "exception", "invalid"];

/// Result of the GraphQL error extraction pass
#[derive(Debug, Clone, PartialEq)]
enum GraphqlSignal {
    /// No errors found by either path
    Absent,
    /// Validated `errors` arrays extracted from parsed JSON
    Structured(Vec<serde_json::Value>),
    /// Body is not valid JSON but mentions an `"errors"` field; the raw
    /// body itself is the best-effort payload
    RawText,
}

/// Classifies captured exchanges using the configured ignore-list.
///
/// `classify` is a pure function of the exchange and the configuration:
/// no I/O, no clock reads, no shared state. It never fails; every parse
/// attempt is guarded and degrades to raw-text handling.
#[derive(Debug, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify one captured exchange.
    ///
    /// Returns `None` for suppressed exchanges (CORS preflights and
    /// ignore-listed URLs); those are dropped upstream of the panel log,
    /// not recorded as healthy.
    pub fn classify(&self, exchange: &CapturedExchange) -> Option<ClassifiedExchange> {
        if exchange.is_preflight() {
            tracing::debug!(url = %exchange.url, "dropping preflight exchange");
            return None;
        }
        if self.config.ignore_urls.matches(&exchange.url) {
            tracing::debug!(url = %exchange.url, "dropping ignore-listed exchange");
            return None;
        }

        let body = normalize_response_body(exchange.response_body.as_deref());

        let no_body = has_no_body(&body);
        let graphql = extract_graphql_errors(&body);
        let keyword = contains_error_keyword(&body);
        let http_error = exchange.is_http_error();

        let mut failure_reasons = Vec::new();
        if http_error {
            failure_reasons.push(FailureReason::HttpErrorStatus);
        }
        if no_body {
            failure_reasons.push(FailureReason::NoResponseBody);
        }
        if graphql != GraphqlSignal::Absent {
            failure_reasons.push(FailureReason::GraphqlErrors);
        }
        if keyword {
            failure_reasons.push(FailureReason::ErrorKeywordInBody);
        }
        let is_failure = !failure_reasons.is_empty();

        let structured_errors = match &graphql {
            GraphqlSignal::Structured(errors) => Some(errors.clone()),
            _ => None,
        };

        let (summary_label, detail_payload) =
            synthesize_summary(exchange.status, &body, no_body, http_error, &graphql);

        Some(ClassifiedExchange {
            url: exchange.url.clone(),
            method: exchange.method.clone(),
            status: exchange.status,
            is_failure,
            failure_reasons,
            summary_label,
            detail_payload,
            structured_errors,
            formatted_request_payload: format_request_payload(&exchange.request_body),
            timestamp: exchange.captured_at,
        })
    }
}

/// Detect a missing or broken response body by content.
///
/// The check is containment-based rather than presence-based so that a
/// substituted sentinel and an upstream failure marker are re-detected
/// uniformly downstream.
fn has_no_body(body: &str) -> bool {
    body.contains(NO_RESPONSE_BODY_SENTINEL) || body.contains(FAILED_BEFORE_RESPONSE_MARKER)
}

/// Extract GraphQL-style errors from a response body.
///
/// Batched responses (a JSON array) contribute the union of every
/// element's non-empty `errors` array in element order. A body that fails
/// to parse but mentions an `"errors"` field still fires the signal as a
/// raw-text best-effort match.
fn extract_graphql_errors(body: &str) -> GraphqlSignal {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(elements)) => {
            let mut collected = Vec::new();
            for element in &elements {
                if let Some(errors) = element.get("errors").and_then(|e| e.as_array()) {
                    collected.extend(errors.iter().cloned());
                }
            }
            if collected.is_empty() {
                GraphqlSignal::Absent
            } else {
                GraphqlSignal::Structured(collected)
            }
        }
        Ok(value) => match value.get("errors").and_then(|e| e.as_array()) {
            Some(errors) if !errors.is_empty() => GraphqlSignal::Structured(errors.clone()),
            _ => GraphqlSignal::Absent,
        },
        Err(_) => {
            if body.contains("\"errors\"") {
                GraphqlSignal::RawText
            } else {
                GraphqlSignal::Absent
            }
        }
    }
}

/// Coarse keyword heuristic over the lower-cased body.
///
/// Intentionally noisy: a healthy response documenting "invalid" as an
/// enum value still fires. Consumers can down-weight the
/// `ErrorKeywordInBody` tag if needed.
fn contains_error_keyword(body: &str) -> bool {
    let lowered = body.to_lowercase();
    ERROR_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Choose the summary label and detail payload in strict priority order.
///
/// The priority picks the form of the summary only; every fired reason
/// remains recorded on the classified exchange.
fn synthesize_summary(
    status: Option<u16>,
    body: &str,
    no_body: bool,
    http_error: bool,
    graphql: &GraphqlSignal,
) -> (String, String) {
    match graphql {
        GraphqlSignal::Structured(errors) => {
            let detail = pretty_json(&serde_json::Value::Array(errors.clone()));
            return ("GraphQL Error".to_string(), detail);
        }
        // Best-effort match: no validated array to pretty-print, so the
        // raw body itself is the error payload
        GraphqlSignal::RawText => {
            return ("GraphQL Error".to_string(), body.to_string());
        }
        GraphqlSignal::Absent => {}
    }

    if http_error {
        // Status is present whenever http_error holds
        let status = status.unwrap_or_default();
        let label = match extract_error_message(body) {
            Some(message) => format!("HTTP {}: {}", status, message),
            None => format!("HTTP {} Error", status),
        };
        return (label, body.to_string());
    }

    if no_body {
        return (
            "No Response Body".to_string(),
            NO_RESPONSE_BODY_SENTINEL.to_string(),
        );
    }

    ("Response Body".to_string(), body.to_string())
}

/// Pull a human-readable message out of a JSON error body, preferring the
/// `error` field, then `message`, then `exception`
fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    ["error", "message", "exception"]
        .iter()
        .find_map(|field| value.get(field).and_then(|v| v.as_str()))
        .map(|message| message.to_string())
}
