use chrono::{DateTime, Utc};

/// Request body as captured from the network event.
///
/// Post data arrives either as raw text or as an already-decoded parameter
/// list; many requests carry no payload at all.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RequestPayload {
    /// Raw post-data text (JSON, form-encoded, anything)
    Text(String),
    /// Decoded key/value form parameters
    Params(Vec<(String, String)>),
    /// No request payload was captured
    None,
}

impl RequestPayload {
    /// Check whether any payload was captured
    pub fn is_present(&self) -> bool {
        !matches!(self, RequestPayload::None)
    }
}

/// One completed HTTP exchange as observed by the capture layer.
///
/// Created once per finished network event and never mutated. `status` is
/// `None` when no response was ever received; `response_body` is `None` when
/// the body is absent, which is distinct from an empty-but-successful body
/// only until normalization substitutes the sentinel text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CapturedExchange {
    pub url: String,
    /// HTTP verb, uppercase
    pub method: String,
    pub status: Option<u16>,
    pub request_headers: Vec<(String, String)>,
    pub response_headers: Vec<(String, String)>,
    pub request_body: RequestPayload,
    pub response_body: Option<String>,
    /// Capture time, assigned once by the capture layer
    pub captured_at: DateTime<Utc>,
}

impl CapturedExchange {
    /// Create a new captured exchange with empty headers and no bodies
    pub fn new<U: Into<String>, M: Into<String>>(
        url: U,
        method: M,
        status: Option<u16>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            status,
            request_headers: Vec::new(),
            response_headers: Vec::new(),
            request_body: RequestPayload::None,
            response_body: None,
            captured_at,
        }
    }

    /// Check if this is a CORS preflight request
    pub fn is_preflight(&self) -> bool {
        self.method == "OPTIONS"
    }

    /// Check if the response status indicates an HTTP error (>= 400)
    pub fn is_http_error(&self) -> bool {
        self.status.is_some_and(|s| s >= 400)
    }
}

/// Independent failure signals detected by the classifier.
///
/// The signals are non-exclusive; an exchange records every signal that
/// fired, not just the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum FailureReason {
    /// Response status was present and >= 400
    HttpErrorStatus,
    /// Response body was absent or flagged as failed-before-response
    NoResponseBody,
    /// A GraphQL-style `errors` array was found in the response body
    GraphqlErrors,
    /// The response body contained an error-flavored keyword
    ErrorKeywordInBody,
}

impl FailureReason {
    /// Get a human-readable name for the failure reason
    pub fn name(&self) -> &'static str {
        match self {
            FailureReason::HttpErrorStatus => "HTTP Error Status",
            FailureReason::NoResponseBody => "No Response Body",
            FailureReason::GraphqlErrors => "GraphQL Errors",
            FailureReason::ErrorKeywordInBody => "Error Keyword In Body",
        }
    }
}

/// Normalized classification record derived from one captured exchange.
///
/// `summary_label` and `detail_payload` are always non-empty; renderers never
/// need to null-check them. Identical inputs always produce identical records.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassifiedExchange {
    pub url: String,
    pub method: String,
    pub status: Option<u16>,
    pub is_failure: bool,
    /// Every signal that fired, deduplicated, in declaration order.
    /// Empty iff `is_failure` is false.
    pub failure_reasons: Vec<FailureReason>,
    /// One-line human description of the exchange outcome
    pub summary_label: String,
    /// Text block for the expandable detail panel and for export/copy
    pub detail_payload: String,
    /// GraphQL-style error objects, present only when found in the body
    pub structured_errors: Option<Vec<serde_json::Value>>,
    /// Pretty-printed request payload, raw text, or a sentinel
    pub formatted_request_payload: String,
    /// Capture time, copied from the exchange, never mutated
    pub timestamp: DateTime<Utc>,
}

impl ClassifiedExchange {
    /// Check whether a specific failure signal fired
    pub fn has_reason(&self, reason: FailureReason) -> bool {
        self.failure_reasons.contains(&reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_detection() {
        let exchange = CapturedExchange::new(
            "https://api.example.com/graphql",
            "OPTIONS",
            Some(204),
            Utc::now(),
        );
        assert!(exchange.is_preflight());

        let exchange = CapturedExchange::new(
            "https://api.example.com/graphql",
            "POST",
            Some(200),
            Utc::now(),
        );
        assert!(!exchange.is_preflight());
    }

    #[test]
    fn test_http_error_detection() {
        let mut exchange =
            CapturedExchange::new("https://api.example.com/x", "GET", Some(200), Utc::now());
        assert!(!exchange.is_http_error());

        exchange.status = Some(400);
        assert!(exchange.is_http_error());

        exchange.status = Some(500);
        assert!(exchange.is_http_error());

        // Absent status is not an HTTP error status (it is a missing-body case)
        exchange.status = None;
        assert!(!exchange.is_http_error());
    }

    #[test]
    fn test_request_payload_presence() {
        assert!(!RequestPayload::None.is_present());
        assert!(RequestPayload::Text("{}".to_string()).is_present());
        assert!(RequestPayload::Params(vec![("a".to_string(), "1".to_string())]).is_present());
    }
}
