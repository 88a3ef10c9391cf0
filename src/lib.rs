//! Net Triage - Passive HTTP/GraphQL exchange classification
//!
//! This crate implements the core of a network inspection panel: it
//! consumes captured request/response pairs, applies a layered
//! failure-detection policy, and produces normalized records for
//! rendering, clipboard reports, and bulk JSON export. Rendering and
//! persistence are external collaborators behind thin interfaces.

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Shared utility modules
pub mod formatter;

// Main functionality modules
pub mod classifier;
pub mod export;
pub mod pipeline;

// Re-export main types for convenience
pub use classifier::Classifier;
pub use config::{ClassifierConfig, IgnoreList, SettingsStore, IGNORE_URLS_KEY};
pub use error::{Result, TriageError};
pub use export::{export_document, issue_report, ExportRecord, EXPORT_FILENAME};
pub use formatter::{
    format_request_payload, normalize_response_body, NO_REQUEST_PAYLOAD_SENTINEL,
    NO_RESPONSE_BODY_SENTINEL,
};
pub use pipeline::{BodyFetch, CaptureEvent, ExchangePipeline};
pub use types::{CapturedExchange, ClassifiedExchange, FailureReason, RequestPayload};
