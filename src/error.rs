use thiserror::Error;

/// Result type alias for net-triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Error types for the fallible edges of the panel core.
///
/// Classification itself is total and never produces these; they cover
/// settings loading, export serialization, and clipboard hand-off.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnorePattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Settings storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Export failed: {message}")]
    ExportFailed { message: String },

    #[error("Clipboard unavailable: {message}")]
    ClipboardUnavailable { message: String },

    #[error("General error: {message}")]
    General { message: String },
}

impl TriageError {
    /// Create a new storage error for a settings key
    pub fn storage<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::Storage {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a new export failure error
    pub fn export_failed<S: Into<String>>(message: S) -> Self {
        Self::ExportFailed {
            message: message.into(),
        }
    }

    /// Create a new clipboard error
    pub fn clipboard_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ClipboardUnavailable {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }
}
