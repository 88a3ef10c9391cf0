//! Classifier configuration and settings loading
//!
//! The panel loads a user-configurable ignore-list of URL patterns from the
//! host's persistent key-value storage at startup. Loading is asynchronous
//! and read-only; a missing or malformed setting degrades to an empty list
//! rather than failing panel startup.

use crate::error::{Result, TriageError};
use regex::Regex;
use std::future::Future;
use url::Url;

/// Storage key holding the JSON array of ignore patterns
pub const IGNORE_URLS_KEY: &str = "ignoreUrls";

/// Read-only key-value settings storage supplied by the host environment
pub trait SettingsStore: Send + Sync {
    /// Fetch the raw value stored under a key, `None` when unset
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Compiled ignore-list of URL patterns.
///
/// Each pattern is a regular expression tested against the full URL; a
/// pattern that equals the URL's host also matches, so bare hostnames work
/// without regex escaping.
#[derive(Debug, Default, Clone)]
pub struct IgnoreList {
    patterns: Vec<Regex>,
    raw: Vec<String>,
}

impl IgnoreList {
    /// Compile an ignore-list from raw pattern strings.
    ///
    /// Patterns that fail to compile are skipped with a warning; a bad
    /// pattern must never take down classification.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut compiled = Vec::new();
        let mut raw = Vec::new();
        for pattern in patterns {
            let pattern = pattern.into();
            match Regex::new(&pattern) {
                Ok(regex) => compiled.push(regex),
                Err(error) => {
                    tracing::warn!(%pattern, %error, "skipping invalid ignore pattern");
                }
            }
            raw.push(pattern);
        }
        Self {
            patterns: compiled,
            raw,
        }
    }

    /// Compile an ignore-list, rejecting the first invalid pattern.
    ///
    /// For panel settings edited by hand, where the user wants to know a
    /// pattern is broken instead of having it silently skipped.
    pub fn try_from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut compiled = Vec::new();
        let mut raw = Vec::new();
        for pattern in patterns {
            let pattern = pattern.into();
            let regex =
                Regex::new(&pattern).map_err(|source| TriageError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            compiled.push(regex);
            raw.push(pattern);
        }
        Ok(Self {
            patterns: compiled,
            raw,
        })
    }

    /// Check whether a URL matches any ignore pattern
    pub fn matches(&self, url: &str) -> bool {
        if self.patterns.is_empty() && self.raw.is_empty() {
            return false;
        }
        if self.patterns.iter().any(|pattern| pattern.is_match(url)) {
            return true;
        }
        // Bare-host patterns match the parsed host exactly
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                return self.raw.iter().any(|pattern| pattern.as_str() == host);
            }
        }
        false
    }

    /// Number of raw patterns configured (including non-compiling ones)
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Check whether no patterns are configured
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Configuration passed to the classifier at construction.
///
/// The ignore-list is applied as an explicit pre-filter before
/// classification; exchanges whose URL matches are dropped entirely.
#[derive(Debug, Default)]
pub struct ClassifierConfig {
    pub ignore_urls: IgnoreList,
}

impl ClassifierConfig {
    /// Build a configuration from raw ignore patterns
    pub fn with_ignore_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore_urls: IgnoreList::from_patterns(patterns),
        }
    }

    /// Load configuration from persistent settings storage.
    ///
    /// Reads the `ignoreUrls` key as a JSON string array. A missing key or
    /// malformed value degrades to an empty ignore-list with a warning;
    /// only a storage-level failure surfaces as an error.
    pub async fn load<S: SettingsStore>(store: &S) -> Result<Self> {
        let raw = store.get(IGNORE_URLS_KEY).await?;
        let patterns = match raw {
            Some(text) => match serde_json::from_str::<Vec<String>>(&text) {
                Ok(patterns) => patterns,
                Err(error) => {
                    tracing::warn!(key = IGNORE_URLS_KEY, %error, "malformed ignore-list setting, using empty list");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Ok(Self::with_ignore_patterns(patterns))
    }
}
