//! Event-driven capture pipeline
//!
//! Network events arrive one per finished exchange; reading the response
//! body is the single asynchronous step upstream of classification. The
//! pipeline awaits each body, classifies synchronously, and emits records
//! strictly in arrival order. An event whose body fetch never completes is
//! silently dropped, which is a documented limitation of the capture host.

use crate::classifier::Classifier;
use crate::types::{CapturedExchange, ClassifiedExchange, RequestPayload};
use chrono::{DateTime, Utc};
use std::future::Future;
use tokio::sync::mpsc;

/// Asynchronous accessor for a captured response body.
///
/// `None` means no body was ever produced for the exchange; the classifier
/// substitutes the sentinel downstream.
pub trait BodyFetch: Send {
    fn fetch_body(self) -> impl Future<Output = Option<String>> + Send;
}

/// An already-materialized body doubles as its own accessor
impl BodyFetch for Option<String> {
    async fn fetch_body(self) -> Option<String> {
        self
    }
}

/// Capture hosts that hand out type-erased body futures plug in directly
impl BodyFetch for futures::future::BoxFuture<'static, Option<String>> {
    fn fetch_body(self) -> impl Future<Output = Option<String>> + Send {
        self
    }
}

/// One finished network event with its pending body accessor
#[derive(Debug)]
pub struct CaptureEvent<B: BodyFetch> {
    pub url: String,
    pub method: String,
    pub status: Option<u16>,
    pub request_headers: Vec<(String, String)>,
    pub response_headers: Vec<(String, String)>,
    pub request_body: RequestPayload,
    pub captured_at: DateTime<Utc>,
    pub body: B,
}

impl<B: BodyFetch> CaptureEvent<B> {
    /// Await the body and materialize the immutable exchange record
    pub async fn into_exchange(self) -> CapturedExchange {
        let body = self.body.fetch_body().await;
        CapturedExchange {
            url: self.url,
            method: self.method,
            status: self.status,
            request_headers: self.request_headers,
            response_headers: self.response_headers,
            request_body: self.request_body,
            response_body: body,
            captured_at: self.captured_at,
        }
    }
}

/// Sequential classification pipeline.
///
/// Each event is processed to completion before the next is taken from the
/// channel, so no locking is needed and records are emitted in arrival
/// order.
#[derive(Debug, Default)]
pub struct ExchangePipeline {
    classifier: Classifier,
}

impl ExchangePipeline {
    /// Create a pipeline around a configured classifier
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Process one event: await its body, then classify.
    ///
    /// Returns `None` for suppressed exchanges (preflights, ignore-listed
    /// URLs).
    pub async fn process_event<B: BodyFetch>(
        &self,
        event: CaptureEvent<B>,
    ) -> Option<ClassifiedExchange> {
        let exchange = event.into_exchange().await;
        self.classifier.classify(&exchange)
    }

    /// Consume a channel of capture events until it closes, handing each
    /// classified record to the sink in arrival order
    pub async fn run<B, F>(&self, mut events: mpsc::Receiver<CaptureEvent<B>>, mut sink: F)
    where
        B: BodyFetch,
        F: FnMut(ClassifiedExchange),
    {
        while let Some(event) = events.recv().await {
            if let Some(classified) = self.process_event(event).await {
                tracing::debug!(
                    url = %classified.url,
                    is_failure = classified.is_failure,
                    summary = %classified.summary_label,
                    "classified exchange"
                );
                sink(classified);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;
    use chrono::TimeZone;

    fn event(url: &str, method: &str, status: Option<u16>, body: Option<&str>) -> CaptureEvent<Option<String>> {
        CaptureEvent {
            url: url.to_string(),
            method: method.to_string(),
            status,
            request_headers: Vec::new(),
            response_headers: Vec::new(),
            request_body: RequestPayload::None,
            captured_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            body: body.map(|b| b.to_string()),
        }
    }

    #[tokio::test]
    async fn test_process_event_classifies_after_body_fetch() {
        let pipeline = ExchangePipeline::default();
        let classified = pipeline
            .process_event(event(
                "https://api.example.com/graphql",
                "POST",
                Some(500),
                Some(r#"{"error":"db down"}"#),
            ))
            .await
            .unwrap();

        assert!(classified.is_failure);
        assert_eq!(classified.summary_label, "HTTP 500: db down");
    }

    #[tokio::test]
    async fn test_preflights_never_reach_the_sink() {
        let pipeline = ExchangePipeline::default();
        assert!(pipeline
            .process_event(event("https://api.example.com/graphql", "OPTIONS", Some(204), None))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_ignore_listed_urls_are_dropped() {
        let classifier = Classifier::new(ClassifierConfig::with_ignore_patterns(["analytics"]));
        let pipeline = ExchangePipeline::new(classifier);
        assert!(pipeline
            .process_event(event(
                "https://analytics.example.com/collect",
                "POST",
                Some(500),
                Some("error"),
            ))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_boxed_body_future_accessor() {
        use futures::FutureExt;

        let pipeline = ExchangePipeline::default();
        let body: futures::future::BoxFuture<'static, Option<String>> =
            async { Some(r#"{"error":"late body"}"#.to_string()) }.boxed();
        let event = CaptureEvent {
            url: "https://api.example.com/slow".to_string(),
            method: "GET".to_string(),
            status: Some(500),
            request_headers: Vec::new(),
            response_headers: Vec::new(),
            request_body: RequestPayload::None,
            captured_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            body,
        };

        let classified = pipeline.process_event(event).await.unwrap();
        assert_eq!(classified.summary_label, "HTTP 500: late body");
    }

    #[tokio::test]
    async fn test_run_emits_in_arrival_order() {
        let pipeline = ExchangePipeline::default();
        let (tx, rx) = mpsc::channel(8);

        for (i, status) in [500u16, 404, 200].iter().enumerate() {
            let url = format!("https://api.example.com/r{}", i);
            tx.send(event(&url, "GET", Some(*status), Some(r#"{"data":{}}"#)))
                .await
                .unwrap();
        }
        drop(tx);

        let mut seen = Vec::new();
        pipeline.run(rx, |classified| seen.push(classified.url)).await;

        assert_eq!(
            seen,
            vec![
                "https://api.example.com/r0",
                "https://api.example.com/r1",
                "https://api.example.com/r2",
            ]
        );
    }
}
