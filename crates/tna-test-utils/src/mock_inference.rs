// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock inference adapter and connector for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use tna_core::types::{InferenceRequest, InferenceResponse, InferenceRole};
use tna_core::{InferenceAdapter, InferenceConnector, TnaError};

type Scripted = Result<InferenceResponse, String>;

/// A mock inference adapter that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a
/// default "mock response" text is returned. Every request is recorded.
#[derive(Clone, Default)]
pub struct MockInference {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl MockInference {
    /// Create a new mock adapter with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a single-text response.
    pub async fn push_text(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .await
            .push_back(Ok(InferenceResponse::from_text(text)));
    }

    /// Queue a full response.
    pub async fn push_response(&self, response: InferenceResponse) {
        self.responses.lock().await.push_back(Ok(response));
    }

    /// Queue a provider failure.
    pub async fn push_error(&self, message: impl Into<String>) {
        self.responses.lock().await.push_back(Err(message.into()));
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl InferenceAdapter for MockInference {
    fn name(&self) -> &str {
        "mock-inference"
    }

    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, TnaError> {
        self.requests.lock().await.push(request);
        match self.responses.lock().await.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TnaError::provider(message)),
            None => Ok(InferenceResponse::from_text("mock response")),
        }
    }
}

/// A connector handing out [`MockInference`] clients over shared script state.
///
/// Each `connect` returns a new `Arc`, so callers cannot tell it apart from a
/// real per-call client.
#[derive(Default)]
pub struct MockConnector {
    inference: MockInference,
    connects: AtomicUsize,
    refuse_with: Option<String>,
}

impl MockConnector {
    /// A connector whose clients answer from `inference`.
    pub fn new(inference: MockInference) -> Self {
        Self {
            inference,
            connects: AtomicUsize::new(0),
            refuse_with: None,
        }
    }

    /// A connector that fails every connect with a config error.
    pub fn refusing(message: impl Into<String>) -> Self {
        Self {
            refuse_with: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of `connect` calls so far, including refused ones.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Shared script state of the handed-out clients.
    pub fn inference(&self) -> &MockInference {
        &self.inference
    }
}

impl InferenceConnector for MockConnector {
    fn connect(&self, _role: InferenceRole) -> Result<Arc<dyn InferenceAdapter>, TnaError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.refuse_with {
            return Err(TnaError::Config(message.clone()));
        }
        Ok(Arc::new(self.inference.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tna_core::ContentPart;

    fn request() -> InferenceRequest {
        InferenceRequest {
            model: "mock".into(),
            parts: vec![ContentPart::text("hi")],
        }
    }

    #[tokio::test]
    async fn pops_in_order_then_defaults() {
        let mock = MockInference::new();
        mock.push_text("first").await;
        mock.push_error("boom").await;

        let first = mock.generate(request()).await.unwrap();
        assert_eq!(first.first_text(), Some("first"));
        assert!(mock.generate(request()).await.is_err());
        let fallback = mock.generate(request()).await.unwrap();
        assert_eq!(fallback.first_text(), Some("mock response"));
        assert_eq!(mock.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn connector_counts_and_shares_script() {
        let connector = MockConnector::new(MockInference::new());
        connector.inference().push_text("seen").await;

        let client = connector.connect(InferenceRole::Nested).unwrap();
        assert_eq!(connector.connect_count(), 1);
        let response = client.generate(request()).await.unwrap();
        assert_eq!(response.first_text(), Some("seen"));
    }

    #[test]
    fn refusing_connector_errors() {
        let connector = MockConnector::refusing("no key");
        assert!(connector.connect(InferenceRole::Nested).is_err());
        assert_eq!(connector.connect_count(), 1);
    }
}
