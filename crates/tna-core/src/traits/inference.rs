// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inference adapter and connector traits.
//!
//! The outer conversation loop and the vision tool both talk to the same
//! kind of inference service. They must never share a client: a tool handler
//! asks an [`InferenceConnector`] for a brand new [`InferenceAdapter`] on
//! every call, owns it for the duration of that call, and drops it afterwards.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TnaError;
use crate::types::{InferenceRequest, InferenceResponse, InferenceRole};

/// A client able to run one request against an inference service.
#[async_trait]
pub trait InferenceAdapter: Send + Sync {
    /// Short provider name used in logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Sends a single-turn request and returns the full response.
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, TnaError>;
}

/// Factory for independent inference clients.
///
/// Implementations resolve the credential at connect time so that a key
/// rotated in the environment is picked up by the next call.
pub trait InferenceConnector: Send + Sync {
    /// Builds a fresh client for the given role.
    fn connect(&self, role: InferenceRole) -> Result<Arc<dyn InferenceAdapter>, TnaError>;
}
