// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini inference adapter for the TNA agent.
//!
//! [`GeminiProvider`] implements [`InferenceAdapter`] over the REST
//! `generateContent` endpoint. [`GeminiConnector`] hands out a new provider,
//! with its own HTTP client and freshly resolved API key, on every
//! [`InferenceConnector::connect`] call.

pub mod client;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use tna_config::model::GeminiConfig;
use tna_core::types::{InferenceRequest, InferenceResponse, InferenceRole};
use tna_core::{InferenceAdapter, InferenceConnector, TnaError};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

/// Gemini provider implementing [`InferenceAdapter`].
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a provider from config, resolving the API key now.
    ///
    /// # API Key Resolution
    /// 1. `gemini.api_key` if set and non-empty
    /// 2. the environment variable named by `gemini.api_key_env`
    /// 3. [`TnaError::Config`] if neither is available
    pub fn from_config(config: &GeminiConfig) -> Result<Self, TnaError> {
        let api_key = resolve_api_key(config)?;
        let client = GeminiClient::new(&api_key, &config.base_url, config.timeout())?;
        Ok(Self { client })
    }
}

#[async_trait]
impl InferenceAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, TnaError> {
        let body = GenerateContentRequest::from(&request);
        let response = self.client.generate_content(&request.model, &body).await?;

        if response.candidates.is_empty() {
            if let Some(reason) = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                return Err(TnaError::provider(format!("prompt blocked: {reason}")));
            }
        }

        Ok(InferenceResponse::from(response))
    }
}

/// Builds an independent [`GeminiProvider`] per call.
#[derive(Debug, Clone)]
pub struct GeminiConnector {
    config: GeminiConfig,
}

impl GeminiConnector {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }
}

impl InferenceConnector for GeminiConnector {
    fn connect(&self, role: InferenceRole) -> Result<Arc<dyn InferenceAdapter>, TnaError> {
        let provider = GeminiProvider::from_config(&self.config)?;
        debug!(%role, base_url = %self.config.base_url, "gemini client connected");
        Ok(Arc::new(provider))
    }
}

/// Resolves the primary model's client at startup.
///
/// A missing credential here is fatal for the process.
pub fn connect_primary(config: &GeminiConfig) -> Result<GeminiProvider, TnaError> {
    let provider = GeminiProvider::from_config(config)?;
    info!(model = %config.model, "gemini primary model ready");
    Ok(provider)
}

/// Resolves the API key from config or environment.
pub fn resolve_api_key(config: &GeminiConfig) -> Result<String, TnaError> {
    if let Some(key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        return Ok(key.to_string());
    }

    match std::env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(TnaError::Config(format!(
            "Gemini API key not found. Set gemini.api_key in config or the {} environment variable.",
            config.api_key_env
        ))),
    }
}
