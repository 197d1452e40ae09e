// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the TNA agent.

use thiserror::Error;

/// The primary error type used across all TNA crates.
///
/// Tool handlers never surface this type to the dispatch boundary; they
/// convert it into descriptive text inside a normal tool result. It is
/// returned by the building blocks underneath them (memory store, inference
/// client, registry construction) and by startup code.
#[derive(Debug, Error)]
pub enum TnaError {
    /// Configuration errors (invalid TOML, missing credential, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Memory file errors (unreadable directory, failed write or rename).
    #[error("storage error: {message}")]
    Storage {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Inference service errors (HTTP failure, API error, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A tool with the same name is already bound in the registry.
    #[error("duplicate tool name `{0}`")]
    DuplicateTool(String),

    /// Tool arguments did not match the declared input schema.
    #[error("invalid arguments for `{tool}`: {message}")]
    InvalidArguments { tool: String, message: String },
}

impl TnaError {
    /// Builds a [`TnaError::Storage`] from an I/O error with context.
    pub fn storage(message: impl Into<String>, source: std::io::Error) -> Self {
        TnaError::Storage {
            message: format!("{}: {source}", message.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Builds a [`TnaError::Provider`] without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        TnaError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
