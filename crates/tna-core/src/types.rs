// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Types shared across the inference boundary.
//!
//! These are provider-neutral: an adapter crate converts them to and from
//! its own wire format.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One ordered piece of request or response content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text.
    Text { text: String },
    /// Inline binary data such as a captured JPEG.
    InlineData { mime_type: String, data: Vec<u8> },
}

impl ContentPart {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// Creates an inline binary part.
    pub fn inline_data(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        ContentPart::InlineData {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Returns the text of a non-empty text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }
}

/// A single-turn request to the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    /// Model identifier, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// Ordered content parts of the user turn.
    pub parts: Vec<ContentPart>,
}

/// One candidate answer returned by the inference service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub parts: Vec<ContentPart>,
    pub finish_reason: Option<String>,
}

/// The full response to an [`InferenceRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceResponse {
    pub candidates: Vec<Candidate>,
}

impl InferenceResponse {
    /// Builds a response with a single text candidate.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                parts: vec![ContentPart::text(text)],
                finish_reason: Some("STOP".to_string()),
            }],
        }
    }

    /// Returns the first non-empty text part of the first candidate.
    ///
    /// Later candidates are never consulted.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.parts.iter().find_map(ContentPart::as_text))
    }
}

/// Which side of the agent a given inference client serves.
///
/// Only used for logging and diagnostics; both roles talk to the same kind
/// of service through fully independent clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InferenceRole {
    /// The outer conversation loop's model.
    Primary,
    /// A nested call made from inside a tool handler.
    Nested,
}
