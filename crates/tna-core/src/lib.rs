// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the TNA agent.
//!
//! Provides the shared error type, the provider-neutral types that cross the
//! inference boundary, and the adapter traits implemented by provider crates.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TnaError;
pub use traits::{InferenceAdapter, InferenceConnector};
pub use types::{Candidate, ContentPart, InferenceRequest, InferenceResponse, InferenceRole};
