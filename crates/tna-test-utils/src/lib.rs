// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for TNA integration tests.
//!
//! Provides mock inference adapters for fast, deterministic tests without
//! network access or API keys.
//!
//! # Components
//!
//! - [`MockInference`] - Inference adapter with pre-configured responses
//! - [`MockConnector`] - Connector that counts connects and can refuse them

pub mod mock_inference;

pub use mock_inference::{MockConnector, MockInference};
