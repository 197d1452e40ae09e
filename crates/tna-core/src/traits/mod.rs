// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the inference boundary.

pub mod inference;

pub use inference::{InferenceAdapter, InferenceConnector};
