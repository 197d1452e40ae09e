// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Long-term memory tools over a shared [`MemoryStore`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tna_memory::MemoryStore;
use tracing::info;

use crate::tool::{Tool, ToolResult, parse_args};

/// Reply when a key has no stored value.
pub const NOT_FOUND: &str = "Not found.";

#[derive(Debug, Deserialize)]
struct RememberArgs {
    key: String,
    value: String,
}

/// Saves a fact under a key.
pub struct RememberFactTool {
    store: Arc<MemoryStore>,
}

impl RememberFactTool {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for RememberFactTool {
    fn name(&self) -> &str {
        "remember_fact"
    }

    fn description(&self) -> &str {
        "Save a fact to long-term memory."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "key": { "type": "string", "description": "Short name for the fact" },
                "value": { "type": "string", "description": "The fact to remember" }
            },
            "required": ["key", "value"]
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "status": { "type": "string" }
            },
            "required": ["status"]
        })
    }

    async fn invoke(&self, arguments: serde_json::Value) -> ToolResult {
        let args: RememberArgs = match parse_args(self.name(), arguments) {
            Ok(args) => args,
            Err(e) => return e.into(),
        };
        info!(key = %args.key, "remembering fact");

        let status = match self.store.save(&args.key, &args.value).await {
            Ok(()) => "Saved to memory.".to_string(),
            Err(e) => format!("Failed to save to memory: {e}"),
        };
        ToolResult::succeeded(serde_json::json!({ "status": status }))
    }
}

#[derive(Debug, Deserialize)]
struct RecallArgs {
    key: String,
}

/// Looks up a previously saved fact.
pub struct RecallFactTool {
    store: Arc<MemoryStore>,
}

impl RecallFactTool {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for RecallFactTool {
    fn name(&self) -> &str {
        "recall_fact"
    }

    fn description(&self) -> &str {
        "Recall a fact from long-term memory."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "key": { "type": "string", "description": "Name the fact was saved under" }
            },
            "required": ["key"]
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "value": { "type": "string", "description": "The stored fact, or \"Not found.\"" }
            },
            "required": ["value"]
        })
    }

    async fn invoke(&self, arguments: serde_json::Value) -> ToolResult {
        let args: RecallArgs = match parse_args(self.name(), arguments) {
            Ok(args) => args,
            Err(e) => return e.into(),
        };

        let value = match self.store.read(&args.key).await {
            Ok(Some(value)) => value,
            Ok(None) => NOT_FOUND.to_string(),
            Err(e) => format!("Failed to read memory: {e}"),
        };
        ToolResult::succeeded(serde_json::json!({ "value": value }))
    }
}
