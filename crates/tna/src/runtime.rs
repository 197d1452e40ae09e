// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup wiring shared by the `tools` and `invoke` commands.

use std::sync::Arc;

use tna_config::TnaConfig;
use tna_core::{InferenceConnector, TnaError};
use tna_gemini::GeminiConnector;
use tna_memory::MemoryStore;
use tna_skill::builtin::register_builtins;
use tna_skill::{ToolInvocation, ToolRegistry, ToolResult};
use tracing::info;

/// Builds the dispatch registry with every built-in tool bound.
pub fn build_registry(config: &TnaConfig) -> Result<ToolRegistry, TnaError> {
    let store = Arc::new(MemoryStore::new(&config.memory.path));
    let connector: Arc<dyn InferenceConnector> =
        Arc::new(GeminiConnector::new(config.gemini.clone()));

    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry, config, store, connector)?;
    info!(tools = registry.len(), memory = %config.memory.path, "tool registry ready");
    Ok(registry)
}

/// Parses the `invoke` argument string. Absent means `{}`.
pub fn parse_arguments(tool: &str, raw: Option<&str>) -> Result<serde_json::Value, TnaError> {
    let Some(raw) = raw else {
        return Ok(serde_json::json!({}));
    };
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| TnaError::InvalidArguments {
            tool: tool.to_string(),
            message: format!("arguments are not valid JSON: {e}"),
        })?;
    if !value.is_object() {
        return Err(TnaError::InvalidArguments {
            tool: tool.to_string(),
            message: "arguments must be a JSON object".to_string(),
        });
    }
    Ok(value)
}

/// Runs one invocation through the registry.
pub async fn invoke(
    registry: &ToolRegistry,
    tool: &str,
    arguments: serde_json::Value,
) -> ToolResult {
    registry
        .dispatch(ToolInvocation::new(tool, arguments))
        .await
}
