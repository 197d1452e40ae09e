// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait, capability descriptors, and the dispatch registry.
//!
//! Each [`Tool`] advertises a [`ToolDescriptor`] (name, description, input and
//! output JSON Schemas). The [`ToolRegistry`] binds descriptors to handlers
//! once at startup and routes each [`ToolInvocation`] to exactly one handler.
//!
//! Handlers never fail at the Rust level. Operational problems are reported
//! inside a [`ToolStatus::Succeeded`] payload so the model can react to them;
//! [`ToolStatus::FailedSoftly`] only marks calls a handler could not begin on.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tna_core::TnaError;
use tracing::{debug, info};

/// Public description of a tool, advertised to the inference service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
    pub output_schema: serde_json::Value,
}

impl ToolDescriptor {
    /// Renders the descriptor as a Gemini function declaration.
    pub fn function_declaration(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.input_schema,
        })
    }
}

/// One structured call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub tool: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl ToolInvocation {
    pub fn new(tool: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            tool: tool.into(),
            arguments,
        }
    }
}

/// Outcome class of a [`ToolResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    /// The handler ran. The payload may still describe an operational failure.
    Succeeded,
    /// The call never reached a handler, or its arguments were unusable.
    FailedSoftly,
}

/// Structured result returned to the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub status: ToolStatus,
    pub payload: serde_json::Value,
}

impl ToolResult {
    pub fn succeeded(payload: serde_json::Value) -> Self {
        Self {
            status: ToolStatus::Succeeded,
            payload,
        }
    }

    pub fn failed_softly(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::FailedSoftly,
            payload: serde_json::json!({ "error": message.into() }),
        }
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == ToolStatus::Succeeded
    }
}

impl From<TnaError> for ToolResult {
    fn from(err: TnaError) -> Self {
        ToolResult::failed_softly(err.to_string())
    }
}

/// Deserializes tool arguments into a typed input struct.
///
/// A mismatch is reported as [`TnaError::InvalidArguments`].
pub fn parse_args<T: DeserializeOwned>(
    tool: &str,
    arguments: serde_json::Value,
) -> Result<T, TnaError> {
    serde_json::from_value(arguments).map_err(|e| TnaError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Unified trait for all tools.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used for dispatch.
    fn name(&self) -> &str;

    /// What the tool does, phrased for the model.
    fn description(&self) -> &str;

    /// JSON Schema of the accepted arguments.
    fn input_schema(&self) -> serde_json::Value;

    /// JSON Schema of the returned payload.
    fn output_schema(&self) -> serde_json::Value;

    /// Runs the tool. Never panics on bad input; see [`parse_args`].
    async fn invoke(&self, arguments: serde_json::Value) -> ToolResult;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
            output_schema: self.output_schema(),
        }
    }
}

struct Binding {
    descriptor: ToolDescriptor,
    tool: Arc<dyn Tool>,
}

/// Name-indexed registry of tools.
///
/// Built once at startup, then shared read-only behind an `Arc` and
/// dispatched from any number of tasks.
pub struct ToolRegistry {
    tools: HashMap<String, Binding>,
}

impl ToolRegistry {
    /// Creates an empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Binds a tool under its descriptor name.
    ///
    /// Fails with [`TnaError::DuplicateTool`] if the name is taken.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), TnaError> {
        let descriptor = tool.descriptor();
        if self.tools.contains_key(&descriptor.name) {
            return Err(TnaError::DuplicateTool(descriptor.name));
        }
        debug!(tool = %descriptor.name, "tool registered");
        self.tools
            .insert(descriptor.name.clone(), Binding { descriptor, tool });
        Ok(())
    }

    /// Looks up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(|b| Arc::clone(&b.tool))
    }

    /// Routes an invocation to its handler and returns the handler's result.
    ///
    /// Unknown names produce a [`ToolStatus::FailedSoftly`] result.
    pub async fn dispatch(&self, invocation: ToolInvocation) -> ToolResult {
        let ToolInvocation { tool, arguments } = invocation;
        let Some(binding) = self.tools.get(&tool) else {
            info!(tool = %tool, "dispatch to unknown tool");
            return ToolResult::failed_softly(format!("unknown tool `{tool}`"));
        };

        info!(tool = %tool, "dispatching tool call");
        let result = binding.tool.invoke(arguments).await;
        debug!(tool = %tool, status = %result.status, "tool call finished");
        result
    }

    /// Registered descriptors, sorted by name.
    pub fn descriptors(&self) -> Vec<&ToolDescriptor> {
        let mut descriptors: Vec<&ToolDescriptor> =
            self.tools.values().map(|b| &b.descriptor).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Gemini function declarations for every tool, sorted by name.
    pub fn function_declarations(&self) -> Vec<serde_json::Value> {
        self.descriptors()
            .into_iter()
            .map(ToolDescriptor::function_declaration)
            .collect()
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct EchoArgs {
        message: String,
    }

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes the input back"
        }

        fn input_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "message": { "type": "string", "description": "Message to echo" }
                },
                "required": ["message"]
            })
        }

        fn output_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": { "echo": { "type": "string" } },
                "required": ["echo"]
            })
        }

        async fn invoke(&self, arguments: serde_json::Value) -> ToolResult {
            match parse_args::<EchoArgs>(self.name(), arguments) {
                Ok(args) => ToolResult::succeeded(serde_json::json!({ "echo": args.message })),
                Err(e) => e.into(),
            }
        }
    }

    struct NoopTool(&'static str);

    #[async_trait]
    impl Tool for NoopTool {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "Does nothing"
        }

        fn input_schema(&self) -> serde_json::Value {
            serde_json::json!({ "type": "object", "properties": {} })
        }

        fn output_schema(&self) -> serde_json::Value {
            serde_json::json!({ "type": "object", "properties": {} })
        }

        async fn invoke(&self, _arguments: serde_json::Value) -> ToolResult {
            ToolResult::succeeded(serde_json::json!({}))
        }
    }

    #[test]
    fn register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let tool = registry.get("echo");
        assert!(tool.is_some());
        assert_eq!(tool.unwrap().name(), "echo");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();
        let err = registry.register(Arc::new(EchoTool)).unwrap_err();
        assert!(matches!(err, TnaError::DuplicateTool(ref name) if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn descriptors_are_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NoopTool("zeta"))).unwrap();
        registry.register(Arc::new(EchoTool)).unwrap();
        registry.register(Arc::new(NoopTool("alpha"))).unwrap();

        let names: Vec<&str> = registry
            .descriptors()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, ["alpha", "echo", "zeta"]);
    }

    #[test]
    fn function_declarations_use_gemini_shape() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let decls = registry.function_declarations();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0]["name"], "echo");
        assert_eq!(decls[0]["description"], "Echoes the input back");
        assert!(decls[0]["parameters"]["properties"]["message"].is_object());
        assert!(decls[0].get("output_schema").is_none());
    }

    #[test]
    fn len_and_is_empty() {
        let mut registry = ToolRegistry::default();
        assert!(registry.is_empty());
        registry.register(Arc::new(EchoTool)).unwrap();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn dispatch_returns_handler_result() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let result = registry
            .dispatch(ToolInvocation::new("echo", serde_json::json!({"message": "hi"})))
            .await;
        assert_eq!(result, ToolResult::succeeded(serde_json::json!({"echo": "hi"})));
    }

    #[tokio::test]
    async fn unknown_tool_fails_softly() {
        let registry = ToolRegistry::new();
        let result = registry
            .dispatch(ToolInvocation::new("teleport", serde_json::json!({})))
            .await;
        assert_eq!(result.status, ToolStatus::FailedSoftly);
        assert_eq!(result.payload, serde_json::json!({"error": "unknown tool `teleport`"}));
    }

    #[tokio::test]
    async fn bad_arguments_fail_softly() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let result = registry
            .dispatch(ToolInvocation::new("echo", serde_json::json!({"message": 42})))
            .await;
        assert_eq!(result.status, ToolStatus::FailedSoftly);
        assert!(result.payload["error"].as_str().unwrap().contains("echo"));
    }

    #[test]
    fn tool_status_serializes_snake_case() {
        let json = serde_json::to_value(ToolResult::failed_softly("x")).unwrap();
        assert_eq!(json["status"], "failed_softly");
        assert_eq!(ToolStatus::Succeeded.to_string(), "succeeded");
    }

    #[test]
    fn invocation_arguments_default_to_null() {
        let invocation: ToolInvocation = serde_json::from_str(r#"{"tool": "echo"}"#).unwrap();
        assert!(invocation.arguments.is_null());
    }
}
