// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vision inspector: capture a photo, then describe it with a nested
//! inference call.
//!
//! The steps run strictly in order and stop at the first failure, each with
//! its own message. The nested call always goes through a brand new client
//! from the [`InferenceConnector`]; nothing is shared with the outer loop.
//! The capture file is removed on every exit path by [`CaptureFile`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tna_config::model::VisionConfig;
use tna_core::types::{ContentPart, InferenceRequest, InferenceRole};
use tna_core::InferenceConnector;
use tracing::{debug, info, warn};

use crate::host::HostRunner;
use crate::tool::{Tool, ToolResult, parse_args};

/// Temporary capture path, deleted when dropped.
#[derive(Debug)]
pub struct CaptureFile {
    path: PathBuf,
}

impl CaptureFile {
    /// Reserves a unique capture path inside `dir`.
    pub fn reserve(dir: impl AsRef<Path>) -> Self {
        let name = format!(
            "capture_{}_{}.jpg",
            chrono::Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4().simple()
        );
        Self {
            path: dir.as_ref().join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CaptureFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %e, "capture cleanup skipped");
        }
    }
}

#[derive(Debug, Deserialize)]
struct VisionArgs {
    #[serde(default)]
    prompt: String,
}

/// Takes a photo and describes it with a vision-capable model.
pub struct VisionTool {
    camera_program: String,
    model: String,
    config: VisionConfig,
    runner: HostRunner,
    connector: Arc<dyn InferenceConnector>,
}

impl VisionTool {
    pub fn new(
        camera_program: impl Into<String>,
        model: impl Into<String>,
        config: VisionConfig,
        runner: HostRunner,
        connector: Arc<dyn InferenceConnector>,
    ) -> Self {
        Self {
            camera_program: camera_program.into(),
            model: model.into(),
            config,
            runner,
            connector,
        }
    }

    async fn inspect(&self, prompt: &str) -> String {
        let capture = CaptureFile::reserve(&self.config.capture_dir);
        let target = capture.path().to_string_lossy().into_owned();

        let argv = ["-c", self.config.camera_id.as_str(), target.as_str()];
        if let Err(e) = self.runner.run(&self.camera_program, &argv).await {
            warn!(error = %e, "photo capture failed");
            return format!("Failed to capture photo: {e}. Output: {}", e.output());
        }

        let image = match tokio::fs::read(capture.path()).await {
            Ok(bytes) => bytes,
            Err(e) => return format!("Failed to read captured image file: {e}"),
        };
        debug!(bytes = image.len(), "photo captured");

        let client = match self.connector.connect(InferenceRole::Nested) {
            Ok(client) => client,
            Err(e) => return format!("Failed to connect to AI for vision analysis: {e}"),
        };

        let request = InferenceRequest {
            model: self.model.clone(),
            parts: vec![
                ContentPart::text(prompt),
                ContentPart::inline_data(&self.config.mime_type, image),
            ],
        };
        let response = match client.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(provider = client.name(), error = %e, "vision analysis failed");
                return format!("AI vision analysis failed: {e}");
            }
        };

        match response.first_text() {
            Some(text) => text.to_string(),
            None => "Image captured, but no description generated.".to_string(),
        }
    }
}

#[async_trait]
impl Tool for VisionTool {
    fn name(&self) -> &str {
        "inspect_surroundings"
    }

    fn description(&self) -> &str {
        "Take a photo with the camera and analyze it using AI vision. Use this to 'see' things."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "What to look for or ask about the scene"
                }
            }
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "What the camera saw, or why it could not be described"
                }
            },
            "required": ["description"]
        })
    }

    async fn invoke(&self, arguments: serde_json::Value) -> ToolResult {
        let args: VisionArgs = match parse_args(self.name(), arguments) {
            Ok(args) => args,
            Err(e) => return e.into(),
        };
        let prompt = if args.prompt.trim().is_empty() {
            self.config.default_prompt.as_str()
        } else {
            args.prompt.as_str()
        };
        info!(model = %self.model, "inspecting surroundings");

        let description = self.inspect(prompt).await;
        ToolResult::succeeded(serde_json::json!({ "description": description }))
    }
}
