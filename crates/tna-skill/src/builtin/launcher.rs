// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! App launcher tool driven by a static deep-link table.
//!
//! Adding an app means adding a row to [`DEEP_LINKS`]; the tool itself has no
//! per-app logic.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::host::HostRunner;
use crate::tool::{Tool, ToolResult, parse_args};

/// How an app is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchRecipe {
    /// Open `prefix` + query with the URL opener.
    OpenUrl {
        prefix: &'static str,
        encode_query: bool,
    },
    /// Start an Android activity with the given intent action. The query is
    /// ignored.
    Intent { action: &'static str },
}

/// Supported apps, matched case-insensitively.
pub const DEEP_LINKS: &[(&str, LaunchRecipe)] = &[
    (
        "spotify",
        LaunchRecipe::OpenUrl {
            prefix: "spotify:search:",
            encode_query: false,
        },
    ),
    (
        "maps",
        LaunchRecipe::OpenUrl {
            prefix: "geo:0,0?q=",
            encode_query: true,
        },
    ),
    (
        "youtube",
        LaunchRecipe::OpenUrl {
            prefix: "https://www.youtube.com/results?search_query=",
            encode_query: true,
        },
    ),
    (
        "browser",
        LaunchRecipe::OpenUrl {
            prefix: "",
            encode_query: false,
        },
    ),
    (
        "camera",
        LaunchRecipe::Intent {
            action: "android.media.action.IMAGE_CAPTURE",
        },
    ),
];

/// Finds the recipe for `app_name`.
pub fn lookup(app_name: &str) -> Option<LaunchRecipe> {
    let wanted = app_name.trim();
    DEEP_LINKS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
        .map(|(_, recipe)| *recipe)
}

#[derive(Debug, Deserialize)]
struct LaunchArgs {
    app_name: String,
    #[serde(default)]
    query: String,
}

/// Opens Android apps through deep links or intents.
pub struct LaunchAppTool {
    open_url: String,
    activity_manager: String,
    runner: HostRunner,
}

impl LaunchAppTool {
    pub fn new(
        open_url: impl Into<String>,
        activity_manager: impl Into<String>,
        runner: HostRunner,
    ) -> Self {
        Self {
            open_url: open_url.into(),
            activity_manager: activity_manager.into(),
            runner,
        }
    }

    fn command(&self, recipe: LaunchRecipe, query: &str) -> (&str, Vec<String>) {
        match recipe {
            LaunchRecipe::OpenUrl {
                prefix,
                encode_query,
            } => {
                let query = if encode_query {
                    urlencoding::encode(query)
                } else {
                    query.into()
                };
                (self.open_url.as_str(), vec![format!("{prefix}{query}")])
            }
            LaunchRecipe::Intent { action } => (
                self.activity_manager.as_str(),
                vec!["start".into(), "-a".into(), action.into()],
            ),
        }
    }
}

#[async_trait]
impl Tool for LaunchAppTool {
    fn name(&self) -> &str {
        "launch_app"
    }

    fn description(&self) -> &str {
        "Launch an Android app or deep link. Apps: spotify, maps, youtube, browser, camera."
    }

    fn input_schema(&self) -> serde_json::Value {
        let apps: Vec<&str> = DEEP_LINKS.iter().map(|(name, _)| *name).collect();
        serde_json::json!({
            "type": "object",
            "properties": {
                "app_name": {
                    "type": "string",
                    "description": format!("App to open. One of: {}", apps.join(", "))
                },
                "query": {
                    "type": "string",
                    "description": "Search terms, place, or URL (for browser)"
                }
            },
            "required": ["app_name"]
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "status": { "type": "string", "description": "Outcome of the launch" }
            },
            "required": ["status"]
        })
    }

    async fn invoke(&self, arguments: serde_json::Value) -> ToolResult {
        let args: LaunchArgs = match parse_args(self.name(), arguments) {
            Ok(args) => args,
            Err(e) => return e.into(),
        };
        info!(app = %args.app_name, query = %args.query, "launching app");

        let Some(recipe) = lookup(&args.app_name) else {
            return ToolResult::succeeded(serde_json::json!({
                "status": format!("App not supported for deep linking yet: {}", args.app_name)
            }));
        };

        let (program, argv) = self.command(recipe, &args.query);
        let status = match self.runner.run(program, &argv).await {
            Ok(_) => format!("Launched {}", args.app_name),
            Err(e) => {
                warn!(app = %args.app_name, error = %e, "launch failed");
                format!("Failed to launch {}: {e}", args.app_name)
            }
        };
        ToolResult::succeeded(serde_json::json!({ "status": status }))
    }
}
