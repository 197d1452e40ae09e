// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in shell command execution tool.
//!
//! Runs `<shell> -c <command>` and returns stdout and stderr as one stream
//! in write order. No restrictions on shell access: this is a personal
//! agent on the owner's phone.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::host::HostRunner;
use crate::tool::{Tool, ToolResult, parse_args};

#[derive(Debug, Deserialize)]
struct ShellArgs {
    command: String,
}

/// Executes shell commands on the Termux system.
pub struct ShellTool {
    shell: String,
    runner: HostRunner,
}

impl ShellTool {
    pub fn new(shell: impl Into<String>, runner: HostRunner) -> Self {
        Self {
            shell: shell.into(),
            runner,
        }
    }
}

#[async_trait]
impl Tool for ShellTool {
    fn name(&self) -> &str {
        "execute_shell"
    }

    fn description(&self) -> &str {
        "Execute a shell command on the Termux system."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                }
            },
            "required": ["command"]
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "result": {
                    "type": "string",
                    "description": "Combined stdout and stderr, followed by any error"
                }
            },
            "required": ["result"]
        })
    }

    async fn invoke(&self, arguments: serde_json::Value) -> ToolResult {
        let args: ShellArgs = match parse_args(self.name(), arguments) {
            Ok(args) => args,
            Err(e) => return e.into(),
        };
        info!(command = %args.command, "executing shell command");

        let result = match self.runner.run(&self.shell, &["-c", args.command.as_str()]).await {
            Ok(output) => output.combined().to_string(),
            Err(e) => format!("{}\nError: {e}", e.output()),
        };

        ToolResult::succeeded(serde_json::json!({ "result": result }))
    }
}
