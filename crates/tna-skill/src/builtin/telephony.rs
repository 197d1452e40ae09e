// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Voice call and SMS tools backed by the Termux:API utilities.
//!
//! Phone numbers are passed through unvalidated.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::host::HostRunner;
use crate::tool::{Tool, ToolResult, parse_args};

fn status_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "status": { "type": "string", "description": "Outcome of the request" }
        },
        "required": ["status"]
    })
}

#[derive(Debug, Deserialize)]
struct CallArgs {
    phone_number: String,
}

/// Initiates a GSM voice call.
pub struct CallTool {
    program: String,
    runner: HostRunner,
}

impl CallTool {
    pub fn new(program: impl Into<String>, runner: HostRunner) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }
}

#[async_trait]
impl Tool for CallTool {
    fn name(&self) -> &str {
        "make_call"
    }

    fn description(&self) -> &str {
        "Initiate a GSM phone call."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "phone_number": {
                    "type": "string",
                    "description": "Number to dial"
                }
            },
            "required": ["phone_number"]
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        status_schema()
    }

    async fn invoke(&self, arguments: serde_json::Value) -> ToolResult {
        let args: CallArgs = match parse_args(self.name(), arguments) {
            Ok(args) => args,
            Err(e) => return e.into(),
        };
        info!(phone_number = %args.phone_number, "placing call");

        let status = match self.runner.run(&self.program, &[&args.phone_number]).await {
            Ok(_) => format!("Call initiated to {}", args.phone_number),
            Err(e) => {
                warn!(error = %e, "call failed");
                format!("Failed to call: {e}")
            }
        };
        ToolResult::succeeded(serde_json::json!({ "status": status }))
    }
}

#[derive(Debug, Deserialize)]
struct SmsArgs {
    phone_number: String,
    message: String,
}

/// Sends an SMS text message.
pub struct SmsTool {
    program: String,
    runner: HostRunner,
}

impl SmsTool {
    pub fn new(program: impl Into<String>, runner: HostRunner) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }
}

#[async_trait]
impl Tool for SmsTool {
    fn name(&self) -> &str {
        "send_sms"
    }

    fn description(&self) -> &str {
        "Send an SMS text message."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "phone_number": {
                    "type": "string",
                    "description": "Recipient number"
                },
                "message": {
                    "type": "string",
                    "description": "Text to send"
                }
            },
            "required": ["phone_number", "message"]
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        status_schema()
    }

    async fn invoke(&self, arguments: serde_json::Value) -> ToolResult {
        let args: SmsArgs = match parse_args(self.name(), arguments) {
            Ok(args) => args,
            Err(e) => return e.into(),
        };
        info!(phone_number = %args.phone_number, chars = args.message.chars().count(), "sending sms");

        let argv = ["-n", args.phone_number.as_str(), args.message.as_str()];
        let status = match self.runner.run(&self.program, &argv).await {
            Ok(_) => format!("SMS sent to {}", args.phone_number),
            Err(e) => {
                warn!(error = %e, "sms failed");
                format!("Failed to send SMS: {e}")
            }
        };
        ToolResult::succeeded(serde_json::json!({ "status": status }))
    }
}
