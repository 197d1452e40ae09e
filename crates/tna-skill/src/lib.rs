// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait, dispatch registry, and built-in tools for the TNA agent.
//!
//! This crate provides the [`Tool`] trait every capability implements and the
//! [`ToolRegistry`] that routes structured calls from the model to handlers.
//!
//! Built-in tools include:
//! - [`builtin::ShellTool`] -- Execute shell commands
//! - [`builtin::CallTool`] and [`builtin::SmsTool`] -- Phone calls and SMS
//! - [`builtin::LaunchAppTool`] -- Open apps through deep links
//! - [`builtin::VisionTool`] -- Photograph and describe the surroundings
//! - [`builtin::RememberFactTool`] and [`builtin::RecallFactTool`] -- Fact memory

pub mod builtin;
pub mod host;
pub mod tool;

pub use host::{HostError, HostOutput, HostRunner};
pub use tool::{
    Tool, ToolDescriptor, ToolInvocation, ToolRegistry, ToolResult, ToolStatus, parse_args,
};
