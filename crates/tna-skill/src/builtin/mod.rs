// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in tools for the TNA agent.
//!
//! Every tool is always available; the host utilities they call are taken
//! from the `[host]` config section.

pub mod launcher;
pub mod memory;
pub mod shell;
pub mod telephony;
pub mod vision;

pub use launcher::LaunchAppTool;
pub use memory::{RecallFactTool, RememberFactTool};
pub use shell::ShellTool;
pub use telephony::{CallTool, SmsTool};
pub use vision::VisionTool;

use std::sync::Arc;

use tna_config::TnaConfig;
use tna_core::{InferenceConnector, TnaError};
use tna_memory::MemoryStore;

use crate::host::HostRunner;
use crate::ToolRegistry;

/// Registers all built-in tools into the given registry.
pub fn register_builtins(
    registry: &mut ToolRegistry,
    config: &TnaConfig,
    store: Arc<MemoryStore>,
    connector: Arc<dyn InferenceConnector>,
) -> Result<(), TnaError> {
    let host = &config.host;
    let runner = HostRunner::from_config(host);

    registry.register(Arc::new(ShellTool::new(&host.shell, runner.clone())))?;
    registry.register(Arc::new(CallTool::new(&host.telephony_call, runner.clone())))?;
    registry.register(Arc::new(SmsTool::new(&host.sms_send, runner.clone())))?;
    registry.register(Arc::new(LaunchAppTool::new(
        &host.open_url,
        &host.activity_manager,
        runner.clone(),
    )))?;
    registry.register(Arc::new(VisionTool::new(
        &host.camera_photo,
        &config.gemini.vision_model,
        config.vision.clone(),
        runner,
        connector,
    )))?;
    registry.register(Arc::new(RememberFactTool::new(Arc::clone(&store))))?;
    registry.register(Arc::new(RecallFactTool::new(store)))?;
    Ok(())
}
