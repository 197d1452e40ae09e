// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the TNA agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level TNA configuration.
///
/// Every section is optional and falls back to defaults suited to a stock
/// Termux install with the Termux:API add-on.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TnaConfig {
    /// Agent identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Gemini inference service settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Long-term fact memory.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Host automation utilities the tools shell out to.
    #[serde(default)]
    pub host: HostConfig,

    /// Camera capture and image description.
    #[serde(default)]
    pub vision: VisionConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "termux_agent".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` means read the variable named by `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model used by the outer conversation loop.
    #[serde(default = "default_model")]
    pub model: String,

    /// Vision-capable model used by `inspect_surroundings`.
    #[serde(default = "default_model")]
    pub vision_model: String,

    /// API base URL (without the `/v1beta` suffix).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            vision_model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// HTTP request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

/// Memory store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Path of the JSON file holding all remembered facts.
    #[serde(default = "default_memory_path")]
    pub path: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            path: default_memory_path(),
        }
    }
}

fn default_memory_path() -> String {
    "agent_memory.json".to_string()
}

/// Host utility configuration.
///
/// Program names are resolved through `PATH` unless given as absolute paths.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Shell used by `execute_shell` (invoked as `<shell> -c <command>`).
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Voice call utility.
    #[serde(default = "default_telephony_call")]
    pub telephony_call: String,

    /// SMS utility.
    #[serde(default = "default_sms_send")]
    pub sms_send: String,

    /// URL / intent opener used for deep links.
    #[serde(default = "default_open_url")]
    pub open_url: String,

    /// Android activity manager, used for intents that are not URLs.
    #[serde(default = "default_activity_manager")]
    pub activity_manager: String,

    /// Camera capture utility.
    #[serde(default = "default_camera_photo")]
    pub camera_photo: String,

    /// Upper bound on any host process run by a tool. `0` disables the bound.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            telephony_call: default_telephony_call(),
            sms_send: default_sms_send(),
            open_url: default_open_url(),
            activity_manager: default_activity_manager(),
            camera_photo: default_camera_photo(),
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}

impl HostConfig {
    /// The configured process bound, or `None` when disabled.
    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_timeout_secs > 0).then(|| Duration::from_secs(self.command_timeout_secs))
    }

    /// `(key, program)` pairs for every configured utility.
    pub fn programs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("shell", self.shell.as_str()),
            ("telephony_call", self.telephony_call.as_str()),
            ("sms_send", self.sms_send.as_str()),
            ("open_url", self.open_url.as_str()),
            ("activity_manager", self.activity_manager.as_str()),
            ("camera_photo", self.camera_photo.as_str()),
        ]
    }
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_telephony_call() -> String {
    "termux-telephony-call".to_string()
}

fn default_sms_send() -> String {
    "termux-sms-send".to_string()
}

fn default_open_url() -> String {
    "termux-open-url".to_string()
}

fn default_activity_manager() -> String {
    "am".to_string()
}

fn default_camera_photo() -> String {
    "termux-camera-photo".to_string()
}

fn default_command_timeout_secs() -> u64 {
    120
}

/// Vision inspector configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VisionConfig {
    /// Directory where temporary captures are written.
    #[serde(default = "default_capture_dir")]
    pub capture_dir: String,

    /// Camera id passed to the capture utility (`-c`).
    #[serde(default = "default_camera_id")]
    pub camera_id: String,

    /// MIME type of captured images.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Instruction used when the model passes an empty prompt.
    #[serde(default = "default_prompt")]
    pub default_prompt: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            capture_dir: default_capture_dir(),
            camera_id: default_camera_id(),
            mime_type: default_mime_type(),
            default_prompt: default_prompt(),
        }
    }
}

fn default_capture_dir() -> String {
    ".".to_string()
}

fn default_camera_id() -> String {
    "0".to_string()
}

fn default_mime_type() -> String {
    "image/jpeg".to_string()
}

fn default_prompt() -> String {
    "Describe what you see in this image in detail.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_termux_api() {
        let config = TnaConfig::default();
        assert_eq!(config.host.sms_send, "termux-sms-send");
        assert_eq!(config.host.camera_photo, "termux-camera-photo");
        assert_eq!(config.gemini.vision_model, "gemini-2.0-flash");
        assert_eq!(config.memory.path, "agent_memory.json");
    }

    #[test]
    fn zero_timeout_disables_bound() {
        let mut host = HostConfig::default();
        assert_eq!(host.command_timeout(), Some(Duration::from_secs(120)));
        host.command_timeout_secs = 0;
        assert_eq!(host.command_timeout(), None);
    }

    #[test]
    fn unknown_vision_key_is_rejected() {
        let result = toml::from_str::<TnaConfig>("[vision]\ncamera = \"1\"\n");
        assert!(result.is_err());
    }
}
