// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::TnaConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem instead of failing on the first one.
pub fn validate_config(config: &TnaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.to_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` must be one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.memory.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "memory.path must not be empty".to_string(),
        });
    }

    for (key, program) in config.host.programs() {
        if program.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("host.{key} must not be empty"),
            });
        }
    }

    if config.gemini.api_key_env.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.api_key_env must not be empty".to_string(),
        });
    }

    for (key, model) in [
        ("model", &config.gemini.model),
        ("vision_model", &config.gemini.vision_model),
    ] {
        if model.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("gemini.{key} must not be empty"),
            });
        }
    }

    if !config.gemini.base_url.starts_with("http://")
        && !config.gemini.base_url.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.base_url `{}` must start with http:// or https://",
                config.gemini.base_url
            ),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.vision.capture_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "vision.capture_dir must not be empty".to_string(),
        });
    }

    if !config.vision.mime_type.starts_with("image/") {
        errors.push(ConfigError::Validation {
            message: format!(
                "vision.mime_type `{}` must be an image type",
                config.vision.mime_type
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
