// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./tna.toml` > `~/.config/tna/tna.toml` > `/etc/tna/tna.toml`,
//! with environment variable overrides via the `TNA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TnaConfig;

/// Local config file name, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tna.toml";

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/tna/tna.toml";

/// Sections whose env vars are mapped from `TNA_<SECTION>_<KEY>`.
const SECTIONS: &[&str] = &["agent", "gemini", "memory", "host", "vision"];

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tna/tna.toml`
/// 3. `~/.config/tna/tna.toml`
/// 4. `./tna.toml`
/// 5. `TNA_*` environment variables
pub fn load_config() -> Result<TnaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TnaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TnaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TnaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TnaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TnaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/tna/tna.toml`, when a config dir exists on this platform.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("tna").join("tna.toml"))
}

/// Environment provider mapping `TNA_HOST_SMS_SEND` to `host.sms_send`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// keys that themselves contain underscores stay intact.
fn env_provider() -> Env {
    Env::prefixed("TNA_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("host_sms_send"), "host.sms_send");
        assert_eq!(map_env_key("gemini_api_key_env"), "gemini.api_key_env");
        assert_eq!(map_env_key("vision_capture_dir"), "vision.capture_dir");
        assert_eq!(map_env_key("unknown_key"), "unknown_key");
    }

    #[test]
    fn string_overrides_defaults() {
        let config = load_config_from_str("[memory]\npath = \"/tmp/facts.json\"\n").unwrap();
        assert_eq!(config.memory.path, "/tmp/facts.json");
        assert_eq!(config.host.shell, "sh");
    }
}
