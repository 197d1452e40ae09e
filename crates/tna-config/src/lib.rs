// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the TNA agent.
//!
//! TOML configuration with strict key checking, a file hierarchy, `TNA_*`
//! environment overrides, and miette diagnostics for startup failures.
//!
//! # Usage
//!
//! ```no_run
//! use tna_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Memory file: {}", config.memory.path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TnaConfig;

/// Load configuration from the file hierarchy and validate it.
pub fn load_and_validate() -> Result<TnaConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<TnaConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path))
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TnaConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

#[allow(clippy::result_large_err)]
fn finish(loaded: Result<TnaConfig, figment::Error>) -> Result<TnaConfig, Vec<ConfigError>> {
    let config = loaded.map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    Ok(config)
}
