// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tna doctor` command implementation.
//!
//! Checks that the configured host utilities can be found, that an API key
//! is available, and that the memory and capture locations are usable.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tna_config::TnaConfig;
use tna_memory::MemoryStore;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
        }
    }
}

/// Runs every check and prints a report. Returns the number of failures.
pub async fn run_doctor(config: &TnaConfig, plain: bool) -> usize {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = collect_checks(config).await;

    println!();
    println!("  tna doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;
    for result in &results {
        match result.status {
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
            CheckStatus::Pass => {}
        }
        println!("{}", render_line(result, use_color));
    }

    println!();
    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    fail_count
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message}", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<20} {}", result.name, result.message)
    }
}

/// Runs every check without printing.
pub async fn collect_checks(config: &TnaConfig) -> Vec<CheckResult> {
    let mut results = vec![check_credential(config)];
    for (key, program) in config.host.programs() {
        results.push(check_program(key, program));
    }
    results.push(check_memory(&config.memory.path).await);
    results.push(check_capture_dir(&config.vision.capture_dir));
    results
}

fn check_credential(config: &TnaConfig) -> CheckResult {
    match tna_gemini::resolve_api_key(&config.gemini) {
        Ok(_) => CheckResult::new("api key", CheckStatus::Pass, "present"),
        Err(_) => CheckResult::new(
            "api key",
            CheckStatus::Fail,
            format!("set {} or gemini.api_key", config.gemini.api_key_env),
        ),
    }
}

fn check_program(key: &str, program: &str) -> CheckResult {
    match find_program(program) {
        Some(path) => CheckResult::new(key, CheckStatus::Pass, path.display().to_string()),
        None => CheckResult::new(key, CheckStatus::Warn, format!("`{program}` not found")),
    }
}

async fn check_memory(path: &str) -> CheckResult {
    let store = MemoryStore::new(path);
    match store.entries().await {
        Ok(entries) => CheckResult::new(
            "memory",
            CheckStatus::Pass,
            format!("{} fact(s) in {path}", entries.len()),
        ),
        Err(e) => CheckResult::new("memory", CheckStatus::Fail, e.to_string()),
    }
}

fn check_capture_dir(dir: &str) -> CheckResult {
    if Path::new(dir).is_dir() {
        CheckResult::new("capture dir", CheckStatus::Pass, dir)
    } else {
        CheckResult::new(
            "capture dir",
            CheckStatus::Fail,
            format!("{dir} is not a directory"),
        )
    }
}

/// Resolves `program` the way a spawn would: paths as given, bare names
/// through `PATH`. Only executable files count.
fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
