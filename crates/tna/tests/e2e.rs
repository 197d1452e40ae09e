// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the compiled `tna` binary.
//!
//! Each test writes an isolated config into a temp directory and points the
//! binary at it with `--config`. No network access is needed.

use std::path::Path;
use std::process::{Command, Output};

const UNSET_KEY_ENV: &str = "TNA_E2E_KEY_THAT_IS_NEVER_SET";

fn write_config(dir: &Path, extra: &str) -> std::path::PathBuf {
    let path = dir.join("tna.toml");
    let memory = dir.join("agent_memory.json");
    let toml = format!(
        r#"
[gemini]
api_key = "test-key"
api_key_env = "{UNSET_KEY_ENV}"

[memory]
path = "{}"

[vision]
capture_dir = "{}"
{extra}
"#,
        memory.display(),
        dir.display()
    );
    std::fs::write(&path, toml).unwrap();
    path
}

fn tna(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tna"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("tna binary should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

// ---- Tool listing ----

#[test]
fn tools_lists_seven_function_declarations() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");

    let output = tna(&config, &["tools"]);
    assert!(output.status.success());

    let decls = stdout_json(&output);
    let names: Vec<&str> = decls
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "execute_shell",
            "inspect_surroundings",
            "launch_app",
            "make_call",
            "recall_fact",
            "remember_fact",
            "send_sms",
        ]
    );
    assert!(decls[0]["parameters"]["properties"]["command"].is_object());
}

// ---- Invocation ----

#[test]
fn invoke_shell_echo() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");

    let output = tna(&config, &["invoke", "execute_shell", r#"{"command":"echo hi"}"#]);
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({"status": "succeeded", "payload": {"result": "hi\n"}})
    );
}

#[test]
fn memory_persists_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");

    let saved = tna(
        &config,
        &["invoke", "remember_fact", r#"{"key":"car","value":"row F"}"#],
    );
    assert_eq!(stdout_json(&saved)["payload"]["status"], "Saved to memory.");

    let recalled = tna(&config, &["invoke", "recall_fact", r#"{"key":"car"}"#]);
    assert_eq!(stdout_json(&recalled)["payload"]["value"], "row F");

    let missing = tna(&config, &["invoke", "recall_fact", r#"{"key":"boat"}"#]);
    assert_eq!(stdout_json(&missing)["payload"]["value"], "Not found.");
}

#[test]
fn unknown_tool_fails_softly() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");

    let output = tna(&config, &["invoke", "teleport"]);
    assert_eq!(output.status.code(), Some(2));
    let json = stdout_json(&output);
    assert_eq!(json["status"], "failed_softly");
    assert_eq!(json["payload"]["error"], "unknown tool `teleport`");
}

#[test]
fn unsupported_app_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "\n[host]\nopen_url = \"tna-missing-opener\"\n",
    );

    let output = tna(&config, &["invoke", "launch_app", r#"{"app_name":"fax"}"#]);
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["payload"]["status"],
        "App not supported for deep linking yet: fax"
    );
}

#[test]
fn failing_sms_utility_is_soft() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "\n[host]\nsms_send = \"false\"\n");

    let output = tna(
        &config,
        &["invoke", "send_sms", r#"{"phone_number":"555","message":"hi"}"#],
    );
    assert!(output.status.success());
    let status = stdout_json(&output)["payload"]["status"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(status.starts_with("Failed to send SMS: "), "{status}");
}

// ---- Startup failures ----

#[test]
fn invoke_without_credential_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tna.toml");
    std::fs::write(
        &path,
        format!("[gemini]\napi_key_env = \"{UNSET_KEY_ENV}\"\n"),
    )
    .unwrap();

    let output = tna(&path, &["invoke", "recall_fact", r#"{"key":"x"}"#]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains(UNSET_KEY_ENV));
}

#[test]
fn config_typo_is_fatal_with_suggestion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tna.toml");
    std::fs::write(&path, "[host]\nsms_sned = \"x\"\n").unwrap();

    let output = tna(&path, &["tools"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("sms_send"));
}

#[test]
fn invalid_argument_json_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");

    let output = tna(&config, &["invoke", "recall_fact", "{not json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
