use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_commitcraft-hooks");

fn overlay(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run(hook: &str, stdin: &str, config: &tempfile::NamedTempFile) -> Output {
    run_with_env(hook, stdin, config, &[])
}

fn run_with_env(
    hook: &str,
    stdin: &str,
    config: &tempfile::NamedTempFile,
    vars: &[(&str, &str)],
) -> Output {
    let mut child = Command::new(BIN)
        .arg(hook)
        .env("COMMITCRAFT_HOOKS_CONFIG", config.path())
        .env_remove("DEBUG")
        .envs(vars.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn pre_tool_use_denies_dangerous_command() {
    let cfg = overlay("");
    let out = run(
        "pre-tool-use",
        r#"{"tool":"bash","params":{"command":"rm -rf /tmp/x"}}"#,
        &cfg,
    );
    assert!(out.status.success());
    let v = stdout_json(&out);
    assert_eq!(v["decision"], "deny");
    assert_eq!(v["message"], "Dangerous command blocked for safety");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[ERROR]"), "stderr: {stderr}");
}

const LS_EVENT: &str = r#"{"tool":"bash","params":{"command":"ls -la"}}"#;

#[test]
fn debug_env_var_enables_debug_lines() {
    let cfg = overlay("");
    let out = run_with_env("pre-tool-use", LS_EVENT, &cfg, &[("DEBUG", "1")]);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out)["decision"], "allow");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[DEBUG]"), "stderr: {stderr}");
    assert!(stderr.contains("Tool: bash"), "stderr: {stderr}");
}

#[test]
fn debug_lines_absent_without_switch() {
    let cfg = overlay("");
    let out = run("pre-tool-use", LS_EVENT, &cfg);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("[DEBUG]"), "stderr: {stderr}");
    assert!(!stderr.contains("Tool: bash"), "stderr: {stderr}");
}

#[test]
fn debug_setting_in_overlay_enables_debug_lines() {
    let cfg = overlay("[settings]\ndebug = true\n");
    let out = run("pre-tool-use", LS_EVENT, &cfg);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[DEBUG]"), "stderr: {stderr}");
    assert!(stderr.contains("Tool: bash"), "stderr: {stderr}");
}

#[test]
fn pre_tool_use_malformed_input_allows() {
    let cfg = overlay("");
    let out = run("pre-tool-use", "this is not json", &cfg);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out)["decision"], "allow");
}

#[test]
fn user_override_adds_dangerous_command() {
    let cfg = overlay("[guard]\ndangerous_commands = [\"terraform destroy\"]\n");
    let out = run(
        "pre-tool-use",
        r#"{"tool":"bash","params":{"command":"terraform destroy -auto-approve"}}"#,
        &cfg,
    );
    assert_eq!(stdout_json(&out)["decision"], "deny");
}

#[test]
fn user_prompt_submit_help_blocks() {
    let cfg = overlay("");
    let out = run("user-prompt-submit", "/group --help", &cfg);
    assert!(out.status.success());
    let v = stdout_json(&out);
    assert_eq!(v["decision"], "block");
    assert_eq!(v["metadata"]["command"], "group");
}

#[test]
fn no_input_before_deadline_fails_open() {
    let cfg = overlay("[settings]\nguard_timeout_ms = 200\n");
    let mut child = Command::new(BIN)
        .arg("pre-tool-use")
        .env("COMMITCRAFT_HOOKS_CONFIG", cfg.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // Hold stdin open so the payload never arrives.
    let held = child.stdin.take();
    let out = child.wait_with_output().unwrap();
    drop(held);

    assert!(out.status.success());
    let v = stdout_json(&out);
    assert_eq!(v["decision"], "allow");
    assert_eq!(v["message"], "Hook timeout");
}

#[test]
fn unknown_subcommand_exits_cleanly() {
    let out = Command::new(BIN)
        .arg("post-tool-use")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}
