//! Hook execution: payload in, decision out, within a deadline.
//!
//! The body runs on a worker thread. If it has not answered when the
//! deadline passes, or it dies, the caller gets a fail-open decision instead.

use serde::Serialize;
use serde_json::Map;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::eval::Decision;
use crate::guard::Guard;
use crate::input;
use crate::logging::{self, preview};
use crate::prompt::{Enhancer, PromptDecision};
use crate::vcs::GitCli;

pub const TIMEOUT_NOTICE: &str = "Hook timeout";
pub const FAULT_NOTICE: &str = "Hook error, allowing operation";

/// Serialized form of a plain fail-open allow.
const ALLOW_JSON: &str = r#"{"decision":"allow"}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    PreToolUse,
    UserPromptSubmit,
}

impl Hook {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "pre-tool-use" => Some(Hook::PreToolUse),
            "user-prompt-submit" | "prompt-submit" => Some(Hook::UserPromptSubmit),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Hook::PreToolUse => "pre-tool-use",
            Hook::UserPromptSubmit => "user-prompt-submit",
        }
    }

    pub fn timeout(self, config: &Config) -> Duration {
        Duration::from_millis(match self {
            Hook::PreToolUse => config.settings.guard_timeout_ms,
            Hook::UserPromptSubmit => config.settings.prompt_timeout_ms,
        })
    }

    /// Fail-open payload carrying `message`.
    pub fn fail_open(self, message: &str) -> String {
        match self {
            Hook::PreToolUse => to_json(&Decision::warn(message)),
            Hook::UserPromptSubmit => to_json(&PromptDecision::fail_open(message)),
        }
    }
}

/// Run `work` on a worker thread and wait at most `timeout` for its output.
pub fn run_with_deadline<F>(timeout: Duration, work: F, on_timeout: String, on_fault: String) -> String
where
    F: FnOnce() -> String + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("hook-worker".into())
        .spawn(move || {
            let _ = tx.send(work());
        });
    if let Err(e) = spawned {
        log::error!("cannot start worker: {e}");
        return on_fault;
    }

    match rx.recv_timeout(timeout) {
        Ok(output) => output,
        Err(RecvTimeoutError::Timeout) => {
            log::warn!("Hook timeout after {} ms, allowing operation", timeout.as_millis());
            on_timeout
        }
        Err(RecvTimeoutError::Disconnected) => {
            log::error!("{FAULT_NOTICE}");
            on_fault
        }
    }
}

/// Read the payload from stdin, evaluate it, and return the JSON decision.
/// Never fails: every error path yields a fail-open payload.
pub fn run(hook: Hook, config: Config) -> String {
    let timeout = hook.timeout(&config);
    run_with_deadline(
        timeout,
        move || {
            let raw = input::read_stdin().unwrap_or_else(|e| {
                log::warn!("{e}; treating as empty input");
                String::new()
            });
            match hook {
                Hook::PreToolUse => guard_payload(&raw, &config),
                Hook::UserPromptSubmit => prompt_payload(&raw, &config, GitCli::current_dir()),
            }
        },
        hook.fail_open(TIMEOUT_NOTICE),
        hook.fail_open(FAULT_NOTICE),
    )
}

/// Guard body: decode a tool event and evaluate it.
pub fn guard_payload(raw: &str, config: &Config) -> String {
    let event = input::parse_tool_event(raw).unwrap_or_else(|e| {
        log::warn!("{e}; treating as empty input");
        input::ToolEvent::default()
    });
    let tool = event.tool.unwrap_or_default();
    let params = event.params.unwrap_or_else(Map::new);

    log::debug!("Tool: {tool}");
    log::debug!(
        "Params: {}",
        preview(&serde_json::Value::Object(params.clone()).to_string(), 500)
    );

    let decision = Guard::from_config(config).evaluate(&tool, &params);
    logging::log_decision(&tool, &decision);
    to_json(&decision)
}

/// Enhancer body: extract the prompt text and evaluate it.
pub fn prompt_payload<P: crate::vcs::StatusProvider>(raw: &str, config: &Config, provider: P) -> String {
    let prompt = input::parse_prompt(raw);
    log::debug!("Prompt: {}", preview(&prompt, 200));
    let decision = Enhancer::new(&config.prompt, provider).evaluate(&prompt);
    log::debug!("prompt decision: {}", decision.decision.label());
    to_json(&decision)
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("cannot serialize decision: {e}");
        ALLOW_JSON.to_string()
    })
}
