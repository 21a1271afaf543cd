//! commitcraft-hooks: PreToolUse and UserPromptSubmit hooks for a git commit
//! assistant.
//!
//! The guard checks a requested shell command or file write and returns
//! [`eval::Verdict::Allow`] or [`eval::Verdict::Deny`], possibly rewriting a
//! `git commit` command to strip attribution lines from its message. The
//! enhancer answers slash-command help requests with
//! [`eval::Verdict::Block`] and augments commit-related prompts with
//! repository context. Both fail open.
//!
//! # Architecture
//!
//! - **[`guard`]** — Tool dispatch, shell command checks, path checks, commit message cleanup.
//! - **[`prompt`]** — Help pages, intent/type/language classification, prompt augmentation.
//! - **[`eval`]** — Decision types and rule tables.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`vcs`]** — Read-only git status and branch queries.
//! - **[`runner`]** — Payload in, decision out, under a deadline.
//! - **[`logging`]** — Leveled diagnostics on stderr.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Error types for payload decoding and git queries.
pub mod error;
/// Decision types and literal rule tables.
pub mod eval;
/// Pre-action guard for shell and file tools.
pub mod guard;
/// Hook payload decoding.
pub mod input;
/// Stderr diagnostics.
pub mod logging;
/// Prompt enhancer.
pub mod prompt;
/// Hook execution with a fail-open deadline.
pub mod runner;
/// Repository status queries.
pub mod vcs;

use eval::Decision;
use prompt::PromptDecision;

/// Build the guard from default config and evaluate one tool invocation.
///
/// This is the main entry point for tests and simple usage.
/// For CLI usage with the user overlay, build the guard from [`config::Config::load`].
pub fn evaluate_tool(tool: &str, params: &serde_json::Map<String, serde_json::Value>) -> Decision {
    let config = config::Config::default_config();
    guard::Guard::from_config(&config).evaluate(tool, params)
}

/// Evaluate a prompt with default config against `provider`.
pub fn evaluate_prompt<P: vcs::StatusProvider>(prompt: &str, provider: P) -> PromptDecision {
    let config = config::Config::default_config();
    prompt::Enhancer::new(&config.prompt, provider).evaluate(prompt)
}
