use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::config::Config;
use crate::eval::{Decision, RuleCategory, RuleList};
use crate::guard::ToolGuard;
use crate::guard::commit_message::MessageCleaner;
use crate::logging::preview;

pub const DANGEROUS_NOTICE: &str = "Dangerous command blocked for safety";
pub const CREDENTIAL_NOTICE: &str = "Potential credential exposure";
pub const BROAD_STAGING_NOTICE: &str = "Consider using specific file staging";

static BRANCH_OPERATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"git checkout|git switch|git branch -[dD]").unwrap());

static CREDENTIAL_ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(password|token|secret|api[_-]?key)\s*=").unwrap());

/// Checks for shell-execution tools, applied to `params.command`.
pub struct ShellGuard {
    cleaner: MessageCleaner,
    dangerous: RuleList,
    protected_branches: RuleList,
    /// Canonical stage-everything invocations, pre-split into words.
    broad_staging: Vec<Vec<String>>,
}

impl ShellGuard {
    pub fn from_config(config: &Config) -> Self {
        let broad_staging = config
            .guard
            .broad_staging
            .iter()
            .filter_map(|s| shlex::split(s))
            .filter(|words| !words.is_empty())
            .collect();
        Self {
            cleaner: MessageCleaner::from_config(&config.commit_message),
            dangerous: RuleList::new(
                RuleCategory::DangerousCommand,
                &config.guard.dangerous_commands,
            ),
            protected_branches: RuleList::new(
                RuleCategory::ProtectedBranch,
                &config.guard.protected_branches,
            ),
            broad_staging,
        }
    }

    /// Evaluate one command string.
    ///
    /// Checks run in order and the first hit decides. Commit-message
    /// cleanup comes first, a protected-branch caution ends evaluation.
    pub fn check(&self, command: &str) -> Decision {
        if let Some(cleaned) = self.cleaner.sanitize_command(command) {
            log::info!("Cleaned attribution markers from commit message");
            return Decision::rewrite(cleaned);
        }

        if let Some(hit) = self.dangerous.first_match(command) {
            log::error!("{} blocked: {hit}", self.dangerous.category());
            return Decision::deny(DANGEROUS_NOTICE);
        }

        if let Some(branch) = self.protected_branch(command) {
            log::warn!("{} operation: {branch}", self.protected_branches.category());
            return Decision::warn(format!("Caution: Protected branch operation on {branch}"));
        }

        if CREDENTIAL_ASSIGNMENT.is_match(command) {
            log::error!("{} detected in command", RuleCategory::CredentialLeak);
            return Decision::deny(CREDENTIAL_NOTICE);
        }

        if self.is_broad_staging(command) {
            log::warn!("{} command detected", RuleCategory::BroadStaging);
            return Decision::warn(BROAD_STAGING_NOTICE);
        }

        log::info!("Command validated: {}", preview(command, 50));
        Decision::allow()
    }

    /// Protected branch named by a branch switch or delete, if any.
    fn protected_branch<'a>(&'a self, command: &str) -> Option<&'a str> {
        if !BRANCH_OPERATION.is_match(command) {
            return None;
        }
        self.protected_branches.first_match(command)
    }

    fn is_broad_staging(&self, command: &str) -> bool {
        let Some(words) = shlex::split(command.trim()) else {
            return false;
        };
        self.broad_staging.iter().any(|canonical| *canonical == words)
    }
}

impl ToolGuard for ShellGuard {
    fn evaluate(&self, params: &Map<String, Value>) -> Decision {
        match params.get("command").and_then(Value::as_str) {
            Some(command) => self.check(command),
            None => {
                log::debug!("shell tool without a command parameter");
                Decision::allow()
            }
        }
    }
}
