//! Prompt enhancer: answers slash-command help requests and augments
//! commit-related prompts with repository context.

/// Enhanced prompt assembly.
pub mod augment;
/// Commit intent, change type and language classification.
pub mod classify;
/// Static help pages.
pub mod help;

use serde::Serialize;

use crate::config::PromptConfig;
use crate::eval::Verdict;
use crate::logging::timestamp_now;
use crate::vcs::StatusProvider;
use classify::{ChangeType, LanguagePreference};

/// Shown in place of the status listing when git cannot be queried.
pub const STATUS_UNAVAILABLE: &str = "Unable to get git status";

/// Working-tree status, trimmed for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// First few changed paths, or [`STATUS_UNAVAILABLE`].
    pub preview: String,
    /// Total changed paths; `None` when the status query failed.
    pub changed_files: Option<usize>,
}

impl StatusSnapshot {
    pub fn from_status(status: &str, preview_lines: usize) -> Self {
        let lines: Vec<&str> = status.lines().filter(|l| !l.trim().is_empty()).collect();
        Self {
            preview: lines
                .iter()
                .take(preview_lines)
                .copied()
                .collect::<Vec<_>>()
                .join("\n"),
            changed_files: Some(lines.len()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            preview: STATUS_UNAVAILABLE.to_string(),
            changed_files: None,
        }
    }
}

/// Everything derived from one prompt and the repository state.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub commit_intent: bool,
    pub change_type: ChangeType,
    pub language: LanguagePreference,
    pub branch: Option<String>,
    pub status: StatusSnapshot,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PromptMetadata {
    Help {
        is_help_command: bool,
        command: String,
        timestamp: String,
    },
    Enhancement {
        language_preference: LanguagePreference,
        commit_intent_detected: bool,
        context_type: ChangeType,
        timestamp: String,
    },
}

/// Enhancer output, serialized as
/// `{ decision, enhanced_prompt?, message?, metadata? }`.
#[derive(Debug, Clone, Serialize)]
pub struct PromptDecision {
    pub decision: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PromptMetadata>,
}

impl PromptDecision {
    /// Pass-through allow with a diagnostic message and no metadata.
    pub fn fail_open(message: impl Into<String>) -> Self {
        Self {
            decision: Verdict::Allow,
            enhanced_prompt: None,
            message: Some(message.into()),
            metadata: None,
        }
    }
}

pub struct Enhancer<P> {
    provider: P,
    caution_branches: Vec<String>,
    preview_lines: usize,
    split_threshold: usize,
}

impl<P: StatusProvider> Enhancer<P> {
    pub fn new(config: &PromptConfig, provider: P) -> Self {
        Self {
            provider,
            caution_branches: config.caution_branches.clone(),
            preview_lines: config.status_preview_lines,
            split_threshold: config.split_threshold,
        }
    }

    /// Evaluate one submitted prompt.
    pub fn evaluate(&self, prompt: &str) -> PromptDecision {
        if let Some(command) = help::help_request(prompt) {
            log::info!("help requested for /{command}");
            return PromptDecision {
                decision: Verdict::Block,
                enhanced_prompt: None,
                message: Some(help::help_text(&command).to_string()),
                metadata: Some(PromptMetadata::Help {
                    is_help_command: true,
                    command,
                    timestamp: timestamp_now(),
                }),
            };
        }

        let change_type = classify::extract_change_type(prompt);
        let language = classify::detect_language(prompt);

        if !classify::detect_commit_intent(prompt) {
            log::debug!("no commit intent, passing prompt through");
            return PromptDecision {
                decision: Verdict::Allow,
                enhanced_prompt: Some(prompt.to_string()),
                message: None,
                metadata: Some(PromptMetadata::Enhancement {
                    language_preference: language,
                    commit_intent_detected: false,
                    context_type: change_type,
                    timestamp: timestamp_now(),
                }),
            };
        }

        let ctx = PromptContext {
            commit_intent: true,
            change_type,
            language,
            branch: self.branch(),
            status: self.status(),
        };
        log::info!(
            "commit intent: type={} language={} branch={}",
            ctx.change_type.as_str(),
            ctx.language.as_str(),
            ctx.branch.as_deref().unwrap_or("-")
        );

        let enhanced = augment::augment(
            prompt,
            &ctx,
            &augment::AugmentOptions {
                caution_branches: &self.caution_branches,
                split_threshold: self.split_threshold,
            },
        );

        PromptDecision {
            decision: Verdict::Allow,
            enhanced_prompt: Some(enhanced),
            message: None,
            metadata: Some(PromptMetadata::Enhancement {
                language_preference: ctx.language,
                commit_intent_detected: ctx.commit_intent,
                context_type: ctx.change_type,
                timestamp: timestamp_now(),
            }),
        }
    }

    fn status(&self) -> StatusSnapshot {
        match self.provider.working_tree_status() {
            Ok(status) => StatusSnapshot::from_status(&status, self.preview_lines),
            Err(e) => {
                log::debug!("status unavailable: {e}");
                StatusSnapshot::unavailable()
            }
        }
    }

    fn branch(&self) -> Option<String> {
        self.provider.current_branch().unwrap_or_else(|e| {
            log::debug!("branch unavailable: {e}");
            None
        })
    }
}
