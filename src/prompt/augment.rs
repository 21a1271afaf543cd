//! Assembly of the enhanced prompt text.

use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

use crate::prompt::PromptContext;
use crate::prompt::classify::LanguagePreference;

const STAGES: &str = "Available agents:
1. commit-analyzer - Analyze repository changes
2. commit-grouper - Group files logically
3. commit-message - Generate commit messages
4. commit-validator - Validate quality
5. commit-executor - Execute commits

Workflow will:
1. Analyze all changes comprehensively
2. Group files by feature/module
3. Request user confirmation at each step
4. Generate professional commit messages
5. Validate quality before execution";

/// Workflow-mode notes; at most one applies, first match wins.
static WORKFLOW_MODES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"(?i)batch|multiple|批量").unwrap(),
            "[Workflow Mode] Batch mode: Will process multiple features separately",
        ),
        (
            Regex::new(r"(?i)preview|dry|预览").unwrap(),
            "[Workflow Mode] Preview mode: Will show changes without committing",
        ),
        (
            Regex::new(r"(?i)quick|fast|快速").unwrap(),
            "[Workflow Mode] Quick mode: Minimal interaction, automated decisions",
        ),
    ]
});

static FORCE_FLAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)force").unwrap());

pub const FORCE_WARNING: &str =
    "⚠️ WARNING: Force operation requested. Extra confirmation will be required.";
pub const SPLIT_SUGGESTION: &str =
    "💡 Suggestion: Consider grouping changes into multiple commits";
pub const NO_CHANGES_SUGGESTION: &str =
    "💡 Suggestion: No changes detected. Check if files are saved";

/// Knobs for the conditional sections.
#[derive(Debug, Clone)]
pub struct AugmentOptions<'a> {
    pub caution_branches: &'a [String],
    pub split_threshold: usize,
}

/// Append the context block, status preview, stage list and conditional
/// notes to `prompt`.
pub fn augment(prompt: &str, ctx: &PromptContext, opts: &AugmentOptions<'_>) -> String {
    let mut out = String::with_capacity(prompt.len() + 1024);
    let language = match ctx.language {
        LanguagePreference::Auto => "Auto-detect from content",
        other => other.as_str(),
    };

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{prompt}\n");
    let _ = writeln!(out, "[CommitCraft Context]");
    let _ = writeln!(out, "- Detected Type: {}", ctx.change_type.as_str());
    let _ = writeln!(out, "- Multi-agent workflow enabled");
    let _ = writeln!(out, "- Quality validation: Required (≥90 score)");
    let _ = writeln!(out, "- Interactive mode: Enabled");
    let _ = writeln!(out, "- Language: {language}");
    if let Some(branch) = &ctx.branch {
        let _ = writeln!(out, "- Current branch: {branch}");
    }
    let _ = write!(
        out,
        "\nCurrent changes preview:\n{}\n\n{STAGES}",
        ctx.status.preview
    );

    if let Some((_, note)) = WORKFLOW_MODES.iter().find(|(re, _)| re.is_match(prompt)) {
        let _ = write!(out, "\n\n{note}");
    }

    if FORCE_FLAG.is_match(prompt) {
        let _ = write!(out, "\n\n{FORCE_WARNING}");
    }

    if let Some(branch) = &ctx.branch
        && opts.caution_branches.iter().any(|b| b == branch)
    {
        let _ = write!(out, "\n\n⚠️ CAUTION: You are on the {branch} branch.");
    }

    match ctx.status.changed_files {
        Some(n) if n > opts.split_threshold => {
            let _ = write!(out, "\n\n{SPLIT_SUGGESTION}");
        }
        Some(0) => {
            let _ = write!(out, "\n\n{NO_CHANGES_SUGGESTION}");
        }
        _ => {}
    }

    out
}
