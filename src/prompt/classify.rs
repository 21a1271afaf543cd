//! Keyword classification of prompt text.
//!
//! Every table here is scanned in order and the first hit wins; a prompt that
//! mentions both "fix" and "feat" resolves by table position.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Feat,
    Fix,
    Docs,
    Refactor,
    Test,
    Chore,
    Style,
    Perf,
    General,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Feat => "feat",
            ChangeType::Fix => "fix",
            ChangeType::Docs => "docs",
            ChangeType::Refactor => "refactor",
            ChangeType::Test => "test",
            ChangeType::Chore => "chore",
            ChangeType::Style => "style",
            ChangeType::Perf => "perf",
            ChangeType::General => "general",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguagePreference {
    Chinese,
    English,
    Auto,
}

impl LanguagePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguagePreference::Chinese => "chinese",
            LanguagePreference::English => "english",
            LanguagePreference::Auto => "auto",
        }
    }
}

const COMMIT_KEYWORDS: &[&str] = &["commit", "提交", "git commit", "/commit"];

/// Conventional-commit type tokens, in priority order.
const EXPLICIT_TYPES: &[(&str, ChangeType)] = &[
    ("feat", ChangeType::Feat),
    ("fix", ChangeType::Fix),
    ("docs", ChangeType::Docs),
    ("refactor", ChangeType::Refactor),
    ("test", ChangeType::Test),
    ("chore", ChangeType::Chore),
    ("style", ChangeType::Style),
    ("perf", ChangeType::Perf),
];

static INFERRED_TYPES: LazyLock<Vec<(Regex, ChangeType)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"bug|fix|修复|问题").unwrap(), ChangeType::Fix),
        (
            Regex::new(r"feature|add|implement|功能|添加").unwrap(),
            ChangeType::Feat,
        ),
        (
            Regex::new(r"document|docs|readme|文档").unwrap(),
            ChangeType::Docs,
        ),
        (
            Regex::new(r"refactor|reorganize|重构").unwrap(),
            ChangeType::Refactor,
        ),
        (Regex::new(r"test|测试").unwrap(), ChangeType::Test),
    ]
});

/// A prompt phrased as a conventional commit subject: `fix the login bug`,
/// `feat(ui): dark mode`.
static LEADING_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(feat|fix|docs|refactor|test|chore|style|perf)(\([^)]*\))?!?(:|\s|$)")
        .unwrap()
});

static CHINESE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\p{Han}|chinese|\bzh\b").unwrap());

static ENGLISH_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(english|en)\b").unwrap());

/// Does the prompt ask for a commit workflow?
pub fn detect_commit_intent(prompt: &str) -> bool {
    let lower = prompt.to_lowercase();
    COMMIT_KEYWORDS.iter().any(|k| lower.contains(k)) || LEADING_TYPE.is_match(prompt.trim())
}

/// Change type: explicit type tokens first, then keyword inference.
pub fn extract_change_type(prompt: &str) -> ChangeType {
    let lower = prompt.to_lowercase();
    if let Some((_, kind)) = EXPLICIT_TYPES.iter().find(|(token, _)| lower.contains(token)) {
        return *kind;
    }
    INFERRED_TYPES
        .iter()
        .find(|(re, _)| re.is_match(&lower))
        .map(|(_, kind)| *kind)
        .unwrap_or(ChangeType::General)
}

pub fn detect_language(prompt: &str) -> LanguagePreference {
    if CHINESE_MARKER.is_match(prompt) {
        LanguagePreference::Chinese
    } else if ENGLISH_MARKER.is_match(prompt) {
        LanguagePreference::English
    } else {
        LanguagePreference::Auto
    }
}
