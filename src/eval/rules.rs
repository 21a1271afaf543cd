//! Literal-substring rule tables, each tagged with what it detects.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    DangerousCommand,
    ProtectedBranch,
    SensitivePath,
    SystemPath,
    CredentialLeak,
    BroadStaging,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::DangerousCommand => "dangerous-command",
            RuleCategory::ProtectedBranch => "protected-branch",
            RuleCategory::SensitivePath => "sensitive-path",
            RuleCategory::SystemPath => "system-path",
            RuleCategory::CredentialLeak => "credential-leak",
            RuleCategory::BroadStaging => "broad-staging",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of literal patterns. Order matters: the first hit is reported.
#[derive(Debug, Clone)]
pub struct RuleList {
    category: RuleCategory,
    patterns: Vec<String>,
}

impl RuleList {
    pub fn new(category: RuleCategory, patterns: &[String]) -> Self {
        Self {
            category,
            patterns: patterns.iter().filter(|p| !p.is_empty()).cloned().collect(),
        }
    }

    pub fn category(&self) -> RuleCategory {
        self.category
    }

    /// First pattern contained anywhere in `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| text.contains(p.as_str()))
            .map(String::as_str)
    }
}
