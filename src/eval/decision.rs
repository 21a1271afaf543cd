use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Allow,
    Deny,
    Block,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Allow => "ALLOW",
            Verdict::Deny => "DENY",
            Verdict::Block => "BLOCK",
        }
    }
}

/// Parameters the host should substitute before running the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifiedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// Guard output. Serializes to the hook wire shape
/// `{ decision, message?, modifiedParams? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    #[serde(rename = "decision")]
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "modifiedParams", skip_serializing_if = "Option::is_none")]
    pub modified_params: Option<ModifiedParams>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            verdict: Verdict::Allow,
            message: None,
            modified_params: None,
        }
    }

    /// Allow, but surface an advisory to the caller.
    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Allow,
            message: Some(message.into()),
            modified_params: None,
        }
    }

    pub fn deny(message: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Deny,
            message: Some(message.into()),
            modified_params: None,
        }
    }

    /// Allow with the command replaced by `command`.
    pub fn rewrite(command: String) -> Self {
        Self {
            verdict: Verdict::Allow,
            message: None,
            modified_params: Some(ModifiedParams {
                command: Some(command),
            }),
        }
    }
}
