//! Pre-action guard: routes a tool invocation to the checks for its category.
//!
//! Shell tools get commit-message cleanup and command checks
//! ([`shell::ShellGuard`]); file-mutation tools get path checks
//! ([`file::FileGuard`]). Tools in neither category are allowed.

/// Commit message extraction and attribution stripping.
pub mod commit_message;
/// Sensitive and system path checks.
pub mod file;
/// Command checks: dangerous literals, protected branches, credentials, staging.
pub mod shell;

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::eval::Decision;

/// A set of checks applied to one category of tool.
pub trait ToolGuard: Send + Sync {
    /// Evaluate the tool's parameters and return a decision.
    fn evaluate(&self, params: &Map<String, Value>) -> Decision;
}

/// Tool-name → guard lookup, built once from configuration.
pub struct Guard {
    guards: HashMap<String, Arc<dyn ToolGuard>>,
}

impl Guard {
    pub fn from_config(config: &Config) -> Self {
        let shell: Arc<dyn ToolGuard> = Arc::new(shell::ShellGuard::from_config(config));
        let file: Arc<dyn ToolGuard> = Arc::new(file::FileGuard::from_config(config));

        let mut guards = HashMap::new();
        for name in &config.tools.shell {
            guards.insert(name.to_lowercase(), Arc::clone(&shell));
        }
        for name in &config.tools.file {
            guards.insert(name.to_lowercase(), Arc::clone(&file));
        }
        Self { guards }
    }

    /// Evaluate a tool invocation. Tool names match case-insensitively;
    /// unrecognized tools fail open.
    pub fn evaluate(&self, tool: &str, params: &Map<String, Value>) -> Decision {
        let name = tool.trim().to_lowercase();
        match self.guards.get(&name) {
            Some(guard) => guard.evaluate(params),
            None => {
                log::debug!("no checks for tool '{tool}', allowing");
                Decision::allow()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Verdict;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn guard() -> Guard {
        Guard::from_config(&Config::default_config())
    }

    #[test]
    fn tool_names_match_case_insensitively() {
        let g = guard();
        let p = params(json!({"command": "rm -rf /"}));
        assert_eq!(g.evaluate("Bash", &p).verdict, Verdict::Deny);
        assert_eq!(g.evaluate("SHELL", &p).verdict, Verdict::Deny);
    }

    #[test]
    fn file_tools_route_to_path_checks() {
        let g = guard();
        let p = params(json!({"file_path": ".env"}));
        for tool in ["Write", "Edit", "MultiEdit"] {
            assert_eq!(g.evaluate(tool, &p).verdict, Verdict::Deny, "tool: {tool}");
        }
    }

    #[test]
    fn unknown_tool_fails_open() {
        let p = params(json!({"command": "rm -rf /", "file_path": ".env"}));
        assert_eq!(guard().evaluate("Read", &p), Decision::allow());
        assert_eq!(guard().evaluate("", &p), Decision::allow());
    }
}
