use serde_json::{Map, Value};

use crate::config::Config;
use crate::eval::{Decision, RuleCategory, RuleList};
use crate::guard::ToolGuard;

pub const SENSITIVE_NOTICE: &str = "Sensitive file protection";
pub const SYSTEM_NOTICE: &str = "System file protection";

/// Checks for file-mutation tools, applied to the target path.
pub struct FileGuard {
    sensitive: RuleList,
    system: RuleList,
}

impl FileGuard {
    pub fn from_config(config: &Config) -> Self {
        Self {
            sensitive: RuleList::new(RuleCategory::SensitivePath, &config.guard.sensitive_paths),
            system: RuleList::new(RuleCategory::SystemPath, &config.guard.system_paths),
        }
    }

    pub fn check(&self, path: &str) -> Decision {
        if self.sensitive.first_match(path).is_some() {
            log::error!("Operation on {} blocked: {path}", self.sensitive.category());
            return Decision::deny(SENSITIVE_NOTICE);
        }
        // Substring containment covers the prefix case.
        if self.system.first_match(path).is_some() {
            log::error!("Modification of {} blocked: {path}", self.system.category());
            return Decision::deny(SYSTEM_NOTICE);
        }
        log::info!("File operation validated: {path}");
        Decision::allow()
    }
}

impl ToolGuard for FileGuard {
    fn evaluate(&self, params: &Map<String, Value>) -> Decision {
        let path = ["file_path", "filePath"]
            .iter()
            .find_map(|key| params.get(*key).and_then(Value::as_str))
            .filter(|p| !p.is_empty());
        match path {
            Some(path) => self.check(path),
            None => {
                log::debug!("file tool without a path parameter");
                Decision::allow()
            }
        }
    }
}
