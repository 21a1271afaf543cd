use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Environment variable naming an alternative overlay file.
pub const CONFIG_ENV_VAR: &str = "COMMITCRAFT_HOOKS_CONFIG";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    #[serde(default)]
    pub commit_message: CommitMessageConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Emit DEBUG-level diagnostics even when `DEBUG` is unset.
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_guard_timeout")]
    pub guard_timeout_ms: u64,
    #[serde(default = "default_prompt_timeout")]
    pub prompt_timeout_ms: u64,
}

fn default_guard_timeout() -> u64 {
    5000
}

fn default_prompt_timeout() -> u64 {
    3000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            guard_timeout_ms: default_guard_timeout(),
            prompt_timeout_ms: default_prompt_timeout(),
        }
    }
}

/// Tool names (lowercase) routed to each guard branch.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ToolsConfig {
    #[serde(default)]
    pub shell: Vec<String>,
    #[serde(default)]
    pub file: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct GuardConfig {
    #[serde(default)]
    pub dangerous_commands: Vec<String>,
    #[serde(default)]
    pub protected_branches: Vec<String>,
    #[serde(default)]
    pub sensitive_paths: Vec<String>,
    #[serde(default)]
    pub system_paths: Vec<String>,
    /// Canonical "stage everything" invocations, compared word by word.
    #[serde(default)]
    pub broad_staging: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CommitMessageConfig {
    #[serde(default)]
    pub strip: Vec<StripRule>,
}

/// A commit message line is dropped when it contains every needle.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StripRule {
    pub contains: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PromptConfig {
    /// Branches that earn a caution note in the enhanced prompt.
    #[serde(default)]
    pub caution_branches: Vec<String>,
    #[serde(default = "default_preview_lines")]
    pub status_preview_lines: usize,
    #[serde(default = "default_split_threshold")]
    pub split_threshold: usize,
}

fn default_preview_lines() -> usize {
    5
}

fn default_split_threshold() -> usize {
    10
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            caution_branches: Vec::new(),
            status_preview_lines: default_preview_lines(),
            split_threshold: default_split_threshold(),
        }
    }
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    tools: ToolsOverlay,
    #[serde(default)]
    guard: GuardOverlay,
    #[serde(default)]
    commit_message: CommitMessageOverlay,
    #[serde(default)]
    prompt: PromptOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    debug: Option<bool>,
    guard_timeout_ms: Option<u64>,
    prompt_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct ToolsOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    shell: Vec<String>,
    #[serde(default)]
    file: Vec<String>,
    #[serde(default)]
    remove_shell: Vec<String>,
    #[serde(default)]
    remove_file: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct GuardOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    dangerous_commands: Vec<String>,
    #[serde(default)]
    protected_branches: Vec<String>,
    #[serde(default)]
    sensitive_paths: Vec<String>,
    #[serde(default)]
    system_paths: Vec<String>,
    #[serde(default)]
    broad_staging: Vec<String>,
    #[serde(default)]
    remove_dangerous_commands: Vec<String>,
    #[serde(default)]
    remove_protected_branches: Vec<String>,
    #[serde(default)]
    remove_sensitive_paths: Vec<String>,
    #[serde(default)]
    remove_system_paths: Vec<String>,
    #[serde(default)]
    remove_broad_staging: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct CommitMessageOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    strip: Vec<StripRule>,
}

#[derive(Debug, Deserialize, Default)]
struct PromptOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    caution_branches: Vec<String>,
    #[serde(default)]
    remove_caution_branches: Vec<String>,
    status_preview_lines: Option<usize>,
    split_threshold: Option<usize>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list<T: PartialEq>(base: &mut Vec<T>, add: Vec<T>, remove: &[T], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge the user overlay (if one exists)
    ///
    /// A broken overlay is reported and ignored; the hooks must keep running.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(path) = Self::overlay_path()
            && let Some(overlay) = Self::load_overlay(&path)
        {
            config.apply_overlay(overlay);
        }
        config
    }

    /// `$COMMITCRAFT_HOOKS_CONFIG` (with `~` and `$VAR` expanded), else
    /// `~/.config/commitcraft-hooks/config.toml`.
    fn overlay_path() -> Option<PathBuf> {
        if let Ok(raw) = std::env::var(CONFIG_ENV_VAR)
            && !raw.trim().is_empty()
        {
            return match shellexpand::full(raw.trim()) {
                Ok(expanded) => Some(PathBuf::from(expanded.into_owned())),
                Err(e) => {
                    log::warn!("cannot expand {CONFIG_ENV_VAR}: {e}");
                    None
                }
            };
        }
        let expanded = shellexpand::tilde("~/.config/commitcraft-hooks/config.toml");
        Some(PathBuf::from(expanded.into_owned()))
    }

    fn load_overlay(path: &std::path::Path) -> Option<ConfigOverlay> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                log::error!("config parse error in {}: {e}", path.display());
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Settings: scalar overrides
        let s = overlay.settings;
        if let Some(v) = s.debug {
            self.settings.debug = v;
        }
        if let Some(v) = s.guard_timeout_ms {
            self.settings.guard_timeout_ms = v;
        }
        if let Some(v) = s.prompt_timeout_ms {
            self.settings.prompt_timeout_ms = v;
        }

        // Tools
        let t = overlay.tools;
        merge_list(
            &mut self.tools.shell,
            lowercase(t.shell),
            &lowercase(t.remove_shell),
            t.replace,
        );
        merge_list(
            &mut self.tools.file,
            lowercase(t.file),
            &lowercase(t.remove_file),
            t.replace,
        );

        // Guard
        let g = overlay.guard;
        merge_list(
            &mut self.guard.dangerous_commands,
            g.dangerous_commands,
            &g.remove_dangerous_commands,
            g.replace,
        );
        merge_list(
            &mut self.guard.protected_branches,
            g.protected_branches,
            &g.remove_protected_branches,
            g.replace,
        );
        merge_list(
            &mut self.guard.sensitive_paths,
            g.sensitive_paths,
            &g.remove_sensitive_paths,
            g.replace,
        );
        merge_list(
            &mut self.guard.system_paths,
            g.system_paths,
            &g.remove_system_paths,
            g.replace,
        );
        merge_list(
            &mut self.guard.broad_staging,
            g.broad_staging,
            &g.remove_broad_staging,
            g.replace,
        );

        // Commit message
        let c = overlay.commit_message;
        merge_list(&mut self.commit_message.strip, c.strip, &[], c.replace);

        // Prompt
        let p = overlay.prompt;
        merge_list(
            &mut self.prompt.caution_branches,
            p.caution_branches,
            &p.remove_caution_branches,
            p.replace,
        );
        if let Some(v) = p.status_preview_lines {
            self.prompt.status_preview_lines = v;
        }
        if let Some(v) = p.split_threshold {
            self.prompt.split_threshold = v;
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

fn lowercase(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|s| s.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert!(!config.tools.shell.is_empty());
        assert!(!config.tools.file.is_empty());
        assert!(!config.guard.dangerous_commands.is_empty());
        assert!(!config.guard.protected_branches.is_empty());
        assert!(!config.guard.sensitive_paths.is_empty());
        assert!(!config.guard.system_paths.is_empty());
        assert_eq!(config.commit_message.strip.len(), 2);
    }

    #[test]
    fn default_config_has_expected_rules() {
        let config = Config::default_config();
        assert!(config.guard.dangerous_commands.contains(&"rm -rf".to_string()));
        assert!(config.guard.protected_branches.contains(&"main".to_string()));
        assert!(config.guard.sensitive_paths.contains(&".env".to_string()));
        assert!(
            config
                .guard
                .system_paths
                .contains(&r"C:\Program Files\".to_string())
        );
        assert_eq!(config.guard.broad_staging, vec!["git add .", "git add -A"]);
        assert_eq!(config.prompt.caution_branches, vec!["main", "master"]);
    }

    #[test]
    fn default_timeouts() {
        let config = Config::default_config();
        assert_eq!(config.settings.guard_timeout_ms, 5000);
        assert_eq!(config.settings.prompt_timeout_ms, 3000);
        assert!(!config.settings.debug);
    }

    // ── Merge semantics ──

    #[test]
    fn overlay_extends_dangerous_commands() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [guard]
            dangerous_commands = ["terraform destroy"]
        "#,
        );
        assert!(config.guard.dangerous_commands.contains(&"rm -rf".to_string()));
        assert!(
            config
                .guard
                .dangerous_commands
                .contains(&"terraform destroy".to_string())
        );
    }

    #[test]
    fn overlay_removes_sensitive_path() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [guard]
            remove_sensitive_paths = ["token"]
        "#,
        );
        assert!(!config.guard.sensitive_paths.contains(&"token".to_string()));
        assert!(config.guard.sensitive_paths.contains(&".env".to_string()));
    }

    #[test]
    fn overlay_replace_guard() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [guard]
            replace = true
            dangerous_commands = ["shred"]
        "#,
        );
        assert_eq!(config.guard.dangerous_commands, vec!["shred"]);
        assert!(config.guard.protected_branches.is_empty());
    }

    #[test]
    fn overlay_tool_names_lowercased() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [tools]
            shell = ["Zsh"]
            remove_file = ["MultiEdit"]
        "#,
        );
        assert!(config.tools.shell.contains(&"zsh".to_string()));
        assert!(!config.tools.file.contains(&"multiedit".to_string()));
    }

    #[test]
    fn overlay_adds_strip_rule_without_duplicates() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [[commit_message.strip]]
            contains = ["Co-Authored-By: Claude", "noreply@anthropic.com"]

            [[commit_message.strip]]
            contains = ["Signed-off-by: bot"]
        "#,
        );
        assert_eq!(config.commit_message.strip.len(), 3);
    }

    #[test]
    fn overlay_scalars_override() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            debug = true
            guard_timeout_ms = 1500

            [prompt]
            split_threshold = 3
        "#,
        );
        assert!(config.settings.debug);
        assert_eq!(config.settings.guard_timeout_ms, 1500);
        assert_eq!(config.settings.prompt_timeout_ms, 3000);
        assert_eq!(config.prompt.split_threshold, 3);
        assert_eq!(config.prompt.status_preview_lines, 5);
    }

    #[test]
    fn overlay_no_duplicates() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [guard]
            protected_branches = ["main"]
        "#,
        );
        let count = config
            .guard
            .protected_branches
            .iter()
            .filter(|s| *s == "main")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let original = Config::default_config();
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert_eq!(
            config.guard.dangerous_commands.len(),
            original.guard.dangerous_commands.len()
        );
        assert_eq!(config.tools.shell, original.tools.shell);
        assert_eq!(config.commit_message.strip, original.commit_message.strip);
    }

    #[test]
    fn overlay_file_with_syntax_error_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[guard\nbroken").unwrap();
        assert!(Config::load_overlay(&path).is_none());
    }

    #[test]
    fn overlay_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[guard]\nsensitive_paths = [\"vault.json\"]\n").unwrap();
        let overlay = Config::load_overlay(&path).unwrap();
        let mut config = Config::default_config();
        config.apply_overlay(overlay);
        assert!(config.guard.sensitive_paths.contains(&"vault.json".to_string()));
    }
}
