//! Read-only repository queries used to enrich prompts.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::VcsError;

/// Source of working-tree status and branch information.
pub trait StatusProvider {
    /// Porcelain status listing, one changed path per line.
    fn working_tree_status(&self) -> Result<String, VcsError>;

    /// Current branch, or `None` on a detached HEAD.
    fn current_branch(&self) -> Result<Option<String>, VcsError>;
}

/// Runs the `git` binary in a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Use the process working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn run(&self, args: &[&str]) -> Result<String, VcsError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                command: args.join(" "),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl StatusProvider for GitCli {
    fn working_tree_status(&self) -> Result<String, VcsError> {
        self.run(&["status", "--porcelain"])
    }

    fn current_branch(&self) -> Result<Option<String>, VcsError> {
        let branch = self.run(&["branch", "--show-current"])?;
        let branch = branch.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_a_repository_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitCli::new(dir.path());
        // Either git is missing (Spawn) or it refuses to run (Failed).
        assert!(git.working_tree_status().is_err());
        assert!(git.current_branch().is_err());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let git = GitCli::new("/nonexistent/commitcraft-hooks/repo");
        assert!(matches!(
            git.working_tree_status(),
            Err(VcsError::Spawn(_))
        ));
    }
}
