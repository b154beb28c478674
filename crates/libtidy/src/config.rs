use std::path::Path;

use log::debug;

use crate::{error::Result, git::Git, parse::parse_ignored_branches};

/// Repository-scoped key holding the space-joined ignored branch names.
pub const IGNORED_BRANCHES_KEY: &str = "tidy.ignoredBranches";

/// Worktree-scoped key set to `true` when a worktree should be kept.
pub const WORKTREE_IGNORE_KEY: &str = "tidy.ignore";

/// Repository extension that enables `config.worktree` files.
const WORKTREE_CONFIG_EXTENSION: &str = "extensions.worktreeConfig";

/// Persistent "keep this" state, stored wherever the implementation chooses.
///
/// Lookups never fail: an absent or unreadable value reads as the default.
pub trait ConfigStore: Send + Sync {
    /// Turn on per-worktree configuration. Idempotent and repository-wide.
    fn enable_worktree_config(&self) -> Result<()>;
    /// Whether `worktree` carries the ignore flag.
    fn worktree_ignored(&self, worktree: &Path) -> bool;
    /// Set the ignore flag on `worktree`.
    fn set_worktree_ignored(&self, worktree: &Path) -> Result<()>;
    /// Remove the ignore flag from `worktree`; absence is not an error.
    fn clear_worktree_ignored(&self, worktree: &Path) -> Result<()>;
    /// The persisted ignored branch names, in stored order.
    fn ignored_branches(&self) -> Vec<String>;
    /// Replace the persisted ignored branch names. An empty slice still writes.
    fn set_ignored_branches(&self, names: &[String]) -> Result<()>;
}

/// [`ConfigStore`] backed by `git config`.
pub struct GitConfig<'a> {
    /// Executor used for every config read and write.
    git: &'a dyn Git,
    /// Any directory inside the repository; repository-scoped keys are read here.
    repo_dir: &'a Path,
}

impl<'a> GitConfig<'a> {
    /// Create a store for the repository containing `repo_dir`.
    pub fn new(git: &'a dyn Git, repo_dir: &'a Path) -> Self {
        Self { git, repo_dir }
    }
}

impl ConfigStore for GitConfig<'_> {
    fn enable_worktree_config(&self) -> Result<()> {
        self.git
            .run(self.repo_dir, &["config", WORKTREE_CONFIG_EXTENSION, "true"])?;
        Ok(())
    }

    fn worktree_ignored(&self, worktree: &Path) -> bool {
        match self
            .git
            .try_run(worktree, &["config", "--worktree", "--get", WORKTREE_IGNORE_KEY])
        {
            Ok(Some(value)) => value.trim() == "true",
            Ok(None) => false,
            Err(err) => {
                debug!("reading ignore flag in {} failed: {err}", worktree.display());
                false
            }
        }
    }

    fn set_worktree_ignored(&self, worktree: &Path) -> Result<()> {
        self.git
            .run(worktree, &["config", "--worktree", WORKTREE_IGNORE_KEY, "true"])?;
        Ok(())
    }

    fn clear_worktree_ignored(&self, worktree: &Path) -> Result<()> {
        self.git.try_run(
            worktree,
            &["config", "--worktree", "--unset", WORKTREE_IGNORE_KEY],
        )?;
        Ok(())
    }

    fn ignored_branches(&self) -> Vec<String> {
        match self
            .git
            .try_run(self.repo_dir, &["config", "--get", IGNORED_BRANCHES_KEY])
        {
            Ok(Some(value)) => parse_ignored_branches(&value),
            Ok(None) => Vec::new(),
            Err(err) => {
                debug!("reading {IGNORED_BRANCHES_KEY} failed: {err}");
                Vec::new()
            }
        }
    }

    fn set_ignored_branches(&self, names: &[String]) -> Result<()> {
        let value = names.join(" ");
        self.git
            .run(self.repo_dir, &["config", IGNORED_BRANCHES_KEY, &value])?;
        Ok(())
    }
}
