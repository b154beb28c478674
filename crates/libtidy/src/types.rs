use std::path::PathBuf;

/// A worktree as reported by `git worktree list --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worktree {
    /// Absolute path of the worktree. Unique within a repository.
    pub path: PathBuf,
    /// Short name of the checked-out branch, or `None` when HEAD is detached.
    pub branch: Option<String>,
    /// Git reports the worktree as prunable: its directory no longer exists.
    pub prunable: bool,
}

/// A linked worktree whose checked-out branch no longer exists upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovableWorktree {
    /// Filesystem path of the worktree.
    pub path: PathBuf,
    /// Whether a previous run recorded that the user chose to keep this worktree.
    pub ignored: bool,
}

/// A local branch that is eligible for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovableBranch {
    /// Short branch name.
    pub name: String,
    /// Whether the branch is in the persisted ignored-branches list.
    pub ignored: bool,
}

/// One line of the combined branch listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEntry {
    /// Short branch name.
    pub name: String,
    /// Whether the branch's upstream was deleted.
    pub gone: bool,
}

/// Options controlling a full clean run.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Skip fetching from remotes before classification.
    pub skip_fetch: bool,
    /// Fetch only this remote instead of all remotes.
    pub remote: Option<String>,
    /// Accept the default selection instead of prompting.
    pub no_prompt: bool,
}

/// What a clean run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Worktrees that were force-removed.
    pub removed_worktrees: Vec<PathBuf>,
    /// Worktrees newly marked as ignored.
    pub ignored_worktrees: Vec<PathBuf>,
    /// Branches that were force-deleted.
    pub deleted_branches: Vec<String>,
    /// The ignored-branches list written at the end of the run.
    pub ignored_branches: Vec<String>,
}

impl CleanReport {
    /// True when the run neither removed nor deleted anything.
    pub fn is_noop(&self) -> bool {
        self.removed_worktrees.is_empty() && self.deleted_branches.is_empty()
    }
}

/// Everything currently remembered as "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredState {
    /// Persisted ignored branch names, in stored order.
    pub branches: Vec<String>,
    /// Linked worktrees whose ignore flag is set.
    pub worktrees: Vec<PathBuf>,
}
