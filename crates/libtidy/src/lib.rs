#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
//! Core library for tidying up local Git branches and linked worktrees whose
//! upstream branch has been deleted.
//!
//! The [`Tidy`] type drives a full run: fetch, classify, prompt, mutate and
//! remember what the user chose to keep. The lower-level pieces are exposed so
//! callers can drive individual phases themselves. The CLI binary in
//! `crates/git-tidy` builds on top of this library.

/// Recognising backup branch names.
mod backup;
/// Deciding which worktrees and branches are removable.
mod classify;
/// Persisted "keep" state.
mod config;
/// Error type shared by every operation.
mod error;
/// Running git.
mod git;
/// Destructive operations on worktrees and branches.
mod mutate;
/// Parsers for git's textual output.
mod parse;
/// Scripted git and output doubles for unit tests.
#[cfg(test)]
mod testing;
/// High-level orchestration of a clean-up run.
mod tidy;
/// Plain data types passed between phases.
mod types;

/// Re-export of the backup name matcher.
pub use backup::backup_parent;
/// Re-exports of the classification phase.
pub use classify::{classify_branches, classify_worktrees, list_worktrees, removable_branches};
/// Re-exports of the config store abstraction.
pub use config::{ConfigStore, GitConfig, IGNORED_BRANCHES_KEY, WORKTREE_IGNORE_KEY};
/// Re-export of the error type.
pub use error::{Result, TidyError};
/// Re-exports of the git executor abstraction.
pub use git::{Git, GitCommand, find_root};
/// Re-exports of the mutation phase.
pub use mutate::{delete_branches, delete_worktree, ignore_worktree};
/// Re-exports of the output parsers.
pub use parse::{
    branch_worktrees, has_gone_head, parse_branch_listing, parse_ignored_branches,
    parse_worktree_list,
};
/// Re-export of the orchestrator.
pub use tidy::Tidy;
/// Re-exports of the data types.
pub use types::{
    BranchEntry, CleanOptions, CleanReport, IgnoredState, RemovableBranch, RemovableWorktree,
    Worktree,
};
