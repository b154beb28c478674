//! Decide which worktrees and branches are eligible for removal.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    panic,
    thread::{self, ScopedJoinHandle},
};

use crate::{
    backup::backup_parent,
    config::ConfigStore,
    error::Result,
    git::Git,
    parse::{has_gone_head, parse_branch_listing, parse_worktree_list},
    types::{BranchEntry, RemovableBranch, RemovableWorktree, Worktree},
};

/// Format for the per-worktree tracking query.
const TRACKING_FORMAT: &str = "--format=%(upstream:track) %(HEAD)";

/// Format for the combined branch listing: the name, then `[gone]` when the
/// upstream was deleted and nothing otherwise.
const BRANCH_LISTING_FORMAT: &str =
    "--format=%(refname:short)%(if:equals=[gone])%(upstream:track)%(then)[gone]%(end)";

/// Wait for a scoped thread, re-raising its panic on this thread.
pub(crate) fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| panic::resume_unwind(payload))
}

/// List every worktree of the repository containing `repo_dir`.
pub fn list_worktrees(git: &dyn Git, repo_dir: &Path) -> Result<Vec<Worktree>> {
    let output = git.run(repo_dir, &["worktree", "list", "--porcelain"])?;
    Ok(parse_worktree_list(&output))
}

/// Whether the branch checked out in `worktree` has lost its upstream.
fn tracks_gone_upstream(git: &dyn Git, worktree: &Path) -> Result<bool> {
    let output = git.run(worktree, &["branch", TRACKING_FORMAT])?;
    Ok(has_gone_head(&output))
}

/// Keep the candidates whose checked-out branch was deleted upstream.
///
/// Worktree configuration is enabled once up front. Each candidate's tracking
/// query and ignore-flag lookup run on their own threads; results come back in
/// candidate order. Candidates that do not qualify are left out entirely.
pub fn classify_worktrees(
    git: &dyn Git,
    config: &dyn ConfigStore,
    candidates: &[PathBuf],
) -> Result<Vec<RemovableWorktree>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    config.enable_worktree_config()?;

    thread::scope(|scope| {
        let pending: Vec<_> = candidates
            .iter()
            .map(|path| {
                let gone = scope.spawn(move || tracks_gone_upstream(git, path));
                let ignored = scope.spawn(move || config.worktree_ignored(path));
                (path, gone, ignored)
            })
            .collect();

        let mut removable = Vec::new();
        for (path, gone, ignored) in pending {
            let gone = join(gone)?;
            let ignored = join(ignored);
            if gone {
                removable.push(RemovableWorktree {
                    path: path.clone(),
                    ignored,
                });
            }
        }
        Ok(removable)
    })
}

/// List local branches and pick out the removable ones.
pub fn classify_branches(
    git: &dyn Git,
    config: &dyn ConfigStore,
    repo_dir: &Path,
) -> Result<Vec<RemovableBranch>> {
    let output = git.run(repo_dir, &["branch", BRANCH_LISTING_FORMAT])?;
    let entries = parse_branch_listing(&output);
    let ignored = config.ignored_branches();
    Ok(removable_branches(&entries, &ignored))
}

/// Apply the removal rules to a branch listing.
///
/// A branch is removable when it is merged (upstream gone), when it is a
/// backup of a merged branch, or when it is a backup whose parent no longer
/// exists locally. Listing order is preserved.
pub fn removable_branches(entries: &[BranchEntry], ignored: &[String]) -> Vec<RemovableBranch> {
    let existing: HashSet<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    let merged: HashSet<&str> = entries
        .iter()
        .filter(|e| e.gone)
        .map(|e| e.name.as_str())
        .collect();
    let ignored: HashSet<&str> = ignored.iter().map(String::as_str).collect();

    entries
        .iter()
        .filter(|entry| {
            let name = entry.name.as_str();
            let parent = backup_parent(name);
            let merged_or_backup_of_merged =
                merged.contains(name) || parent.is_some_and(|p| merged.contains(p));
            let orphaned_backup = parent.is_some_and(|p| !existing.contains(p));
            merged_or_backup_of_merged || orphaned_backup
        })
        .map(|entry| RemovableBranch {
            name: entry.name.clone(),
            ignored: ignored.contains(entry.name.as_str()),
        })
        .collect()
}
