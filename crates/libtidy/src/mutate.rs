//! Destructive operations. Each one tells the user what it is about to do
//! before it does it, and every failure is fatal.

use std::{path::Path, thread};

use liboutput::Output;

use crate::{
    classify::{join, list_worktrees},
    config::ConfigStore,
    error::Result,
    git::{Git, path_arg},
    parse::branch_worktrees,
};

/// Force-remove the worktree at `path`, discarding uncommitted changes.
///
/// `repo_dir` must be a worktree other than `path`; the primary worktree is
/// the usual choice.
pub fn delete_worktree(
    git: &dyn Git,
    output: &dyn Output,
    repo_dir: &Path,
    path: &Path,
) -> Result<()> {
    let path_str = path_arg(path)?;
    output.message(&format!("Removing worktree {path_str}"))?;
    git.run(repo_dir, &["worktree", "remove", "--force", path_str])?;
    Ok(())
}

/// Remember that the user wants to keep the worktree at `path`.
pub fn ignore_worktree(config: &dyn ConfigStore, output: &dyn Output, path: &Path) -> Result<()> {
    output.message(&format!("Ignoring worktree {}", path.display()))?;
    config.enable_worktree_config()?;
    config.set_worktree_ignored(path)
}

/// Force-delete `names` with a single `git branch -D`.
///
/// Git refuses to delete a branch that is checked out anywhere, so every
/// worktree holding one of `names` is switched to a detached HEAD first. The
/// detaches run concurrently and all finish before the delete starts. Does
/// nothing at all when `names` is empty.
pub fn delete_branches(
    git: &dyn Git,
    output: &dyn Output,
    repo_dir: &Path,
    names: &[String],
) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }

    let holders = branch_worktrees(&list_worktrees(git, repo_dir)?);
    let to_detach: Vec<&Path> = names
        .iter()
        .filter_map(|name| holders.get(name).map(|path| path.as_path()))
        .collect();

    thread::scope(|scope| {
        let pending: Vec<_> = to_detach
            .iter()
            .map(|worktree| scope.spawn(move || detach_head(git, output, worktree)))
            .collect();
        pending.into_iter().try_for_each(join)
    })?;

    output.message(&format!("Deleting branches: {}", names.join(" ")))?;
    let mut args = vec!["branch", "-D"];
    args.extend(names.iter().map(String::as_str));
    git.run(repo_dir, &args)?;
    Ok(())
}

/// Switch `worktree` to a detached HEAD at its current commit.
fn detach_head(git: &dyn Git, output: &dyn Output, worktree: &Path) -> Result<()> {
    output.message(&format!("Detaching HEAD in {}", worktree.display()))?;
    git.run(worktree, &["switch", "--detach"])?;
    Ok(())
}
