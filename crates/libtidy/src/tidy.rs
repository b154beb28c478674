use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use liboutput::{MultiSelectOption, Output};
use log::debug;

use crate::{
    classify::{classify_branches, classify_worktrees, list_worktrees},
    config::{ConfigStore, GitConfig},
    error::{Result, TidyError},
    git::{self, Git, GitCommand},
    mutate::{delete_branches, delete_worktree, ignore_worktree},
    types::{
        CleanOptions, CleanReport, IgnoredState, RemovableBranch, RemovableWorktree, Worktree,
    },
};

/// Prompt shown for the worktree phase.
const WORKTREE_PROMPT: &str = "Worktrees whose branch was deleted upstream (unchecked ones are kept and remembered)";

/// Prompt shown for the branch phase.
const BRANCH_PROMPT: &str = "Branches to delete (unchecked ones are kept and remembered)";

/// Ask the user which of `items` to act on.
///
/// Returns one flag per item. `label` and `checked` shape each row. An empty
/// `items` never reaches the prompt, and with `no_prompt` the default
/// selection is returned without asking.
fn choose<T>(
    output: &dyn Output,
    prompt: &str,
    items: &[T],
    no_prompt: bool,
    label: impl Fn(&T) -> String,
    checked: impl Fn(&T) -> bool,
) -> Result<Vec<bool>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }
    if no_prompt {
        return Ok(items.iter().map(checked).collect());
    }

    let options: Vec<MultiSelectOption> = items
        .iter()
        .map(|item| MultiSelectOption::new(label(item), checked(item)))
        .collect();
    let chosen = output.multi_select(prompt, &options)?;

    let mut selected = vec![false; items.len()];
    for index in chosen {
        if let Some(flag) = selected.get_mut(index) {
            *flag = true;
        }
    }
    Ok(selected)
}

/// The primary worktree of a listing, or `fallback` when the listing is empty.
fn primary_dir(worktrees: &[Worktree], fallback: &Path) -> PathBuf {
    worktrees
        .first()
        .map_or_else(|| fallback.to_path_buf(), |wt| wt.path.clone())
}

/// Split `items` by the flags returned from [`choose`].
fn partition<T>(items: Vec<T>, selected: &[bool]) -> (Vec<T>, Vec<T>) {
    let (picked, rest): (Vec<_>, Vec<_>) = items
        .into_iter()
        .zip(selected.iter().copied())
        .partition(|(_, flag)| *flag);
    (
        picked.into_iter().map(|(item, _)| item).collect(),
        rest.into_iter().map(|(item, _)| item).collect(),
    )
}

/// Entry point for cleaning one repository.
pub struct Tidy {
    /// Directory inside the repository that git commands run in.
    repo_dir: PathBuf,
    /// Executor for every git invocation.
    git: Box<dyn Git>,
}

impl Tidy {
    /// Open the repository at `repo_dir`, or the one containing the current
    /// directory when `None`.
    pub fn new(repo_dir: Option<PathBuf>) -> Result<Self> {
        let repo_dir = if let Some(dir) = repo_dir {
            dir
        } else {
            let current_dir = env::current_dir().map_err(|_| {
                TidyError::ContextError("Failed to get current directory".to_string())
            })?;
            git::find_root(&current_dir).ok_or(TidyError::ContextError(
                "Not in a git repository".to_string(),
            ))?
        };

        // Git reports absolute worktree paths; keep ours comparable.
        let repo_dir = fs::canonicalize(&repo_dir).map_err(|err| {
            TidyError::ContextError(format!(
                "Cannot resolve repository directory {}: {err}",
                repo_dir.display()
            ))
        })?;
        if !repo_dir.is_dir() {
            return Err(TidyError::ContextError(format!(
                "Repository path is not a directory: {}",
                repo_dir.display()
            )));
        }

        Ok(Self::with_git(repo_dir, Box::new(GitCommand)))
    }

    /// Use a specific executor, e.g. a scripted one in tests.
    pub fn with_git(repo_dir: PathBuf, git: Box<dyn Git>) -> Self {
        Self { repo_dir, git }
    }

    /// The directory git commands run in.
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// The config store for this repository.
    fn config(&self) -> GitConfig<'_> {
        GitConfig::new(self.git.as_ref(), &self.repo_dir)
    }

    /// Fetch so that deleted upstream branches show up as gone.
    pub fn fetch(&self, output: &dyn Output, remote: Option<&str>) -> Result<()> {
        let (label, args) = match remote {
            Some(remote) => (remote.to_string(), vec!["fetch", "--prune", remote]),
            None => ("all remotes".to_string(), vec!["fetch", "--all", "--prune"]),
        };

        let spinner = output.spinner(&format!("Fetching {label}..."));
        match self.git.run(&self.repo_dir, &args) {
            Ok(_) => {
                spinner.finish_success(&format!("Fetched {label}"));
                Ok(())
            }
            Err(err) => {
                spinner.finish_fail(&format!("Failed to fetch {label}"));
                Err(err)
            }
        }
    }

    /// All worktrees, primary first.
    pub fn worktrees(&self) -> Result<Vec<Worktree>> {
        list_worktrees(self.git.as_ref(), &self.repo_dir)
    }

    /// Linked worktrees whose checked-out branch is gone upstream.
    ///
    /// `worktrees` is a listing from [`Tidy::worktrees`]. Worktrees whose
    /// directory is missing cannot be queried and are skipped with a warning.
    pub fn removable_worktrees(
        &self,
        output: &dyn Output,
        worktrees: &[Worktree],
    ) -> Result<Vec<RemovableWorktree>> {
        let primary = primary_dir(worktrees, &self.repo_dir);
        let mut candidates = Vec::new();
        for wt in worktrees.iter().skip(1).filter(|wt| wt.branch.is_some()) {
            if wt.prunable {
                output.warn(&format!(
                    "Skipping missing worktree {} (see git worktree prune)",
                    wt.path.display()
                ))?;
            } else {
                candidates.push(wt.path.clone());
            }
        }
        let config = GitConfig::new(self.git.as_ref(), &primary);
        classify_worktrees(self.git.as_ref(), &config, &candidates)
    }

    /// Local branches eligible for deletion, queried from the primary worktree
    /// of `worktrees`.
    ///
    /// Git refuses to delete a branch still registered to a missing worktree,
    /// so those branches are left out with a warning.
    pub fn removable_branches(
        &self,
        output: &dyn Output,
        worktrees: &[Worktree],
    ) -> Result<Vec<RemovableBranch>> {
        let primary = primary_dir(worktrees, &self.repo_dir);
        let config = GitConfig::new(self.git.as_ref(), &primary);
        let stale: HashMap<&str, &Path> = worktrees
            .iter()
            .filter(|wt| wt.prunable)
            .filter_map(|wt| wt.branch.as_deref().map(|b| (b, wt.path.as_path())))
            .collect();

        let mut removable = Vec::new();
        for branch in classify_branches(self.git.as_ref(), &config, &primary)? {
            match stale.get(branch.name.as_str()) {
                Some(path) => output.warn(&format!(
                    "Skipping branch {}: checked out in missing worktree {}",
                    branch.name,
                    path.display()
                ))?,
                None => removable.push(branch),
            }
        }
        Ok(removable)
    }

    /// Run the full interactive clean-up.
    ///
    /// The worktree phase finishes completely before branches are classified,
    /// since removing a worktree frees the branch it held.
    pub fn clean(&self, output: &dyn Output, options: &CleanOptions) -> Result<CleanReport> {
        let git = self.git.as_ref();
        let mut report = CleanReport::default();

        if !options.skip_fetch {
            self.fetch(output, options.remote.as_deref())?;
        }

        // Everything after the worktree phase runs from the primary worktree:
        // `repo_dir` may be one of the worktrees about to be removed.
        let worktrees = self.worktrees()?;
        let primary = primary_dir(&worktrees, &self.repo_dir);
        let config = GitConfig::new(git, &primary);

        let removable = self.removable_worktrees(output, &worktrees)?;
        debug!("{} removable worktrees", removable.len());
        let selected = choose(
            output,
            WORKTREE_PROMPT,
            &removable,
            options.no_prompt,
            |wt| wt.path.display().to_string(),
            |wt| !wt.ignored,
        )?;
        let (remove, keep) = partition(removable, &selected);

        for wt in remove {
            delete_worktree(git, output, &primary, &wt.path)?;
            report.removed_worktrees.push(wt.path);
        }
        for wt in keep.into_iter().filter(|wt| !wt.ignored) {
            ignore_worktree(&config, output, &wt.path)?;
            report.ignored_worktrees.push(wt.path);
        }

        let worktrees = list_worktrees(git, &primary)?;
        let branches = self.removable_branches(output, &worktrees)?;
        debug!("{} removable branches", branches.len());
        let selected = choose(
            output,
            BRANCH_PROMPT,
            &branches,
            options.no_prompt,
            |branch| branch.name.clone(),
            |branch| !branch.ignored,
        )?;
        let (delete, keep) = partition(branches, &selected);
        let delete: Vec<String> = delete.into_iter().map(|b| b.name).collect();
        let keep: Vec<String> = keep.into_iter().map(|b| b.name).collect();

        delete_branches(git, output, &primary, &delete)?;
        report.deleted_branches = delete;

        if !keep.is_empty() {
            output.message(&format!("Remembering ignored branches: {}", keep.join(" ")))?;
        }
        config.set_ignored_branches(&keep)?;
        report.ignored_branches = keep;

        Ok(report)
    }

    /// Everything currently remembered as "keep".
    pub fn ignored(&self) -> Result<IgnoredState> {
        let config = self.config();
        let worktrees = self
            .worktrees()?
            .into_iter()
            .skip(1)
            .filter(|wt| !wt.prunable && config.worktree_ignored(&wt.path))
            .map(|wt| wt.path)
            .collect();

        Ok(IgnoredState {
            branches: config.ignored_branches(),
            worktrees,
        })
    }

    /// Forget every remembered "keep" so the next run offers everything again.
    pub fn clear_ignored(&self, output: &dyn Output) -> Result<IgnoredState> {
        let config = self.config();
        let state = self.ignored()?;

        for path in &state.worktrees {
            output.message(&format!("Forgetting ignored worktree {}", path.display()))?;
            config.clear_worktree_ignored(path)?;
        }
        if !state.branches.is_empty() {
            output.message(&format!(
                "Forgetting ignored branches: {}",
                state.branches.join(" ")
            ))?;
        }
        config.set_ignored_branches(&[])?;

        Ok(state)
    }
}
