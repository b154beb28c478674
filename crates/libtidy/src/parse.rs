//! Parsers for the text git prints in the formats this crate requests.

use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};

use log::debug;

use crate::types::{BranchEntry, Worktree};

/// Tracking annotation git prints for a branch whose upstream was deleted.
pub const GONE: &str = "[gone]";

/// Line printed for the checked-out branch when its upstream is gone, given
/// the `%(upstream:track) %(HEAD)` format.
const GONE_HEAD_LINE: &str = "[gone] *";

/// Porcelain attribute for a worktree whose directory is missing.
const PRUNABLE: &str = "prunable";

/// Prefix of the branch line in porcelain worktree output.
const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Parse `git worktree list --porcelain` output.
///
/// Blocks are separated by blank lines. The first entry is the primary
/// worktree. Blocks without a `worktree` line are dropped, as are repeated
/// paths. A `prunable` attribute, with or without a reason, marks a worktree
/// whose directory is gone.
pub fn parse_worktree_list(output: &str) -> Vec<Worktree> {
    let mut worktrees: Vec<Worktree> = Vec::new();
    let mut seen = HashSet::new();

    for block in output.split("\n\n") {
        let mut path = None;
        let mut branch = None;
        let mut prunable = false;

        for line in block.lines() {
            if let Some(p) = line.strip_prefix("worktree ") {
                path = Some(PathBuf::from(p));
            } else if let Some(reference) = line.strip_prefix("branch ") {
                let name = reference
                    .strip_prefix(BRANCH_REF_PREFIX)
                    .unwrap_or(reference);
                branch = Some(name.to_string());
            } else if line
                .strip_prefix(PRUNABLE)
                .is_some_and(|reason| reason.is_empty() || reason.starts_with(' '))
            {
                prunable = true;
            }
        }

        let Some(path) = path else {
            if !block.trim().is_empty() {
                debug!("dropping worktree block without a path: {block:?}");
            }
            continue;
        };

        if seen.insert(path.clone()) {
            worktrees.push(Worktree {
                path,
                branch,
                prunable,
            });
        }
    }

    worktrees
}

/// True when `output` (from `git branch --format='%(upstream:track) %(HEAD)'`)
/// shows that the checked-out branch has lost its upstream.
pub fn has_gone_head(output: &str) -> bool {
    output.lines().any(|line| line == GONE_HEAD_LINE)
}

/// Parse the combined `<name>[gone]` branch listing.
pub fn parse_branch_listing(output: &str) -> Vec<BranchEntry> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_suffix(GONE) {
            Some(name) => BranchEntry {
                name: name.to_string(),
                gone: true,
            },
            None => BranchEntry {
                name: line.to_string(),
                gone: false,
            },
        })
        .collect()
}

/// Split a persisted space-joined branch list, keeping first occurrences only.
pub fn parse_ignored_branches(value: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    value
        .split_whitespace()
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Map each checked-out branch to the worktree holding it.
///
/// Detached and prunable worktrees are skipped, since there is nothing to
/// detach. If two worktrees report the same branch the later one wins.
pub fn branch_worktrees(worktrees: &[Worktree]) -> HashMap<String, PathBuf> {
    worktrees
        .iter()
        .filter(|wt| !wt.prunable)
        .filter_map(|wt| wt.branch.clone().map(|branch| (branch, wt.path.clone())))
        .collect()
}
