use anyhow::Result;
use liboutput::{Output, OutputError};
use libtidy::{CleanReport, IgnoredState, TidyError};
use std::result::Result as StdResult;

/// Emit an output result, mapping errors into `TidyError`.
pub fn emit(result: StdResult<(), OutputError>) -> Result<()> {
    result.map_err(TidyError::from)?;
    Ok(())
}

/// Format `count` with the matching noun form.
fn counted(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// One-line summary of a clean run.
pub fn summary_line(report: &CleanReport) -> String {
    if report.is_noop() {
        return "Nothing to tidy".to_string();
    }
    format!(
        "Removed {} and deleted {}",
        counted(report.removed_worktrees.len(), "worktree", "worktrees"),
        counted(report.deleted_branches.len(), "branch", "branches")
    )
}

/// Render the outcome of a clean run.
pub fn render_clean_report(output: &dyn Output, report: &CleanReport) -> Result<()> {
    if !report.ignored_worktrees.is_empty() || !report.ignored_branches.is_empty() {
        let kept = report.ignored_worktrees.len() + report.ignored_branches.len();
        emit(output.message(&format!(
            "Keeping {} for next time",
            counted(kept, "ignored item", "ignored items")
        )))?;
    }
    if report.is_noop() {
        emit(output.message(&summary_line(report)))
    } else {
        emit(output.success(&summary_line(report)))
    }
}

/// Render the remembered "keep" state.
pub fn render_ignored(output: &dyn Output, state: &IgnoredState) -> Result<()> {
    if state.branches.is_empty() && state.worktrees.is_empty() {
        emit(output.message("Nothing is ignored."))?;
        return Ok(());
    }

    if !state.branches.is_empty() {
        let section = output.section("ignored branches");
        for branch in &state.branches {
            emit(section.message(branch))?;
        }
    }
    if !state.worktrees.is_empty() {
        let section = output.section("ignored worktrees");
        for path in &state.worktrees {
            emit(section.message(&path.display().to_string()))?;
        }
    }
    Ok(())
}
