use anyhow::Result;
use liboutput::Output;
use libtidy::Tidy;

use crate::ui::{emit, render_ignored};

/// Run the `git-tidy ignored` command logic.
pub fn ignored(tidy: &Tidy, output: &dyn Output, clear: bool) -> Result<()> {
    if !clear {
        let state = tidy.ignored()?;
        return render_ignored(output, &state);
    }

    let state = tidy.clear_ignored(output)?;
    let forgotten = state.branches.len() + state.worktrees.len();
    if forgotten == 0 {
        emit(output.message("Nothing was ignored."))
    } else {
        emit(output.success(&format!("Forgot {forgotten} ignored entries")))
    }
}
