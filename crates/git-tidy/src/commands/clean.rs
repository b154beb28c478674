use anyhow::Result;
use liboutput::Output;
use libtidy::{CleanOptions, Tidy};

use crate::ui::render_clean_report;

/// Run the `git-tidy clean` command logic.
pub fn clean(tidy: &Tidy, output: &dyn Output, options: &CleanOptions) -> Result<()> {
    let report = tidy.clean(output, options)?;
    render_clean_report(output, &report)
}
