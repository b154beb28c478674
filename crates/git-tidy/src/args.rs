use clap::{ArgAction, ArgGroup, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("color_mode")
        .args(["color", "no_color"])
))]
/// Top-level CLI options for git-tidy.
pub struct Cli {
    /// Override the repository directory (defaults to current git project)
    #[arg(long, global = true, value_name = "DIR")]
    pub repo_dir: Option<String>,

    /// Fetch only this remote instead of all remotes
    #[arg(long, global = true, value_name = "NAME")]
    pub remote: Option<String>,

    /// Skip fetching before looking for gone branches
    #[arg(long, global = true)]
    pub no_fetch: bool,

    /// Accept the default selection instead of prompting
    #[arg(long, global = true)]
    pub no_prompt: bool,

    /// Enable colored output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Suppress all output (implies --no-prompt)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log every git invocation to stderr
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    /// The command to execute; cleans up when omitted.
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
/// CLI subcommands supported by git-tidy.
pub enum Commands {
    /// Remove worktrees and branches whose upstream is gone (the default)
    Clean,

    /// Show branches and worktrees remembered as kept
    Ignored {
        /// Forget them all so the next run offers them again
        #[arg(long)]
        clear: bool,
    },
}
