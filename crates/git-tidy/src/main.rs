#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
//! Command-line interface for tidying gone branches and worktrees via the
//! libtidy crate. Installed as `git-tidy`, so it also runs as `git tidy`.

use std::{
    io::{self, IsTerminal, Write},
    process,
    sync::Arc,
};

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use liboutput::{Output, Quiet, Terminal};
use libtidy::{CleanOptions, Tidy, TidyError};
use log::{LevelFilter, debug};

/// CLI argument definitions.
mod args;
/// Command handlers.
mod commands;
/// Rendering helpers shared by the commands.
mod ui;
/// Path and configuration helpers.
mod utils;

use args::{Cli, Commands};
use ui::emit;
use utils::{expand_tilde, flag_or_env};

/// Environment variable naming the repository directory.
const REPO_DIR_ENV: &str = "GIT_TIDY_REPO_DIR";

/// Environment variable naming the single remote to fetch.
const REMOTE_ENV: &str = "GIT_TIDY_REMOTE";

/// Route `log` records to stderr.
///
/// `--verbose` forces debug level and ignores `RUST_LOG`; otherwise `RUST_LOG`
/// applies and logging defaults to off.
fn init_logging(verbose: u8) {
    let mut builder = if verbose >= 1 {
        let mut b = Builder::new();
        b.filter_level(LevelFilter::Debug);
        b
    } else {
        Builder::from_env(Env::default().default_filter_or("off"))
    };
    builder.format_timestamp(None).format_target(false).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Determine color output preference early for error handling
    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };

    let output: Arc<dyn Output> = if cli.quiet {
        Arc::new(Quiet)
    } else {
        Arc::new(Terminal::new(color))
    };

    if let Err(e) = run(cli, &output) {
        // Reset any existing colors only if color was enabled and stdout is a TTY
        if color && io::stdout().is_terminal() {
            print!("\x1b[0m");
            if let Err(flush_err) = io::stdout().flush() {
                eprintln!("Failed to flush stdout while resetting colors: {flush_err}");
            }
        }

        let exit_code = match e.downcast_ref::<TidyError>() {
            Some(err @ TidyError::UserAborted) => {
                if let Err(finish_err) = output.finish() {
                    eprintln!("Failed to flush output handler: {finish_err:#}");
                }
                err.exit_code()
            }
            other => {
                if let Err(display_err) = output.fail(&format!("{e:#}")) {
                    eprintln!("Failed to report error via output handler: {display_err:#}");
                }
                if let Err(finish_err) = output.finish() {
                    eprintln!("Failed to flush output handler: {finish_err:#}");
                }
                other.map_or(1, TidyError::exit_code)
            }
        };

        process::exit(exit_code);
    }
    Ok(())
}

/// Execute the selected CLI command using the provided output implementation.
fn run(cli: Cli, output: &Arc<dyn Output>) -> Result<()> {
    // Priority: CLI flag > env var > enclosing repository
    let repo_dir = flag_or_env(cli.repo_dir.as_deref(), REPO_DIR_ENV).map(|dir| expand_tilde(&dir));
    let tidy = Tidy::new(repo_dir)?;
    debug!("tidying {}", tidy.repo_dir().display());

    match cli.command.unwrap_or(Commands::Clean) {
        Commands::Clean => {
            let options = CleanOptions {
                skip_fetch: cli.no_fetch,
                remote: flag_or_env(cli.remote.as_deref(), REMOTE_ENV),
                // Quiet output has no way to prompt.
                no_prompt: cli.no_prompt || cli.quiet,
            };
            commands::clean::clean(&tidy, output.as_ref(), &options)?;
        }
        Commands::Ignored { clear } => {
            commands::ignored::ignored(&tidy, output.as_ref(), clear)?;
        }
    }

    emit(output.finish())
}
