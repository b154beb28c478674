use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use log::debug;

use crate::error::{Result, TidyError};

/// Runs the `git` binary on behalf of the classifier and mutator.
///
/// Every piece of repository state is read and written through this seam, so
/// the decision logic never spawns processes itself.
pub trait Git: Send + Sync {
    /// Run `git args...` in `dir` and return its stdout. A non-zero exit is an
    /// error.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String>;

    /// Run `git args...` in `dir`, returning `Ok(None)` on a non-zero exit.
    ///
    /// Used for lookups where failure means "not set" (e.g. a missing config
    /// key). Failing to spawn git at all is still an error.
    fn try_run(&self, dir: &Path, args: &[&str]) -> Result<Option<String>>;
}

/// Render an argument vector the way a user would type it.
pub(crate) fn command_line(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

/// [`Git`] implementation that spawns the real `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCommand;

impl GitCommand {
    /// Spawn git and capture its output without interpreting the exit status.
    fn output(dir: &Path, args: &[&str]) -> Result<Output> {
        debug!("{} (in {})", command_line(args), dir.display());
        Command::new("git")
            .current_dir(dir)
            .args(args)
            // Tracking annotations such as "[gone]" are translated otherwise.
            .env("LC_ALL", "C")
            .output()
            .map_err(|err| TidyError::GitError {
                command: command_line(args),
                message: format!("failed to execute git: {err}"),
            })
    }
}

impl Git for GitCommand {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let output = Self::output(dir, args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TidyError::GitError {
                command: command_line(args),
                message: stderr.trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn try_run(&self, dir: &Path, args: &[&str]) -> Result<Option<String>> {
        let output = Self::output(dir, args)?;
        if !output.status.success() {
            debug!(
                "{} exited with {}; treating as unset",
                command_line(args),
                output.status
            );
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

/// Walk up from `start_dir` to find the nearest directory containing a `.git`
/// entry (a directory for the primary worktree, a file for linked ones).
pub fn find_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Borrow `path` as a git argument, rejecting paths that are not valid UTF-8.
pub(crate) fn path_arg(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        TidyError::ContextError(format!("Path is not valid UTF-8: {}", path.display()))
    })
}
