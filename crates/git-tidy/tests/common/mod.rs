#![allow(dead_code)]

use anyhow::{Context, Result, ensure};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Return the path to the compiled `git-tidy` binary for integration-style tests.
pub fn git_tidy_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_git-tidy"))
}

/// Run a git command inside `repo_path`, ensuring it succeeds.
pub fn git(repo_path: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;

    ensure!(
        output.status.success(),
        "git command failed: git {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(output)
}

/// Run a git command and return its trimmed stdout.
pub fn git_stdout(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = git(repo_path, args)?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Set a committer identity so commits work without global config.
fn configure_identity(repo_path: &Path) -> Result<()> {
    git(repo_path, &["config", "user.email", "test@example.com"])?;
    git(repo_path, &["config", "user.name", "Test User"])?;
    Ok(())
}

/// Initialise a new repository at `repo_path` with a README commit on `main`.
pub fn init_repository(repo_path: &Path) -> Result<()> {
    if !repo_path.exists() {
        fs::create_dir_all(repo_path)?;
    }

    git(repo_path, &["init", "-b", "main"])?;
    configure_identity(repo_path)?;

    fs::write(repo_path.join("README.md"), "# Test Project")?;
    git(repo_path, &["add", "README.md"])?;
    git(repo_path, &["commit", "-m", "Initial commit"])?;

    Ok(())
}

/// An origin repository and a clone of it, both inside one temp dir.
pub struct Fixture {
    /// Keeps the directories alive for the duration of the test.
    pub temp_dir: TempDir,
    /// The repository standing in for the remote.
    pub origin: PathBuf,
    /// The local clone git-tidy operates on.
    pub clone: PathBuf,
}

impl Fixture {
    /// Create an origin with one commit and clone it.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let origin = temp_dir.path().join("origin");
        init_repository(&origin)?;

        let clone = temp_dir.path().join("clone");
        let origin_str = origin.to_str().context("non UTF-8 temp path")?;
        let clone_str = clone.to_str().context("non UTF-8 temp path")?;
        git(temp_dir.path(), &["clone", origin_str, clone_str])?;
        configure_identity(&clone)?;

        Ok(Self {
            temp_dir,
            origin,
            clone,
        })
    }

    /// Create `branch` in the clone at the current commit and push it upstream.
    pub fn pushed_branch(&self, branch: &str) -> Result<()> {
        git(&self.clone, &["branch", branch])?;
        git(&self.clone, &["push", "-u", "origin", branch])?;
        Ok(())
    }

    /// Create a linked worktree at `<temp>/<name>` on a new pushed `branch`.
    pub fn pushed_worktree(&self, name: &str, branch: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        let path_str = path.to_str().context("non UTF-8 temp path")?;
        git(&self.clone, &["worktree", "add", "-b", branch, path_str])?;
        git(&path, &["push", "-u", "origin", branch])?;
        Ok(path)
    }

    /// Delete `branch` on the origin, as merging a pull request would.
    pub fn delete_upstream(&self, branch: &str) -> Result<()> {
        git(&self.origin, &["branch", "-D", branch])?;
        Ok(())
    }

    /// Local branch names in the clone.
    pub fn local_branches(&self) -> Result<Vec<String>> {
        let listing = git_stdout(&self.clone, &["branch", "--format=%(refname:short)"])?;
        Ok(listing.lines().map(str::to_string).collect())
    }
}

/// Run `git-tidy` in `repo_path` with the provided arguments.
pub fn run_git_tidy(repo_path: &Path, args: &[&str]) -> Result<Output> {
    Command::new(git_tidy_binary())
        .current_dir(repo_path)
        .env_remove("GIT_TIDY_REPO_DIR")
        .env_remove("GIT_TIDY_REMOTE")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .with_context(|| format!("failed to run git-tidy {}", args.join(" ")))
}

/// Run `git-tidy`, failing with its output if it exits non-zero.
pub fn run_git_tidy_ok(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = run_git_tidy(repo_path, args)?;
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    ensure!(
        output.status.success(),
        "git-tidy {} failed\nstdout: {}\nstderr: {}",
        args.join(" "),
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(stdout)
}
