use std::{io, result::Result as StdResult};

use liboutput::OutputError;
use thiserror::Error;

/// Custom Result type for tidy operations.
pub type Result<T> = StdResult<T, TidyError>;

/// Tidy-specific error types
#[derive(Error, Debug)]
pub enum TidyError {
    /// The operation was cancelled by the user.
    #[error("Aborted by user")]
    UserAborted,

    /// A contextual precondition failed (e.g. not inside a Git repo).
    #[error("Context error: {0}")]
    ContextError(String),

    /// A git command exited unsuccessfully.
    #[error("Git command failed: {command}\nError: {message}")]
    GitError {
        /// The command line that failed, e.g. `git branch -D foo`.
        command: String,
        /// Trimmed stderr reported by git.
        message: String,
    },

    /// Rendering output or prompting the user failed.
    #[error("Output operation failed: {0}")]
    OutputError(String),

    /// An underlying I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl TidyError {
    /// Return the recommended process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UserAborted => 130,
            Self::ContextError(_) => 2,
            Self::GitError { .. } => 4,
            _ => 1,
        }
    }
}

impl From<OutputError> for TidyError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::Cancelled => Self::UserAborted,
            other => Self::OutputError(other.to_string()),
        }
    }
}
