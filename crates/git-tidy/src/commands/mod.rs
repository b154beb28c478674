//! Command handlers for the git-tidy CLI.

/// Handler for the default clean-up run.
pub mod clean;
/// Handler for `git-tidy ignored`.
pub mod ignored;
