//! In-memory stand-ins for git and the terminal, used by unit tests.

use std::{
    collections::{HashMap, VecDeque},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use liboutput::{MultiSelectOption, Output, OutputError, Spinner};

use crate::{
    error::{Result, TidyError},
    git::{Git, command_line},
};

/// Key identifying one scripted invocation: working directory plus joined args.
type CallKey = (PathBuf, String);

/// Emulated `git config` state.
#[derive(Default)]
struct ConfigState {
    /// Repository-scoped values.
    repo: HashMap<String, String>,
    /// Worktree-scoped values keyed by worktree directory.
    worktree: HashMap<CallKey, String>,
}

/// A [`Git`] that answers from a script and records every call.
///
/// Unscripted `run` calls succeed with empty output; unscripted `try_run`
/// calls report failure, which is how an unset config key looks.
#[derive(Default)]
pub struct ScriptedGit {
    /// Canned stdout per call.
    responses: HashMap<CallKey, String>,
    /// Calls that exit non-zero.
    failures: Vec<CallKey>,
    /// Config emulation, when enabled.
    config: Option<Mutex<ConfigState>>,
    /// Every call in the order it was issued.
    calls: Mutex<Vec<CallKey>>,
}

impl ScriptedGit {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `git args` in `dir` with `stdout`.
    pub fn respond(mut self, dir: &str, args: &[&str], stdout: &str) -> Self {
        self.responses
            .insert((PathBuf::from(dir), args.join(" ")), stdout.to_string());
        self
    }

    /// Make `git args` in `dir` exit non-zero.
    pub fn fail(mut self, dir: &str, args: &[&str]) -> Self {
        self.failures.push((PathBuf::from(dir), args.join(" ")));
        self
    }

    /// Emulate `git config` reads and writes instead of scripting them.
    pub fn with_config_store(mut self) -> Self {
        self.config = Some(Mutex::new(ConfigState::default()));
        self
    }

    /// All recorded calls as `(dir, joined args)`.
    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Joined args of every recorded call starting with `prefix`.
    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(_, args)| args)
            .filter(|args| args.starts_with(prefix))
            .collect()
    }

    /// Handle a config invocation. `None` when `args` is not a config call.
    fn config_call(&self, dir: &Path, args: &[&str]) -> Option<Option<String>> {
        let mut state = self.config.as_ref()?.lock().expect("config lock");
        let worktree_key = |key: &str| (dir.to_path_buf(), key.to_string());
        let outcome = match args {
            ["config", "--get", key] => state.repo.get(*key).map(|v| format!("{v}\n")),
            ["config", "--worktree", "--get", key] => state
                .worktree
                .get(&worktree_key(*key))
                .map(|v| format!("{v}\n")),
            ["config", "--worktree", "--unset", key] => state
                .worktree
                .remove(&worktree_key(*key))
                .map(|_| String::new()),
            ["config", "--worktree", key, value] => {
                state.worktree.insert(worktree_key(*key), value.to_string());
                Some(String::new())
            }
            ["config", key, value] => {
                state.repo.insert(key.to_string(), value.to_string());
                Some(String::new())
            }
            _ => return None,
        };
        Some(outcome)
    }

    /// Record the call and work out its outcome; `None` means a non-zero exit.
    fn dispatch(&self, dir: &Path, args: &[&str], unscripted: Option<String>) -> Option<String> {
        let key = (dir.to_path_buf(), args.join(" "));
        self.calls.lock().expect("calls lock").push(key.clone());

        if self.failures.contains(&key) {
            return None;
        }
        if let Some(stdout) = self.responses.get(&key) {
            return Some(stdout.clone());
        }
        if let Some(outcome) = self.config_call(dir, args) {
            return outcome;
        }
        unscripted
    }
}

impl Git for ScriptedGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        self.dispatch(dir, args, Some(String::new()))
            .ok_or_else(|| TidyError::GitError {
                command: command_line(args),
                message: "scripted failure".to_string(),
            })
    }

    fn try_run(&self, dir: &Path, args: &[&str]) -> Result<Option<String>> {
        Ok(self.dispatch(dir, args, None))
    }
}

/// An [`Output`] that records messages and answers prompts from a queue.
#[derive(Default)]
pub struct ScriptedOutput {
    /// Every message, success, warning and failure line, shared with sections.
    messages: Arc<Mutex<Vec<String>>>,
    /// Prompts shown, with the options offered.
    prompts: Mutex<Vec<(String, Vec<MultiSelectOption>)>>,
    /// Answers handed out to successive multi-select prompts.
    answers: Mutex<VecDeque<Vec<usize>>>,
}

impl ScriptedOutput {
    /// Create an output with no queued answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the indices returned by the next multi-select prompt.
    pub fn answer(self, indices: &[usize]) -> Self {
        self.answers
            .lock()
            .expect("answers lock")
            .push_back(indices.to_vec());
        self
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<(String, Vec<MultiSelectOption>)> {
        self.prompts.lock().expect("prompts lock").clone()
    }

    /// Lines written so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("messages lock").clone()
    }

    /// Append a line to the transcript.
    fn record(&self, msg: &str) {
        self.messages
            .lock()
            .expect("messages lock")
            .push(msg.to_string());
    }
}

impl Output for ScriptedOutput {
    fn message(&self, msg: &str) -> liboutput::Result<()> {
        self.record(msg);
        Ok(())
    }

    fn success(&self, msg: &str) -> liboutput::Result<()> {
        self.record(msg);
        Ok(())
    }

    fn warn(&self, msg: &str) -> liboutput::Result<()> {
        self.record(msg);
        Ok(())
    }

    fn fail(&self, msg: &str) -> liboutput::Result<()> {
        self.record(msg);
        Ok(())
    }

    fn multi_select(
        &self,
        prompt: &str,
        options: &[MultiSelectOption],
    ) -> liboutput::Result<Vec<usize>> {
        if options.is_empty() {
            return Err(OutputError::InvalidInput(
                "No options provided for selection",
            ));
        }
        self.prompts
            .lock()
            .expect("prompts lock")
            .push((prompt.to_string(), options.to_vec()));
        self.answers
            .lock()
            .expect("answers lock")
            .pop_front()
            .ok_or(OutputError::Cancelled)
    }

    fn spinner(&self, _msg: &str) -> Spinner {
        Spinner::hidden()
    }

    fn finish(&self) -> liboutput::Result<()> {
        Ok(())
    }

    fn section(&self, header: &str) -> Box<dyn Output> {
        self.record(header);
        Box::new(Self {
            messages: Arc::clone(&self.messages),
            ..Self::default()
        })
    }
}
