#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
//! Terminal output abstractions and implementations for user-facing messages and prompts.
//!
//! This crate provides an [`Output`] trait that abstracts over how user messages
//! and interactive prompts are rendered. Implementations include:
//!
//! - [`Terminal`]: A color-capable terminal renderer for production use
//! - [`Quiet`]: A silent implementation that suppresses output (useful for tests)

use std::{
    io::{self, Write},
    result::Result as StdResult,
    time::Duration,
};

use dialoguer::MultiSelect;
use indicatif::{ProgressBar, ProgressStyle};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use thiserror::Error;

/// Indentation level (in spaces) used for nested output sections.
const INDENT: usize = 4;

/// Spinner redraw interval.
const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Errors produced by [`Output`] implementations when interacting with the user
/// or the terminal.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The requested operation is not supported by this output backend.
    #[error("{0}")]
    Unsupported(&'static str),

    /// The caller supplied invalid input (e.g. empty options for a selector).
    #[error("{0}")]
    InvalidInput(&'static str),

    /// A terminal/TTY related failure occurred.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Underlying I/O error while writing/reading to the terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The user cancelled an interactive prompt.
    #[error("Selection cancelled")]
    Cancelled,
}

/// Convenience alias for output-related fallible operations.
pub type Result<T> = StdResult<T, OutputError>;

/// One row of a multi-select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelectOption {
    /// Text shown to the user.
    pub label: String,
    /// Whether the row starts out checked.
    pub checked: bool,
}

impl MultiSelectOption {
    /// Build an option from a label and its initial checked state.
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }
}

/// Progress indicator for a long-running step.
///
/// Hidden spinners (from [`Quiet`]) accept every call and draw nothing.
pub struct Spinner {
    /// The live progress bar, if drawing is enabled.
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// A spinner that never draws.
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    /// Start a ticking spinner showing `msg`.
    fn start(msg: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(SPINNER_TICK);
        Self { bar: Some(bar) }
    }

    /// Stop the spinner, leaving a success line behind.
    pub fn finish_success(&self, msg: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(format!("✓ {msg}"));
        }
    }

    /// Stop the spinner, leaving a failure line behind.
    pub fn finish_fail(&self, msg: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(format!("✗ {msg}"));
        }
    }
}

/// Abstraction over how user-facing messages and prompts are produced.
///
/// Implementations can render to a terminal, suppress output, or emit to other
/// formats (e.g. files or JSON) in the future.
pub trait Output: Send + Sync {
    /// Print an informational message.
    fn message(&self, msg: &str) -> Result<()>;
    /// Print a success message.
    fn success(&self, msg: &str) -> Result<()>;
    /// Print a warning message.
    fn warn(&self, msg: &str) -> Result<()>;
    /// Print an error/failure message.
    fn fail(&self, msg: &str) -> Result<()>;
    /// Present `options` as a checklist and return the indices the user left
    /// checked, in ascending order. Empty `options` is rejected.
    fn multi_select(&self, prompt: &str, options: &[MultiSelectOption]) -> Result<Vec<usize>>;
    /// Start a spinner for a long-running step.
    fn spinner(&self, msg: &str) -> Spinner;
    /// Flush any buffered output.
    fn finish(&self) -> Result<()>;
    /// Create a nested output section that indents subsequent messages.
    fn section(&self, header: &str) -> Box<dyn Output>;
}

/// Output implementation that suppresses all messages and rejects interactive
/// prompts. Useful for non-interactive or test environments.
pub struct Quiet;

impl Output for Quiet {
    fn message(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn success(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn warn(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn fail(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn multi_select(&self, _prompt: &str, _options: &[MultiSelectOption]) -> Result<Vec<usize>> {
        Err(OutputError::Unsupported(
            "Cannot prompt for selection in quiet mode",
        ))
    }

    fn spinner(&self, _msg: &str) -> Spinner {
        Spinner::hidden()
    }

    fn finish(&self) -> Result<()> {
        Ok(())
    }

    fn section(&self, _header: &str) -> Box<dyn Output> {
        Box::new(Self)
    }
}

/// Color-capable terminal renderer for user messages and prompts.
pub struct Terminal {
    /// Whether to emit ANSI color sequences when writing to stdout.
    color_choice: ColorChoice,
    /// Current indentation depth in spaces.
    indent: usize,
}

impl Terminal {
    /// Create a new terminal output.
    ///
    /// - `color`: when `true`, always render colored output; when `false`,
    ///   disable ANSI colors.
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            color_choice,
            indent: 0,
        }
    }

    /// Write `msg` using `color` while honoring the current indentation level.
    fn write_colored(&self, msg: &str, color: Color) -> Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice);
        stdout.set_color(ColorSpec::new().set_fg(Some(color)))?;
        writeln!(stdout, "{}{msg}", " ".repeat(self.indent))?;
        stdout.reset()?;
        stdout.flush()?;
        Ok(())
    }

    /// Prefix `prompt` with the current indentation.
    fn indented(&self, prompt: &str) -> String {
        format!("{}{prompt}", " ".repeat(self.indent))
    }
}

/// Translate a dialoguer failure into an [`OutputError`].
fn prompt_error(err: dialoguer::Error) -> OutputError {
    let io_err = io::Error::from(err);
    if io_err.kind() == io::ErrorKind::Interrupted {
        OutputError::Cancelled
    } else {
        OutputError::Terminal(io_err.to_string())
    }
}

impl Output for Terminal {
    fn message(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Cyan)
    }

    fn success(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Green)
    }

    fn warn(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Rgb(255, 165, 0)) // Orange
    }

    fn fail(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Red)
    }

    fn multi_select(&self, prompt: &str, options: &[MultiSelectOption]) -> Result<Vec<usize>> {
        if options.is_empty() {
            return Err(OutputError::InvalidInput(
                "No options provided for selection",
            ));
        }

        let mut select = MultiSelect::new().with_prompt(self.indented(prompt));
        for option in options {
            select = select.item_checked(&option.label, option.checked);
        }

        let mut chosen = select
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(OutputError::Cancelled)?;
        chosen.sort_unstable();
        Ok(chosen)
    }

    fn spinner(&self, msg: &str) -> Spinner {
        Spinner::start(&self.indented(msg))
    }

    fn finish(&self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn section(&self, header: &str) -> Box<dyn Output> {
        // A failed header write surfaces on the section's first message instead.
        if let Err(err) = self.message(header) {
            eprintln!("Failed to write section header: {err}");
        }

        Box::new(Self {
            color_choice: self.color_choice,
            indent: self.indent + INDENT,
        })
    }
}
