//! Command output.
//!
//! Human output is a column of right-aligned status labels on stderr, so
//! that stdout stays free for data (`list`, `config`, completions). With
//! `--message-format json`, status lines are suppressed and each event is a
//! single JSON object on stdout.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::str::FromStr;

const LABEL_WIDTH: usize = 12;
const RESET: &str = "\x1b[0m";

/// How much human output to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    #[default]
    Normal,
    /// Also list every file written
    Verbose,
}

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color when stderr is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                other
            )),
        }
    }
}

/// Label of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Linked,
    Unlinked,
    Finished,
    Resolving,
    Info,
    Skipped,
    Manual,
    Warning,
    Error,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Linked => "Linked",
            Status::Unlinked => "Unlinked",
            Status::Finished => "Finished",
            Status::Resolving => "Resolving",
            Status::Info => "Info",
            Status::Skipped => "Skipped",
            Status::Manual => "Manual",
            Status::Warning => "Warning",
            Status::Error => "error",
        }
    }

    /// Bold ANSI color: green for changes, cyan for progress, blue for
    /// information, yellow for things left undone, red for errors.
    fn color(self) -> &'static str {
        match self {
            Status::Linked | Status::Unlinked | Status::Finished => "\x1b[1;32m",
            Status::Resolving => "\x1b[1;36m",
            Status::Info => "\x1b[1;34m",
            Status::Skipped | Status::Manual | Status::Warning => "\x1b[1;33m",
            Status::Error => "\x1b[1;31m",
        }
    }
}

/// Output sink shared by all commands.
#[derive(Debug)]
pub struct Shell {
    json: bool,
    verbosity: Verbosity,
    color: bool,
}

impl Shell {
    /// Human output.
    pub fn human(verbosity: Verbosity, color: ColorChoice) -> Self {
        Shell {
            json: false,
            verbosity,
            color: color.enabled(),
        }
    }

    /// JSON output; status lines are dropped and colors disabled.
    pub fn json() -> Self {
        Shell {
            json: true,
            verbosity: Verbosity::Normal,
            color: false,
        }
    }

    /// Build a shell from the global flags. JSON wins over quiet and
    /// verbose.
    pub fn from_flags(quiet: bool, verbose: bool, color: ColorChoice, json: bool) -> Self {
        if json {
            return Shell::json();
        }
        let verbosity = match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        };
        Shell::human(verbosity, color)
    }

    pub fn is_quiet(&self) -> bool {
        !self.json && self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        !self.json && self.verbosity == Verbosity::Verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn use_color(&self) -> bool {
        self.color
    }

    /// Print `{label:>12} {message}` to stderr.
    ///
    /// Quiet mode keeps only errors; JSON mode prints nothing.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.json || (self.is_quiet() && status != Status::Error) {
            return;
        }
        eprintln!("{} {}", self.label(status), msg);
    }

    pub fn note(&self, msg: impl Display) {
        self.status(Status::Info, msg);
    }

    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Report an error, as an `error` event in JSON mode.
    pub fn error(&self, msg: impl Display) {
        if self.json {
            self.json_event(&serde_json::json!({
                "reason": "error",
                "message": msg.to_string(),
            }));
        } else {
            self.status(Status::Error, msg);
        }
    }

    /// Print one JSON event line on stdout. Ignored in human mode.
    pub fn json_event(&self, event: &serde_json::Value) {
        if !self.json {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = serde_json::to_writer(&mut stdout, event);
        let _ = writeln!(stdout);
        let _ = stdout.flush();
    }

    fn label(&self, status: Status) -> String {
        let padded = format!("{:>width$}", status.label(), width = LABEL_WIDTH);
        if self.color {
            format!("{}{}{}", status.color(), padded, RESET)
        } else {
            padded
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::human(Verbosity::Normal, ColorChoice::Auto)
    }
}
