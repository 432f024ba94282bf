//! User-facing diagnostics.
//!
//! Every failure shown to the user names the dependency and platform it
//! concerns, plus the steps needed to finish the job by hand.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

/// Shared suggestion texts.
pub mod suggestions {
    /// No `package.json` above the working directory.
    pub const NO_MANIFEST: &str = "Run nativelink from the app root or pass `--root <dir>`";

    /// Dependency missing from `node_modules`.
    pub const NOT_INSTALLED: &str = "Install the package with your package manager first";

    /// `project.pbxproj` does not parse.
    pub const BROKEN_PBXPROJ: &str =
        "Open the project in Xcode once to let it rewrite project.pbxproj";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

/// A message plus where it happened, why, and what to do about it.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    location: Option<PathBuf>,
    context: Vec<String>,
    suggestions: Vec<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            location: None,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message)
    }

    /// Add a line explaining the cause.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a step the user can take.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Point at the file concerned.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal, with ANSI colors if `color`.
    ///
    /// A single suggestion is shown inline; several are numbered.
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[1;{}m{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };
        let severity = match self.severity {
            Severity::Error => paint("31", "error"),
            Severity::Warning => paint("33", "warning"),
        };

        let mut out = format!("{}: {}\n", severity, self.message);
        if let Some(path) = &self.location {
            let _ = writeln!(out, "  --> {}", path.display());
        }
        for line in &self.context {
            let _ = writeln!(out, "  = {}", line);
        }
        let help = paint("32", "help");
        match self.suggestions.as_slice() {
            [] => {}
            [only] => {
                let _ = writeln!(out, "{}: {}", help, only);
            }
            many => {
                let _ = writeln!(out, "{}: to finish by hand:", help);
                for (i, step) in many.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", i + 1, step);
                }
            }
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
