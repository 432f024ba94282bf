//! Command implementations

pub mod completions;
pub mod config;
pub mod link;
pub mod list;
pub mod unlink;

use nativelink::ops::{LinkReport, LinkState};
use nativelink::util::diagnostic::{emit, Diagnostic};
use nativelink::util::{Shell, Status};

/// Direction of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Link,
    Unlink,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Link => "link",
            Action::Unlink => "unlink",
        }
    }
}

/// Turn a diagnostic into the command's error.
pub fn diagnostic_error(diagnostic: Diagnostic) -> anyhow::Error {
    let text = diagnostic.format(false);
    let text = text.trim_end();
    anyhow::anyhow!("{}", text.strip_prefix("error: ").unwrap_or(text))
}

/// Print every outcome of a link or unlink run.
pub fn print_report(shell: &Shell, report: &LinkReport, action: Action) {
    if shell.is_json() {
        shell.json_event(&serde_json::json!({
            "reason": format!("{}-report", action.verb()),
            "summary": report.to_string(),
            "dependencies": report.dependencies,
        }));
        return;
    }

    for dependency in &report.dependencies {
        let name = &dependency.name;
        for outcome in &dependency.outcomes {
            let platform = outcome.platform;
            match &outcome.state {
                LinkState::NotApplicable | LinkState::Failed { .. } => {}
                LinkState::AlreadyLinked => shell.status(
                    Status::Skipped,
                    format!("`{}` is already linked on {}", name, platform),
                ),
                LinkState::NotLinked => shell.status(
                    Status::Skipped,
                    format!("`{}` is not linked on {}", name, platform),
                ),
                LinkState::Linked => {
                    shell.status(Status::Linked, format!("`{}` on {}", name, platform))
                }
                LinkState::Unlinked => {
                    shell.status(Status::Unlinked, format!("`{}` on {}", name, platform))
                }
                LinkState::Pending => shell.status(
                    Status::Info,
                    format!("Would {} `{}` on {}", action.verb(), name, platform),
                ),
                LinkState::NeedsManualLinking { steps } => {
                    shell.status(
                        Status::Manual,
                        format!("`{}` on {} needs manual changes", name, platform),
                    );
                    if !shell.is_quiet() {
                        let mut diag = Diagnostic::warning(format!(
                            "{} of `{}` on {} was not applied",
                            action.verb(),
                            name,
                            platform
                        ));
                        for step in steps {
                            diag = diag.with_suggestion(format!(
                                "{}: {}",
                                step.path.display(),
                                step.instruction
                            ));
                        }
                        emit(&diag, shell.use_color());
                    }
                }
            }
            if shell.is_verbose() {
                for file in &outcome.files {
                    shell.note(format!("wrote {}", file.display()));
                }
            }
        }
        if let Some(error) = &dependency.error {
            emit(&error.to_diagnostic(), shell.use_color());
        }
    }

    shell.status(Status::Finished, report);
}
