//! Linking orchestration.
//!
//! For each dependency, platforms are visited in registry order. A platform
//! is skipped when either side lacks configuration for it or its adapter
//! does not support auto-linking. Otherwise the adapter's installed check
//! runs first, and only a dependency that is not yet installed is
//! registered.
//!
//! An adapter error stops the remaining platforms of that dependency; the
//! next dependency is still processed.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::core::{Dependency, Params, PlatformId, ProjectConfigs};
use crate::ops::discover::discover;
use crate::ops::params::{ParamError, ParamSession};
use crate::ops::resolve::{load_dependency, resolve_project, ResolveError};
use crate::platforms::{ManualStep, PlatformRegistry, Registration};
use crate::util::diagnostic::Diagnostic;
use crate::util::GlobalContext;

/// Options shared by link and unlink.
#[derive(Debug, Clone, Default)]
pub struct LinkOptions {
    /// Restrict processing to these platforms (empty = all)
    pub platforms: Vec<PlatformId>,

    /// Report what would change without writing
    pub dry_run: bool,
}

impl LinkOptions {
    pub(crate) fn wants(&self, platform: PlatformId) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&platform)
    }
}

/// Final state of one (dependency, platform) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LinkState {
    /// The dependency or the app has no configuration for the platform,
    /// or the platform does not support auto-linking
    NotApplicable,
    /// Registration was already present
    AlreadyLinked,
    /// Registration was added
    Linked,
    /// Nothing to unlink
    NotLinked,
    /// Registration was removed
    Unlinked,
    /// Dry run: the dependency would be linked or unlinked
    Pending,
    /// The project could not be changed safely; nothing was written
    NeedsManualLinking { steps: Vec<ManualStepView> },
    /// The adapter failed
    Failed { message: String },
}

impl LinkState {
    /// Whether the pair ended without anything left to do by hand.
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            LinkState::NeedsManualLinking { .. } | LinkState::Failed { .. }
        )
    }
}

/// Serializable form of a [`ManualStep`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManualStepView {
    pub path: PathBuf,
    pub instruction: String,
}

impl From<ManualStep> for ManualStepView {
    fn from(step: ManualStep) -> Self {
        ManualStepView {
            path: step.path,
            instruction: step.instruction,
        }
    }
}

/// Outcome of one platform of one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformOutcome {
    pub platform: PlatformId,
    #[serde(flatten)]
    pub state: LinkState,
    /// Files written or removed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
}

impl PlatformOutcome {
    pub(crate) fn new(platform: PlatformId, state: LinkState) -> Self {
        PlatformOutcome {
            platform,
            state,
            files: Vec::new(),
        }
    }

    pub(crate) fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }
}

/// Failure that stops processing of one dependency.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("`{dependency}` failed on {platform}")]
    Registration {
        dependency: String,
        platform: PlatformId,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("cannot resolve parameters of `{dependency}`")]
    Param {
        dependency: String,
        #[source]
        source: ParamError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl LinkError {
    pub(crate) fn registration(
        dependency: &str,
        platform: PlatformId,
        source: anyhow::Error,
    ) -> Self {
        LinkError::Registration {
            dependency: dependency.to_string(),
            platform,
            source: source.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LinkError::Registration { platform, source, .. } => Diagnostic::error(self.to_string())
                .with_context(error_chain(&**source))
                .with_suggestion(format!(
                    "Check the {} project files, then run the command again",
                    platform
                )),
            LinkError::Param { source, .. } => Diagnostic::error(self.to_string())
                .with_context(source.to_string())
                .with_suggestion("Pass the value with `--param name=value` or in nativelink.toml"),
            LinkError::Resolve(e) => e.to_diagnostic(),
        }
    }
}

/// Record a failed platform and build the error that stops its dependency.
pub(crate) fn failed(
    outcomes: &mut Vec<PlatformOutcome>,
    dependency: &str,
    platform: PlatformId,
    error: anyhow::Error,
) -> LinkError {
    outcomes.push(PlatformOutcome::new(
        platform,
        LinkState::Failed {
            message: format!("{:#}", error),
        },
    ));
    LinkError::registration(dependency, platform, error)
}

/// Outcomes of one dependency.
#[derive(Debug, Serialize)]
pub struct DependencyReport {
    pub name: String,
    pub outcomes: Vec<PlatformOutcome>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_error")]
    pub error: Option<LinkError>,
}

fn serialize_error<S: serde::Serializer>(
    error: &Option<LinkError>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => s.serialize_str(&error_chain(e)),
        None => s.serialize_none(),
    }
}

/// An error and its causes, joined with `: `.
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut cause = error.source();
    while let Some(err) = cause {
        message.push_str(": ");
        message.push_str(&err.to_string());
        cause = err.source();
    }
    message
}

/// Outcomes of a whole run.
#[derive(Debug, Default, Serialize)]
pub struct LinkReport {
    pub dependencies: Vec<DependencyReport>,
}

impl LinkReport {
    /// Every (dependency, outcome) pair, in processing order.
    pub fn outcomes(&self) -> impl Iterator<Item = (&str, &PlatformOutcome)> {
        self.dependencies
            .iter()
            .flat_map(|d| d.outcomes.iter().map(move |o| (d.name.as_str(), o)))
    }

    /// Dependencies whose processing stopped on an error.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &LinkError)> {
        self.dependencies
            .iter()
            .filter_map(|d| d.error.as_ref().map(|e| (d.name.as_str(), e)))
    }

    /// Number of outcomes in a given state.
    pub fn count(&self, pred: impl Fn(&LinkState) -> bool) -> usize {
        self.outcomes().filter(|(_, o)| pred(&o.state)).count()
    }

    /// Whether every pair ended without failure or manual work.
    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none() && self.outcomes().all(|(_, o)| o.state.is_success())
    }
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let linked = self.count(|s| matches!(s, LinkState::Linked | LinkState::Unlinked));
        let manual = self.count(|s| matches!(s, LinkState::NeedsManualLinking { .. }));
        let failed = self.errors().count();
        write!(
            f,
            "{} dependenc{}, {} changed, {} manual, {} failed",
            self.dependencies.len(),
            if self.dependencies.len() == 1 { "y" } else { "ies" },
            linked,
            manual,
            failed
        )
    }
}

/// Dependencies to process: the given names, or every discovered one not
/// ignored by configuration.
pub(crate) fn select_names(ctx: &GlobalContext, names: &[String]) -> Vec<String> {
    if !names.is_empty() {
        return names.to_vec();
    }
    discover(ctx.root())
        .into_iter()
        .filter(|name| {
            let ignored = ctx.config().is_ignored(name);
            if ignored {
                tracing::debug!("ignoring `{}` per configuration", name);
            }
            !ignored
        })
        .collect()
}

/// Link one dependency into every applicable platform.
pub fn link_dependency(
    registry: &PlatformRegistry,
    projects: &ProjectConfigs,
    dependency: &Dependency,
    session: &mut ParamSession,
    options: &LinkOptions,
) -> Result<Vec<PlatformOutcome>, LinkError> {
    let mut outcomes = Vec::new();
    link_into(registry, projects, dependency, session, options, &mut outcomes)?;
    Ok(outcomes)
}

fn link_into(
    registry: &PlatformRegistry,
    projects: &ProjectConfigs,
    dependency: &Dependency,
    session: &mut ParamSession,
    options: &LinkOptions,
    outcomes: &mut Vec<PlatformOutcome>,
) -> Result<(), LinkError> {
    let name = dependency.name();
    let mut params: Option<Params> = None;

    for platform in registry.iter() {
        let id = platform.id();
        if !options.wants(id) {
            continue;
        }
        let (Some(project), Some(config), Some(link)) = (
            projects.get(&id),
            dependency.platform(id),
            platform.link_config(),
        ) else {
            tracing::debug!("`{}` is not applicable to {}", name, id);
            outcomes.push(PlatformOutcome::new(id, LinkState::NotApplicable));
            continue;
        };

        let installed = link
            .is_installed(project, name, config)
            .map_err(|e| failed(outcomes, name, id, e))?;
        if installed {
            tracing::debug!("{} module `{}` is already linked", id, name);
            outcomes.push(PlatformOutcome::new(id, LinkState::AlreadyLinked));
            continue;
        }
        if options.dry_run {
            outcomes.push(PlatformOutcome::new(id, LinkState::Pending));
            continue;
        }

        let params = match params {
            Some(ref params) => params,
            None => params.insert(session.resolve(dependency.params()).map_err(|source| {
                LinkError::Param {
                    dependency: name.to_string(),
                    source,
                }
            })?),
        };

        tracing::debug!("linking `{}` {} dependency", name, id);
        let registration = link
            .register(name, config, params, project)
            .map_err(|e| failed(outcomes, name, id, e))?;

        let outcome = match registration {
            Registration::Applied(mut files) => {
                let copied = link
                    .copy_assets(dependency.assets(), project)
                    .map_err(|e| failed(outcomes, name, id, e))?;
                files.extend(copied);
                tracing::debug!("{} module `{}` has been successfully linked", id, name);
                PlatformOutcome::new(id, LinkState::Linked).with_files(files)
            }
            Registration::Manual(steps) => {
                tracing::debug!("{} module `{}` needs manual linking", id, name);
                PlatformOutcome::new(
                    id,
                    LinkState::NeedsManualLinking {
                        steps: steps.into_iter().map(ManualStepView::from).collect(),
                    },
                )
            }
        };
        outcomes.push(outcome);
    }
    Ok(())
}

/// Link the named dependencies, or every discovered one when `names` is
/// empty.
///
/// Only failing to resolve the app's own projects is an error; problems
/// with individual dependencies end up in the report.
pub fn link_all(
    ctx: &GlobalContext,
    registry: &PlatformRegistry,
    names: &[String],
    session: &mut ParamSession,
    options: &LinkOptions,
) -> Result<LinkReport, ResolveError> {
    let projects = resolve_project(ctx.root(), ctx.config(), registry)?;
    let mut report = LinkReport::default();

    for name in select_names(ctx, names) {
        let mut outcomes = Vec::new();
        let result = load_dependency(ctx.root(), &name, registry)
            .map_err(LinkError::from)
            .and_then(|dependency| {
                link_into(registry, &projects, &dependency, session, options, &mut outcomes)
            });
        if let Err(e) = &result {
            tracing::debug!("`{}` stopped: {}", name, error_chain(e));
        }
        report.dependencies.push(DependencyReport {
            name,
            outcomes,
            error: result.err(),
        });
    }
    Ok(report)
}
