//! Unlinking orchestration.
//!
//! The mirror of [`crate::ops::link`]: every applicable platform whose
//! project reports the dependency as installed has its registration
//! removed, along with any assets linking copied.

use std::collections::BTreeSet;

use crate::core::{Dependency, DependencyConfig, ProjectConfigs};
use crate::ops::link::{
    error_chain, failed, select_names, DependencyReport, LinkError, LinkOptions, LinkReport,
    LinkState, ManualStepView, PlatformOutcome,
};
use crate::ops::discover::discover;
use crate::ops::resolve::{load_dependency, resolve_project, ResolveError};
use crate::platforms::{PlatformRegistry, Registration};
use crate::util::GlobalContext;

/// Remove one dependency from every applicable platform.
///
/// `others` are the remaining dependencies of the app; resources they
/// still use are left in place.
pub fn unlink_dependency(
    registry: &PlatformRegistry,
    projects: &ProjectConfigs,
    dependency: &Dependency,
    others: &[Dependency],
    options: &LinkOptions,
) -> Result<Vec<PlatformOutcome>, LinkError> {
    let mut outcomes = Vec::new();
    unlink_into(registry, projects, dependency, others, options, &mut outcomes)?;
    Ok(outcomes)
}

fn unlink_into(
    registry: &PlatformRegistry,
    projects: &ProjectConfigs,
    dependency: &Dependency,
    others: &[Dependency],
    options: &LinkOptions,
    outcomes: &mut Vec<PlatformOutcome>,
) -> Result<(), LinkError> {
    let name = dependency.name();

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
            outcomes.push(PlatformOutcome::new(id, LinkState::NotApplicable));
            continue;
        };

        let installed = link
            .is_installed(project, name, config)
            .map_err(|e| failed(outcomes, name, id, e))?;
        if !installed {
            tracing::debug!("{} module `{}` is not installed", id, name);
            outcomes.push(PlatformOutcome::new(id, LinkState::NotLinked));
            continue;
        }
        if options.dry_run {
            outcomes.push(PlatformOutcome::new(id, LinkState::Pending));
            continue;
        }

        let remaining: Vec<&DependencyConfig> = others
            .iter()
            .filter(|other| other.name() != name)
            .filter_map(|other| other.platform(id))
            .collect();

        tracing::debug!("unlinking `{}` {} dependency", name, id);
        let registration = link
            .unregister(name, config, project, &remaining)
            .map_err(|e| failed(outcomes, name, id, e))?;

        let outcome = match registration {
            Registration::Applied(mut files) => {
                let removed = link
                    .remove_assets(dependency.assets(), project)
                    .map_err(|e| failed(outcomes, name, id, e))?;
                files.extend(removed);
                tracing::debug!("{} module `{}` has been successfully unlinked", id, name);
                PlatformOutcome::new(id, LinkState::Unlinked).with_files(files)
            }
            Registration::Manual(steps) => PlatformOutcome::new(
                id,
                LinkState::NeedsManualLinking {
                    steps: steps.into_iter().map(ManualStepView::from).collect(),
                },
            ),
        };
        outcomes.push(outcome);
    }
    Ok(())
}

/// Unlink the named dependencies, or every discovered one when `names` is
/// empty.
pub fn unlink_all(
    ctx: &GlobalContext,
    registry: &PlatformRegistry,
    names: &[String],
    options: &LinkOptions,
) -> Result<LinkReport, ResolveError> {
    let projects = resolve_project(ctx.root(), ctx.config(), registry)?;
    let targets = select_names(ctx, names);
    let leaving: BTreeSet<&str> = targets.iter().map(String::as_str).collect();

    let others: Vec<Dependency> = discover(ctx.root())
        .into_iter()
        .filter(|name| !leaving.contains(name.as_str()))
        .filter_map(|name| match load_dependency(ctx.root(), &name, registry) {
            Ok(dependency) => Some(dependency),
            Err(e) => {
                tracing::debug!("skipping `{}`: {}", name, error_chain(&e));
                None
            }
        })
        .collect();

    let mut report = LinkReport::default();
    for name in targets.iter() {
        let mut outcomes = Vec::new();
        let result = load_dependency(ctx.root(), name, registry)
            .map_err(LinkError::from)
            .and_then(|dependency| {
                unlink_into(registry, &projects, &dependency, &others, options, &mut outcomes)
            });
        if let Err(e) = &result {
            tracing::debug!("`{}` stopped: {}", name, error_chain(e));
        }
        report.dependencies.push(DependencyReport {
            name: name.clone(),
            outcomes,
            error: result.err(),
        });
    }
    Ok(report)
}
