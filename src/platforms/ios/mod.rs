//! iOS adapter.
//!
//! The Xcode project is edited through its object graph rather than text
//! patches; see [`register`] for what linking adds.

pub mod config;
pub mod register;

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;

use crate::core::{
    DependencyConfig, IosDependencyConfig, IosProjectConfig, PackageManifest, Params, PlatformId,
    ProjectConfig,
};
use crate::ops::resolve::ResolveError;
use crate::platforms::{Platform, PlatformLinkConfig, Registration};
use crate::util::Config;

/// The iOS platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ios;

impl Platform for Ios {
    fn id(&self) -> PlatformId {
        PlatformId::Ios
    }

    fn project_config(
        &self,
        root: &Path,
        config: &Config,
    ) -> Result<Option<ProjectConfig>, ResolveError> {
        Ok(config::project_config(root, config)?.map(ProjectConfig::Ios))
    }

    fn dependency_config(
        &self,
        package_root: &Path,
        manifest: &PackageManifest,
    ) -> Option<DependencyConfig> {
        config::dependency_config(package_root, manifest).map(DependencyConfig::Ios)
    }

    fn link_config(&self) -> Option<&dyn PlatformLinkConfig> {
        Some(self)
    }
}

fn unpack<'a>(
    project: &'a ProjectConfig,
    dependency: &'a DependencyConfig,
) -> Result<(&'a IosProjectConfig, &'a IosDependencyConfig)> {
    match (project.as_ios(), dependency.as_ios()) {
        (Some(p), Some(d)) => Ok((p, d)),
        _ => anyhow::bail!("iOS adapter called with {} configuration", project.platform()),
    }
}

impl PlatformLinkConfig for Ios {
    fn is_installed(
        &self,
        project: &ProjectConfig,
        _name: &str,
        dependency: &DependencyConfig,
    ) -> Result<bool> {
        let (project, dependency) = unpack(project, dependency)?;
        register::is_installed(project, dependency)
    }

    fn register(
        &self,
        name: &str,
        dependency: &DependencyConfig,
        _params: &Params,
        project: &ProjectConfig,
    ) -> Result<Registration> {
        let (project, dependency) = unpack(project, dependency)?;
        register::register(name, project, dependency)
    }

    fn unregister(
        &self,
        name: &str,
        dependency: &DependencyConfig,
        project: &ProjectConfig,
        others: &[&DependencyConfig],
    ) -> Result<Registration> {
        let (project, dependency) = unpack(project, dependency)?;
        let keep: BTreeSet<String> = others
            .iter()
            .filter_map(|other| other.as_ios())
            .flat_map(|other| other.shared_libraries.iter().cloned())
            .collect();
        register::unregister(name, project, dependency, &keep)
    }
}
