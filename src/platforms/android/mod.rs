//! Android adapter.
//!
//! Registration is a set of text patches: the library's Gradle project is
//! included from `settings.gradle` and added to the app module's
//! `dependencies`, its package class is imported and instantiated in
//! `MainApplication`, and parameter answers are stored as string
//! resources.

pub mod config;
pub mod patches;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::{
    AndroidDependencyConfig, AndroidProjectConfig, DependencyConfig, PackageManifest, Params,
    PlatformId, ProjectConfig,
};
use crate::ops::resolve::ResolveError;
use crate::patch::PatchPlan;
use crate::platforms::{camel_case, Platform, PlatformLinkConfig, Registration};
use crate::util::{fs, Config};

/// The Android platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct Android;

impl Platform for Android {
    fn id(&self) -> PlatformId {
        PlatformId::Android
    }

    fn project_config(
        &self,
        root: &Path,
        config: &Config,
    ) -> Result<Option<ProjectConfig>, ResolveError> {
        Ok(config::project_config(root, config).map(ProjectConfig::Android))
    }

    fn dependency_config(
        &self,
        package_root: &Path,
        manifest: &PackageManifest,
    ) -> Option<DependencyConfig> {
        config::dependency_config(package_root, manifest).map(DependencyConfig::Android)
    }

    fn link_config(&self) -> Option<&dyn PlatformLinkConfig> {
        Some(self)
    }
}

fn unpack<'a>(
    project: &'a ProjectConfig,
    dependency: &'a DependencyConfig,
) -> Result<(&'a AndroidProjectConfig, &'a AndroidDependencyConfig)> {
    match (project.as_android(), dependency.as_android()) {
        (Some(p), Some(d)) => Ok((p, d)),
        _ => anyhow::bail!("Android adapter called with {} configuration", project.platform()),
    }
}

impl PlatformLinkConfig for Android {
    fn is_installed(
        &self,
        project: &ProjectConfig,
        name: &str,
        dependency: &DependencyConfig,
    ) -> Result<bool> {
        let (project, _) = unpack(project, dependency)?;
        let build = fs::read_to_string(&project.build_gradle)?;
        Ok(patches::build_dependency_regex(name).is_match(&build))
    }

    fn register(
        &self,
        name: &str,
        dependency: &DependencyConfig,
        params: &Params,
        project: &ProjectConfig,
    ) -> Result<Registration> {
        let (project, dependency) = unpack(project, dependency)?;

        let mut plan = PatchPlan::new();
        plan.apply(
            &project.settings_gradle,
            &patches::settings_patch(name, dependency, project),
        )?;
        plan.apply(&project.build_gradle, &patches::build_patch(name))?;
        if let Some(strings) = patches::strings_patch(params, name) {
            plan.apply(&project.strings_path, &strings)?;
        }
        plan.apply(
            &project.main_file_path,
            &patches::package_patch(&dependency.package_instance, params, name),
        )?;
        plan.apply(
            &project.main_file_path,
            &patches::import_patch(&dependency.package_import_path),
        )?;

        Ok(plan.commit()?.into())
    }

    fn unregister(
        &self,
        name: &str,
        dependency: &DependencyConfig,
        project: &ProjectConfig,
        _others: &[&DependencyConfig],
    ) -> Result<Registration> {
        let (project, dependency) = unpack(project, dependency)?;
        let params = stored_params(&project.strings_path, name)?;

        let mut plan = PatchPlan::new();
        plan.revert(
            &project.settings_gradle,
            &patches::settings_patch(name, dependency, project),
        )?;
        plan.revert(&project.build_gradle, &patches::build_patch(name))?;
        plan.remove_lines(&project.strings_path, &patches::strings_token(name))?;
        plan.revert(
            &project.main_file_path,
            &patches::package_patch(&dependency.package_instance, &params, name),
        )?;
        plan.revert(
            &project.main_file_path,
            &patches::import_patch(&dependency.package_import_path),
        )?;

        Ok(plan.commit()?.into())
    }

    fn copy_assets(&self, files: &[PathBuf], project: &ProjectConfig) -> Result<Vec<PathBuf>> {
        let Some(project) = project.as_android() else {
            return Ok(Vec::new());
        };
        let mut copied = Vec::with_capacity(files.len());
        for file in files {
            let Some(file_name) = file.file_name() else {
                continue;
            };
            let dest = project.assets_path.join(file_name);
            fs::copy_file(file, &dest)?;
            copied.push(dest);
        }
        Ok(copied)
    }

    fn remove_assets(&self, files: &[PathBuf], project: &ProjectConfig) -> Result<Vec<PathBuf>> {
        let Some(project) = project.as_android() else {
            return Ok(Vec::new());
        };
        let mut removed = Vec::new();
        for file in files {
            let Some(file_name) = file.file_name() else {
                continue;
            };
            let dest = project.assets_path.join(file_name);
            if dest.is_file() {
                fs::remove_file_if_exists(&dest)?;
                removed.push(dest);
            }
        }
        Ok(removed)
    }
}

/// Parameter answers a previous registration of `name` stored in
/// `strings.xml`, keyed by unprefixed parameter name.
fn stored_params(strings_path: &Path, name: &str) -> Result<Params> {
    if !strings_path.is_file() {
        return Ok(Params::new());
    }
    let content = std::fs::read_to_string(strings_path)
        .with_context(|| format!("failed to read {}", strings_path.display()))?;
    let re = Regex::new(r#"moduleConfig="true" name="(\w+)">(.*?)</string>"#)
        .expect("valid resource pattern");
    let prefix = format!("{}_", camel_case(name));
    Ok(re
        .captures_iter(&content)
        .filter_map(|c| {
            let key = c[1].strip_prefix(&prefix)?.to_string();
            Some((key, c[2].to_string()))
        })
        .collect())
}
