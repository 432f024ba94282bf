//! Platform adapters.
//!
//! Each platform implements [`Platform`] to resolve host and dependency
//! configuration, and optionally exposes a [`PlatformLinkConfig`] with the
//! operations auto-linking needs. A platform without one is skipped by the
//! orchestrators.

pub mod android;
pub mod ios;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{DependencyConfig, PackageManifest, Params, PlatformId, ProjectConfig};
use crate::ops::resolve::ResolveError;
use crate::patch::{PatchFailure, PatchOutcome};
use crate::util::Config;

/// Something the user has to do by hand to finish a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualStep {
    /// File to edit
    pub path: PathBuf,
    /// What to do in it
    pub instruction: String,
}

impl From<PatchFailure> for ManualStep {
    fn from(failure: PatchFailure) -> Self {
        ManualStep {
            instruction: format!(
                "{}; insert {:?} by hand",
                failure.error,
                failure.text.trim()
            ),
            path: failure.path,
        }
    }
}

/// Result of a register or unregister call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The project was updated; the listed files were written.
    Applied(Vec<PathBuf>),
    /// The project could not be updated safely; nothing was written.
    Manual(Vec<ManualStep>),
}

impl From<PatchOutcome> for Registration {
    fn from(outcome: PatchOutcome) -> Self {
        match outcome {
            PatchOutcome::Written(files) => Registration::Applied(files),
            PatchOutcome::Blocked(failures) => {
                Registration::Manual(failures.into_iter().map(ManualStep::from).collect())
            }
        }
    }
}

/// Operations a platform implements to take part in auto-linking.
pub trait PlatformLinkConfig {
    /// Whether `name` is already registered in the host project.
    fn is_installed(
        &self,
        project: &ProjectConfig,
        name: &str,
        dependency: &DependencyConfig,
    ) -> Result<bool>;

    /// Register `name` in the host project.
    fn register(
        &self,
        name: &str,
        dependency: &DependencyConfig,
        params: &Params,
        project: &ProjectConfig,
    ) -> Result<Registration>;

    /// Remove everything `register` added for `name`.
    ///
    /// `others` holds the configurations of the dependencies that stay
    /// linked, so that shared resources they still need are kept.
    fn unregister(
        &self,
        name: &str,
        dependency: &DependencyConfig,
        project: &ProjectConfig,
        others: &[&DependencyConfig],
    ) -> Result<Registration>;

    /// Copy a dependency's asset files into the host project.
    ///
    /// Returns the files created. Platforms without asset support copy
    /// nothing.
    fn copy_assets(&self, _files: &[PathBuf], _project: &ProjectConfig) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }

    /// Remove asset files a previous [`copy_assets`](Self::copy_assets)
    /// created. Returns the files removed.
    fn remove_assets(&self, _files: &[PathBuf], _project: &ProjectConfig) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
}

/// A native platform.
pub trait Platform {
    fn id(&self) -> PlatformId;

    /// Locate the host project, or `None` when the app does not target
    /// this platform.
    fn project_config(
        &self,
        root: &Path,
        config: &Config,
    ) -> Result<Option<ProjectConfig>, ResolveError>;

    /// Describe a dependency's native library, or `None` when it has none
    /// for this platform.
    fn dependency_config(
        &self,
        package_root: &Path,
        manifest: &PackageManifest,
    ) -> Option<DependencyConfig>;

    /// The linking operations, if this platform supports auto-linking.
    fn link_config(&self) -> Option<&dyn PlatformLinkConfig>;
}

/// Platform id to adapter mapping.
pub struct PlatformRegistry {
    platforms: BTreeMap<PlatformId, Box<dyn Platform>>,
}

impl PlatformRegistry {
    /// A registry without any platform.
    pub fn empty() -> Self {
        PlatformRegistry {
            platforms: BTreeMap::new(),
        }
    }

    /// The built-in Android and iOS adapters.
    pub fn builtin() -> Self {
        Self::empty()
            .with(Box::new(ios::Ios))
            .with(Box::new(android::Android))
    }

    /// Add or replace the adapter for a platform.
    pub fn with(mut self, platform: Box<dyn Platform>) -> Self {
        self.platforms.insert(platform.id(), platform);
        self
    }

    pub fn get(&self, id: PlatformId) -> Option<&dyn Platform> {
        self.platforms.get(&id).map(|p| p.as_ref())
    }

    /// Registered platforms, in processing order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Platform> {
        self.platforms.values().map(|p| p.as_ref())
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.platforms.keys()).finish()
    }
}

/// Lower camel case of a package name: `@scope/react-native-foo` becomes
/// `scopeReactNativeFoo`. Used to prefix resources a package adds.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// Gradle project name of a package: slashes of scoped names become
/// underscores.
pub fn normalize_project_name(name: &str) -> String {
    name.replace('/', "_")
}
