//! Resolution of host project and dependency configuration.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::{Dependency, PackageManifest, ProjectConfigs};
use crate::pbxproj::ParseError;
use crate::platforms::PlatformRegistry;
use crate::util::context::MANIFEST_FILE;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::{fs, Config};

/// Error while resolving configuration.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to parse Xcode project {}", path.display())]
    ProjectParse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("dependency `{name}` is not installed")]
    NotInstalled { name: String, path: PathBuf },

    #[error("invalid manifest of `{name}`")]
    Manifest { name: String, message: String },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::ProjectParse { path, source } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_context(source.to_string())
                .with_suggestion(suggestions::BROKEN_PBXPROJ),
            ResolveError::Read { path, source } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_context(source.to_string()),
            ResolveError::NotInstalled { path, .. } => Diagnostic::error(self.to_string())
                .with_context(format!("{} does not exist", path.display()))
                .with_suggestion(suggestions::NOT_INSTALLED),
            ResolveError::Manifest { message, .. } => {
                Diagnostic::error(self.to_string()).with_context(message.clone())
            }
        }
    }
}

/// Resolve the host project of every registered platform the app targets.
pub fn resolve_project(
    root: &Path,
    config: &Config,
    registry: &PlatformRegistry,
) -> Result<ProjectConfigs, ResolveError> {
    let mut configs = ProjectConfigs::new();
    for platform in registry.iter() {
        match platform.project_config(root, config)? {
            Some(project) => {
                tracing::debug!("found {} project", platform.id());
                configs.insert(platform.id(), project);
            }
            None => tracing::debug!("app does not target {}", platform.id()),
        }
    }
    Ok(configs)
}

/// Build the dependency `name` installed under `root/node_modules`.
pub fn load_dependency(
    root: &Path,
    name: &str,
    registry: &PlatformRegistry,
) -> Result<Dependency, ResolveError> {
    let package_root = root.join("node_modules").join(name);
    let manifest_path = package_root.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(ResolveError::NotInstalled {
            name: name.to_string(),
            path: package_root,
        });
    }
    let invalid = |e: anyhow::Error| ResolveError::Manifest {
        name: name.to_string(),
        message: format!("{:#}", e),
    };
    let manifest = PackageManifest::load(&manifest_path).map_err(invalid)?;
    let assets = fs::glob_files(&package_root, &asset_patterns(&manifest.rnpm.assets))
        .map_err(invalid)?;

    let mut dependency = Dependency::new(name, &package_root)
        .with_params(manifest.rnpm.params.clone())
        .with_assets(assets);
    for platform in registry.iter() {
        if let Some(config) = platform.dependency_config(&package_root, &manifest) {
            dependency = dependency.with_platform(config);
        }
    }
    tracing::debug!(
        "resolved `{}` for {:?}",
        name,
        dependency.platforms().map(|p| p.as_str()).collect::<Vec<_>>()
    );
    Ok(dependency)
}

fn asset_patterns(folders: &[String]) -> Vec<String> {
    folders
        .iter()
        .map(|folder| format!("{}/**/*", folder.trim_end_matches('/')))
        .collect()
}
