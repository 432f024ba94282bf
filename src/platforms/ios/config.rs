//! iOS project and dependency detection.

use std::path::{Path, PathBuf};

use crate::core::{IosDependencyConfig, IosProjectConfig, PackageManifest};
use crate::ops::resolve::ResolveError;
use crate::pbxproj::{ProjectGraph, APPLICATION};
use crate::util::fs::find_xcodeproj;
use crate::util::Config;

/// Group receiving linked library projects unless configured otherwise.
pub const DEFAULT_LIBRARY_FOLDER: &str = "Libraries";

/// Resolve the app's Xcode project.
///
/// A missing `ios/` directory or `.xcodeproj` means the app does not target
/// iOS. A project file that exists but does not parse is an error.
pub fn project_config(
    root: &Path,
    config: &Config,
) -> Result<Option<IosProjectConfig>, ResolveError> {
    let source_dir = root.join(
        config
            .ios
            .source_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("ios")),
    );
    let Some(project_path) = find_xcodeproj(&source_dir) else {
        tracing::debug!("no .xcodeproj in {}", source_dir.display());
        return Ok(None);
    };
    let pbxproj_path = project_path.join("project.pbxproj");
    if !pbxproj_path.is_file() {
        tracing::debug!("{} has no project.pbxproj", project_path.display());
        return Ok(None);
    }

    let graph = load_graph(&pbxproj_path)?;
    let targets = graph
        .targets()
        .filter_map(|t| t.get_str("name"))
        .map(str::to_string)
        .collect();
    let plist_path = plist_path(&graph, &source_dir);

    Ok(Some(IosProjectConfig {
        library_folder: config
            .ios
            .library_folder
            .clone()
            .unwrap_or_else(|| DEFAULT_LIBRARY_FOLDER.to_string()),
        source_dir,
        project_path,
        pbxproj_path,
        targets,
        plist_path,
    }))
}

/// Read and parse a `project.pbxproj`.
pub fn load_graph(path: &Path) -> Result<ProjectGraph, ResolveError> {
    let source = std::fs::read_to_string(path).map_err(|source| ResolveError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ProjectGraph::parse(source).map_err(|source| ResolveError::ProjectParse {
        path: path.to_path_buf(),
        source,
    })
}

/// `Info.plist` of the first application target (or the first target).
fn plist_path(graph: &ProjectGraph, source_dir: &Path) -> Option<PathBuf> {
    let target = graph
        .targets()
        .find(|t| t.get_str("productType") == Some(APPLICATION))
        .or_else(|| graph.targets().next())?;
    let plist = graph.build_property(target, "INFOPLIST_FILE")?;
    Some(source_dir.join(plist.trim_start_matches('/')))
}

/// Resolve a package's Xcode library project.
pub fn dependency_config(
    package_root: &Path,
    manifest: &PackageManifest,
) -> Option<IosDependencyConfig> {
    let overrides = &manifest.rnpm.ios;
    let project_path = match &overrides.project {
        Some(project) => {
            let path = package_root.join(project);
            path.is_dir().then_some(path)?
        }
        None => find_xcodeproj(&package_root.join("ios")).or_else(|| find_xcodeproj(package_root))?,
    };
    let project_name = project_path.file_name()?.to_string_lossy().into_owned();
    let source_dir = project_path.parent()?.to_path_buf();

    Some(IosDependencyConfig {
        source_dir,
        project_name,
        shared_libraries: map_shared_libraries(&overrides.shared_libraries),
        project_path,
    })
}

/// Complete bare system library names: `libz` becomes `libz.tbd`,
/// `GLKit` becomes `GLKit.framework`.
pub fn map_shared_libraries(libraries: &[String]) -> Vec<String> {
    libraries
        .iter()
        .map(|name| {
            if Path::new(name).extension().is_some() {
                name.clone()
            } else if name.starts_with("lib") {
                format!("{}.tbd", name)
            } else {
                format!("{}.framework", name)
            }
        })
        .collect()
}
