//! Registering a library project in the app's Xcode project.
//!
//! Linking a library adds:
//!
//! - a file reference to the library's `.xcodeproj` in the libraries group,
//! - for every static library the library project builds, a product file
//!   reference and one build file per application target, listed in that
//!   target's frameworks phase,
//! - the system libraries the library asks for, linked the same way,
//! - the library's header directory in `HEADER_SEARCH_PATHS` of every build
//!   configuration of every application target.
//!
//! Unlinking looks those nodes up again by name and path, so objects Xcode
//! or the user created by hand with the same names are indistinguishable
//! from ours.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{IosDependencyConfig, IosProjectConfig};
use crate::pbxproj::{Editor, NewObject, PbxObject, ProjectGraph, APPLICATION};
use crate::platforms::{ManualStep, Registration};
use crate::util::fs::{find_files, relative_path, to_unix_string, write_string};

use super::config::load_graph;

const HEADER_SEARCH_PATHS: &str = "HEADER_SEARCH_PATHS";

/// Whether the library project is listed in the libraries group.
pub fn is_installed(project: &IosProjectConfig, dependency: &IosDependencyConfig) -> Result<bool> {
    let graph = load_graph(&project.pbxproj_path)?;
    Ok(graph
        .group_by_name(&project.library_folder)
        .and_then(|group| library_reference(&graph, group, &dependency.project_name))
        .is_some())
}

/// Add the library to the app project.
pub fn register(
    name: &str,
    project: &IosProjectConfig,
    dependency: &IosDependencyConfig,
) -> Result<Registration> {
    let graph = load_graph(&project.pbxproj_path)?;
    let products = library_products(dependency)?;
    let targets = application_targets(&graph);

    let missing_phases: Vec<ManualStep> = targets
        .iter()
        .filter(|t| graph.frameworks_phase(t).is_none())
        .map(|t| ManualStep {
            path: project.pbxproj_path.clone(),
            instruction: format!(
                "target `{}` has no Link Binary With Libraries phase; add {} to it in Xcode",
                t.get_str("name").unwrap_or(&t.id),
                products.join(", ")
            ),
        })
        .collect();
    if !missing_phases.is_empty() {
        return Ok(Registration::Manual(missing_phases));
    }
    let Some(main_group) = graph.main_group() else {
        return Ok(Registration::Manual(vec![ManualStep {
            path: project.pbxproj_path.clone(),
            instruction: format!("drag {} into the project in Xcode", dependency.project_name),
        }]));
    };

    let mut editor = Editor::new(&graph, name);

    let library_path =
        to_unix_string(&relative_path(&project.source_dir, &dependency.project_path));
    let group = graph.group_by_name(&project.library_folder);
    if group.and_then(|g| library_reference(&graph, g, &dependency.project_name)).is_none() {
        let file_id = editor.generate_id("project");
        editor.add_object(
            NewObject::new(&file_id, "PBXFileReference", &dependency.project_name)
                .field("lastKnownFileType", "wrapper.pb-project")
                .field("name", &dependency.project_name)
                .field("path", &library_path)
                .field("sourceTree", "<group>"),
        );
        match group {
            Some(group) => {
                editor.push_ref(&group.id, "children", &file_id, &dependency.project_name);
            }
            None => {
                let group_id = editor.generate_id("group");
                editor.add_object(
                    NewObject::new(&group_id, "PBXGroup", &project.library_folder)
                        .references(
                            "children",
                            vec![(file_id.clone(), dependency.project_name.clone())],
                        )
                        .field("name", &project.library_folder)
                        .field("sourceTree", "<group>"),
                );
                editor.push_ref(&main_group.id, "children", &group_id, &project.library_folder);
            }
        }
    }

    for product in &products {
        link_file(&mut editor, &targets, &LinkedFile::product(product));
    }
    for library in &dependency.shared_libraries {
        link_file(&mut editor, &targets, &LinkedFile::system(library));
    }

    if let Some(header_path) = header_search_path(project, dependency) {
        for target in &targets {
            for config in graph.build_configurations(target) {
                editor.add_setting_value(&config.id, HEADER_SEARCH_PATHS, &header_path);
            }
        }
    }

    write(project, &graph, editor)
}

/// Remove what [`register`] added.
///
/// System libraries listed in `keep` stay linked. A libraries group that
/// registering `name` created goes away with its last child.
pub fn unregister(
    name: &str,
    project: &IosProjectConfig,
    dependency: &IosDependencyConfig,
    keep: &BTreeSet<String>,
) -> Result<Registration> {
    if !project.pbxproj_path.is_file() {
        return Ok(Registration::Applied(Vec::new()));
    }
    let graph = load_graph(&project.pbxproj_path)?;
    let products = library_products(dependency).unwrap_or_else(|e| {
        tracing::warn!("cannot list products of {}: {:#}", dependency.project_name, e);
        Vec::new()
    });
    let targets = application_targets(&graph);

    let mut editor = Editor::new(&graph, name);

    if let Some(group) = graph.group_by_name(&project.library_folder) {
        if let Some(file) = library_reference(&graph, group, &dependency.project_name) {
            editor.remove_object(&file.id);
            let only_child = group.refs("children") == [file.id.as_str()];
            match graph.main_group() {
                Some(main_group) if only_child && editor.is_generated("group", &group.id) => {
                    editor.remove_ref(&main_group.id, "children", &group.id);
                    editor.remove_object(&group.id);
                }
                _ => editor.remove_ref(&group.id, "children", &file.id),
            }
        }
    }

    for product in &products {
        unlink_file(&mut editor, &targets, &LinkedFile::product(product));
    }
    for library in dependency.shared_libraries.iter().filter(|l| !keep.contains(*l)) {
        unlink_file(&mut editor, &targets, &LinkedFile::system(library));
    }

    if let Some(header_path) = header_search_path(project, dependency) {
        for target in &targets {
            for config in graph.build_configurations(target) {
                editor.remove_setting_value(&config.id, HEADER_SEARCH_PATHS, &header_path);
            }
        }
    }

    write(project, &graph, editor)
}

fn write(
    project: &IosProjectConfig,
    graph: &ProjectGraph,
    editor: Editor<'_>,
) -> Result<Registration> {
    if editor.is_empty() {
        return Ok(Registration::Applied(Vec::new()));
    }
    let output = editor.finish();
    if output == graph.source() {
        return Ok(Registration::Applied(Vec::new()));
    }
    write_string(&project.pbxproj_path, &output)?;
    tracing::debug!("wrote {}", project.pbxproj_path.display());
    Ok(Registration::Applied(vec![project.pbxproj_path.clone()]))
}

/// Child of `group` referring to the library project `project_name`.
fn library_reference<'g>(
    graph: &'g ProjectGraph,
    group: &'g PbxObject,
    project_name: &str,
) -> Option<&'g PbxObject> {
    graph.children(group).find(|child| {
        child
            .name()
            .and_then(|n| Path::new(n).file_name())
            .is_some_and(|n| n == project_name)
    })
}

fn application_targets(graph: &ProjectGraph) -> Vec<&PbxObject> {
    graph
        .targets()
        .filter(|t| t.get_str("productType") == Some(APPLICATION))
        .collect()
}

/// Static libraries the library project builds.
fn library_products(dependency: &IosDependencyConfig) -> Result<Vec<String>> {
    let path = dependency.project_path.join("project.pbxproj");
    let graph = load_graph(&path)
        .with_context(|| format!("failed to load {}", dependency.project_name))?;
    Ok(graph.static_libraries())
}

/// A file linked into application targets.
struct LinkedFile {
    name: String,
    path: String,
    file_type: (&'static str, &'static str),
    source_tree: &'static str,
}

impl LinkedFile {
    /// A product of a library project.
    fn product(name: &str) -> Self {
        LinkedFile {
            name: name.to_string(),
            path: name.to_string(),
            file_type: ("explicitFileType", "archive.ar"),
            source_tree: "BUILT_PRODUCTS_DIR",
        }
    }

    /// A library or framework shipped with the SDK.
    fn system(name: &str) -> Self {
        let (dir, file_type) = match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some("framework") => ("System/Library/Frameworks", "wrapper.framework"),
            Some("dylib") => ("usr/lib", "compiled.mach-o.dylib"),
            _ => ("usr/lib", "sourcecode.text-based-dylib-definition"),
        };
        LinkedFile {
            name: name.to_string(),
            path: format!("{}/{}", dir, name),
            file_type: ("lastKnownFileType", file_type),
            source_tree: "SDKROOT",
        }
    }

    fn find<'g>(&self, graph: &'g ProjectGraph) -> Option<&'g PbxObject> {
        graph.objects_of("PBXFileReference").find(|f| {
            f.get_str("path") == Some(self.path.as_str())
                && f.get_str("sourceTree") == Some(self.source_tree)
        })
    }
}

fn build_file_comment(name: &str) -> String {
    format!("{} in Frameworks", name)
}

fn link_file(editor: &mut Editor<'_>, targets: &[&PbxObject], file: &LinkedFile) {
    let graph = editor.graph();
    let (file_id, existing) = match file.find(graph) {
        Some(found) => (found.id.clone(), true),
        None => {
            let id = editor.generate_id(&format!("file:{}", file.path));
            let mut object = NewObject::new(&id, "PBXFileReference", &file.name)
                .field(file.file_type.0, file.file_type.1);
            if file.source_tree == "BUILT_PRODUCTS_DIR" {
                object = object.field("includeInIndex", "0");
            } else {
                object = object.field("name", &file.name);
            }
            editor.add_object(
                object
                    .field("path", &file.path)
                    .field("sourceTree", file.source_tree),
            );
            if let Some(frameworks) = graph.group_by_name("Frameworks") {
                editor.push_ref(&frameworks.id, "children", &id, &file.name);
            }
            (id, false)
        }
    };

    for target in targets {
        let Some(phase) = graph.frameworks_phase(target) else {
            continue;
        };
        let already_linked = existing
            && phase
                .refs("files")
                .into_iter()
                .filter_map(|id| graph.object(id))
                .any(|build| build.get_str("fileRef") == Some(file_id.as_str()));
        if already_linked {
            continue;
        }
        let build_id = editor.generate_id(&format!("build:{}:{}", file.path, target.id));
        editor.add_object(
            NewObject::new(&build_id, "PBXBuildFile", build_file_comment(&file.name))
                .reference("fileRef", &file_id, &file.name),
        );
        editor.push_ref(&phase.id, "files", &build_id, &build_file_comment(&file.name));
    }
}

fn unlink_file(editor: &mut Editor<'_>, targets: &[&PbxObject], file: &LinkedFile) {
    let graph = editor.graph();
    let Some(reference) = file.find(graph) else {
        return;
    };

    let build_files: Vec<&PbxObject> = graph
        .objects_of("PBXBuildFile")
        .filter(|b| b.get_str("fileRef") == Some(reference.id.as_str()))
        .collect();
    for target in targets {
        if let Some(phase) = graph.frameworks_phase(target) {
            for build in &build_files {
                editor.remove_ref(&phase.id, "files", &build.id);
            }
        }
    }
    for build in &build_files {
        editor.remove_object(&build.id);
    }

    for group in graph.objects_of("PBXGroup") {
        if group.refs("children").contains(&reference.id.as_str()) {
            editor.remove_ref(&group.id, "children", &reference.id);
        }
    }
    editor.remove_object(&reference.id);
}

/// `$(SRCROOT)`-relative directory holding the library's headers.
///
/// Headers spread over several directories are covered by their common
/// ancestor with a recursive `/**` suffix.
fn header_search_path(
    project: &IosProjectConfig,
    dependency: &IosDependencyConfig,
) -> Option<String> {
    let headers = find_files(&dependency.source_dir, |p| p.extension().is_some_and(|e| e == "h"));
    let dirs: BTreeSet<PathBuf> = headers
        .iter()
        .filter_map(|h| h.parent().map(Path::to_path_buf))
        .collect();

    let (dir, recursive) = match dirs.len() {
        0 => return None,
        1 => (dirs.into_iter().next()?, false),
        _ => (common_ancestor(dirs.iter())?, true),
    };
    let relative = to_unix_string(&relative_path(&project.source_dir, &dir));
    Some(format!(
        "$(SRCROOT)/{}{}",
        relative,
        if recursive { "/**" } else { "" }
    ))
}

fn common_ancestor<'a>(mut paths: impl Iterator<Item = &'a PathBuf>) -> Option<PathBuf> {
    let first = paths.next()?;
    let mut common: Vec<Component<'_>> = first.components().collect();
    for path in paths {
        let shared = common
            .iter()
            .zip(path.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        common.truncate(shared);
    }
    Some(common.iter().collect())
}
