//! Android project and dependency detection.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::core::{AndroidDependencyConfig, AndroidProjectConfig, PackageManifest};
use crate::util::fs::find_files;
use crate::util::Config;

/// Resolve the app's Android project.
///
/// Returns `None` when the source directory has no `settings.gradle` or
/// the app module lacks a manifest or main application class.
pub fn project_config(root: &Path, config: &Config) -> Option<AndroidProjectConfig> {
    let source_dir = root.join(
        config
            .android
            .source_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("android")),
    );
    let settings_gradle = source_dir.join("settings.gradle");
    if !settings_gradle.is_file() {
        tracing::debug!("no settings.gradle in {}", source_dir.display());
        return None;
    }

    let app = source_dir.join("app");
    let main = app.join("src/main");
    let manifest = main.join("AndroidManifest.xml");
    let package_name = match std::fs::read_to_string(&manifest) {
        Ok(content) => read_package_name(&content)?,
        Err(e) => {
            tracing::debug!("cannot read {}: {}", manifest.display(), e);
            return None;
        }
    };

    let main_file_path = find_main_application(&main.join("java"), &package_name)?;

    Some(AndroidProjectConfig {
        settings_gradle,
        build_gradle: app.join("build.gradle"),
        main_file_path,
        strings_path: main.join("res/values/strings.xml"),
        assets_path: main.join("assets/fonts"),
        package_name,
        source_dir,
    })
}

/// Resolve a package's Android library.
pub fn dependency_config(
    package_root: &Path,
    manifest: &PackageManifest,
) -> Option<AndroidDependencyConfig> {
    let overrides = &manifest.rnpm.android;
    let source_dir = package_root.join(overrides.source_dir.as_deref().unwrap_or("android"));
    if !source_dir.join("build.gradle").is_file() {
        return None;
    }

    let detected = find_package_class(&source_dir);
    let package_import_path = overrides
        .package_import_path
        .clone()
        .or_else(|| detected.as_ref().map(|c| format!("import {}.{};", c.package, c.name)))?;
    let package_instance = overrides
        .package_instance
        .clone()
        .or_else(|| detected.as_ref().map(|c| format!("new {}()", c.name)))?;

    Some(AndroidDependencyConfig {
        source_dir,
        package_import_path,
        package_instance,
    })
}

/// `package="..."` attribute of an `AndroidManifest.xml`.
fn read_package_name(manifest: &str) -> Option<String> {
    let re = Regex::new(r#"package\s*=\s*"([^"]+)""#).expect("valid package pattern");
    re.captures(manifest).map(|c| c[1].to_string())
}

fn find_main_application(java_dir: &Path, package_name: &str) -> Option<PathBuf> {
    let is_main = |p: &Path| {
        matches!(
            p.file_name().and_then(|n| n.to_str()),
            Some("MainApplication.java" | "MainApplication.kt")
        )
    };
    if let Some(found) = find_files(java_dir, is_main).into_iter().next() {
        return Some(found);
    }

    let fallback = java_dir
        .join(package_name.replace('.', "/"))
        .join("MainApplication.java");
    fallback.is_file().then_some(fallback)
}

struct PackageClass {
    package: String,
    name: String,
}

/// First Java or Kotlin class implementing `ReactPackage`.
fn find_package_class(source_dir: &Path) -> Option<PackageClass> {
    let class_re = Regex::new(
        r"class\s+(\w+)[^{]*(?:implements|:)[^{]*\bReactPackage\b",
    )
    .expect("valid class pattern");
    let package_re = Regex::new(r"(?m)^\s*package\s+([\w.]+)").expect("valid package pattern");

    let sources = find_files(source_dir, |p| {
        p.extension().is_some_and(|e| e == "java" || e == "kt")
    });
    sources.iter().find_map(|path| {
        let content = std::fs::read_to_string(path).ok()?;
        let name = class_re.captures(&content)?[1].to_string();
        let package = package_re.captures(&content)?[1].to_string();
        tracing::debug!("found package class {}.{} in {}", package, name, path.display());
        Some(PackageClass { package, name })
    })
}
