//! Patches registering a library in the Gradle build and the main
//! application class.

use std::path::Path;

use regex::Regex;

use crate::core::{AndroidDependencyConfig, AndroidProjectConfig, Params};
use crate::patch::Patch;
use crate::platforms::{camel_case, normalize_project_name};
use crate::util::fs::{relative_path, to_unix_string};

/// `include` plus `projectDir` lines for `settings.gradle`.
pub fn settings_patch(
    name: &str,
    dependency: &AndroidDependencyConfig,
    project: &AndroidProjectConfig,
) -> Patch {
    let settings_dir = project
        .settings_gradle
        .parent()
        .unwrap_or_else(|| Path::new("."));
    let project_dir = to_unix_string(&relative_path(settings_dir, &dependency.source_dir));
    let gradle_name = normalize_project_name(name);
    Patch::append(format!(
        "include ':{name}'\nproject(':{name}').projectDir = new File(rootProject.projectDir, '{dir}')\n",
        name = gradle_name,
        dir = project_dir,
    ))
}

/// `implementation project(...)` line in the app's `dependencies` block.
pub fn build_patch(name: &str) -> Patch {
    let anchor = Regex::new(r"(?m)^dependencies\s*\{\r?\n").expect("valid dependencies pattern");
    Patch::after(
        anchor,
        format!(
            "    implementation project(':{}')\n",
            normalize_project_name(name)
        ),
    )
}

/// Matches any configuration depending on the library's Gradle project.
pub fn build_dependency_regex(name: &str) -> Regex {
    let pattern = format!(
        r#"(implementation|api|compile)\w*\s*\(?project\(['"]:{}['"]\)"#,
        regex::escape(&normalize_project_name(name))
    );
    Regex::new(&pattern).expect("escaped project name yields a valid pattern")
}

/// Import of the package class in the main application.
pub fn import_patch(import_path: &str) -> Patch {
    let anchor = Regex::new(r"(?m)^import com\.facebook\.react\.ReactApplication;?$")
        .expect("valid import pattern");
    Patch::after(anchor, format!("\n{}", import_path))
}

/// Package instance in the `getPackages()` list.
pub fn package_patch(instance: &str, params: &Params, prefix: &str) -> Patch {
    Patch::after_literal(
        "new MainReactPackage()",
        format!(",\n            {}", apply_params(instance, params, prefix)),
    )
}

/// String resources holding parameter answers, inserted after `<resources>`.
///
/// Returns `None` when there is nothing to write.
pub fn strings_patch(params: &Params, prefix: &str) -> Option<Patch> {
    if params.is_empty() {
        return None;
    }
    let lines: String = params
        .iter()
        .map(|(name, value)| {
            format!(
                "    <string moduleConfig=\"true\" name=\"{}\">{}</string>\n",
                resource_name(prefix, name),
                escape_xml(value)
            )
        })
        .collect();
    let anchor = Regex::new(r"<resources[^>]*>\r?\n").expect("valid resources pattern");
    Some(Patch::after(anchor, lines))
}

/// Token identifying the string resources of one package.
pub fn strings_token(prefix: &str) -> String {
    format!("moduleConfig=\"true\" name=\"{}_", camel_case(prefix))
}

/// Point `R.string` lookups in a package instance at the prefixed
/// resources written by [`strings_patch`]. Lookups of parameters without an
/// answer become `null`.
pub fn apply_params(instance: &str, params: &Params, prefix: &str) -> String {
    let re = Regex::new(r"this\.getResources\(\)\.getString\(R\.string\.(\w+)\)")
        .expect("valid resource pattern");
    re.replace_all(instance, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        if params.contains_key(name) {
            format!(
                "this.getResources().getString(R.string.{})",
                resource_name(prefix, name)
            )
        } else {
            "null".to_string()
        }
    })
    .into_owned()
}

fn resource_name(prefix: &str, name: &str) -> String {
    format!("{}_{}", camel_case(prefix), name)
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
