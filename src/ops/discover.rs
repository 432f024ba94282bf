//! Discovery of native dependencies declared by the app.

use std::path::Path;

use crate::core::PackageManifest;
use crate::util::context::MANIFEST_FILE;

const FRAMEWORK_PREFIX: &str = "react-native-";
const FRAMEWORK_SCOPE: &str = "@react-native";
const PLUGIN_PREFIX: &str = "rnpm-plugin-";

/// Names of the app's dependencies that follow a native module naming
/// convention, `dependencies` first, then `devDependencies`, in manifest
/// order.
///
/// An unreadable or malformed manifest yields no dependencies.
pub fn discover(root: &Path) -> Vec<String> {
    let path = root.join(MANIFEST_FILE);
    let manifest = match PackageManifest::load(&path) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::debug!("no dependencies discovered: {:#}", e);
            return Vec::new();
        }
    };

    manifest
        .dependency_names()
        .filter(|name| is_native_module(name))
        .map(str::to_string)
        .collect()
}

/// Whether a package name follows a native module naming convention.
///
/// Recognized: `react-native-*`, `@scope/react-native-*`, any package under
/// a `@react-native*` scope, and the deprecated `rnpm-plugin-*` prefix,
/// scoped or not. Deprecated plugins under a `@react-native*` scope are not
/// native modules.
pub fn is_native_module(name: &str) -> bool {
    match name.strip_prefix('@').and_then(|scoped| scoped.split_once('/')) {
        Some((scope, package)) => {
            if format!("@{}", scope).starts_with(FRAMEWORK_SCOPE) {
                !package.starts_with(PLUGIN_PREFIX)
            } else {
                package.starts_with(FRAMEWORK_PREFIX) || package.starts_with(PLUGIN_PREFIX)
            }
        }
        None => name.starts_with(FRAMEWORK_PREFIX) || name.starts_with(PLUGIN_PREFIX),
    }
}
