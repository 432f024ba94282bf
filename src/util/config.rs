//! Project configuration file support.
//!
//! An optional `nativelink.toml` at the app root overrides where the native
//! projects live and pre-answers dependency parameters:
//!
//! ```toml
//! [android]
//! source_dir = "android"
//!
//! [ios]
//! source_dir = "ios"
//! library_folder = "Libraries"
//!
//! [link]
//! ignore = ["react-native-vector-icons"]
//!
//! [params]
//! codePushDeploymentKey = "abc123"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "nativelink.toml";

/// nativelink configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Android project overrides
    pub android: AndroidSettings,

    /// iOS project overrides
    pub ios: IosSettings,

    /// Linking behavior
    pub link: LinkSettings,

    /// Preset answers for dependency parameters, keyed by parameter name
    pub params: BTreeMap<String, String>,
}

/// Android project overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidSettings {
    /// Directory holding `settings.gradle`, relative to the project root
    pub source_dir: Option<PathBuf>,
}

/// iOS project overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IosSettings {
    /// Directory holding the `.xcodeproj`, relative to the project root
    pub source_dir: Option<PathBuf>,

    /// Xcode group that receives linked library projects
    pub library_folder: Option<String>,
}

/// Linking behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Dependencies never linked even if discovered
    pub ignore: Vec<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load `nativelink.toml` from the project root.
    ///
    /// A missing file yields defaults; a malformed one is reported and also
    /// yields defaults so that linking can still proceed.
    pub fn load_for_project(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }

        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("ignoring {}: {:#}", path.display(), e);
            Self::default()
        })
    }

    /// Check whether a dependency is excluded from linking.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.link.ignore.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(Config::load_for_project(tmp.path()), Config::default());
    }

    #[test]
    fn test_parse_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[ios]
source_dir = "native/ios"
library_folder = "Vendor"

[link]
ignore = ["react-native-foo"]

[params]
apiKey = "secret"
"#,
        )
        .unwrap();

        let config = Config::load_for_project(tmp.path());
        assert_eq!(config.ios.source_dir, Some(PathBuf::from("native/ios")));
        assert_eq!(config.ios.library_folder.as_deref(), Some("Vendor"));
        assert!(config.android.source_dir.is_none());
        assert!(config.is_ignored("react-native-foo"));
        assert!(!config.is_ignored("react-native-bar"));
        assert_eq!(config.params.get("apiKey").map(String::as_str), Some("secret"));
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[link\nignore = ").unwrap();
        assert_eq!(Config::load_for_project(tmp.path()), Config::default());
    }
}
