//! Host project configuration.
//!
//! A [`ProjectConfig`] describes where a platform's native project lives and
//! which files linking touches. It is resolved once per run and is read-only
//! afterwards; only the files it points at are ever modified.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::platform::PlatformId;

/// Android host project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidProjectConfig {
    /// Directory holding `settings.gradle`
    pub source_dir: PathBuf,

    /// Root `settings.gradle`
    pub settings_gradle: PathBuf,

    /// App module `build.gradle`
    pub build_gradle: PathBuf,

    /// `MainApplication.java` registering packages
    pub main_file_path: PathBuf,

    /// `res/values/strings.xml` receiving parameter values
    pub strings_path: PathBuf,

    /// Assets directory receiving copied fonts
    pub assets_path: PathBuf,

    /// Application package name from `AndroidManifest.xml`
    pub package_name: String,
}

/// iOS host project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IosProjectConfig {
    /// Directory holding the `.xcodeproj`
    pub source_dir: PathBuf,

    /// The `.xcodeproj` bundle
    pub project_path: PathBuf,

    /// `project.pbxproj` inside the bundle
    pub pbxproj_path: PathBuf,

    /// Group receiving linked library projects
    pub library_folder: String,

    /// Names of the native build targets
    pub targets: Vec<String>,

    /// `Info.plist` of the main target, when declared
    pub plist_path: Option<PathBuf>,
}

/// Per-platform host project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProjectConfig {
    Android(AndroidProjectConfig),
    Ios(IosProjectConfig),
}

impl ProjectConfig {
    /// The platform this configuration targets.
    pub fn platform(&self) -> PlatformId {
        match self {
            ProjectConfig::Android(_) => PlatformId::Android,
            ProjectConfig::Ios(_) => PlatformId::Ios,
        }
    }

    pub fn as_android(&self) -> Option<&AndroidProjectConfig> {
        match self {
            ProjectConfig::Android(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_ios(&self) -> Option<&IosProjectConfig> {
        match self {
            ProjectConfig::Ios(c) => Some(c),
            _ => None,
        }
    }
}

/// Host project configurations for every platform the app supports.
pub type ProjectConfigs = BTreeMap<PlatformId, ProjectConfig>;
