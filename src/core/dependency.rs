//! Native dependencies and their per-platform configuration.
//!
//! A [`Dependency`] is built once during discovery and never changes
//! afterwards; adapters only ever read it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::platform::PlatformId;

/// A named interactive value a dependency needs at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name, unique across a link run
    pub name: String,

    /// Prompt shown to the user
    #[serde(default)]
    pub message: Option<String>,

    /// Value used when the user gives no answer
    #[serde(default)]
    pub default: Option<String>,
}

impl Param {
    /// Create a parameter with no prompt text and no default.
    pub fn new(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            message: None,
            default: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the prompt text.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Prompt text, falling back to the parameter name.
    pub fn prompt(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.name)
    }
}

/// Resolved parameter answers, keyed by parameter name.
pub type Params = BTreeMap<String, String>;

/// Android-specific dependency configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidDependencyConfig {
    /// Directory holding the library's `build.gradle`
    pub source_dir: PathBuf,

    /// Import statement for the package class, e.g. `import com.foo.FooPackage;`
    pub package_import_path: String,

    /// Constructor expression, e.g. `new FooPackage()`
    pub package_instance: String,
}

/// iOS-specific dependency configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IosDependencyConfig {
    /// Directory holding the library's `.xcodeproj`
    pub source_dir: PathBuf,

    /// Path to the library's `.xcodeproj` bundle
    pub project_path: PathBuf,

    /// File name of the `.xcodeproj` bundle, e.g. `RNCamera.xcodeproj`
    pub project_name: String,

    /// System libraries the module needs, e.g. `libz.tbd`
    pub shared_libraries: Vec<String>,
}

/// Per-platform dependency configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DependencyConfig {
    Android(AndroidDependencyConfig),
    Ios(IosDependencyConfig),
}

impl DependencyConfig {
    /// The platform this configuration targets.
    pub fn platform(&self) -> PlatformId {
        match self {
            DependencyConfig::Android(_) => PlatformId::Android,
            DependencyConfig::Ios(_) => PlatformId::Ios,
        }
    }

    pub fn as_android(&self) -> Option<&AndroidDependencyConfig> {
        match self {
            DependencyConfig::Android(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_ios(&self) -> Option<&IosDependencyConfig> {
        match self {
            DependencyConfig::Ios(c) => Some(c),
            _ => None,
        }
    }
}

/// A third-party module providing native code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    name: String,
    root: PathBuf,
    platforms: BTreeMap<PlatformId, DependencyConfig>,
    params: Vec<Param>,
    assets: Vec<PathBuf>,
}

impl Dependency {
    /// Create a dependency without any platform configuration.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Dependency {
            name: name.into(),
            root: root.into(),
            platforms: BTreeMap::new(),
            params: Vec::new(),
            assets: Vec::new(),
        }
    }

    /// Attach a platform configuration.
    pub fn with_platform(mut self, config: DependencyConfig) -> Self {
        self.platforms.insert(config.platform(), config);
        self
    }

    /// Declare the parameters registration needs.
    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self
    }

    /// Declare asset files copied into the app.
    pub fn with_assets(mut self, assets: Vec<PathBuf>) -> Self {
        self.assets = assets;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configuration for a platform, if the dependency supports it.
    pub fn platform(&self, id: PlatformId) -> Option<&DependencyConfig> {
        self.platforms.get(&id)
    }

    /// Platforms this dependency declares, in processing order.
    pub fn platforms(&self) -> impl Iterator<Item = PlatformId> + '_ {
        self.platforms.keys().copied()
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn assets(&self) -> &[PathBuf] {
        &self.assets
    }
}
