//! `package.json` parsing.
//!
//! Only the fields linking cares about are modeled: dependency names (in
//! declaration order) and the `rnpm` section a native package uses to
//! describe itself.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::core::dependency::Param;

/// A package manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,

    /// Runtime dependencies, in declaration order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Map<String, Value>,

    /// Development dependencies, in declaration order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dev_dependencies: Map<String, Value>,

    /// Native linking metadata
    #[serde(default)]
    pub rnpm: RnpmConfig,
}

/// `null` reads as an empty table.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// The `rnpm` section of a native package.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RnpmConfig {
    /// Values asked for before registration
    #[serde(default)]
    pub params: Vec<Param>,

    /// Asset folders copied into the app, relative to the package root
    #[serde(default)]
    pub assets: Vec<String>,

    #[serde(default)]
    pub android: RnpmAndroid,

    #[serde(default)]
    pub ios: RnpmIos,
}

/// Android overrides of auto-detected values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RnpmAndroid {
    /// Library folder relative to the package root
    pub source_dir: Option<String>,
    pub package_import_path: Option<String>,
    pub package_instance: Option<String>,
}

/// iOS overrides of auto-detected values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RnpmIos {
    /// `.xcodeproj` path relative to the package root
    pub project: Option<String>,
    #[serde(default)]
    pub shared_libraries: Vec<String>,
}

impl PackageManifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse a manifest from JSON text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Names of `dependencies` followed by `devDependencies`, in file order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(String::as_str)
    }
}
