//! Global context for nativelink operations.
//!
//! Provides centralized access to the project root and its configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::util::config::Config;
use crate::util::diagnostic::suggestions;

/// Name of the app manifest that marks a project root.
pub const MANIFEST_FILE: &str = "package.json";

/// Global context shared by all commands.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// App root (directory holding `package.json`)
    root: PathBuf,

    /// Loaded `nativelink.toml`
    config: Config,
}

impl GlobalContext {
    /// Create a context rooted at the nearest ancestor of the current
    /// directory that holds a `package.json`.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Self::discover(&cwd)
    }

    /// Create a context rooted at the nearest ancestor of `start` that holds
    /// a `package.json`.
    pub fn discover(start: &Path) -> Result<Self> {
        let root = find_project_root(start)?;
        Ok(Self::with_root(root))
    }

    /// Create a context for an explicit root, without searching upwards.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config = Config::load_for_project(&root);
        GlobalContext { root, config }
    }

    /// Get the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the project configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Walk up from `start` until a directory containing `package.json` is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(MANIFEST_FILE).is_file() {
            return Ok(dir.to_path_buf());
        }
        current = dir.parent();
    }
    bail!(
        "could not find `{}` in `{}` or any parent directory\n{}",
        MANIFEST_FILE,
        start.display(),
        suggestions::NO_MANIFEST
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_project_root_walks_up() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_FILE), "{}").unwrap();
        let nested = tmp.path().join("ios/App");
        std::fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn test_find_project_root_fails_without_manifest() {
        let tmp = TempDir::new().unwrap();
        let err = find_project_root(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn test_context_loads_project_config() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_root(tmp.path());
        assert_eq!(ctx.root(), tmp.path());
        assert!(ctx.config().link.ignore.is_empty());

        std::fs::write(
            tmp.path().join("nativelink.toml"),
            "[link]\nignore = [\"react-native-foo\"]\n",
        )
        .unwrap();
        let ctx = GlobalContext::with_root(tmp.path());
        assert!(ctx.config().is_ignored("react-native-foo"));
    }
}
