//! Test utilities and mocks for nativelink unit tests.
//!
//! Besides the app fixtures, this module provides a scripted [`Prompter`]
//! and [`FakeAndroid`], an Android adapter that records a registration as a
//! single marker line in the app's `build.gradle`.

pub mod fixtures;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::core::{DependencyConfig, PackageManifest, Param, Params, PlatformId, ProjectConfig};
use crate::ops::params::{ParamError, Prompter};
use crate::ops::resolve::ResolveError;
use crate::patch::remove_lines_containing;
use crate::platforms::android::config;
use crate::platforms::{Platform, PlatformLinkConfig, Registration};
use crate::util::Config;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Prompter answering from a fixed list and recording what was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Rc::default(),
        }
    }

    /// Names of the parameters asked so far, shared with the prompter.
    pub fn asked(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.asked)
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, param: &Param) -> Result<String, ParamError> {
        self.asked.borrow_mut().push(param.name.clone());
        self.answers.pop_front().ok_or_else(|| ParamError::Missing {
            name: param.name.clone(),
        })
    }
}

/// Android adapter that writes one marker line per registration.
#[derive(Debug, Clone, Default)]
pub struct FakeAndroid {
    /// Dependency whose register and unregister calls fail
    pub failing: Option<String>,
    /// Whether to withhold the link operations
    pub opted_out: bool,
}

impl FakeAndroid {
    pub fn failing_for(name: impl Into<String>) -> Self {
        FakeAndroid {
            failing: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn opted_out() -> Self {
        FakeAndroid {
            opted_out: true,
            ..Self::default()
        }
    }

    fn marker(name: &str) -> String {
        format!("// linked {}", name)
    }

    fn check(&self, name: &str) -> Result<()> {
        if self.failing.as_deref() == Some(name) {
            bail!("disk full");
        }
        Ok(())
    }
}

fn build_gradle(project: &ProjectConfig) -> Result<&Path> {
    match project.as_android() {
        Some(project) => Ok(&project.build_gradle),
        None => bail!("not an Android project"),
    }
}

impl Platform for FakeAndroid {
    fn id(&self) -> PlatformId {
        PlatformId::Android
    }

    fn project_config(
        &self,
        root: &Path,
        config: &Config,
    ) -> Result<Option<ProjectConfig>, ResolveError> {
        Ok(config::project_config(root, config).map(ProjectConfig::Android))
    }

    fn dependency_config(
        &self,
        package_root: &Path,
        manifest: &PackageManifest,
    ) -> Option<DependencyConfig> {
        config::dependency_config(package_root, manifest).map(DependencyConfig::Android)
    }

    fn link_config(&self) -> Option<&dyn PlatformLinkConfig> {
        if self.opted_out {
            None
        } else {
            Some(self)
        }
    }
}

impl PlatformLinkConfig for FakeAndroid {
    fn is_installed(
        &self,
        project: &ProjectConfig,
        name: &str,
        _dependency: &DependencyConfig,
    ) -> Result<bool> {
        let content = std::fs::read_to_string(build_gradle(project)?)?;
        Ok(content.contains(&Self::marker(name)))
    }

    fn register(
        &self,
        name: &str,
        _dependency: &DependencyConfig,
        _params: &Params,
        project: &ProjectConfig,
    ) -> Result<Registration> {
        self.check(name)?;
        let path = build_gradle(project)?;
        let mut content = std::fs::read_to_string(path)?;
        content.push_str(&Self::marker(name));
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(Registration::Applied(vec![path.to_path_buf()]))
    }

    fn unregister(
        &self,
        name: &str,
        _dependency: &DependencyConfig,
        project: &ProjectConfig,
        _others: &[&DependencyConfig],
    ) -> Result<Registration> {
        self.check(name)?;
        let path = build_gradle(project)?;
        let content = std::fs::read_to_string(path)?;
        match remove_lines_containing(&content, &Self::marker(name)) {
            Some(updated) => {
                std::fs::write(path, updated)?;
                Ok(Registration::Applied(vec![path.to_path_buf()]))
            }
            None => Ok(Registration::Applied(Vec::new())),
        }
    }
}
