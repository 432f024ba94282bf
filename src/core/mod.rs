//! Core data types.
//!
//! Platforms, dependencies and host project configuration shared by the
//! resolver, the platform adapters and the orchestrators.

pub mod dependency;
pub mod manifest;
pub mod platform;
pub mod project;

pub use dependency::{
    AndroidDependencyConfig, Dependency, DependencyConfig, IosDependencyConfig, Param, Params,
};
pub use manifest::PackageManifest;
pub use platform::PlatformId;
pub use project::{AndroidProjectConfig, IosProjectConfig, ProjectConfig, ProjectConfigs};
