//! nativelink - links native modules into mobile app projects
//!
//! This crate discovers the native dependencies an app declares, resolves
//! how each one plugs into the app's Android and iOS projects, and edits
//! those projects to register or unregister it.
//!
//! Edits are applied per file without locking. Concurrent invocations on
//! the same app are not supported, and a failure partway through a
//! platform's files can leave earlier files of the same registration
//! written.

pub mod core;
pub mod ops;
pub mod patch;
pub mod pbxproj;
pub mod platforms;
pub mod util;

/// Test utilities and mocks for nativelink unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{Dependency, DependencyConfig, PlatformId, ProjectConfig};
pub use platforms::PlatformRegistry;
pub use util::context::GlobalContext;
