//! High-level operations.
//!
//! This module contains the implementation of nativelink commands.

pub mod discover;
pub mod link;
pub mod params;
pub mod resolve;
pub mod unlink;

pub use discover::{discover, is_native_module};
pub use link::{
    link_all, link_dependency, DependencyReport, LinkError, LinkOptions, LinkReport, LinkState,
    PlatformOutcome,
};
pub use params::{parse_preset, InteractivePrompter, ParamError, ParamSession, Prompter};
pub use resolve::{load_dependency, resolve_project, ResolveError};
pub use unlink::{unlink_all, unlink_dependency};
