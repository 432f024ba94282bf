//! Xcode `project.pbxproj` support.
//!
//! The file is an old-style property list: dictionaries, arrays and
//! scalars with `/* ... */` comments that Xcode uses as annotations. The
//! [`parser`] keeps byte spans for every value, [`ProjectGraph`] indexes the
//! `objects` dictionary by id, and [`Editor`] turns mutations into span
//! replacements so that untouched regions round-trip byte for byte.

pub mod parser;

mod edit;
mod graph;

pub use edit::{quote, Editor, NewObject, NewValue, INHERITED};
pub use graph::{PbxObject, ProjectGraph, APPLICATION, STATIC_LIBRARY};
pub use parser::ParseError;
