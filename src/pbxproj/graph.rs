//! Arena model of an Xcode project's object graph.

use std::collections::HashMap;
use std::ops::Range;

use super::parser::{self, Comment, Dict, Document, ParseError};

/// Product type of static library targets.
pub const STATIC_LIBRARY: &str = "com.apple.product-type.library.static";

/// Product type of application targets.
pub const APPLICATION: &str = "com.apple.product-type.application";

/// One entry of the `objects` dictionary.
///
/// Only `isa` is modeled explicitly; every other field stays in the
/// parsed [`Dict`] in file order.
#[derive(Debug, Clone)]
pub struct PbxObject {
    pub id: String,
    pub isa: String,
    pub fields: Dict,
    /// The whole `id = { ... };` entry
    pub span: Range<usize>,
}

impl PbxObject {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get_str(key)
    }

    /// Ids referenced by an array field such as `children` or `files`.
    pub fn refs(&self, key: &str) -> Vec<&str> {
        self.fields
            .get_array(key)
            .map(|a| a.strings().collect())
            .unwrap_or_default()
    }

    /// Display name: `name`, falling back to `path`.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name").or_else(|| self.get_str("path"))
    }
}

/// Parsed `project.pbxproj` with an id index.
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    source: String,
    root: Dict,
    comments: Vec<Comment>,
    objects_span: Range<usize>,
    nodes: Vec<PbxObject>,
    index: HashMap<String, usize>,
}

impl ProjectGraph {
    /// Parse a project file.
    pub fn parse(source: impl Into<String>) -> Result<Self, ParseError> {
        let source = source.into();
        let Document { root, comments } = parser::parse(&source)?;

        let objects_entry = root.entry("objects").ok_or_else(|| ParseError {
            offset: root.span.start,
            message: "missing `objects` dictionary".to_string(),
        })?;
        let objects = objects_entry.value.as_dict().ok_or_else(|| ParseError {
            offset: objects_entry.span.start,
            message: "`objects` is not a dictionary".to_string(),
        })?;

        let mut nodes = Vec::with_capacity(objects.entries.len());
        let mut index = HashMap::with_capacity(objects.entries.len());
        for entry in &objects.entries {
            let Some(fields) = entry.value.as_dict() else {
                continue;
            };
            let isa = fields.get_str("isa").unwrap_or_default().to_string();
            index.insert(entry.key.clone(), nodes.len());
            nodes.push(PbxObject {
                id: entry.key.clone(),
                isa,
                fields: fields.clone(),
                span: entry.span.clone(),
            });
        }

        let objects_span = objects.span.clone();
        Ok(ProjectGraph {
            source,
            root,
            comments,
            objects_span,
            nodes,
            index,
        })
    }

    /// The text the graph was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Dict {
        &self.root
    }

    pub(crate) fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub(crate) fn objects_span(&self) -> Range<usize> {
        self.objects_span.clone()
    }

    pub fn object(&self, id: &str) -> Option<&PbxObject> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All objects, in file order.
    pub fn objects(&self) -> impl Iterator<Item = &PbxObject> {
        self.nodes.iter()
    }

    /// All objects of one class, in file order.
    pub fn objects_of<'a>(&'a self, isa: &'a str) -> impl Iterator<Item = &'a PbxObject> + 'a {
        self.nodes.iter().filter(move |o| o.isa == isa)
    }

    /// The `PBXProject` object named by `rootObject`.
    pub fn root_project(&self) -> Option<&PbxObject> {
        self.root
            .get_str("rootObject")
            .and_then(|id| self.object(id))
    }

    /// The project's top-level group.
    pub fn main_group(&self) -> Option<&PbxObject> {
        self.root_project()
            .and_then(|p| p.get_str("mainGroup"))
            .and_then(|id| self.object(id))
    }

    /// First group with the given display name.
    pub fn group_by_name(&self, name: &str) -> Option<&PbxObject> {
        self.objects_of("PBXGroup").find(|g| g.name() == Some(name))
    }

    /// Children of `group`, resolved to objects.
    pub fn children<'a>(
        &'a self,
        group: &'a PbxObject,
    ) -> impl Iterator<Item = &'a PbxObject> + 'a {
        group
            .refs("children")
            .into_iter()
            .filter_map(move |id| self.object(id))
    }

    /// Native targets, in file order.
    pub fn targets(&self) -> impl Iterator<Item = &PbxObject> {
        self.objects_of("PBXNativeTarget")
    }

    /// Native target by name.
    pub fn target(&self, name: &str) -> Option<&PbxObject> {
        self.targets().find(|t| t.get_str("name") == Some(name))
    }

    /// Build configurations of a target.
    pub fn build_configurations<'a>(
        &'a self,
        target: &'a PbxObject,
    ) -> impl Iterator<Item = &'a PbxObject> + 'a {
        target
            .get_str("buildConfigurationList")
            .and_then(|id| self.object(id))
            .map(|list| list.refs("buildConfigurations"))
            .unwrap_or_default()
            .into_iter()
            .filter_map(move |id| self.object(id))
    }

    /// A build setting of `target`, from its first configuration defining it.
    ///
    /// The value is de-quoted and has `$(SRCROOT)` removed.
    pub fn build_property(&self, target: &PbxObject, name: &str) -> Option<String> {
        self.build_configurations(target)
            .filter_map(|config| config.fields.get_dict("buildSettings"))
            .find_map(|settings| settings.get_str(name))
            .map(|value| value.replace('"', "").replace("$(SRCROOT)", ""))
    }

    /// Frameworks build phase of a target.
    pub fn frameworks_phase<'a>(&'a self, target: &'a PbxObject) -> Option<&'a PbxObject> {
        target
            .refs("buildPhases")
            .into_iter()
            .filter_map(|id| self.object(id))
            .find(|phase| phase.isa == "PBXFrameworksBuildPhase")
    }

    /// Product file names of every target with the given product type.
    pub fn products(&self, product_type: &str) -> Vec<String> {
        self.targets()
            .filter(|t| t.get_str("productType") == Some(product_type))
            .filter_map(|t| t.get_str("productReference"))
            .filter_map(|id| self.object(id))
            .filter_map(|file| file.get_str("path").or_else(|| file.get_str("name")))
            .map(str::to_string)
            .collect()
    }

    /// Static libraries this project exports.
    pub fn static_libraries(&self) -> Vec<String> {
        self.products(STATIC_LIBRARY)
    }
}
