//! Span-based editing of a parsed project.
//!
//! An [`Editor`] never rewrites the document. Each mutation becomes a
//! replacement of a byte range of the original text; [`Editor::finish`]
//! splices them in, so everything the editor did not touch comes out
//! byte-for-byte as it went in.

use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

use super::graph::ProjectGraph;
use super::parser::{Dict, Element, Value};
use crate::util::hash::object_id;

/// Value recorded by Xcode ahead of project-specific search paths.
pub const INHERITED: &str = "$(inherited)";

/// Field value of an object created by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewValue {
    /// A scalar, quoted on output when needed
    Str(String),
    /// A reference to another object, with the comment Xcode shows next to it
    Ref { id: String, comment: String },
    /// A list of references
    Refs(Vec<(String, String)>),
}

/// An object to insert into the `objects` dictionary.
#[derive(Debug, Clone)]
pub struct NewObject {
    pub id: String,
    pub isa: String,
    pub comment: String,
    pub fields: Vec<(String, NewValue)>,
}

impl NewObject {
    pub fn new(id: impl Into<String>, isa: impl Into<String>, comment: impl Into<String>) -> Self {
        NewObject {
            id: id.into(),
            isa: isa.into(),
            comment: comment.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), NewValue::Str(value.into())));
        self
    }

    pub fn reference(
        mut self,
        key: &str,
        id: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        self.fields.push((
            key.to_string(),
            NewValue::Ref {
                id: id.into(),
                comment: comment.into(),
            },
        ));
        self
    }

    pub fn references(mut self, key: &str, refs: Vec<(String, String)>) -> Self {
        self.fields.push((key.to_string(), NewValue::Refs(refs)));
        self
    }

    /// Xcode writes build files and file references on one line.
    fn is_single_line(&self) -> bool {
        matches!(self.isa.as_str(), "PBXBuildFile" | "PBXFileReference")
    }

    fn render(&self) -> String {
        let mut fields = vec![format!("isa = {};", self.isa)];
        for (key, value) in &self.fields {
            let rendered = match value {
                NewValue::Str(s) => quote(s),
                NewValue::Ref { id, comment } => format!("{} /* {} */", id, comment),
                NewValue::Refs(refs) => {
                    let items: Vec<String> = refs
                        .iter()
                        .map(|(id, comment)| format!("{} /* {} */,", id, comment))
                        .collect();
                    if items.is_empty() {
                        "(\n\t\t\t)".to_string()
                    } else {
                        format!("(\n\t\t\t\t{}\n\t\t\t)", items.join("\n\t\t\t\t"))
                    }
                }
            };
            fields.push(format!("{} = {};", quote(key), rendered));
        }

        if self.is_single_line() {
            format!(
                "\t\t{} /* {} */ = {{{} }};\n",
                self.id,
                self.comment,
                fields.join(" ")
            )
        } else {
            format!(
                "\t\t{} /* {} */ = {{\n\t\t\t{}\n\t\t}};\n",
                self.id,
                self.comment,
                fields.join("\n\t\t\t")
            )
        }
    }
}

/// Quote a scalar the way Xcode does: bare when it only contains
/// identifier-like characters.
pub fn quote(s: &str) -> String {
    let bare = !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'/' | b':' | b'.'));
    if bare {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

#[derive(Debug, Clone)]
struct Edit {
    range: Range<usize>,
    text: String,
    seq: usize,
}

/// Collects edits against a [`ProjectGraph`].
pub struct Editor<'g> {
    graph: &'g ProjectGraph,
    seed: String,
    edits: Vec<Edit>,
    new_objects: BTreeMap<String, Vec<NewObject>>,
    new_ids: HashSet<String>,
    removed: HashSet<String>,
    pushed: HashSet<(String, String, String)>,
}

impl<'g> Editor<'g> {
    /// Start editing. `seed` makes generated ids stable for a given caller.
    pub fn new(graph: &'g ProjectGraph, seed: &str) -> Self {
        Editor {
            graph,
            seed: seed.to_string(),
            edits: Vec::new(),
            new_objects: BTreeMap::new(),
            new_ids: HashSet::new(),
            removed: HashSet::new(),
            pushed: HashSet::new(),
        }
    }

    pub fn graph(&self) -> &'g ProjectGraph {
        self.graph
    }

    /// Whether any mutation was recorded.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty() && self.new_objects.is_empty()
    }

    /// A fresh 24-digit object id, derived from the seed and `role`.
    pub fn generate_id(&mut self, role: &str) -> String {
        let mut attempt = 0usize;
        loop {
            let id = object_id([self.seed.as_str(), role, &attempt.to_string()]);
            if !self.graph.contains(&id) && self.new_ids.insert(id.clone()) {
                return id;
            }
            attempt += 1;
        }
    }

    /// Whether `id` is the id [`generate_id`](Self::generate_id) handed out
    /// for `role` under this seed when the object did not exist yet.
    ///
    /// Candidates that were already taken at that time are still in the
    /// graph, so the walk stops at the first candidate that is missing.
    pub fn is_generated(&self, role: &str, id: &str) -> bool {
        let mut attempt = 0usize;
        loop {
            let candidate = object_id([self.seed.as_str(), role, &attempt.to_string()]);
            if candidate == id {
                return true;
            }
            if !self.graph.contains(&candidate) {
                return false;
            }
            attempt += 1;
        }
    }

    fn push_edit(&mut self, range: Range<usize>, text: impl Into<String>) {
        let seq = self.edits.len();
        self.edits.push(Edit {
            range,
            text: text.into(),
            seq,
        });
    }

    /// Queue a new object for its `/* Begin <isa> section */`.
    pub fn add_object(&mut self, object: NewObject) {
        self.new_ids.insert(object.id.clone());
        self.new_objects
            .entry(object.isa.clone())
            .or_default()
            .push(object);
    }

    /// Remove an existing object. Returns `false` if it does not exist.
    pub fn remove_object(&mut self, id: &str) -> bool {
        let Some(object) = self.graph.object(id) else {
            return false;
        };
        if !self.removed.insert(id.to_string()) {
            return true;
        }
        let range = self.line_range(object.span.clone());
        self.push_edit(range, "");
        true
    }

    /// Append a reference to an array field of an existing object.
    ///
    /// Returns `false` if the owner or the array does not exist. Adding a
    /// reference that is already present is a no-op.
    pub fn push_ref(&mut self, owner: &str, key: &str, id: &str, comment: &str) -> bool {
        let Some(array) = self
            .graph
            .object(owner)
            .and_then(|o| o.fields.get_array(key))
        else {
            return false;
        };
        if array.strings().any(|s| s == id)
            || !self
                .pushed
                .insert((owner.to_string(), key.to_string(), id.to_string()))
        {
            return true;
        }
        let item = format!("{} /* {} */", id, comment);
        self.push_array_item(array.span.clone(), &item);
        true
    }

    /// Remove a reference from an array field. Absent references are a no-op.
    pub fn remove_ref(&mut self, owner: &str, key: &str, id: &str) {
        let Some(array) = self
            .graph
            .object(owner)
            .and_then(|o| o.fields.get_array(key))
        else {
            return;
        };
        if let Some(element) = array.elements.iter().find(|e| e.value.as_str() == Some(id)) {
            let range = self.item_range(element.value.span().start, element.item_end);
            self.push_edit(range, "");
        }
    }

    /// Add `value` to a list-valued build setting of a build configuration.
    ///
    /// A missing setting is created as a multi-line `($(inherited), value)`
    /// list. A scalar setting becomes the inline list `(old, value)`, which
    /// [`remove_setting_value`](Self::remove_setting_value) turns back into
    /// the scalar.
    pub fn add_setting_value(&mut self, config_id: &str, key: &str, value: &str) {
        let Some(settings) = self.build_settings(config_id) else {
            return;
        };
        let source = self.graph.source();
        match settings.entry(key) {
            None => {
                let close = settings.span.end - 1;
                let close_start = line_start(source, close);
                let indent = format!("{}\t", indent_at(source, close_start));
                let text = format!(
                    "{ind}{key} = (\n{ind}\t{inh},\n{ind}\t{val},\n{ind});\n",
                    ind = indent,
                    key = quote(key),
                    inh = quote(INHERITED),
                    val = quote(value),
                );
                let at = settings
                    .entries
                    .iter()
                    .find(|e| e.key.as_str() > key)
                    .map(|e| line_start(source, e.span.start))
                    .unwrap_or(close_start);
                self.push_edit(at..at, text);
            }
            Some(entry) => match &entry.value {
                Value::String(s) if s.value == value => {}
                Value::String(s) => {
                    let text = format!("({}, {})", &source[s.span.clone()], quote(value));
                    self.push_edit(s.span.clone(), text);
                }
                Value::Array(array) => {
                    if !array.strings().any(|s| s == value) {
                        let span = array.span.clone();
                        self.push_array_item(span, &quote(value));
                    }
                }
                Value::Dict(_) => {
                    tracing::warn!("build setting `{}` of {} is not a list", key, config_id);
                }
            },
        }
    }

    /// Remove `value` from a list-valued build setting.
    ///
    /// Inverse of [`add_setting_value`](Self::add_setting_value): an inline
    /// two-value list goes back to the scalar it was made from, and a
    /// multi-line list left holding only `$(inherited)` is removed. Any
    /// other list just loses the value and keeps its layout.
    ///
    /// A list of exactly `$(inherited)` and `value` that the user wrote
    /// before linking looks the same as one the editor created, so it is
    /// removed too. The same goes for a scalar equal to `value`.
    pub fn remove_setting_value(&mut self, config_id: &str, key: &str, value: &str) {
        let Some(settings) = self.build_settings(config_id) else {
            return;
        };
        let Some(entry) = settings.entry(key) else {
            return;
        };
        let source = self.graph.source();
        let entry_range = self.line_range(entry.span.clone());
        match &entry.value {
            Value::String(s) if s.value == value => self.push_edit(entry_range, ""),
            Value::Array(array) => {
                let Some(index) = array
                    .elements
                    .iter()
                    .position(|e| e.value.as_str() == Some(value))
                else {
                    return;
                };
                let inline = !source[array.span.clone()].contains('\n');
                let remaining: Vec<_> = array
                    .elements
                    .iter()
                    .filter(|e| e.value.as_str() != Some(value))
                    .collect();
                match remaining.as_slice() {
                    [] => self.push_edit(entry_range, ""),
                    [only] if inline => {
                        let raw = source[only.value.span()].to_string();
                        self.push_edit(array.span.clone(), raw);
                    }
                    [only] if only.value.as_str() == Some(INHERITED) => {
                        self.push_edit(entry_range, "")
                    }
                    _ => {
                        let range = self.element_range(&array.elements, index, inline);
                        self.push_edit(range, "");
                    }
                }
            }
            _ => {}
        }
    }

    fn build_settings(&self, config_id: &str) -> Option<&'g Dict> {
        self.graph
            .object(config_id)
            .and_then(|c| c.fields.get_dict("buildSettings"))
    }

    fn push_array_item(&mut self, array_span: Range<usize>, item: &str) {
        let source = self.graph.source();
        let close = array_span.end - 1;
        let ls = line_start(source, close);
        if source[ls..close].trim().is_empty() {
            let indent = format!("{}\t", &source[ls..close]);
            self.push_edit(ls..ls, format!("{}{},\n", indent, item));
        } else if source[array_span.start..close].trim_end().ends_with([',', '(']) {
            self.push_edit(close..close, format!("{}, ", item));
        } else {
            self.push_edit(close..close, format!(", {}", item));
        }
    }

    /// Range removing element `index` of an array. The last element of an
    /// inline list without a trailing comma takes the preceding separator.
    fn element_range(&self, elements: &[Element], index: usize, inline: bool) -> Range<usize> {
        let target = &elements[index];
        let start = target.value.span().start;
        let end = target.value.span().end;
        if inline && target.item_end == end && index > 0 {
            return elements[index - 1].item_end - 1..end;
        }
        self.item_range(start, target.item_end)
    }

    /// Range covering `span`, widened to whole lines when nothing else
    /// shares them.
    fn line_range(&self, span: Range<usize>) -> Range<usize> {
        let source = self.graph.source();
        let ls = line_start(source, span.start);
        let le = line_end(source, span.end);
        if source[ls..span.start].trim().is_empty() && source[span.end..le].trim().is_empty() {
            ls..le
        } else {
            span
        }
    }

    /// Range of an array element through its comma. Own-line elements take
    /// their whole line; inline elements take the following spaces.
    fn item_range(&self, start: usize, item_end: usize) -> Range<usize> {
        let source = self.graph.source();
        let ls = line_start(source, start);
        let le = line_end(source, item_end);
        if source[ls..start].trim().is_empty() && source[item_end..le].trim().is_empty() {
            ls..le
        } else {
            let trailing = source[item_end..]
                .bytes()
                .take_while(|b| *b == b' ')
                .count();
            start..item_end + trailing
        }
    }

    /// Edits that place queued objects into their sections, and drop
    /// sections emptied by removals.
    fn section_edits(&mut self) {
        let source = self.graph.source();
        let objects_span = self.graph.objects_span();
        let sections = sections(self.graph);

        for (name, (begin, end)) in &sections {
            let members: Vec<_> = self
                .graph
                .objects_of(name)
                .filter(|o| o.span.start > begin.end && o.span.end < end.start)
                .collect();
            let emptied = !members.is_empty()
                && members.iter().all(|o| self.removed.contains(&o.id))
                && !self.new_objects.contains_key(name);
            if emptied {
                let mut range = begin.start..line_end(source, end.end);
                if source[range.end..].starts_with('\n') {
                    range.end += 1;
                } else if source[..range.start].ends_with("\n\n") {
                    range.start -= 1;
                }
                self.edits
                    .retain(|e| !(e.range.start >= range.start && e.range.end <= range.end));
                self.push_edit(range, "");
            }
        }

        let new_objects = std::mem::take(&mut self.new_objects);
        for (isa, objects) in new_objects {
            let body: String = objects.iter().map(NewObject::render).collect();
            if let Some((_, end)) = sections.get(&isa) {
                self.push_edit(end.start..end.start, body);
                continue;
            }
            let block = format!(
                "/* Begin {isa} section */\n{body}/* End {isa} section */\n",
                isa = isa,
                body = body
            );
            match sections.range(isa.clone()..).next() {
                Some((_, (begin, _))) => {
                    self.push_edit(begin.start..begin.start, format!("{}\n", block));
                }
                None => {
                    let close = line_start(source, objects_span.end - 1);
                    self.push_edit(close..close, format!("\n{}", block));
                }
            }
        }
    }

    /// Apply every edit and return the new document text.
    pub fn finish(mut self) -> String {
        self.section_edits();
        let source = self.graph.source();
        let mut edits = self.edits;
        edits.sort_by_key(|e| (e.range.start, e.range.end, e.seq));

        let mut out = String::with_capacity(source.len() + 1024);
        let mut cursor = 0;
        for edit in edits {
            if edit.range.start < cursor {
                tracing::warn!("skipping overlapping edit at byte {}", edit.range.start);
                continue;
            }
            out.push_str(&source[cursor..edit.range.start]);
            out.push_str(&edit.text);
            cursor = edit.range.end;
        }
        out.push_str(&source[cursor..]);
        out
    }
}

/// Section markers within `objects`, keyed by class name.
fn sections(graph: &ProjectGraph) -> BTreeMap<String, (Range<usize>, Range<usize>)> {
    let objects_span = graph.objects_span();
    let mut begins = BTreeMap::new();
    let mut result = BTreeMap::new();
    for comment in graph.comments() {
        if comment.span.start < objects_span.start || comment.span.end > objects_span.end {
            continue;
        }
        let Some(name) = comment
            .text
            .strip_suffix(" section")
            .map(str::to_string)
        else {
            continue;
        };
        if let Some(isa) = name.strip_prefix("Begin ") {
            begins.insert(isa.to_string(), comment.span.clone());
        } else if let Some(isa) = name.strip_prefix("End ") {
            if let Some(begin) = begins.remove(isa) {
                result.insert(isa.to_string(), (begin, comment.span.clone()));
            }
        }
    }
    result
}

fn line_start(source: &str, pos: usize) -> usize {
    source[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

fn line_end(source: &str, pos: usize) -> usize {
    source[pos..]
        .find('\n')
        .map(|i| pos + i + 1)
        .unwrap_or(source.len())
}

fn indent_at(source: &str, line_start: usize) -> &str {
    let len = source[line_start..]
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    &source[line_start..line_start + len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::APP_PBXPROJ;

    fn graph() -> ProjectGraph {
        ProjectGraph::parse(APP_PBXPROJ).unwrap()
    }

    #[test]
    fn test_no_edits_round_trips() {
        let graph = graph();
        let editor = Editor::new(&graph, "test");
        assert!(editor.is_empty());
        assert_eq!(editor.finish(), APP_PBXPROJ);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("libz.tbd"), "libz.tbd");
        assert_eq!(quote("<group>"), "\"<group>\"");
        assert_eq!(quote("wrapper.pb-project"), "\"wrapper.pb-project\"");
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_generate_id_is_stable_and_unique() {
        let graph = graph();
        let mut a = Editor::new(&graph, "react-native-foo");
        let mut b = Editor::new(&graph, "react-native-foo");
        let first = a.generate_id("fileRef");
        assert_eq!(first, b.generate_id("fileRef"));
        assert_eq!(first.len(), 24);
        assert_ne!(first, a.generate_id("fileRef"));
    }

    #[test]
    fn test_add_object_into_existing_section() {
        let graph = graph();
        let mut editor = Editor::new(&graph, "t");
        let id = editor.generate_id("ref");
        editor.add_object(
            NewObject::new(&id, "PBXFileReference", "Foo.xcodeproj")
                .field("lastKnownFileType", "wrapper.pb-project")
                .field("path", "Foo.xcodeproj")
                .field("sourceTree", "<group>"),
        );
        let out = editor.finish();
        let line = format!(
            "\t\t{} /* Foo.xcodeproj */ = {{isa = PBXFileReference; lastKnownFileType = \"wrapper.pb-project\"; path = Foo.xcodeproj; sourceTree = \"<group>\"; }};\n/* End PBXFileReference section */",
            id
        );
        assert!(out.contains(&line));
        let reparsed = ProjectGraph::parse(out).unwrap();
        assert_eq!(reparsed.object(&id).unwrap().isa, "PBXFileReference");
    }

    #[test]
    fn test_new_section_then_removal_round_trips() {
        let graph = graph();
        let mut editor = Editor::new(&graph, "t");
        let id = editor.generate_id("proxy");
        editor.add_object(
            NewObject::new(&id, "PBXContainerItemProxy", "PBXContainerItemProxy")
                .field("proxyType", "2"),
        );
        let linked = editor.finish();
        assert!(linked.contains("/* Begin PBXContainerItemProxy section */"));

        let graph = ProjectGraph::parse(linked).unwrap();
        let mut editor = Editor::new(&graph, "t");
        assert!(editor.remove_object(&id));
        assert_eq!(editor.finish(), APP_PBXPROJ);
    }

    #[test]
    fn test_push_and_remove_ref_round_trips() {
        let graph = graph();
        let libraries = graph.group_by_name("Libraries").unwrap().id.clone();
        let mut editor = Editor::new(&graph, "t");
        assert!(editor.push_ref(&libraries, "children", "ABCDEF", "Foo.xcodeproj"));
        assert!(editor.push_ref(&libraries, "children", "ABCDEF", "Foo.xcodeproj"));
        assert!(!editor.push_ref("MISSING", "children", "ABCDEF", "x"));
        let linked = editor.finish();
        assert_eq!(linked.matches("ABCDEF /* Foo.xcodeproj */,").count(), 1);

        let graph = ProjectGraph::parse(linked).unwrap();
        assert!(graph.object(&libraries).unwrap().refs("children").contains(&"ABCDEF"));
        let mut editor = Editor::new(&graph, "t");
        editor.remove_ref(&libraries, "children", "ABCDEF");
        assert_eq!(editor.finish(), APP_PBXPROJ);
    }

    #[test]
    fn test_setting_value_round_trips() {
        let graph = graph();
        let app = graph.target("App").unwrap();
        let configs: Vec<String> = graph.build_configurations(app).map(|c| c.id.clone()).collect();
        let path = "$(SRCROOT)/../node_modules/foo/ios/**";

        let mut editor = Editor::new(&graph, "t");
        for id in &configs {
            editor.add_setting_value(id, "HEADER_SEARCH_PATHS", path);
        }
        let linked = editor.finish();

        let graph = ProjectGraph::parse(linked.clone()).unwrap();
        let app = graph.target("App").unwrap();
        for config in graph.build_configurations(app) {
            let paths = config
                .fields
                .get_dict("buildSettings")
                .and_then(|s| s.get_array("HEADER_SEARCH_PATHS"))
                .unwrap();
            assert!(paths.strings().any(|s| s == path));
        }

        // A second add is a no-op.
        let mut editor = Editor::new(&graph, "t");
        for id in &configs {
            editor.add_setting_value(id, "HEADER_SEARCH_PATHS", path);
        }
        assert_eq!(editor.finish(), linked);

        let mut editor = Editor::new(&graph, "t");
        for id in &configs {
            editor.remove_setting_value(id, "HEADER_SEARCH_PATHS", path);
        }
        assert_eq!(editor.finish(), APP_PBXPROJ);
    }

    fn config_with(setting: &str) -> String {
        format!(
            "{{\n\tobjects = {{\n\t\tC1 = {{\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {{\n{}\t\t\t\tPRODUCT_NAME = App;\n\t\t\t}};\n\t\t}};\n\t}};\n}}\n",
            setting
        )
    }

    fn add_then_remove(src: &str, value: &str) -> (String, String) {
        let graph = ProjectGraph::parse(src).unwrap();
        let mut editor = Editor::new(&graph, "t");
        editor.add_setting_value("C1", "HEADER_SEARCH_PATHS", value);
        let linked = editor.finish();

        let graph = ProjectGraph::parse(linked.clone()).unwrap();
        let mut editor = Editor::new(&graph, "t");
        editor.remove_setting_value("C1", "HEADER_SEARCH_PATHS", value);
        (linked, editor.finish())
    }

    #[test]
    fn test_scalar_setting_becomes_list_and_back() {
        let src = config_with("\t\t\t\tHEADER_SEARCH_PATHS = \"$(SRCROOT)/Headers\";\n");
        let (linked, unlinked) = add_then_remove(&src, "x/**");
        assert!(linked.contains("HEADER_SEARCH_PATHS = (\"$(SRCROOT)/Headers\", \"x/**\");"));
        assert_eq!(unlinked, src);
    }

    #[test]
    fn test_inherited_scalar_survives_round_trip() {
        let src = config_with("\t\t\t\tHEADER_SEARCH_PATHS = \"$(inherited)\";\n");
        let (linked, unlinked) = add_then_remove(&src, "$(SRCROOT)/../node_modules/foo/ios");
        assert!(linked.contains("(\"$(inherited)\", \"$(SRCROOT)/../node_modules/foo/ios\")"));
        assert_eq!(unlinked, src);
    }

    #[test]
    fn test_single_element_list_keeps_its_shape() {
        let src = config_with(
            "\t\t\t\tHEADER_SEARCH_PATHS = (\n\t\t\t\t\t\"$(SRCROOT)/Headers\",\n\t\t\t\t);\n",
        );
        let (_, unlinked) = add_then_remove(&src, "x/**");
        assert_eq!(unlinked, src);

        let inherited = config_with(
            "\t\t\t\tHEADER_SEARCH_PATHS = (\n\t\t\t\t\t\"$(inherited)\",\n\t\t\t\t\tvendor,\n\t\t\t\t);\n",
        );
        let (_, unlinked) = add_then_remove(&inherited, "x/**");
        assert_eq!(unlinked, inherited);
    }

    #[test]
    fn test_missing_setting_created_and_removed() {
        let src = config_with("");
        let (linked, unlinked) = add_then_remove(&src, "x/**");
        assert!(linked.contains(
            "HEADER_SEARCH_PATHS = (\n\t\t\t\t\t\"$(inherited)\",\n\t\t\t\t\t\"x/**\",\n\t\t\t\t);"
        ));
        assert_eq!(unlinked, src);
    }

    #[test]
    fn test_inline_list_with_two_values_added() {
        let src = config_with("\t\t\t\tHEADER_SEARCH_PATHS = base;\n");
        let graph = ProjectGraph::parse(src.clone()).unwrap();
        let mut editor = Editor::new(&graph, "t");
        editor.add_setting_value("C1", "HEADER_SEARCH_PATHS", "a");
        let one = editor.finish();

        let graph = ProjectGraph::parse(one.clone()).unwrap();
        let mut editor = Editor::new(&graph, "t");
        editor.add_setting_value("C1", "HEADER_SEARCH_PATHS", "b");
        let two = editor.finish();
        assert!(two.contains("HEADER_SEARCH_PATHS = (base, a, b);"));

        let graph = ProjectGraph::parse(two).unwrap();
        let mut editor = Editor::new(&graph, "t");
        editor.remove_setting_value("C1", "HEADER_SEARCH_PATHS", "b");
        assert_eq!(editor.finish(), one);

        let graph = ProjectGraph::parse(one).unwrap();
        let mut editor = Editor::new(&graph, "t");
        editor.remove_setting_value("C1", "HEADER_SEARCH_PATHS", "a");
        assert_eq!(editor.finish(), src);
    }

    #[test]
    fn test_is_generated_matches_generate_id() {
        let graph = graph();
        let mut editor = Editor::new(&graph, "react-native-foo");
        let id = editor.generate_id("group");
        assert!(editor.is_generated("group", &id));
        assert!(!editor.is_generated("project", &id));
        assert!(!Editor::new(&graph, "react-native-bar").is_generated("group", &id));
    }
}
