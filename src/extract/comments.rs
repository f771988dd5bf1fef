//! Program-side descriptions for linked parameters.

use crate::document::{ElementId, XmlDocument};
use crate::model::ModuleRecord;
use crate::options::LinkOptions;
use std::collections::HashMap;

/// Looks up `\Program.Tag` references against the `<Program>` declarations.
pub struct CommentResolver<'a> {
    doc: &'a XmlDocument,
    options: &'a LinkOptions,
    // First program of each name, in document order.
    programs: HashMap<&'a str, ElementId>,
}

impl<'a> CommentResolver<'a> {
    pub fn new(doc: &'a XmlDocument, options: &'a LinkOptions) -> Self {
        let mut programs = HashMap::new();
        for program in doc.descendants_named(doc.root(), "Program") {
            if let Some(name) = doc.attribute(program, "Name") {
                programs.entry(name).or_insert(program);
            }
        }
        Self {
            doc,
            options,
            programs,
        }
    }

    /// Description text for `parameter_path`, or `""` when the path is not
    /// program-scoped (`\Program.Tag`) or nothing matches.
    pub fn resolve(&self, parameter_path: &str) -> String {
        let mut segments = parameter_path.split(self.options.segment_delimiter);
        let (Some(program), Some(tag)) = (segments.next(), segments.next()) else {
            return String::new();
        };
        let Some(program) = program.strip_prefix(self.options.escape_marker) else {
            return String::new();
        };

        let Some(&program_el) = self.programs.get(program) else {
            return String::new();
        };
        let doc = self.doc;
        doc.descendants_named(program_el, "Tag")
            .find(|&t| doc.attribute(t, "Name") == Some(tag))
            .and_then(|t| doc.first_child_named(t, "Description"))
            .and_then(|d| doc.text(d))
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }
}

/// Fill `parameter_comment` for every I/O point; unlinked points get `""`.
pub fn resolve_comments(doc: &XmlDocument, modules: &mut [ModuleRecord], options: &LinkOptions) {
    let resolver = CommentResolver::new(doc, options);
    for entry in modules.iter_mut().flat_map(ModuleRecord::entries_mut) {
        entry.parameter_comment = if entry.parameter_path.is_empty() {
            String::new()
        } else {
            resolver.resolve(&entry.parameter_path)
        };
    }
}
