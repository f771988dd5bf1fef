//! Project facade and the display-adapter interface.
//!
//! [`Project`] ties one loaded document to the tree built from it. Edits go
//! through the project so the document and the tree change together; nothing
//! here is synchronised, callers serialise concurrent edits themselves.

use crate::color::Rgb;
use crate::document::{ContentSource, FsSource, XmlDocument, ZipSource};
use crate::error::EditError;
use crate::extract;
use crate::model::{LinkSummary, ModuleRecord};
use crate::options::{EditOptions, LinkOptions};
use crate::tree::edit::apply_edit;
use crate::tree::{COLUMN_COUNT, COLUMN_TITLES, IoTree, NodeId, build_tree};
use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

/// What a grid/tree widget needs to display and edit the tree.
///
/// `None` stands for the widget's invisible top-level parent, which has a
/// single row: the document node.
pub trait ItemModel {
    fn column_count(&self) -> usize;
    fn row_count(&self, parent: Option<NodeId>) -> usize;
    fn index(&self, parent: Option<NodeId>, row: usize) -> Option<NodeId>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn row(&self, node: NodeId) -> usize;
    fn data(&self, node: NodeId, column: usize) -> Option<&str>;
    fn background(&self, node: NodeId) -> Option<Rgb>;
    fn header_data(&self, section: usize) -> Option<&str>;
    fn is_editable(&self, column: usize) -> bool;
    /// Apply an edit; `false` when it was rejected.
    fn set_data(&mut self, node: NodeId, column: usize, value: &str) -> bool;
}

pub struct Project {
    document: XmlDocument,
    modules: Vec<ModuleRecord>,
    tree: IoTree,
    path: Option<Utf8PathBuf>,
    display_name: String,
    edit_options: EditOptions,
    modified: bool,
}

impl Project {
    /// Load `path`. `.zip` archives are searched for their first `.L5X` entry.
    pub fn open(path: impl AsRef<Utf8Path>, options: &LinkOptions) -> Result<Self> {
        let path = path.as_ref();
        let is_zip = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("zip"));
        if is_zip {
            let file = std::fs::File::open(path).with_context(|| format!("Open {}", path))?;
            let mut source = ZipSource::new(std::io::BufReader::new(file))?;
            let text = source.read_to_string(Utf8Path::new(""))?;
            // An export read out of an archive is never written back into it.
            let mut project = Self::parse_str(&text, file_display_name(path), options)
                .with_context(|| format!("Failed to load {}", path))?;
            project.path = None;
            Ok(project)
        } else {
            Self::from_source(&mut FsSource, path, options)
        }
    }

    pub fn from_source<S: ContentSource>(
        source: &mut S,
        path: impl AsRef<Utf8Path>,
        options: &LinkOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let text = source.read_to_string(path)?;
        let mut project = Self::parse_str(&text, file_display_name(path), options)
            .with_context(|| format!("Failed to load {}", path))?;
        project.path = Some(path.to_path_buf());
        Ok(project)
    }

    /// Build a project from document text. Fails on unparseable XML or a
    /// malformed module; nothing partial is returned.
    pub fn parse_str(text: &str, display_name: &str, options: &LinkOptions) -> Result<Self> {
        let document = XmlDocument::parse(text)?;
        let modules = extract::run(&document, options)?;
        let tree = build_tree(display_name, &modules, options.segment_delimiter);
        tracing::info!(
            document = display_name,
            modules = modules.len(),
            nodes = tree.len(),
            "built I/O tree"
        );
        Ok(Self {
            document,
            modules,
            tree,
            path: None,
            display_name: display_name.to_string(),
            edit_options: EditOptions::default(),
            modified: false,
        })
    }

    pub fn with_edit_options(mut self, edit_options: EditOptions) -> Self {
        self.edit_options = edit_options;
        self
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    /// Enriched module records, as extracted at load time.
    pub fn modules(&self) -> &[ModuleRecord] {
        &self.modules
    }

    pub fn tree(&self) -> &IoTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut IoTree {
        &mut self.tree
    }

    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn summary(&self) -> LinkSummary {
        LinkSummary::from_modules(&self.modules)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Edit a cell and its source element, reporting why a rejected edit failed.
    pub fn try_set_data(&mut self, node: NodeId, column: usize, value: &str) -> Result<(), EditError> {
        apply_edit(
            &mut self.document,
            &mut self.tree,
            node,
            column,
            value,
            self.edit_options,
        )?;
        self.modified = true;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        self.document.write_to(out)
    }

    /// Write the document to `path`, or back to where it was loaded from.
    ///
    /// Failures are logged and otherwise ignored; the modified flag is only
    /// cleared by a successful write.
    pub fn save(&mut self, path: Option<&Utf8Path>) {
        match self.try_save(path) {
            Ok(target) => {
                tracing::info!(path = %target, "saved document");
                self.modified = false;
            }
            Err(e) => tracing::error!("save error: {:#}", e),
        }
    }

    fn try_save(&self, path: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
        let target = path
            .or(self.path.as_deref())
            .ok_or_else(|| anyhow!("no target path for {}", self.display_name))?;
        self.document.save(target)?;
        Ok(target.to_path_buf())
    }
}

impl ItemModel for Project {
    fn column_count(&self) -> usize {
        COLUMN_COUNT
    }

    fn row_count(&self, parent: Option<NodeId>) -> usize {
        match parent {
            None => 1,
            Some(id) => self.tree.children(id).len(),
        }
    }

    fn index(&self, parent: Option<NodeId>, row: usize) -> Option<NodeId> {
        match parent {
            None => (row == 0).then(|| self.tree.root()),
            Some(id) => self.tree.child(id, row),
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    fn row(&self, node: NodeId) -> usize {
        self.tree.row(node)
    }

    fn data(&self, node: NodeId, column: usize) -> Option<&str> {
        self.tree.node(node)?.field(column)
    }

    fn background(&self, node: NodeId) -> Option<Rgb> {
        self.tree.node(node)?.background()
    }

    fn header_data(&self, section: usize) -> Option<&str> {
        match section {
            0 => Some(self.display_name.as_str()),
            _ => COLUMN_TITLES.get(section).copied(),
        }
    }

    fn is_editable(&self, column: usize) -> bool {
        column < 3
    }

    fn set_data(&mut self, node: NodeId, column: usize, value: &str) -> bool {
        match self.try_set_data(node, column, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("edit rejected: {}", e);
                false
            }
        }
    }
}

/// Last path component, used as the document node's label.
pub fn file_display_name(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or(path.as_str())
}
