//! Four-column I/O tree.
//!
//! Nodes live in an index-addressed arena ([`IoTree`]); each node owns an
//! ordered list of child handles and keeps a non-owning handle to its parent.
//!
//! - [`builder`] – assembles the tree from enriched [`ModuleRecord`](crate::model::ModuleRecord)s
//! - [`attrs`] – `Key="Value"` attribute lists used by column-2 edits
//! - [`edit`] – cell write-back into the source document
//! - [`print`] – ASCII rendering

pub mod attrs;
pub mod builder;
pub mod edit;
pub mod print;

pub use builder::build_tree;

use crate::color::{Rgb, depth_background};
use serde::Serialize;

/// Number of columns of every node.
pub const COLUMN_COUNT: usize = 4;

/// Column titles. Header 0 shows the document name instead of the first one.
pub const COLUMN_TITLES: [&str; COLUMN_COUNT] = [
    "Hardware",
    "Hardware Comment",
    "Connected Parameter",
    "Parameter Comment",
];

/// Handle of a node inside an [`IoTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Hardware, hardware comment, connected parameter, parameter comment.
    pub fields: [String; COLUMN_COUNT],
    pub depth: u8,
    /// Display hint that overrides the depth colour when set.
    pub color_state: Option<Rgb>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl TreeNode {
    pub fn field(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn hardware(&self) -> &str {
        &self.fields[0]
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn background(&self) -> Option<Rgb> {
        self.color_state.or_else(|| depth_background(self.depth))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoTree {
    nodes: Vec<TreeNode>,
}

impl IoTree {
    /// A tree holding only the document node (depth 0) named `display_name`.
    pub fn new(display_name: &str) -> Self {
        Self {
            nodes: vec![TreeNode {
                fields: [
                    display_name.to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                ],
                depth: 0,
                color_state: None,
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Node count, root included; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(id.0)
    }

    /// Append a new last child of `parent`.
    pub fn append(&mut self, parent: NodeId, fields: [String; COLUMN_COUNT], depth: u8) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            fields,
            depth,
            color_state: None,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(TreeNode::children).unwrap_or(&[])
    }

    pub fn child(&self, id: NodeId, row: usize) -> Option<NodeId> {
        self.children(id).get(row).copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(TreeNode::parent)
    }

    /// Position of `id` among its siblings; the root is row 0.
    pub fn row(&self, id: NodeId) -> usize {
        self.parent(id)
            .and_then(|p| self.children(p).iter().position(|&c| c == id))
            .unwrap_or(0)
    }

    /// Pre-order walk starting with `id` itself.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    /// First node in pre-order whose hardware field equals `hardware`.
    pub fn find_hardware(&self, hardware: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&id| self.nodes[id.0].hardware() == hardware)
    }

    /// Set (or clear) the colour state of every node.
    pub fn set_color(&mut self, color: Option<Rgb>) {
        for node in &mut self.nodes {
            node.color_state = color;
        }
    }

    /// Nested, serialisable view of the subtree at `id`.
    pub fn nested(&self, id: NodeId) -> NestedNode<'_> {
        let node = &self.nodes[id.0];
        NestedNode {
            fields: &node.fields,
            depth: node.depth,
            background: node.background(),
            children: node.children.iter().map(|&c| self.nested(c)).collect(),
        }
    }
}

/// Borrowed recursive form of a subtree, used for JSON output and comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedNode<'a> {
    pub fields: &'a [String; COLUMN_COUNT],
    pub depth: u8,
    pub background: Option<Rgb>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NestedNode<'a>>,
}
