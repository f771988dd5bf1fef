//! ASCII rendering of an [`IoTree`].

use super::{IoTree, NodeId};
use std::fmt::Write;

/// Render the whole tree, one line per node.
///
/// Each line shows the hardware field followed by the non-empty remaining
/// fields separated by ` | `.
pub fn render_ascii(tree: &IoTree) -> String {
    let mut out = String::new();
    let root = tree.root();
    out.push_str(&label(tree, root));
    out.push('\n');
    render_children(tree, root, "", &mut out);
    out
}

fn render_children(tree: &IoTree, id: NodeId, prefix: &str, out: &mut String) {
    let children = tree.children(id);
    for (i, &child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let branch = if last { "└─" } else { "├─" };
        let _ = writeln!(out, "{}{} {}", prefix, branch, label(tree, child));
        let new_prefix = format!("{}{}", prefix, if last { "   " } else { "│  " });
        render_children(tree, child, &new_prefix, out);
    }
}

fn label(tree: &IoTree, id: NodeId) -> String {
    let Some(node) = tree.node(id) else {
        return String::new();
    };
    let mut parts = vec![node.hardware()];
    parts.extend(node.fields[1..].iter().map(String::as_str).filter(|f| !f.is_empty()));
    parts.join(" | ")
}
