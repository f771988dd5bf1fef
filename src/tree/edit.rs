//! Cell write-back into the source document.
//!
//! A node is matched to a source element by identity: tag = column 0,
//! text = column 1, attribute set = column 2 read as an attribute list.
//! Identities are not unique; without [`EditOptions::strict_identity`] the
//! first element in document order is the one mutated.

use super::attrs::{format_attributes, parse_attributes};
use super::{IoTree, NodeId};
use crate::document::{ElementId, XmlDocument};
use crate::error::EditError;
use crate::options::EditOptions;

/// Apply `value` to `column` of `node` and to the matching source element.
///
/// Column 0 renames the element, column 1 replaces its text and column 2
/// replaces all of its attributes. The payload is validated before anything
/// is mutated, so a rejected edit leaves both the tree and the document as
/// they were.
pub fn apply_edit(
    doc: &mut XmlDocument,
    tree: &mut IoTree,
    node: NodeId,
    column: usize,
    value: &str,
    options: EditOptions,
) -> Result<(), EditError> {
    let fields = tree.node(node).ok_or(EditError::UnknownNode)?.fields.clone();
    if column > 2 {
        return Err(EditError::ReadOnlyColumn(column));
    }
    let new_attributes = match column {
        2 => Some(parse_attributes(value)?),
        _ => None,
    };

    let target = locate(doc, &fields, options)?;
    let stored = match new_attributes {
        Some(attributes) => {
            let rendered = format_attributes(&attributes);
            doc.replace_attributes(target, attributes);
            rendered
        }
        None if column == 0 => {
            doc.set_tag(target, value);
            value.to_string()
        }
        None => {
            doc.set_text(target, value);
            value.to_string()
        }
    };

    if let Some(n) = tree.node_mut(node) {
        n.fields[column] = stored;
    }
    Ok(())
}

fn locate(
    doc: &XmlDocument,
    fields: &[String; 4],
    options: EditOptions,
) -> Result<ElementId, EditError> {
    // A stored column 2 that is not an attribute list cannot describe any element.
    let attributes = parse_attributes(&fields[2]).map_err(|_| EditError::NotFound)?;
    if options.strict_identity {
        let matches = doc.find_all_by_identity(&fields[0], &fields[1], &attributes);
        match matches[..] {
            [] => Err(EditError::NotFound),
            [only] => Ok(only),
            _ => Err(EditError::AmbiguousMatch {
                count: matches.len(),
            }),
        }
    } else {
        doc.find_by_identity(&fields[0], &fields[1], &attributes)
            .ok_or(EditError::NotFound)
    }
}
