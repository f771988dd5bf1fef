//! Assemble an [`IoTree`] from enriched module records.
//!
//! Layout:
//!
//! ```text
//! document (0)
//! └─ module group (1)        one per module with any I/O point
//!    ├─ Inputs (2)
//!    │  └─ Rack:1:I.3 (3)     two-segment addresses
//!    │     └─ Rack:1:I.3.0 (4) three-segment addresses, under the leaf named by their prefix
//!    └─ Outputs (2)
//! ```
//!
//! A three-segment entry may attach under a depth-3 leaf of any module built
//! so far; when no such leaf exists the entry is dropped.

use super::{COLUMN_COUNT, IoTree, NodeId};
use crate::model::{Direction, IoEntry, ModuleRecord};
use std::collections::HashMap;

/// Build the tree for `modules`, rooted at a document node named `display_name`.
pub fn build_tree(display_name: &str, modules: &[ModuleRecord], delimiter: char) -> IoTree {
    let mut builder = TreeBuilder {
        tree: IoTree::new(display_name),
        delimiter,
        leaves_by_address: HashMap::new(),
    };
    for module in modules.iter().filter(|m| m.has_io()) {
        builder.add_module(module);
    }
    builder.tree
}

struct TreeBuilder {
    tree: IoTree,
    delimiter: char,
    // Depth-3 leaves by hardware address; the first one in tree order wins.
    leaves_by_address: HashMap<String, NodeId>,
}

impl TreeBuilder {
    fn add_module(&mut self, module: &ModuleRecord) {
        let root = self.tree.root();
        let group = self.tree.append(
            root,
            row(&module.hardware_address, &module.hardware_comment),
            1,
        );
        for direction in Direction::ALL {
            let node = self.tree.append(group, row(direction.label(), ""), 2);
            self.place_entries(node, module.entries(direction));
        }
    }

    fn place_entries(&mut self, direction_node: NodeId, entries: &[IoEntry]) {
        let delimiter = self.delimiter;
        for entry in entries
            .iter()
            .filter(|e| segment_count(&e.hardware_address, delimiter) == 2)
        {
            let leaf = self.tree.append(direction_node, entry.fields(), 3);
            self.leaves_by_address
                .entry(entry.hardware_address.clone())
                .or_insert(leaf);
        }

        for entry in entries {
            match segment_count(&entry.hardware_address, delimiter) {
                2 => {}
                3 => self.nest(entry),
                n => tracing::debug!(
                    hardware = %entry.hardware_address,
                    segments = n,
                    "address has no place in the tree"
                ),
            }
        }
    }

    fn nest(&mut self, entry: &IoEntry) {
        let owner = entry
            .hardware_address
            .rfind(self.delimiter)
            .map(|i| &entry.hardware_address[..i])
            .and_then(|prefix| self.leaves_by_address.get(prefix).copied());
        match owner {
            Some(owner) => {
                self.tree.append(owner, entry.fields(), 4);
            }
            None => tracing::debug!(
                hardware = %entry.hardware_address,
                "no leaf for address prefix, dropping"
            ),
        }
    }
}

fn segment_count(address: &str, delimiter: char) -> usize {
    address.split(delimiter).count()
}

fn row(first: &str, second: &str) -> [String; COLUMN_COUNT] {
    [
        first.to_string(),
        second.to_string(),
        String::new(),
        String::new(),
    ]
}
