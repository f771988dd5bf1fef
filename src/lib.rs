//! L5X I/O linker.
//!
//! Reads an industrial-automation project export and links every hardware I/O
//! point to the program parameter it is wired to, together with the comments
//! from both sides, as a four-column tree.
//!
//! The binary `l5xtree` prints the tree, dumps it as JSON, scans directories
//! of exports and applies single-cell edits.

pub mod color;
pub mod document;
pub mod error;
pub mod extract;
pub mod model;
pub mod options;
pub mod tree;
pub mod view;

pub use error::{AttrParseError, ColorParseError, EditError, ExtractError};
pub use options::{EditOptions, LinkOptions};
pub use view::{ItemModel, Project};
