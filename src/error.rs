//! Error types for extraction and cell write-back.

use thiserror::Error;

/// Structural problems found while extracting modules. Always fatal for the
/// whole document: no partial tree is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A module lacks something its hardware address is derived from.
    #[error("malformed document: module {module:?} {reason}")]
    MalformedDocument {
        /// Best available name of the offending module (`Name` attribute, or its position).
        module: String,
        /// What was missing.
        reason: String,
    },
}

/// Failure while parsing a `Key="Value"` attribute list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttrParseError {
    #[error("expected attribute name at offset {0}")]
    ExpectedName(usize),
    #[error("expected '=' after {name:?} at offset {offset}")]
    ExpectedEquals { name: String, offset: usize },
    #[error("expected quoted value for {name:?} at offset {offset}")]
    ExpectedValue { name: String, offset: usize },
    #[error("unterminated value for {0:?}")]
    Unterminated(String),
    #[error("duplicate attribute {0:?}")]
    Duplicate(String),
}

/// Reason a cell edit was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no source element matches the node")]
    NotFound,
    #[error("{count} source elements match the node")]
    AmbiguousMatch { count: usize },
    #[error("invalid attribute list: {0}")]
    Parse(#[from] AttrParseError),
    #[error("column {0} cannot be edited")]
    ReadOnlyColumn(usize),
    #[error("node does not belong to this tree")]
    UnknownNode,
}

/// A colour string that is neither `[r, g, b]`, `#rrggbb` nor a known name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognised colour {0:?}")]
pub struct ColorParseError(pub String);
