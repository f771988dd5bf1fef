//! Extraction settings, loadable from a JSON file.

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Names and markers the extraction pipeline keys on.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "reserved_markers": ["Cube", "K070", "Flex"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkOptions {
    /// Substrings of a module name that mark a reserved hardware family.
    pub reserved_markers: Vec<String>,
    /// Leading character of a program-scoped endpoint.
    pub escape_marker: char,
    /// Separator between the segments of an I/O address and of a parameter path.
    pub segment_delimiter: char,
    pub input_containers: Vec<String>,
    pub output_containers: Vec<String>,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            reserved_markers: vec!["Cube".into(), "K070".into()],
            escape_marker: '\\',
            segment_delimiter: '.',
            input_containers: vec!["InputTag".into(), "InAliasTag".into()],
            output_containers: vec!["OutputTag".into(), "OutAliasTag".into()],
        }
    }
}

impl LinkOptions {
    pub fn from_json_file(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read config {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config {}", path))
    }

    pub fn is_reserved(&self, module_name: &str) -> bool {
        self.reserved_markers
            .iter()
            .any(|m| !m.is_empty() && module_name.contains(m.as_str()))
    }
}

/// Settings for cell write-back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOptions {
    /// Reject an edit when more than one source element shares the node's identity,
    /// instead of mutating the first one in document order.
    pub strict_identity: bool,
}
