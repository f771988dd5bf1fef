//! Parameter linking through the `<ParameterConnection>` table.

use crate::document::XmlDocument;
use crate::model::{ConnectionEntry, ModuleRecord};
use crate::options::LinkOptions;
use std::collections::HashMap;

/// All connection entries of a document in source order, plus an index from
/// normalised hardware literal to the first entry carrying it.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTable {
    entries: Vec<ConnectionEntry>,
    first_by_hardware: HashMap<String, usize>,
}

impl ConnectionTable {
    pub fn from_document(doc: &XmlDocument, options: &LinkOptions) -> Self {
        let mut table = ConnectionTable::default();
        for conn in doc.descendants_named(doc.root(), "ParameterConnection") {
            let (Some(e1), Some(e2)) = (
                doc.attribute(conn, "EndPoint1"),
                doc.attribute(conn, "EndPoint2"),
            ) else {
                tracing::warn!("skipping ParameterConnection without both endpoints");
                continue;
            };
            table.push(split_endpoints(e1, e2, options.escape_marker));
        }
        table
    }

    pub fn push(&mut self, entry: ConnectionEntry) {
        self.first_by_hardware
            .entry(entry.hardware.clone())
            .or_insert(self.entries.len());
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ConnectionEntry] {
        &self.entries
    }

    /// First entry in source order whose hardware side equals `hardware`.
    pub fn lookup(&self, hardware: &str) -> Option<&ConnectionEntry> {
        self.first_by_hardware
            .get(hardware)
            .map(|&i| &self.entries[i])
    }
}

/// Decide which endpoint is the hardware literal: the first endpoint is the
/// program side only when it starts with the escape marker.
pub fn split_endpoints(e1: &str, e2: &str, escape: char) -> ConnectionEntry {
    let (hardware, parameter) = if e1.starts_with(escape) {
        (e2, e1)
    } else {
        (e1, e2)
    };
    ConnectionEntry {
        hardware: normalize_hardware(hardware),
        parameter: parameter.to_string(),
    }
}

/// Upper-case the direction-code field (the second `:`-delimited field).
pub fn normalize_hardware(literal: &str) -> String {
    let mut fields: Vec<String> = literal.split(':').map(str::to_string).collect();
    if let Some(code) = fields.get_mut(1) {
        *code = code.to_uppercase();
    }
    fields.join(":")
}

/// Attach the matching parameter reference to every I/O point, or `""`.
pub fn link_parameters(modules: &mut [ModuleRecord], table: &ConnectionTable) {
    for entry in modules.iter_mut().flat_map(ModuleRecord::entries_mut) {
        match table.lookup(&entry.hardware_address) {
            Some(conn) => entry.parameter_path = conn.parameter.clone(),
            None => {
                tracing::debug!(hardware = %entry.hardware_address, "no parameter connection");
                entry.parameter_path.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_second_field_is_upper_cased() {
        assert_eq!(normalize_hardware("Local:i:x.data"), "Local:I:x.data");
        assert_eq!(normalize_hardware("Rack"), "Rack");
    }

    #[test]
    fn program_side_is_recognised_on_either_endpoint() {
        let a = split_endpoints("\\P.T", "Local:1:I.3", '\\');
        let b = split_endpoints("Local:1:I.3", "\\P.T", '\\');
        assert_eq!(a, b);
        assert_eq!(a.parameter, "\\P.T");
    }
}
