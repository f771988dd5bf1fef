//! Module walk: hardware addresses and raw I/O points.

use crate::document::{ElementId, XmlDocument};
use crate::error::ExtractError;
use crate::model::{Direction, IoEntry, ModuleRecord};
use crate::options::LinkOptions;

/// Build one [`ModuleRecord`] per `<Module>` in document order.
///
/// Parameter paths and comments are left empty; the linker and resolver fill them.
pub fn extract_modules(
    doc: &XmlDocument,
    options: &LinkOptions,
) -> Result<Vec<ModuleRecord>, ExtractError> {
    doc.descendants_named(doc.root(), "Module")
        .enumerate()
        .map(|(index, module)| extract_module(doc, module, index, options))
        .collect()
}

fn extract_module(
    doc: &XmlDocument,
    module: ElementId,
    index: usize,
    options: &LinkOptions,
) -> Result<ModuleRecord, ExtractError> {
    let malformed = |reason: &str| ExtractError::MalformedDocument {
        module: doc
            .attribute(module, "Name")
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index)),
        reason: reason.to_string(),
    };

    let name = doc
        .attribute(module, "Name")
        .ok_or_else(|| malformed("has no Name attribute"))?;
    let parent = doc
        .attribute(module, "ParentModule")
        .ok_or_else(|| malformed("has no ParentModule attribute"))?;
    let ports = doc
        .first_child_named(module, "Ports")
        .ok_or_else(|| malformed("has no Ports element"))?;
    let port = doc
        .first_child(ports)
        .ok_or_else(|| malformed("declares no port"))?;
    let port_address = doc
        .attribute(port, "Address")
        .ok_or_else(|| malformed("has a first port without Address"))?;

    let (hardware_address, hardware_comment) = if options.is_reserved(name) {
        (name.to_string(), String::new())
    } else {
        (format!("{}:{}", parent, port_address), name.to_string())
    };

    let mut record = ModuleRecord {
        hardware_address,
        hardware_comment,
        ..ModuleRecord::default()
    };
    for direction in Direction::ALL {
        let containers = match direction {
            Direction::Input => &options.input_containers,
            Direction::Output => &options.output_containers,
        };
        for kind in containers {
            let Some(code) = kind.chars().next() else {
                continue;
            };
            for container in doc.descendants_named(module, kind) {
                for comment in doc.descendants_named(container, "Comment") {
                    let operand = doc.attribute(comment, "Operand").unwrap_or("");
                    let entry = IoEntry::new(
                        format!("{}:{}{}", record.hardware_address, code, operand),
                        doc.text(comment).map(str::trim).unwrap_or(""),
                    );
                    match direction {
                        Direction::Input => record.inputs.push(entry),
                        Direction::Output => record.outputs.push(entry),
                    }
                }
            }
        }
    }

    tracing::debug!(
        module = %record.hardware_address,
        inputs = record.inputs.len(),
        outputs = record.outputs.len(),
        "extracted module"
    );
    Ok(record)
}
