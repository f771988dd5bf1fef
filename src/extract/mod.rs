//! Extraction pipeline: modules → parameter links → parameter comments.
//!
//! - [`modules`] – walks `<Module>` elements, derives hardware addresses and I/O points
//! - [`connections`] – resolves each I/O point through the `<ParameterConnection>` table
//! - [`comments`] – resolves linked parameters to `<Program>`/`<Tag>` descriptions

pub mod comments;
pub mod connections;
pub mod modules;

pub use comments::{CommentResolver, resolve_comments};
pub use connections::{ConnectionTable, link_parameters, normalize_hardware, split_endpoints};
pub use modules::extract_modules;

use crate::document::XmlDocument;
use crate::error::ExtractError;
use crate::model::ModuleRecord;
use crate::options::LinkOptions;

/// Run all three stages. Fails only on a structurally malformed module.
pub fn run(doc: &XmlDocument, options: &LinkOptions) -> Result<Vec<ModuleRecord>, ExtractError> {
    let mut modules = extract_modules(doc, options)?;
    let table = ConnectionTable::from_document(doc, options);
    link_parameters(&mut modules, &table);
    resolve_comments(doc, &mut modules, options);
    tracing::debug!(
        modules = modules.len(),
        connections = table.entries().len(),
        "extraction finished"
    );
    Ok(modules)
}
