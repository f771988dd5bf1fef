//! Owned, mutable element tree for an L5X project export.
//!
//! The text is parsed once with `roxmltree` and copied into an index-addressed
//! arena so that cell edits can mutate elements in place and the document can
//! be written back out. Sub-modules:
//!
//! - [`source`] – where the text comes from (filesystem vs. ZIP)
//! - [`writer`] – serialisation back to XML

pub mod source;
pub mod writer;

pub use source::*;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use roxmltree::{Document, Node};

/// Handle of an element inside an [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A single element: local tag name, ordered attributes, text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    /// First text (or CDATA) content of the element, if any.
    pub text: Option<String>,
    pub children: Vec<ElementId>,
    pub parent: Option<ElementId>,
}

#[derive(Debug, Clone)]
pub struct XmlDocument {
    elements: Vec<Element>,
}

impl XmlDocument {
    pub fn parse(text: &str) -> Result<Self> {
        let doc = Document::parse(text).context("Failed to parse XML")?;
        let mut elements = Vec::new();
        copy_element(doc.root_element(), None, &mut elements);
        Ok(Self { elements })
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn tag(&self, id: ElementId) -> &str {
        &self.elements[id.0].tag
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements[id.0].attributes.get(name).map(String::as_str)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements[id.0].text.as_deref()
    }

    pub fn children(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.elements[id.0].children.iter().copied()
    }

    pub fn first_child(&self, id: ElementId) -> Option<ElementId> {
        self.elements[id.0].children.first().copied()
    }

    pub fn first_child_named(&self, id: ElementId, tag: &str) -> Option<ElementId> {
        self.children(id).find(|&c| self.tag(c) == tag)
    }

    /// Pre-order walk starting with `id` itself.
    pub fn descendants(&self, id: ElementId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    pub fn descendants_named<'a>(
        &'a self,
        id: ElementId,
        tag: &'a str,
    ) -> impl Iterator<Item = ElementId> + 'a {
        self.descendants(id).filter(move |&e| self.tag(e) == tag)
    }

    pub fn set_tag(&mut self, id: ElementId, tag: impl Into<String>) {
        self.elements[id.0].tag = tag.into();
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        self.elements[id.0].text = Some(text.into());
    }

    pub fn replace_attributes(&mut self, id: ElementId, attributes: IndexMap<String, String>) {
        self.elements[id.0].attributes = attributes;
    }

    /// First element in document order whose tag, text (missing reads as `""`,
    /// compared with surrounding whitespace trimmed) and attribute set
    /// (order-insensitive) all match.
    pub fn find_by_identity(
        &self,
        tag: &str,
        text: &str,
        attributes: &IndexMap<String, String>,
    ) -> Option<ElementId> {
        self.identity_matches(tag, text, attributes).next()
    }

    pub fn find_all_by_identity(
        &self,
        tag: &str,
        text: &str,
        attributes: &IndexMap<String, String>,
    ) -> Vec<ElementId> {
        self.identity_matches(tag, text, attributes).collect()
    }

    fn identity_matches<'a>(
        &'a self,
        tag: &'a str,
        text: &'a str,
        attributes: &'a IndexMap<String, String>,
    ) -> impl Iterator<Item = ElementId> + 'a {
        self.descendants_named(self.root(), tag).filter(move |&id| {
            let el = self.element(id);
            el.text.as_deref().unwrap_or("").trim() == text.trim() && &el.attributes == attributes
        })
    }
}

/// Iterator returned by [`XmlDocument::descendants`].
pub struct Descendants<'a> {
    doc: &'a XmlDocument,
    stack: Vec<ElementId>,
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.elements[id.0].children.iter().rev().copied());
        Some(id)
    }
}

fn copy_element(node: Node, parent: Option<ElementId>, elements: &mut Vec<Element>) -> ElementId {
    let id = ElementId(elements.len());
    let attributes = node
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();
    let has_children = node.children().any(|c| c.is_element());
    // Indentation between child elements is not content.
    let text = node
        .text()
        .filter(|t| !(has_children && t.trim().is_empty()))
        .map(str::to_string);
    elements.push(Element {
        tag: node.tag_name().name().to_string(),
        attributes,
        text,
        children: Vec::new(),
        parent,
    });
    for child in node.children().filter(|c| c.is_element()) {
        let child_id = copy_element(child, Some(id), elements);
        elements[id.0].children.push(child_id);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<Root A="1">
  <Item Name="x">one</Item>
  <Group>
    <Item Name="x">one</Item>
    <Item Name="y"/>
  </Group>
</Root>"#;

    #[test]
    fn descendants_walk_in_document_order() {
        let doc = XmlDocument::parse(XML).unwrap();
        let tags: Vec<&str> = doc.descendants(doc.root()).map(|e| doc.tag(e)).collect();
        assert_eq!(tags, vec!["Root", "Item", "Group", "Item", "Item"]);
        assert_eq!(doc.text(doc.root()), None);
    }

    #[test]
    fn identity_lookup_prefers_document_order() {
        let doc = XmlDocument::parse(XML).unwrap();
        let mut attrs = IndexMap::new();
        attrs.insert("Name".to_string(), "x".to_string());
        let all = doc.find_all_by_identity("Item", "one", &attrs);
        assert_eq!(all.len(), 2);
        assert_eq!(doc.find_by_identity("Item", "one", &attrs), Some(all[0]));
        assert_eq!(doc.element(all[0]).parent, Some(doc.root()));

        attrs.insert("Name".to_string(), "y".to_string());
        assert!(doc.find_by_identity("Item", "", &attrs).is_some());
    }
}
