//! Serialise an [`XmlDocument`] back to XML text.
//!
//! Output uses a `standalone="yes"` declaration and two-space indentation.
//! Attributes are written in their stored order. Comments, processing
//! instructions and mixed-content tails are not carried by the arena and are
//! therefore not written.

use super::{ElementId, XmlDocument};
use anyhow::{Context, Result};
use camino::Utf8Path;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

impl XmlDocument {
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        if !self.is_empty() {
            self.write_element(&mut writer, self.root())?;
        }
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    /// Serialise to a `String`.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).context("Serialised XML is not UTF-8")
    }

    /// Overwrite `path` with the serialised document.
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        let file = std::fs::File::create(path.as_std_path())
            .with_context(|| format!("Failed to create {}", path))?;
        let mut out = std::io::BufWriter::new(file);
        self.write_to(&mut out)
            .with_context(|| format!("Failed to write {}", path))?;
        out.flush().with_context(|| format!("Failed to flush {}", path))?;
        Ok(())
    }

    fn write_element<W: Write>(&self, writer: &mut Writer<W>, id: ElementId) -> Result<()> {
        let el = self.element(id);
        let mut start = BytesStart::new(el.tag.as_str());
        for (k, v) in &el.attributes {
            start.push_attribute((k.as_str(), v.as_str()));
        }
        if el.children.is_empty() && el.text.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        if let Some(text) = &el.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for &child in &el.children {
            self.write_element(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(el.tag.as_str())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_document_parses_back_to_the_same_elements() {
        let xml = r#"<Project Name="P &amp; Q"><Tag Name="a">x &lt; y</Tag><Empty/></Project>"#;
        let doc = XmlDocument::parse(xml).unwrap();
        let text = doc.to_xml_string().unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        let again = XmlDocument::parse(&text).unwrap();
        assert_eq!(again.len(), doc.len());
        let tag = again.first_child_named(again.root(), "Tag").unwrap();
        assert_eq!(again.text(tag), Some("x < y"));
        assert_eq!(again.attribute(again.root(), "Name"), Some("P & Q"));
    }
}
