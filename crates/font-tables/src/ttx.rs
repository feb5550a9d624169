//! TTX documents holding the OS/2 and post tables of a font.

use std::{
    fs::{read_to_string, write},
    path::Path,
};

use log::debug;
use read_fonts::{FontRef, types::Tag};
use write_fonts::FontBuilder;

use crate::{
    error::{Error, Result},
    os2::{self, OS2_ELEMENT},
    post::{self, POST_ELEMENT},
    tree::Element,
};

const ROOT_ELEMENT: &str = "ttFont";

/// In-memory XML representation of a font's OS/2 and post tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtxDocument {
    root: Element,
}

impl TtxDocument {
    /// Dump the OS/2 and post tables of a font. Absent tables are skipped.
    pub fn dump(font_data: &[u8]) -> Result<Self> {
        let font = FontRef::new(font_data)?;
        let mut root = Element::new(ROOT_ELEMENT);
        root.set_attribute("sfntVersion", sfnt_version(font.table_directory.sfnt_version()));

        if font.table_data(Tag::new(b"OS/2")).is_some() {
            root.push(os2::dump(&font)?);
        } else {
            debug!("No OS/2 table to dump");
        }
        if font.table_data(Tag::new(b"post")).is_some() {
            root.push(post::dump(&font)?);
        } else {
            debug!("No post table to dump");
        }

        Ok(Self { root })
    }

    pub fn os2(&self) -> Option<&Element> {
        self.root.child(OS2_ELEMENT)
    }

    pub fn post(&self) -> Option<&Element> {
        self.root.child(POST_ELEMENT)
    }

    /// Set the `value` attribute of every element named `name` anywhere in the document.
    pub fn set_value_all(&mut self, name: &str, value: impl ToString) -> usize {
        self.root.set_value_all(name, value)
    }

    /// Values of every element named `name`, in document order.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.root.iter_named(name).filter_map(Element::value).collect()
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        // Writing into a String cannot fail.
        let _ = self.root.write_xml(&mut out, 0);
        out
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        write(path, self.to_xml()).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text)?;
        let root = doc.root_element();
        if root.tag_name().name() != ROOT_ELEMENT {
            return Err(Error::UnexpectedRoot(root.tag_name().name().to_string()));
        }
        Ok(Self { root: convert(root) })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Compile the document's tables onto `font_data`.
    ///
    /// OS/2 and post are rebuilt from the base font's tables with the
    /// document's values applied; every other table is copied unchanged.
    pub fn apply(&self, font_data: &[u8]) -> Result<Vec<u8>> {
        let font = FontRef::new(font_data)?;
        let mut builder = FontBuilder::new();

        if let Some(table) = self.os2() {
            builder.add_raw(Tag::new(b"OS/2"), os2::compile(&font, table)?);
        }
        if let Some(table) = self.post() {
            builder.add_raw(Tag::new(b"post"), post::compile(&font, table)?);
        }
        builder.copy_missing_tables(font);

        Ok(builder.build())
    }
}

fn convert(node: roxmltree::Node) -> Element {
    let mut element = Element::new(node.tag_name().name());
    for attribute in node.attributes() {
        element.set_attribute(attribute.name(), attribute.value());
    }
    for child in node.children().filter(roxmltree::Node::is_element) {
        element.push(convert(child));
    }
    element
}

/// `\x00\x01\x00\x00` for TrueType outlines, `OTTO` for CFF.
fn sfnt_version(version: u32) -> String {
    let bytes = version.to_be_bytes();
    if bytes.iter().all(u8::is_ascii_alphanumeric) {
        bytes.iter().map(|b| *b as char).collect()
    } else {
        bytes.iter().map(|b| format!("\\x{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sfnt_version() {
        assert_eq!(sfnt_version(0x00010000), "\\x00\\x01\\x00\\x00");
        assert_eq!(sfnt_version(u32::from_be_bytes(*b"OTTO")), "OTTO");
    }

    #[test]
    fn test_parse_rejects_foreign_root() {
        let err = TtxDocument::parse("<svg/>").unwrap_err();
        assert!(matches!(err, Error::UnexpectedRoot(name) if name == "svg"));
    }

    #[test]
    fn test_parse_ignores_text_and_comments() {
        let doc = TtxDocument::parse(
            "<ttFont>\n  <!-- tables -->\n  <post>\n    <isFixedPitch value=\"1\"/>\n  </post>\n</ttFont>",
        )
        .unwrap();
        assert_eq!(doc.values("isFixedPitch"), ["1"]);
        assert_eq!(doc.post().unwrap().children().len(), 1);
    }

    #[test]
    fn test_values_outlive_the_queried_name() {
        let doc = TtxDocument::parse("<ttFont><post><isFixedPitch value=\"0\"/></post></ttFont>").unwrap();
        let values = {
            let name = String::from("isFixedPitch");
            doc.values(&name)
        };
        assert_eq!(values, ["0"]);
    }
}
