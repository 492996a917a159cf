//! Mutable markup tree used by the sanitizer, plus a lenient quick-xml
//! based reader to build it.

mod chars;
mod dom;
mod error;
pub mod reader;

pub use crate::chars::{HtmlByteExt, HtmlBytesExt, HtmlStrExt};
pub use crate::dom::{Attribute, Document, Element, NodeId, NodeKind, QName};
pub use crate::error::{Error, Reason, Result};
pub use crate::reader::quick_xml::QuickXmlDomReader;
pub use crate::reader::{is_void_element, DomReader, VOID_ELEMENTS};

/// Parses a complete document.
pub fn parse(input: &str) -> Result<Document> {
    QuickXmlDomReader::new(input).parse()
}

/// Parses mixed content into a synthesized `html > head, body` skeleton.
pub fn parse_fragment(input: &str) -> Result<Document> {
    QuickXmlDomReader::new(input).parse_fragment()
}
