use crate::dom::Document;
use crate::error::Result;

pub mod quick_xml;

pub trait DomReader {
    fn parse(self) -> Result<Document>;
}

/// Elements which never have content, even when written as a start tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
];

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}
