use scrub_dom::{Document, NodeId};
use scrub_writer::escape::RawEscaper;
use scrub_writer::{MarkupWriter, Syntax};

use crate::serialize::{write_tree, Flavor};

/// Markup of a node as it would have been written, without escaping.
///
/// Text is written verbatim, CDATA as `<![CDATA[...]]>`, elements as
/// `<tag a="v">...</tag>` or `<tag a="v"/>` when childless. Comments,
/// processing instructions and document nodes render empty.
pub fn render_literal(doc: &Document, node: NodeId) -> String {
    let mut writer = MarkupWriter::for_writer(String::new(), RawEscaper, Syntax::Xml);
    // writing into a String cannot fail
    match write_tree(doc, node, &mut writer, Flavor::Literal) {
        Ok(()) => writer.finish().unwrap_or_default(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use scrub_dom::Element;

    use super::*;

    fn fragment() -> (Document, NodeId) {
        // <invalid a="x&y">foo<p>bar</p><!--c--><br/></invalid>
        let mut doc = Document::new();
        let mut element = Element::new("invalid");
        element.set_attribute("a", "x&y");
        let invalid = doc.create_element(element);
        let foo = doc.create_text("foo");
        let p = doc.create_element(Element::new("p"));
        let bar = doc.create_text("bar");
        let comment = doc.create_comment("c");
        let br = doc.create_element(Element::new("br"));
        doc.append_child(invalid, foo);
        doc.append_child(invalid, p);
        doc.append_child(p, bar);
        doc.append_child(invalid, comment);
        doc.append_child(invalid, br);
        (doc, invalid)
    }

    #[test]
    fn element() {
        let (doc, invalid) = fragment();
        assert_eq!(
            r#"<invalid a="x&y">foo<p>bar</p><br/></invalid>"#,
            render_literal(&doc, invalid)
        );
    }

    #[test]
    fn childless_element() {
        let mut doc = Document::new();
        let mut element = Element::new("script");
        element.set_attribute("src", "x.js");
        let script = doc.create_element(element);
        assert_eq!(r#"<script src="x.js"/>"#, render_literal(&doc, script));
    }

    #[test]
    fn other_kinds() {
        let mut doc = Document::new();
        let text = doc.create_text("<b>");
        let cdata = doc.create_cdata("x");
        let comment = doc.create_comment("x");
        let pi = doc.create_processing_instruction("php", "echo 1;");
        assert_eq!("<b>", render_literal(&doc, text));
        assert_eq!("<![CDATA[x]]>", render_literal(&doc, cdata));
        assert_eq!("", render_literal(&doc, comment));
        assert_eq!("", render_literal(&doc, pi));
        assert_eq!("", render_literal(&doc, doc.root()));
    }
}
