use std::str::from_utf8;

use ::quick_xml::events::{BytesStart, Event};
use ::quick_xml::Reader;

use crate::chars::{HtmlBytesExt, HtmlStrExt};
use crate::dom::{Document, Element, NodeId, QName};
use crate::error::{Error, Reason, Result};
use crate::reader::{is_void_element, DomReader};

/// Builds a [`Document`] from markup using `quick-xml` as tokenizer.
///
/// The tokenizer is XML, but tree construction forgives the usual HTML
/// sloppiness: void elements, unquoted attribute values, unclosed or
/// misnested elements (fragment mode only).
pub struct QuickXmlDomReader<'r> {
    input: &'r str,
    reader: Reader<&'r [u8]>,
    doc: Document,
    base: NodeId,
    stack: Vec<NodeId>,
    lenient: bool,
    last_offset: usize,
}

impl<'r> QuickXmlDomReader<'r> {
    pub fn new(input: &'r str) -> Self {
        let mut reader = Reader::from_str(input);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_comments = false;
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let doc = Document::new();
        let base = doc.root();
        Self {
            input,
            reader,
            doc,
            base,
            stack: Vec::with_capacity(16),
            lenient: false,
            last_offset: 0,
        }
    }

    fn error(&self, reason: Reason) -> Error {
        Error::new(self.last_offset, reason)
    }

    fn conv_utf8<'a>(&self, bytes: &'a [u8]) -> Result<&'a str> {
        from_utf8(bytes).map_err(|err| self.error(Reason::Utf8(err)))
    }

    fn read_event(&mut self) -> Result<Event<'r>> {
        self.last_offset = self.reader.buffer_position() as usize;
        self.reader
            .read_event()
            .map_err(|err| Error::new(self.last_offset, Reason::Syntax(err.to_string())))
    }

    /// Keeps the input from the failed event on as text in lenient mode.
    fn recover(&mut self, err: Error) -> Result<()> {
        if !self.lenient {
            return Err(err);
        }
        log::trace!("keeping rest of input as text: {}", err);
        let input = self.input;
        let rest = input.get(self.last_offset..).unwrap_or_default();
        if !rest.is_empty() {
            let parent = self.current();
            let id = self.doc.create_text(htmlize::unescape(rest).into_owned());
            self.doc.append_child(parent, id);
        }
        Ok(())
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(self.base)
    }

    fn name_of(&self, id: NodeId) -> &str {
        self.doc.element(id).map(Element::name).unwrap_or("")
    }

    pub fn create_element(&self, start: &BytesStart) -> Result<Element> {
        let mut element = Element::new(self.conv_utf8(start.name().as_ref())?);
        for attr in start.html_attributes().with_checks(false) {
            let attr = match attr {
                Ok(attr) => attr,
                Err(err) => {
                    log::trace!("skipping malformed attribute: {}", err);
                    continue;
                }
            };
            let name = self.conv_utf8(attr.key.as_ref())?;
            if element.has_attribute(name) {
                log::trace!("skipping duplicate attribute {}", name);
                continue;
            }
            let value = self.conv_utf8(&attr.value)?;
            element.push_attribute(QName::parse(name), htmlize::unescape(value).into_owned());
        }
        Ok(element)
    }

    fn open(&mut self, start: &BytesStart, empty: bool) -> Result<()> {
        let element = self.create_element(start)?;
        let void = is_void_element(element.name());
        let id = self.doc.create_element(element);
        let parent = self.current();
        self.doc.append_child(parent, id);
        if !empty && !void {
            self.stack.push(id);
        }
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<()> {
        if is_void_element(name) {
            return Ok(());
        }
        if !self.lenient {
            return match self.stack.last().copied() {
                Some(top) if self.name_of(top) == name => {
                    self.stack.pop();
                    Ok(())
                }
                Some(top) => Err(self.error(Reason::EndEventMismatch {
                    expected: self.name_of(top).to_string(),
                    found: name.to_string(),
                })),
                None => Err(self.error(Reason::EndEventMismatch {
                    expected: String::new(),
                    found: name.to_string(),
                })),
            };
        }

        match self.stack.iter().rposition(|&id| self.name_of(id) == name) {
            Some(pos) => self.stack.truncate(pos),
            None => log::trace!("ignoring unmatched end tag </{}>", name),
        }
        Ok(())
    }

    fn content(&mut self, event: Event<'r>) -> Result<()> {
        let parent = self.current();
        match event {
            Event::Start(start) => self.open(&start, false)?,
            Event::Empty(start) => self.open(&start, true)?,
            Event::End(end) => {
                let name = end.name();
                let name = self.conv_utf8(name.as_ref())?;
                self.close(name)?;
            }
            Event::Text(text) => {
                let text = self.conv_utf8(&text)?;
                if !text.is_empty() {
                    let id = self.doc.create_text(htmlize::unescape(text).into_owned());
                    self.doc.append_child(parent, id);
                }
            }
            Event::CData(cdata) => {
                let text = self.conv_utf8(&cdata)?.to_string();
                let id = self.doc.create_cdata(text);
                self.doc.append_child(parent, id);
            }
            Event::Comment(comment) => {
                let text = self.conv_utf8(&comment)?.to_string();
                let id = self.doc.create_comment(text);
                self.doc.append_child(parent, id);
            }
            Event::PI(pi) => {
                let raw = self.conv_utf8(&pi)?;
                let (target, data) = match raw.find(|c: char| c.is_ascii_whitespace()) {
                    Some(pos) => (&raw[..pos], raw[pos..].trim_start()),
                    None => (raw, ""),
                };
                let id = self.doc.create_processing_instruction(target, data);
                self.doc.append_child(parent, id);
            }
            Event::Decl(_) | Event::DocType(_) | Event::Eof => {
                log::trace!("ignoring prolog event inside content");
            }
        }
        Ok(())
    }

    fn synthesize_scaffolding(&mut self) -> NodeId {
        let root = self.doc.root();
        let html = self.doc.create_element(Element::new("html"));
        self.doc.append_child(root, html);

        let head = self.doc.create_element(Element::new("head"));
        self.doc.append_child(html, head);
        let mut meta = Element::new("meta");
        meta.set_attribute("http-equiv", "Content-Type");
        meta.set_attribute("content", "text/html; charset=UTF-8");
        let meta = self.doc.create_element(meta);
        self.doc.append_child(head, meta);

        let body = self.doc.create_element(Element::new("body"));
        self.doc.append_child(html, body);
        body
    }

    /// Reads mixed content into a synthesized `html > head, body`
    /// skeleton. Input which already starts with `<html` is read as a
    /// complete document.
    pub fn parse_fragment(mut self) -> Result<Document> {
        if self.input.starts_with_ignore_ascii_case("<html") {
            self.lenient = true;
            return self.parse();
        }

        self.lenient = true;
        self.base = self.synthesize_scaffolding();
        loop {
            match self.read_event() {
                Ok(Event::Eof) => return Ok(self.doc),
                Ok(event) => self.content(event)?,
                Err(err) => {
                    self.recover(err)?;
                    return Ok(self.doc);
                }
            }
        }
    }
}

impl<'r> DomReader for QuickXmlDomReader<'r> {
    fn parse(mut self) -> Result<Document> {
        let mut seen_decl = false;
        let mut seen_doctype = false;

        // prolog
        loop {
            match self.read_event()? {
                Event::Start(start) => {
                    self.open(&start, false)?;
                    break;
                }
                Event::Empty(start) => {
                    self.open(&start, true)?;
                    break;
                }
                Event::Text(text) if text.only_html_whitespace() => continue,
                Event::Comment(_) | Event::PI(_) => continue,
                Event::Decl(_) => {
                    if seen_decl || seen_doctype {
                        return Err(self.error(Reason::UnexpectedDecl));
                    }
                    seen_decl = true;
                }
                Event::DocType(_) => {
                    if seen_doctype {
                        return Err(self.error(Reason::UnexpectedDocType));
                    }
                    seen_doctype = true;
                }
                Event::End(end) => {
                    return Err(self.error(Reason::EndEventMismatch {
                        expected: String::new(),
                        found: self.conv_utf8(end.name().as_ref())?.to_string(),
                    }))
                }
                Event::Text(_) | Event::CData(_) => {
                    return Err(self.error(Reason::Syntax(
                        "content before root element".to_string(),
                    )))
                }
                Event::Eof => return Err(self.error(Reason::MissingRoot)),
            }
        }

        // inner markup
        while !self.stack.is_empty() {
            let event = match self.read_event() {
                Ok(event) => event,
                Err(err) => {
                    self.recover(err)?;
                    return Ok(self.doc);
                }
            };
            match event {
                Event::Eof if self.lenient => break,
                Event::Eof => return Err(self.error(Reason::UnexpectedEof)),
                Event::Decl(_) => return Err(self.error(Reason::UnexpectedDecl)),
                Event::DocType(_) => return Err(self.error(Reason::UnexpectedDocType)),
                event => self.content(event)?,
            }
        }

        // no trailing content
        loop {
            let event = match self.read_event() {
                Ok(event) => event,
                Err(err) => {
                    self.recover(err)?;
                    return Ok(self.doc);
                }
            };
            match event {
                Event::Eof => return Ok(self.doc),
                Event::Text(text) if text.only_html_whitespace() => (),
                Event::Comment(_) | Event::PI(_) => (),
                event if self.lenient => self.content(event)?,
                _ => return Err(self.error(Reason::TrailingContent)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::dom::NodeKind;

    fn element_names(doc: &Document, id: NodeId) -> Vec<String> {
        doc.children(id)
            .iter()
            .filter_map(|&child| doc.element(child))
            .map(|element| element.name().to_string())
            .collect()
    }

    fn body(doc: &Document) -> NodeId {
        let html = doc.root_element().unwrap();
        doc.children(html)
            .iter()
            .copied()
            .find(|&id| doc.element(id).map(Element::name) == Some("body"))
            .unwrap()
    }

    #[test]
    fn only_root() {
        let doc = QuickXmlDomReader::new("<root></root>").parse().unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!("root", doc.element(root).unwrap().name());
        assert_eq!(0, doc.children(root).len());
    }

    #[test]
    fn empty() {
        let doc = QuickXmlDomReader::new("<root />").parse().unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!("root", doc.element(root).unwrap().name());
        assert_eq!(0, doc.children(root).len());
    }

    #[test]
    fn text_and_tail() {
        let doc = QuickXmlDomReader::new("<root>text<elem/>tail</root>")
            .parse()
            .unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!(3, doc.children(root).len());
        assert_eq!("texttail", doc.text_content(root));
    }

    #[test]
    fn pre() {
        let doc = QuickXmlDomReader::new(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>
            <!DOCTYPE root SYSTEM \"scheme.dtd\">
            <!-- Comment -->
            <root></root>",
        )
        .parse()
        .unwrap();
        assert_eq!(1, doc.children(doc.root()).len());
    }

    #[test]
    fn attributes() {
        let doc = QuickXmlDomReader::new(
            r#"<a href="x?a=1&amp;b=2" xlink:href='#y' checked title=bar></a>"#,
        )
        .parse()
        .unwrap();
        let a = doc.element(doc.root_element().unwrap()).unwrap();
        assert_eq!(Some("x?a=1&b=2"), a.attribute("href"));
        assert_eq!(Some("#y"), a.attribute("xlink:href"));
        assert_eq!(Some("xlink"), a.attributes()[1].name.prefix());
        assert_eq!(Some(""), a.attribute("checked"));
        assert_eq!(Some("bar"), a.attribute("title"));
    }

    #[test]
    fn duplicate_attributes_keep_first() {
        let doc = QuickXmlDomReader::new(r#"<p style="a: b" title=t style="c: d"/>"#)
            .parse()
            .unwrap();
        let p = doc.element(doc.root_element().unwrap()).unwrap();
        assert_eq!(2, p.attributes().len());
        assert_eq!(Some("a: b"), p.attribute("style"));
    }

    #[test]
    fn entities() {
        let doc = QuickXmlDomReader::new("<p>&lt;b&gt; &amp; &eacute;</p>")
            .parse()
            .unwrap();
        assert_eq!("<b> & é", doc.text_content(doc.root_element().unwrap()));
    }

    #[test]
    fn cdata_comment_pi() {
        let doc = QuickXmlDomReader::new("<r><![CDATA[<x>]]><!--c--><?php echo 1; ?></r>")
            .parse()
            .unwrap();
        let root = doc.root_element().unwrap();
        let kinds: Vec<&NodeKind> = doc.children(root).iter().map(|&id| doc.kind(id)).collect();
        assert_matches!(kinds[0], NodeKind::CData(text) if text == "<x>");
        assert_matches!(kinds[1], NodeKind::Comment(text) if text == "c");
        assert_matches!(
            kinds[2],
            NodeKind::ProcessingInstruction { target, data } if target == "php" && data.starts_with("echo")
        );
    }

    #[test]
    fn void_elements() {
        let doc = QuickXmlDomReader::new("<p>a<br>b<img src=x.png>c</p>")
            .parse()
            .unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!(vec!["br", "img"], element_names(&doc, root));
        assert_eq!(5, doc.children(root).len());
    }

    mod fragment {
        use super::*;

        #[test]
        fn scaffolding() {
            let doc = QuickXmlDomReader::new("foo<b>bar</b>")
                .parse_fragment()
                .unwrap();
            let html = doc.root_element().unwrap();
            assert_eq!(vec!["head", "body"], element_names(&doc, html));
            let head = doc.children(html)[0];
            let meta = doc.element(doc.children(head)[0]).unwrap();
            assert_eq!("meta", meta.name());
            assert!(meta.has_attribute("http-equiv"));
            assert!(meta.has_attribute("content"));
            let body = body(&doc);
            assert_eq!(2, doc.children(body).len());
            assert_eq!("foobar", doc.text_content(body));
        }

        #[test]
        fn empty_input() {
            let doc = QuickXmlDomReader::new("").parse_fragment().unwrap();
            assert!(doc.children(body(&doc)).is_empty());
        }

        #[test]
        fn full_document() {
            let doc = QuickXmlDomReader::new("<html><body><p>x</p></body></html>")
                .parse_fragment()
                .unwrap();
            let html = doc.root_element().unwrap();
            assert_eq!(vec!["body"], element_names(&doc, html));
        }

        #[test]
        fn unclosed_elements() {
            let doc = QuickXmlDomReader::new("<div><p>x").parse_fragment().unwrap();
            let body = body(&doc);
            assert_eq!(vec!["div"], element_names(&doc, body));
            assert_eq!("x", doc.text_content(body));
        }

        #[test]
        fn misnested_elements() {
            let doc = QuickXmlDomReader::new("<b><i>x</b>y</i>z")
                .parse_fragment()
                .unwrap();
            let body = body(&doc);
            assert_eq!(vec!["b"], element_names(&doc, body));
            assert_eq!("xyz", doc.text_content(body));
            assert_eq!(3, doc.children(body).len());
        }

        #[test]
        fn stray_less_than() {
            let doc = QuickXmlDomReader::new("1 < 2").parse_fragment().unwrap();
            assert_eq!("1 < 2", doc.text_content(body(&doc)));

            let doc = QuickXmlDomReader::new("a <= b &amp; c")
                .parse_fragment()
                .unwrap();
            assert_eq!("a <= b & c", doc.text_content(body(&doc)));
        }

        #[test]
        fn truncated_end_tag() {
            let doc = QuickXmlDomReader::new("<a href=x>y</a")
                .parse_fragment()
                .unwrap();
            let body = body(&doc);
            assert_eq!(vec!["a"], element_names(&doc, body));
            assert_eq!("y</a", doc.text_content(body));
        }

        #[test]
        fn stray_less_than_in_document() {
            let doc = QuickXmlDomReader::new("<html><body>1 < 2")
                .parse_fragment()
                .unwrap();
            assert_eq!("1 < 2", doc.text_content(body(&doc)));
        }
    }

    mod structure_fails {
        use super::*;

        fn reason(input: &str) -> Reason {
            QuickXmlDomReader::new(input).parse().unwrap_err().reason
        }

        #[test]
        fn pre_text() {
            assert_matches!(reason("sdsf<root></root>"), Reason::Syntax(_));
        }

        #[test]
        fn wrong_end() {
            assert_matches!(
                reason("<root></roo>"),
                Reason::EndEventMismatch { expected, found } if expected == "root" && found == "roo"
            );
        }

        #[test]
        fn eof() {
            assert_matches!(reason("<root>"), Reason::UnexpectedEof);
        }

        #[test]
        fn missing_root() {
            assert_matches!(reason("<!-- nothing -->"), Reason::MissingRoot);
        }

        #[test]
        fn unclosed_tag() {
            assert_matches!(reason("<root>1 < 2"), Reason::Syntax(_));
        }

        #[test]
        fn trailing() {
            assert_matches!(reason("<root/><other/>"), Reason::TrailingContent);
        }

        #[test]
        fn double_decl() {
            assert_matches!(
                reason("<?xml version=\"1.0\" ?><?xml version=\"1.0\" ?><root></root>"),
                Reason::UnexpectedDecl
            );
        }

        #[test]
        fn double_doctype() {
            assert_matches!(
                reason("<!DOCTYPE root SYSTEM \"scheme.dtd\"><!DOCTYPE root SYSTEM \"scheme.dtd\"><root></root>"),
                Reason::UnexpectedDocType
            );
        }
    }
}
