use scrub_dom::{Document, NodeId, NodeKind};

use crate::attributes::{sanitize_attributes, AttributeScan};
use crate::rules;
use crate::whitelist::Whitelist;

/// Outcome of looking at a single node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Disposition {
    Allow,
    Reject,
}

/// Decides per node whether it may stay, cleaning the attributes of the
/// elements that may.
#[derive(Clone, Debug, Default)]
pub struct Sanitizer {
    whitelist: Option<Whitelist>,
    scan: AttributeScan,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_whitelist(whitelist: Whitelist) -> Self {
        Self {
            whitelist: Some(whitelist),
            scan: AttributeScan::default(),
        }
    }

    /// Replaces the built-in rule tables for elements and attributes.
    pub fn set_whitelist(&mut self, whitelist: Whitelist) {
        self.whitelist = Some(whitelist);
    }

    pub fn whitelist(&self) -> Option<&Whitelist> {
        self.whitelist.as_ref()
    }

    /// Falls back to the built-in rule tables.
    pub fn clear_whitelist(&mut self) {
        self.whitelist = None;
    }

    pub fn attribute_scan(&self) -> AttributeScan {
        self.scan
    }

    pub fn set_attribute_scan(&mut self, scan: AttributeScan) {
        self.scan = scan;
    }

    pub fn allows_element(&self, tag: &str) -> bool {
        match &self.whitelist {
            Some(whitelist) => whitelist.allows_element(tag),
            None => rules::default_elements().contains(tag),
        }
    }

    /// Elements pass when whitelisted and get their attributes cleaned. Text
    /// and CDATA always pass, everything else is rejected.
    pub fn evaluate(&self, doc: &mut Document, node: NodeId) -> Disposition {
        match doc.kind_mut(node) {
            NodeKind::Element(element) => {
                if !self.allows_element(element.name()) {
                    log::trace!("rejecting <{}>", element.name());
                    return Disposition::Reject;
                }
                let allowed = self
                    .whitelist
                    .as_ref()
                    .and_then(|whitelist| whitelist.allowed_attributes(element.name()));
                sanitize_attributes(element, allowed, self.scan);
                Disposition::Allow
            }
            NodeKind::Text(_) | NodeKind::CData(_) => Disposition::Allow,
            NodeKind::Document | NodeKind::Comment(_) | NodeKind::ProcessingInstruction { .. } => {
                Disposition::Reject
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scrub_dom::Element;

    use super::*;

    fn with_element(element: Element) -> (Document, NodeId) {
        let mut doc = Document::new();
        let id = doc.create_element(element);
        let root = doc.root();
        doc.append_child(root, id);
        (doc, id)
    }

    #[test]
    fn default_tables() {
        let sanitizer = Sanitizer::new();
        let (mut doc, p) = with_element(Element::new("p"));
        assert_eq!(Disposition::Allow, sanitizer.evaluate(&mut doc, p));
        let (mut doc, script) = with_element(Element::new("script"));
        assert_eq!(Disposition::Reject, sanitizer.evaluate(&mut doc, script));
    }

    #[test]
    fn structural_tags_pass() {
        let sanitizer = Sanitizer::new();
        for tag in ["html", "head", "body"] {
            let (mut doc, id) = with_element(Element::new(tag));
            assert_eq!(Disposition::Allow, sanitizer.evaluate(&mut doc, id), "{}", tag);
        }
    }

    #[test]
    fn node_kinds() {
        let sanitizer = Sanitizer::new();
        let mut doc = Document::new();
        let text = doc.create_text("x");
        let cdata = doc.create_cdata("x");
        let comment = doc.create_comment("x");
        let pi = doc.create_processing_instruction("php", "echo 1;");
        let root = doc.root();
        assert_eq!(Disposition::Allow, sanitizer.evaluate(&mut doc, text));
        assert_eq!(Disposition::Allow, sanitizer.evaluate(&mut doc, cdata));
        assert_eq!(Disposition::Reject, sanitizer.evaluate(&mut doc, comment));
        assert_eq!(Disposition::Reject, sanitizer.evaluate(&mut doc, pi));
        assert_eq!(Disposition::Reject, sanitizer.evaluate(&mut doc, root));
    }

    #[test]
    fn user_whitelist_replaces_tables() {
        let mut sanitizer = Sanitizer::new();
        sanitizer.set_whitelist(Whitelist::new([("em", vec!["style"])]));

        let (mut doc, p) = with_element(Element::new("p"));
        assert_eq!(Disposition::Reject, sanitizer.evaluate(&mut doc, p));

        let mut em = Element::new("em");
        em.set_attribute("class", "foo");
        em.set_attribute("style", "color: red;");
        let (mut doc, em) = with_element(em);
        assert_eq!(Disposition::Allow, sanitizer.evaluate(&mut doc, em));
        let em = doc.element(em).unwrap();
        assert!(!em.has_attribute("class"));
        assert_eq!(Some("color: red;"), em.attribute("style"));

        sanitizer.clear_whitelist();
        assert!(sanitizer.whitelist().is_none());
        assert!(sanitizer.allows_element("p"));
    }

    #[test]
    fn rejected_element_is_untouched() {
        let sanitizer = Sanitizer::new();
        let mut script = Element::new("script");
        script.set_attribute("onload", "x");
        let (mut doc, id) = with_element(script);
        sanitizer.evaluate(&mut doc, id);
        assert!(doc.element(id).unwrap().has_attribute("onload"));
    }
}
