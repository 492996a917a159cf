use scrub_dom::{Document, NodeId};

use crate::literal::render_literal;
use crate::policy::{parent_of_rejected, Policy};
use crate::sanitizer::{Disposition, Sanitizer};

/// Replaces rejected nodes by a text node holding their literal markup, so
/// the markup shows up as text in the output.
pub struct Escape<'s> {
    sanitizer: &'s Sanitizer,
}

impl<'s> Escape<'s> {
    pub fn new(sanitizer: &'s Sanitizer) -> Self {
        Self { sanitizer }
    }
}

impl Policy for Escape<'_> {
    fn apply(&mut self, doc: &mut Document, node: NodeId) -> Disposition {
        if self.sanitizer.evaluate(doc, node) == Disposition::Allow {
            return Disposition::Allow;
        }
        if parent_of_rejected(doc, node).is_some() {
            let literal = render_literal(doc, node);
            let replacement = doc.create_text(literal);
            doc.insert_before(replacement, node);
            doc.remove(node);
        }
        Disposition::Reject
    }
}
