use scrub_dom::{Document, NodeId};

use crate::policy::{parent_of_rejected, Policy};
use crate::sanitizer::{Disposition, Sanitizer};

/// Removes rejected nodes together with everything inside them.
pub struct Prune<'s> {
    sanitizer: &'s Sanitizer,
}

impl<'s> Prune<'s> {
    pub fn new(sanitizer: &'s Sanitizer) -> Self {
        Self { sanitizer }
    }
}

impl Policy for Prune<'_> {
    fn apply(&mut self, doc: &mut Document, node: NodeId) -> Disposition {
        match self.sanitizer.evaluate(doc, node) {
            Disposition::Allow => Disposition::Allow,
            Disposition::Reject => {
                if parent_of_rejected(doc, node).is_some() {
                    doc.remove(node);
                }
                Disposition::Reject
            }
        }
    }
}
