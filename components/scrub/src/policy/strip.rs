use scrub_dom::{Document, NodeId};

use crate::policy::{parent_of_rejected, Policy};
use crate::sanitizer::{Disposition, Sanitizer};

/// Removes rejected elements but keeps their content in place.
///
/// Content moved up out of a rejected element is checked again right away,
/// as are the element children of allowed nodes.
pub struct Strip<'s> {
    sanitizer: &'s Sanitizer,
}

impl<'s> Strip<'s> {
    pub fn new(sanitizer: &'s Sanitizer) -> Self {
        Self { sanitizer }
    }

    /// Moves the children of `node` before it and drops `node`. Returns the
    /// moved children.
    fn unwrap(doc: &mut Document, node: NodeId) -> Option<Vec<NodeId>> {
        parent_of_rejected(doc, node)?;
        let children = doc.children(node).to_vec();
        for &child in &children {
            doc.insert_before(child, node);
        }
        doc.remove(node);
        Some(children)
    }
}

impl Policy for Strip<'_> {
    fn apply(&mut self, doc: &mut Document, node: NodeId) -> Disposition {
        let mut disposition = Disposition::Allow;
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            let next: Vec<NodeId> = match self.sanitizer.evaluate(doc, current) {
                Disposition::Allow => doc
                    .children(current)
                    .iter()
                    .copied()
                    .filter(|&child| doc.kind(child).is_element())
                    .collect(),
                Disposition::Reject => {
                    if current == node {
                        disposition = Disposition::Reject;
                    }
                    match Self::unwrap(doc, current) {
                        Some(children) => children,
                        None => continue,
                    }
                }
            };
            pending.extend(next.into_iter().rev());
        }
        disposition
    }
}
