use scrub_dom::{Document, NodeId};

use crate::policy::Policy;
use crate::sanitizer::Disposition;

/// Policy backed by a closure. `None` means no objection and counts as
/// [`Disposition::Allow`].
pub struct FnPolicy<F>(F);

pub fn policy_fn<F>(f: F) -> FnPolicy<F>
where
    F: FnMut(&mut Document, NodeId) -> Option<Disposition>,
{
    FnPolicy(f)
}

impl<F> Policy for FnPolicy<F>
where
    F: FnMut(&mut Document, NodeId) -> Option<Disposition>,
{
    fn apply(&mut self, doc: &mut Document, node: NodeId) -> Disposition {
        (self.0)(doc, node).unwrap_or(Disposition::Allow)
    }
}
