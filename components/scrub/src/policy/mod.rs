//! Per-node decision and mutation strategies driven by [`traverse`].
//!
//! [`traverse`]: crate::traverse::traverse

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use scrub_dom::{Document, NodeId};

use crate::error::ConfigError;
use crate::sanitizer::{Disposition, Sanitizer};
use crate::whitelist::Whitelist;

mod escape;
mod func;
mod prune;
mod strip;

pub use self::escape::Escape;
pub use self::func::{policy_fn, FnPolicy};
pub use self::prune::Prune;
pub use self::strip::Strip;

pub trait Policy {
    /// Decides about `node` and mutates the tree accordingly. A rejected
    /// node is not descended into by a top-down traversal.
    fn apply(&mut self, doc: &mut Document, node: NodeId) -> Disposition;
}

impl<P: Policy + ?Sized> Policy for &mut P {
    fn apply(&mut self, doc: &mut Document, node: NodeId) -> Disposition {
        (**self).apply(doc, node)
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn apply(&mut self, doc: &mut Document, node: NodeId) -> Disposition {
        (**self).apply(doc, node)
    }
}

/// Built-in policies, selectable by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyName {
    /// Unwrap rejected elements. Keeps no markup unless given a whitelist.
    #[default]
    Strip,
    /// Replace rejected nodes by their literal markup as text.
    Escape,
    /// Remove rejected nodes including their content.
    Prune,
    /// Unwrap rejected elements, checked against the built-in rule tables.
    Cull,
}

impl PolicyName {
    /// Sanitizer used when no whitelist is configured.
    pub fn default_sanitizer(self) -> Sanitizer {
        match self {
            PolicyName::Strip => Sanitizer::with_whitelist(Whitelist::structural()),
            PolicyName::Escape | PolicyName::Prune | PolicyName::Cull => Sanitizer::new(),
        }
    }

    pub fn build(self, sanitizer: &Sanitizer) -> Box<dyn Policy + '_> {
        match self {
            PolicyName::Strip | PolicyName::Cull => Box::new(Strip::new(sanitizer)),
            PolicyName::Escape => Box::new(Escape::new(sanitizer)),
            PolicyName::Prune => Box::new(Prune::new(sanitizer)),
        }
    }
}

impl FromStr for PolicyName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strip" => Ok(PolicyName::Strip),
            "escape" => Ok(PolicyName::Escape),
            "prune" => Ok(PolicyName::Prune),
            "cull" => Ok(PolicyName::Cull),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PolicyName::Strip => "strip",
            PolicyName::Escape => "escape",
            PolicyName::Prune => "prune",
            PolicyName::Cull => "cull",
        })
    }
}

/// Parent of a rejected node, or `None` (with a warning) when the node
/// cannot be taken out of the tree.
pub(crate) fn parent_of_rejected(doc: &Document, node: NodeId) -> Option<NodeId> {
    let parent = doc.parent(node);
    if parent.is_none() {
        log::warn!("rejected {:?} has no parent, leaving it in place", node);
    }
    parent
}
