use serde::{Deserialize, Serialize};

use scrub_writer::Syntax;

use crate::attributes::AttributeScan;
use crate::policy::PolicyName;
use crate::traverse::Direction;
use crate::whitelist::Whitelist;

/// Configuration of a [`Scrubber`](crate::Scrubber).
///
/// Every field is optional when deserializing:
///
/// ```
/// let options: scrub::Options = serde_json::from_str(r#"{
///     "policy": "escape",
///     "whitelist": { "p": ["class"], "a": ["href"] }
/// }"#).unwrap();
/// assert_eq!(scrub::PolicyName::Escape, options.policy);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub policy: PolicyName,
    pub direction: Direction,
    /// Replaces the element and attribute rules of the policy.
    pub whitelist: Option<Whitelist>,
    pub attribute_scan: AttributeScan,
    pub syntax: Syntax,
}

impl Options {
    pub fn new(policy: PolicyName) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.whitelist = Some(whitelist);
        self
    }

    pub fn with_attribute_scan(mut self, scan: AttributeScan) -> Self {
        self.attribute_scan = scan;
        self
    }

    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }
}
