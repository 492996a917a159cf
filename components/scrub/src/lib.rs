//! Whitelist based markup sanitizer.
//!
//! A parsed [`Document`] is walked by [`traverse`] and every node is handed
//! to a [`Policy`]. The built-in policies ask a [`Sanitizer`] whether a node
//! may stay, which also cleans the attributes of allowed elements, and deal
//! with rejected nodes in their own way:
//!
//! ```
//! assert_eq!("foobarbaz", scrub::scrub_fragment("foo<invalid>bar</invalid>baz").unwrap());
//! assert_eq!(
//!     "foo&lt;invalid&gt;bar&lt;/invalid&gt;baz",
//!     scrub::escape_fragment("foo<invalid>bar</invalid>baz").unwrap()
//! );
//! ```
//!
//! Sanitizing never fails. Only configuration and parsing report errors.

use scrub_dom::{Document, NodeId};
pub use scrub_writer::Syntax;

pub mod attributes;
pub mod css;
mod error;
pub mod literal;
mod options;
pub mod policy;
pub mod rules;
pub mod sanitizer;
pub mod serialize;
pub mod traverse;
pub mod uri;
mod whitelist;

pub use crate::attributes::AttributeScan;
pub use crate::error::{ConfigError, Error, Result};
pub use crate::options::Options;
pub use crate::policy::{policy_fn, Policy, PolicyName};
pub use crate::sanitizer::{Disposition, Sanitizer};
pub use crate::traverse::{traverse, Direction};
pub use crate::whitelist::{RawWhitelist, Whitelist};

/// Parses, sanitizes and serializes markup with one configuration.
#[derive(Clone, Debug)]
pub struct Scrubber {
    policy: PolicyName,
    direction: Direction,
    syntax: Syntax,
    sanitizer: Sanitizer,
}

impl Default for Scrubber {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Scrubber {
    pub fn new(options: Options) -> Self {
        let mut sanitizer = options.policy.default_sanitizer();
        if let Some(whitelist) = options.whitelist {
            sanitizer.set_whitelist(whitelist);
        }
        sanitizer.set_attribute_scan(options.attribute_scan);
        Self {
            policy: options.policy,
            direction: options.direction,
            syntax: options.syntax,
            sanitizer,
        }
    }

    /// Looks up policy and direction by name, failing before anything is
    /// parsed.
    pub fn from_names(policy: &str, direction: &str) -> std::result::Result<Self, ConfigError> {
        let policy = policy.parse()?;
        let direction = direction.parse()?;
        Ok(Self::new(Options::new(policy).with_direction(direction)))
    }

    pub fn policy(&self) -> PolicyName {
        self.policy
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn set_whitelist(&mut self, whitelist: Whitelist) {
        self.sanitizer.set_whitelist(whitelist);
    }

    pub fn whitelist(&self) -> Option<&Whitelist> {
        self.sanitizer.whitelist()
    }

    /// Sanitizes every top-level node of `doc` in place.
    pub fn scrub(&self, doc: &mut Document) {
        let mut policy = self.policy.build(&self.sanitizer);
        let top_level = doc.children(doc.root()).to_vec();
        for node in top_level {
            traverse(doc, node, &mut policy, self.direction);
        }
    }

    /// Sanitizes mixed content and returns the cleaned content.
    pub fn scrub_fragment(&self, input: &str) -> Result<String> {
        log::debug!("scrubbing fragment with {} policy", self.policy);
        let mut doc = scrub_dom::parse_fragment(input)?;
        self.scrub(&mut doc);
        Ok(match find_body(&doc) {
            Some(body) => serialize::inner_markup(&doc, body, self.syntax),
            None => String::new(),
        })
    }

    /// Sanitizes a complete document.
    pub fn scrub_document(&self, input: &str) -> Result<String> {
        log::debug!("scrubbing document with {} policy", self.policy);
        let mut doc = scrub_dom::parse(input)?;
        self.scrub(&mut doc);
        Ok(serialize::to_markup(&doc, doc.root(), self.syntax))
    }
}

fn find_child(doc: &Document, parent: NodeId, name: &str) -> Option<NodeId> {
    doc.children(parent)
        .iter()
        .copied()
        .find(|&child| doc.element(child).map(|element| element.name()) == Some(name))
}

fn find_body(doc: &Document) -> Option<NodeId> {
    let html = find_child(doc, doc.root(), "html")?;
    find_child(doc, html, "body")
}

/// Strips all markup, keeping the text.
pub fn scrub_fragment(input: &str) -> Result<String> {
    Scrubber::default().scrub_fragment(input)
}

/// Turns rejected markup into visible text.
pub fn escape_fragment(input: &str) -> Result<String> {
    Scrubber::new(Options::new(PolicyName::Escape)).scrub_fragment(input)
}
