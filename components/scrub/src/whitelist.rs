use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

pub type RawWhitelist = HashMap<String, HashSet<String>>;

/// Allowed elements together with their allowed attributes.
///
/// Replaces the built-in rule tables completely. The scaffolding any HTML
/// parser synthesizes (`html`, `head`, `body` and the charset `meta` when
/// `head` is not listed) is always added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWhitelist", into = "RawWhitelist")]
pub struct Whitelist {
    tags: RawWhitelist,
}

impl Whitelist {
    pub fn new<I, K, A, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let tags: RawWhitelist = entries
            .into_iter()
            .map(|(tag, attributes)| {
                (
                    tag.into(),
                    attributes.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self::from(tags)
    }

    /// Only the document scaffolding, without any attribute.
    pub fn structural() -> Self {
        Self::new([
            ("html", Vec::<&str>::new()),
            ("body", vec![]),
            ("head", vec![]),
        ])
    }

    pub fn allows_element(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    pub fn allowed_attributes(&self, tag: &str) -> Option<&HashSet<String>> {
        self.tags.get(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &RawWhitelist {
        &self.tags
    }
}

impl From<RawWhitelist> for Whitelist {
    fn from(mut tags: RawWhitelist) -> Self {
        for tag in ["html", "body"] {
            tags.entry(tag.to_string()).or_default();
        }
        if !tags.contains_key("head") {
            log::trace!("whitelist without head, adding head and charset meta");
            tags.insert("head".to_string(), HashSet::new());
            tags.insert(
                "meta".to_string(),
                ["http-equiv", "content"].iter().map(|s| s.to_string()).collect(),
            );
        }
        Self { tags }
    }
}

impl From<Whitelist> for RawWhitelist {
    fn from(whitelist: Whitelist) -> Self {
        whitelist.tags
    }
}
