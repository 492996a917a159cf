//! URI scheme and SVG reference checks.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::rules;

fn ignorable_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[`\x00-\x20\x7F-\u{A0}\s]+").expect("valid regex"))
}

fn scheme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9][-+.a-z0-9]*:").expect("valid regex"))
}

fn foreign_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"url[[:space:]]*\([[:space:]]*[^#[:space:]][^)]+?\)").expect("valid regex")
    })
}

fn non_local_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[[:space:]]*[^#[:space:]]").expect("valid regex"))
}

/// Normalizes a URI the way a browser would before looking at the scheme:
/// entities decoded, whitespace and control characters dropped, lowercased.
pub fn normalize(value: &str) -> String {
    let unescaped = htmlize::unescape(value);
    ignorable_regex().replace_all(&unescaped, "").to_lowercase()
}

/// Returns the scheme of `value` if it has one, after normalization.
pub fn scheme(value: &str) -> Option<String> {
    let normalized = normalize(value);
    let end = scheme_regex().find(&normalized)?.end();
    Some(normalized[..end - 1].to_string())
}

/// Relative references and references with an acceptable scheme are safe.
pub fn is_safe_uri(value: &str) -> bool {
    match scheme(value) {
        Some(scheme) => rules::is_acceptable_protocol(&scheme),
        None => true,
    }
}

/// Blanks every `url(...)` reference that does not point into the same
/// document.
pub fn strip_foreign_refs(value: &str) -> Cow<'_, str> {
    foreign_ref_regex().replace_all(value, " ")
}

/// Whether `value` only references a fragment of the same document.
pub fn is_local_ref(value: &str) -> bool {
    !non_local_regex().is_match(value)
}
