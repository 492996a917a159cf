//! Laundering of inline `style` values.
//!
//! This is a lexical filter, not a CSS parser: anything that does not look
//! like a plain list of `property: value` declarations is dropped as a whole.

use regex::Regex;
use std::sync::OnceLock;

use crate::rules;

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"url[[:space:]]*\([[:space:]]*[^[:space:])]+?[[:space:]]*\)[[:space:]]*")
            .expect("valid regex")
    })
}

fn charset_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?:[:,;#%.[:space:]a-zA-Z0-9!]",
            r"|[[:word:]]-[[:word:]]",
            r"|'[[:space:][:word:]]+'",
            r#"|"[[:space:][:word:]]+""#,
            r"|\([[:digit:],[:space:]]+\))*$",
        ))
        .expect("valid regex")
    })
}

fn declarations_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[[:space:]]*(?:[-[:word:]]+[[:space:]]*:[^:;]*(?:;[[:space:]]*|$))*$",
        )
        .expect("valid regex")
    })
}

fn declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([-[:word:]]+)[[:space:]]*:[[:space:]]*([^:;]*)").expect("valid regex")
    })
}

fn shorthand_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?:#[0-9a-f]+",
            r"|rgb\([[:digit:]]+%?,[[:digit:]]*%?,?[[:digit:]]*%?\)?",
            r"|[[:digit:]]{0,2}\.?[[:digit:]]{0,2}(?:cm|em|ex|in|mm|pc|pt|px|%|,|\))?)$",
        ))
        .expect("valid regex")
    })
}

const SHORTHAND_FAMILIES: &[&str] = &["background", "border", "margin", "padding"];

fn is_shorthand_family(property: &str) -> bool {
    let family = property.split('-').next().unwrap_or(property);
    SHORTHAND_FAMILIES.contains(&family)
}

fn is_shorthand_token(token: &str) -> bool {
    rules::is_acceptable_css_keyword(token) || shorthand_token_regex().is_match(token)
}

fn is_acceptable(property: &str, value: &str) -> bool {
    if rules::is_acceptable_css_property(property) {
        true
    } else if is_shorthand_family(property) {
        value.split(' ').all(is_shorthand_token)
    } else {
        rules::is_acceptable_svg_property(property)
    }
}

/// Returns the declarations of `css` which are safe to keep, each terminated
/// by `;` and joined by a single space.
///
/// All `url(...)` tokens are removed up front. Input which contains anything
/// beyond plain declarations yields an empty string. Declarations are kept
/// or dropped as a whole, never rewritten.
pub fn sanitize_css(css: &str) -> String {
    let css = url_regex().replace_all(css, " ");
    if !charset_regex().is_match(&css) || !declarations_regex().is_match(&css) {
        log::trace!("dropping style {:?}", css);
        return String::new();
    }

    let mut clean: Vec<String> = Vec::new();
    for captures in declaration_regex().captures_iter(&css) {
        let (_, [property, value]) = captures.extract();
        if value.is_empty() {
            continue;
        }
        if is_acceptable(property, value) {
            clean.push(format!("{}: {};", property, value));
        } else {
            log::trace!("dropping style declaration {}: {}", property, value);
        }
    }
    clean.join(" ")
}
