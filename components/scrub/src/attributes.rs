use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use scrub_dom::Element;

use crate::css::sanitize_css;
use crate::{rules, uri};

/// What happens to the remaining attributes of an element once one of them
/// had to be removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeScan {
    /// Remove every violating attribute and always launder `style`.
    #[default]
    Exhaustive,
    /// Stop after the first removal, leaving later attributes and `style`
    /// untouched. Reproduces legacy output.
    AbortOnFirst,
}

enum Verdict {
    Keep,
    Rewrite(String),
    Remove,
}

fn is_allowed(name: &str, allowed: Option<&HashSet<String>>) -> bool {
    match allowed {
        Some(allowed) => allowed.contains(name),
        None => rules::default_attributes().contains(name),
    }
}

fn check(tag: &str, name: &str, value: &str, allowed: Option<&HashSet<String>>) -> Verdict {
    if !is_allowed(name, allowed) {
        return Verdict::Remove;
    }
    if rules::is_uri_attribute(name) && !uri::is_safe_uri(value) {
        return Verdict::Remove;
    }

    let mut verdict = Verdict::Keep;
    if rules::is_svg_ref_attribute(name) {
        if let Cow::Owned(rewritten) = uri::strip_foreign_refs(value) {
            verdict = Verdict::Rewrite(rewritten);
        }
    }
    if name == "xlink:href" && rules::is_svg_local_href_element(tag) && !uri::is_local_ref(value)
    {
        return Verdict::Remove;
    }
    verdict
}

/// Removes attributes not in `allowed` (the merged rule tables when `None`)
/// and launders URI, SVG reference and `style` values of the rest.
pub fn sanitize_attributes(
    element: &mut Element,
    allowed: Option<&HashSet<String>>,
    scan: AttributeScan,
) {
    let tag = element.name().to_string();
    let mut i = 0;
    while i < element.attributes().len() {
        let verdict = {
            let attribute = &element.attributes()[i];
            check(&tag, &attribute.name.qualified(), &attribute.value, allowed)
        };
        match verdict {
            Verdict::Keep => i += 1,
            Verdict::Rewrite(value) => {
                element.attributes_mut()[i].value = value;
                i += 1;
            }
            Verdict::Remove => {
                let removed = element.remove_attribute_at(i);
                log::trace!("removed attribute {} from <{}>", removed.name, tag);
                if scan == AttributeScan::AbortOnFirst {
                    return;
                }
            }
        }
    }

    for attribute in element.attributes_mut() {
        if attribute.name.matches("style") {
            attribute.value = sanitize_css(&attribute.value);
        }
    }
}
