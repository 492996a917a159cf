//! Static allow lists. Pure data, built into lookup sets on first use.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Elements generally allowed in HTML
pub const ACCEPTABLE_ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "address", "area", "b", "big", "blockquote",
    "br", "button", "caption", "center", "cite", "code", "col", "colgroup",
    "dd", "del", "dfn", "dir", "div", "dl", "dt", "em", "fieldset", "font",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "input",
    "ins", "kbd", "label", "legend", "li", "map", "menu", "ol", "optgroup",
    "option", "p", "pre", "q", "s", "samp", "select", "small", "span",
    "strike", "strong", "sub", "sup", "table", "tbody", "td", "textarea",
    "tfoot", "th", "thead", "tr", "tt", "u", "ul", "var",
];

/// Elements generally allowed in MathML
pub const MATHML_ELEMENTS: &[&str] = &[
    "annotation", "annotation-xml", "maction", "math", "merror", "mfrac",
    "mfenced", "mi", "mmultiscripts", "mn", "mo", "mover", "mpadded",
    "mphantom", "mprescripts", "mroot", "mrow", "mspace", "msqrt", "mstyle",
    "msub", "msubsup", "msup", "mtable", "mtd", "mtext", "mtr", "munder",
    "munderover", "none", "semantics",
];

/// Elements generally allowed in SVG
pub const SVG_ELEMENTS: &[&str] = &[
    "a", "animate", "animateColor", "animateMotion", "animateTransform",
    "circle", "defs", "desc", "ellipse", "font-face", "font-face-name",
    "font-face-src", "foreignObject", "g", "glyph", "hkern", "linearGradient",
    "line", "marker", "metadata", "missing-glyph", "mpath", "path",
    "polygon", "polyline", "radialGradient", "rect", "set", "stop", "svg",
    "switch", "text", "title", "tspan", "use",
];

/// Document scaffolding every HTML parser synthesizes.
pub const STRUCTURAL_ELEMENTS: &[&str] = &["html", "head", "body"];

/// Attributes generally allowed in HTML
pub const ACCEPTABLE_ATTRIBUTES: &[&str] = &[
    "abbr", "accept", "accept-charset", "accesskey", "action", "align", "alt",
    "axis", "border", "cellpadding", "cellspacing", "char", "charoff",
    "charset", "checked", "cite", "class", "clear", "cols", "colspan",
    "color", "compact", "coords", "datetime", "dir", "disabled", "enctype",
    "for", "frame", "headers", "height", "href", "hreflang", "hspace", "id",
    "ismap", "label", "lang", "longdesc", "maxlength", "media", "method",
    "multiple", "name", "nohref", "noshade", "nowrap", "prompt", "readonly",
    "rel", "rev", "rows", "rowspan", "rules", "scope", "selected", "shape",
    "size", "span", "src", "start", "style", "summary", "tabindex", "target",
    "title", "type", "usemap", "valign", "value", "vspace", "width", "xml:lang",
];

/// Attributes generally allowed in MathML
pub const MATHML_ATTRIBUTES: &[&str] = &[
    "actiontype", "align", "close", "columnalign", "columnalign",
    "columnalign", "columnlines", "columnspacing", "columnspan", "depth",
    "display", "displaystyle", "encoding", "equalcolumns", "equalrows",
    "fence", "fontstyle", "fontweight", "frame", "height", "linethickness",
    "lspace", "mathbackground", "mathcolor", "mathvariant", "mathvariant",
    "maxsize", "minsize", "open", "other", "rowalign", "rowalign", "rowalign",
    "rowlines", "rowspacing", "rowspan", "rspace", "scriptlevel", "selection",
    "separator", "separators", "stretchy", "width", "width", "xlink:href",
    "xlink:show", "xlink:type", "xmlns", "xmlns:xlink",
];

/// Attributes generally allowed in SVG
pub const SVG_ATTRIBUTES: &[&str] = &[
    "accent-height", "accumulate", "additive", "alphabetic", "arabic-form",
    "ascent", "attributeName", "attributeType", "baseProfile", "bbox", "begin",
    "by", "calcMode", "cap-height", "class", "color", "color-rendering",
    "content", "cx", "cy", "d", "dx", "dy", "descent", "display", "dur", "end",
    "fill", "fill-opacity", "fill-rule", "font-family", "font-size",
    "font-stretch", "font-style", "font-variant", "font-weight", "from", "fx",
    "fy", "g1", "g2", "glyph-name", "gradientUnits", "hanging", "height",
    "horiz-adv-x", "horiz-origin-x", "id", "ideographic", "k", "keyPoints",
    "keySplines", "keyTimes", "lang", "marker-end", "marker-mid", "marker-start",
    "markerHeight", "markerUnits", "markerWidth", "mathematical", "max", "min",
    "name", "offset", "opacity", "orient", "origin", "overline-position",
    "overline-thickness", "panose-1", "path", "pathLength", "points",
    "preserveAspectRatio", "r", "refX", "refY", "repeatCount", "repeatDur",
    "requiredExtensions", "requiredFeatures", "restart", "rotate", "rx", "ry",
    "slope", "stemh", "stemv", "stop-color", "stop-opacity",
    "strikethrough-position", "strikethrough-thickness", "stroke",
    "stroke-dasharray", "stroke-dashoffset", "stroke-linecap",
    "stroke-linejoin", "stroke-miterlimit", "stroke-opacity", "stroke-width",
    "systemLanguage", "target", "text-anchor", "to", "transform", "type", "u1",
    "u2", "underline-position", "underline-thickness", "unicode", "unicode-range",
    "units-per-em", "values", "version", "viewBox", "visibility", "width",
    "widths", "x", "x-height", "x1", "x2", "xlink:actuate", "xlink:arcrole",
    "xlink:href", "xlink:role", "xlink:show", "xlink:title", "xlink:type",
    "xml:base", "xml:lang", "xml:space", "xmlns", "xmlns:xlink", "y", "y1",
    "y2", "zoomAndPan",
];

/// Attributes whose value is generally a URI
pub const URI_ATTRIBUTES: &[&str] = &[
    "href", "src", "cite", "action", "longdesc", "xlink:href", "xml:base",
];

/// SVG attributes whose value may contain a `url(...)` reference
pub const SVG_REF_ATTRIBUTES: &[&str] = &[
    "clip-path", "color-profile", "cursor", "fill", "filter", "marker",
    "marker-start", "marker-mid", "marker-end", "mask", "stroke",
];

/// SVG elements whose `xlink:href` may only point into the same document
pub const SVG_LOCAL_HREF_ELEMENTS: &[&str] = &[
    "altGlyph", "animate", "animateColor", "animateMotion", "animateTransform",
    "cursor", "feImage", "filter", "linearGradient", "pattern", "radialGradient",
    "textpath", "tref", "set", "use",
];

pub const ACCEPTABLE_CSS_PROPERTIES: &[&str] = &[
    "azimuth", "background-color", "border-bottom-color", "border-collapse",
    "border-color", "border-left-color", "border-right-color", "border-top-color",
    "clear", "color", "cursor", "direction", "display", "elevation", "float",
    "font", "font-family", "font-size", "font-style", "font-variant",
    "font-weight", "height", "letter-spacing", "line-height", "overflow", "pause",
    "pause-after", "pause-before", "pitch", "pitch-range", "richness", "speak",
    "speak-header", "speak-numeral", "speak-punctuation", "speech-rate", "stress",
    "text-align", "text-decoration", "text-indent", "unicode-bidi",
    "vertical-align", "voice-family", "volume", "white-space", "width",
];

pub const ACCEPTABLE_CSS_KEYWORDS: &[&str] = &[
    "auto", "aqua", "black", "block", "blue", "bold", "both", "bottom", "brown",
    "center", "collapse", "dashed", "dotted", "fuchsia", "gray", "green",
    "!important", "italic", "left", "lime", "maroon", "medium", "none", "navy",
    "normal", "nowrap", "olive", "pointer", "purple", "red", "right", "solid",
    "silver", "teal", "top", "transparent", "underline", "white", "yellow",
];

pub const ACCEPTABLE_SVG_PROPERTIES: &[&str] = &[
    "fill", "fill-opacity", "fill-rule", "stroke", "stroke-width",
    "stroke-linecap", "stroke-linejoin", "stroke-opacity",
];

pub const ACCEPTABLE_PROTOCOLS: &[&str] = &[
    "ed2k", "ftp", "http", "https", "irc", "mailto", "news", "gopher", "nntp",
    "telnet", "webcal", "xmpp", "callto", "feed", "urn", "aim", "rsync", "tag",
    "ssh", "sftp", "rtsp", "afs",
];

/// Elements which never have content
pub const VOID_ELEMENTS: &[&str] = &[
    "base", "link", "meta", "hr", "br", "img", "embed", "param", "area",
    "col", "input",
];

type Lookup = OnceLock<HashSet<&'static str>>;

fn lookup(cell: &'static Lookup, lists: &[&'static [&'static str]]) -> &'static HashSet<&'static str> {
    cell.get_or_init(|| lists.iter().flat_map(|list| list.iter().copied()).collect())
}

/// HTML, MathML, SVG and structural elements.
pub fn default_elements() -> &'static HashSet<&'static str> {
    static SET: Lookup = OnceLock::new();
    lookup(
        &SET,
        &[ACCEPTABLE_ELEMENTS, MATHML_ELEMENTS, SVG_ELEMENTS, STRUCTURAL_ELEMENTS],
    )
}

/// HTML, MathML and SVG attributes, valid on every default element.
pub fn default_attributes() -> &'static HashSet<&'static str> {
    static SET: Lookup = OnceLock::new();
    lookup(&SET, &[ACCEPTABLE_ATTRIBUTES, MATHML_ATTRIBUTES, SVG_ATTRIBUTES])
}

pub fn is_uri_attribute(name: &str) -> bool {
    static SET: Lookup = OnceLock::new();
    lookup(&SET, &[URI_ATTRIBUTES]).contains(name)
}

pub fn is_svg_ref_attribute(name: &str) -> bool {
    static SET: Lookup = OnceLock::new();
    lookup(&SET, &[SVG_REF_ATTRIBUTES]).contains(name)
}

pub fn is_svg_local_href_element(name: &str) -> bool {
    static SET: Lookup = OnceLock::new();
    lookup(&SET, &[SVG_LOCAL_HREF_ELEMENTS]).contains(name)
}

pub fn is_acceptable_css_property(name: &str) -> bool {
    static SET: Lookup = OnceLock::new();
    lookup(&SET, &[ACCEPTABLE_CSS_PROPERTIES]).contains(name)
}

pub fn is_acceptable_css_keyword(keyword: &str) -> bool {
    static SET: Lookup = OnceLock::new();
    lookup(&SET, &[ACCEPTABLE_CSS_KEYWORDS]).contains(keyword)
}

pub fn is_acceptable_svg_property(name: &str) -> bool {
    static SET: Lookup = OnceLock::new();
    lookup(&SET, &[ACCEPTABLE_SVG_PROPERTIES]).contains(name)
}

pub fn is_acceptable_protocol(scheme: &str) -> bool {
    static SET: Lookup = OnceLock::new();
    lookup(&SET, &[ACCEPTABLE_PROTOCOLS]).contains(scheme)
}

pub fn is_void_element(name: &str) -> bool {
    static SET: Lookup = OnceLock::new();
    lookup(&SET, &[VOID_ELEMENTS]).contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_elements_cover_all_namespaces() {
        let elements = default_elements();
        for name in ["p", "math", "mfrac", "svg", "foreignObject", "html", "head", "body"] {
            assert!(elements.contains(name), "{}", name);
        }
        for name in ["script", "style", "iframe", "object", "embed", "meta"] {
            assert!(!elements.contains(name), "{}", name);
        }
    }

    #[test]
    fn default_attributes_merge_namespaces() {
        let attributes = default_attributes();
        assert!(attributes.contains("href"));
        assert!(attributes.contains("xlink:href"));
        assert!(attributes.contains("viewBox"));
        assert!(attributes.contains("mathcolor"));
        assert!(!attributes.contains("onclick"));
        assert!(!attributes.contains("srcdoc"));
    }

    #[test]
    fn lookups_are_case_sensitive() {
        assert!(default_elements().contains("linearGradient"));
        assert!(!default_elements().contains("lineargradient"));
        assert!(is_svg_local_href_element("use"));
        assert!(!is_svg_local_href_element("USE"));
    }

    #[test]
    fn protocols() {
        assert!(is_acceptable_protocol("https"));
        assert!(is_acceptable_protocol("mailto"));
        assert!(!is_acceptable_protocol("javascript"));
        assert!(!is_acceptable_protocol("data"));
        assert!(!is_acceptable_protocol("vbscript"));
    }

    #[test]
    fn css() {
        assert!(is_acceptable_css_property("background-color"));
        assert!(!is_acceptable_css_property("background"));
        assert!(!is_acceptable_css_property("behavior"));
        assert!(is_acceptable_css_keyword("!important"));
        assert!(is_acceptable_svg_property("stroke-width"));
    }

    #[test]
    fn uri_and_svg_refs() {
        assert!(is_uri_attribute("xml:base"));
        assert!(!is_uri_attribute("style"));
        assert!(is_svg_ref_attribute("marker-end"));
        assert!(is_void_element("br"));
        assert!(!is_void_element("p"));
    }
}
