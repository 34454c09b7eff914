//! Tree-construction tables.
//!
//! The static knowledge behind implicit closes and synthesized ancestors:
//! which HTML elements are void, which open element a new sibling tag may
//! close, and which table parts force a synthesized parent.

/// HTML void elements: no content, no end tag, reported self-closing.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Whether `name` is an HTML void element.
#[inline]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Table sections that satisfy a `tr` looking for its parent.
pub const TABLE_SECTIONS: &[&str] = &["tbody", "thead", "tfoot"];

/// For each open element on the left, the sibling tags whose start closes
/// it implicitly.
const CAN_CLOSE: &[(&str, &[&str])] = &[
    ("li", &["li"]),
    ("dt", &["dt", "dd"]),
    ("dd", &["dd", "dt"]),
    (
        "p",
        &[
            "address", "article", "aside", "blockquote", "details", "div",
            "dl", "fieldset", "figcaption", "figure", "footer", "form", "h1",
            "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "menu",
            "nav", "ol", "p", "pre", "section", "table", "ul",
        ],
    ),
    ("rt", &["rt", "rp"]),
    ("rp", &["rp", "rt"]),
    ("optgroup", &["optgroup"]),
    ("option", &["option", "optgroup"]),
    ("thead", &["tbody", "tfoot"]),
    ("tbody", &["tbody", "tfoot"]),
    ("tfoot", &["tbody"]),
    ("tr", &["tr"]),
    ("td", &["td", "th"]),
    ("th", &["th", "td"]),
];

/// Whether the open element `open` is implicitly closed when a new
/// `incoming` sibling tag starts.
pub fn can_close(open: &str, incoming: &str) -> bool {
    CAN_CLOSE
        .iter()
        .find(|(o, _)| *o == open)
        .map_or(false, |(_, closers)| closers.contains(&incoming))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("br"));
        assert!(is_void_element("img"));
        assert!(is_void_element("wbr"));
        assert!(!is_void_element("div"));
        assert!(!is_void_element("tbody"));
    }

    #[test]
    fn test_list_items_close() {
        assert!(can_close("li", "li"));
        assert!(can_close("dt", "dd"));
        assert!(can_close("dd", "dt"));
        assert!(!can_close("li", "p"));
    }

    #[test]
    fn test_paragraph_closers() {
        assert!(can_close("p", "p"));
        assert!(can_close("p", "div"));
        assert!(can_close("p", "table"));
        assert!(can_close("p", "h6"));
        assert!(!can_close("p", "span"));
        assert!(!can_close("p", "b"));
    }

    #[test]
    fn test_table_parts() {
        assert!(can_close("thead", "tbody"));
        assert!(can_close("tbody", "tfoot"));
        assert!(can_close("tr", "tr"));
        assert!(can_close("td", "th"));
        assert!(!can_close("tfoot", "tfoot"));
        // A td nests inside tr; nothing closes there.
        assert!(!can_close("tr", "td"));
    }

    #[test]
    fn test_options_close() {
        assert!(can_close("option", "option"));
        assert!(can_close("option", "optgroup"));
        assert!(can_close("optgroup", "optgroup"));
        assert!(!can_close("optgroup", "option"));
    }
}
