//! Namespace constants and prefix resolution.
//!
//! Resolution walks the element's own declarations, then the open-element
//! stack from the inside out, then the fixed fallbacks. Undeclared
//! prefixes get a synthetic placeholder URI cached on the context element
//! so repeated uses resolve identically.

use std::rc::Rc;

use crate::core::strings::NameTable;

use super::node::Node;

/// Well-known namespace URIs.
pub mod ns {
    /// HTML / XHTML elements.
    pub const XHTML: &str = "http://www.w3.org/1999/xhtml";
    /// MathML subtrees rooted at an unprefixed `math`.
    pub const MATHML: &str = "http://www.w3.org/1998/Math/MathML";
    /// SVG subtrees rooted at an unprefixed `svg`.
    pub const SVG: &str = "http://www.w3.org/2000/svg";
    pub const XLINK: &str = "http://www.w3.org/1999/xlink";
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// Namespace of `xmlns` attributes themselves.
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
    /// Prefix of the synthetic URI assigned to undeclared prefixes.
    pub const PLACEHOLDER: &str = "uri:namespace:";
}

/// Split a qualified name at its first colon into `(prefix, local)`.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.find(':') {
        Some(i) if i > 0 && i + 1 < name.len() => (&name[..i], &name[i + 1..]),
        _ => ("", name),
    }
}

/// Resolve `prefix` for an element being scanned.
///
/// `decls` is the context element's own declaration list; `ancestors`
/// iterates the open-element stack from the innermost element out. An
/// undeclared prefix is given a `uri:namespace:` placeholder, recorded in
/// `decls`.
pub(crate) fn resolve_prefix<'a, I>(
    decls: &mut Vec<(Rc<str>, Rc<str>)>,
    ancestors: I,
    prefix: &str,
    default_uri: &Rc<str>,
    names: &mut NameTable,
) -> Rc<str>
where
    I: Iterator<Item = &'a Node>,
{
    if let Some((_, uri)) = decls.iter().find(|(p, _)| p.as_ref() == prefix) {
        return uri.clone();
    }
    for ancestor in ancestors {
        if let Some((_, uri)) = ancestor
            .ns_decls
            .iter()
            .find(|(p, _)| p.as_ref() == prefix)
        {
            return uri.clone();
        }
    }
    if prefix.is_empty() {
        return default_uri.clone();
    }
    match prefix {
        "xlink" => names.add(ns::XLINK),
        "xml" => names.add(ns::XML),
        "xmlns" => names.add(ns::XMLNS),
        _ => {
            let uri = names.add(&format!("{}{}", ns::PLACEHOLDER, prefix));
            decls.push((names.add(prefix), uri.clone()));
            uri
        }
    }
}

/// Read-only scope lookup backing the consumer-facing `lookup_namespace`.
///
/// Unlike element resolution this never synthesizes a placeholder; an
/// undeclared prefix answers `None`.
pub(crate) fn lookup_in_scope<'a, I>(
    scopes: I,
    prefix: &str,
    default_uri: &Rc<str>,
) -> Option<Rc<str>>
where
    I: Iterator<Item = &'a Node>,
{
    for node in scopes {
        if let Some((_, uri)) = node
            .ns_decls
            .iter()
            .find(|(p, _)| p.as_ref() == prefix)
        {
            return Some(uri.clone());
        }
    }
    match prefix {
        "" => Some(default_uri.clone()),
        "xlink" => Some(Rc::from(ns::XLINK)),
        "xml" => Some(Rc::from(ns::XML)),
        _ => None,
    }
}
