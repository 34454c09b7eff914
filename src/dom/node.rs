//! Node records for the pull stream.
//!
//! A single tagged-variant record covers every node kind; fields that do
//! not apply to a kind stay empty. Attribute nodes share the record shape
//! but live under their owning element.

use std::rc::Rc;

/// Kind of a node in the pull stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// No node has been read yet.
    None,
    /// Element open tag.
    Element,
    /// Element close, real or synthesized.
    EndElement,
    /// Attribute of the most recently opened element.
    Attribute,
    /// Text content.
    Text,
    /// Formatting whitespace between markup; may be filtered.
    Whitespace,
    /// Whitespace adjacent to text content; always preserved.
    SignificantWhitespace,
    /// Comment.
    Comment,
    /// CDATA section.
    CData,
    /// Processing instruction.
    ProcessingInstruction,
    /// Doctype declaration, normalized to name `html`.
    DocumentType,
    /// Sentinel closing the document.
    EndEntity,
}

/// An attribute owned by its element. Its index is its position in the
/// owning element's attribute list.
#[derive(Debug, Clone)]
pub struct HtmlAttribute {
    pub prefix: Rc<str>,
    pub local_name: Rc<str>,
    pub namespace_uri: Rc<str>,
    /// Decoded value.
    pub value: String,
}

impl HtmlAttribute {
    /// Whether `name` is this attribute's qualified name
    /// (`prefix:local` or bare local).
    pub fn has_qualified_name(&self, name: &str) -> bool {
        if self.prefix.is_empty() {
            self.local_name.as_ref() == name
        } else {
            name.strip_prefix(self.prefix.as_ref())
                .and_then(|rest| rest.strip_prefix(':'))
                .map_or(false, |rest| rest == self.local_name.as_ref())
        }
    }

    /// Qualified name.
    pub fn qualified_name(&self) -> String {
        if self.prefix.is_empty() {
            self.local_name.to_string()
        } else {
            format!("{}:{}", self.prefix, self.local_name)
        }
    }
}

/// A node in the pull stream.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub prefix: Rc<str>,
    pub local_name: Rc<str>,
    pub namespace_uri: Rc<str>,
    /// Decoded content for text-like kinds; empty otherwise.
    pub value: String,
    /// Self-closing elements produce no EndElement.
    pub is_empty_element: bool,
    pub attributes: Vec<HtmlAttribute>,
    /// Namespace bindings introduced at this element only; an empty prefix
    /// is the default declaration.
    pub ns_decls: Vec<(Rc<str>, Rc<str>)>,
    /// Cached at the moment the consumer first observes the node.
    pub depth: usize,
}

impl Node {
    /// Empty node of the given kind.
    pub fn new(kind: NodeKind, empty: &Rc<str>) -> Self {
        Node {
            kind,
            prefix: empty.clone(),
            local_name: empty.clone(),
            namespace_uri: empty.clone(),
            value: String::new(),
            is_empty_element: false,
            attributes: Vec::new(),
            ns_decls: Vec::new(),
            depth: 0,
        }
    }

    /// Content-bearing node (text, whitespace, comment, CDATA, ...).
    pub fn with_value(kind: NodeKind, value: String, empty: &Rc<str>) -> Self {
        let mut node = Node::new(kind, empty);
        node.value = value;
        node
    }

    /// EndElement mirroring an open element.
    pub fn end_of(element: &Node) -> Self {
        Node {
            kind: NodeKind::EndElement,
            prefix: element.prefix.clone(),
            local_name: element.local_name.clone(),
            namespace_uri: element.namespace_uri.clone(),
            value: String::new(),
            is_empty_element: false,
            attributes: Vec::new(),
            ns_decls: Vec::new(),
            depth: 0,
        }
    }

    /// Qualified name.
    pub fn qualified_name(&self) -> String {
        if self.prefix.is_empty() {
            self.local_name.to_string()
        } else {
            format!("{}:{}", self.prefix, self.local_name)
        }
    }

    /// Position of the attribute with the given qualified name.
    pub fn find_attribute(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.has_qualified_name(name))
    }

    /// Position of the attribute with the given local name and namespace.
    pub fn find_attribute_ns(&self, local: &str, namespace_uri: &str) -> Option<usize> {
        self.attributes.iter().position(|a| {
            a.local_name.as_ref() == local && a.namespace_uri.as_ref() == namespace_uri
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Rc<str> {
        Rc::from("")
    }

    #[test]
    fn test_qualified_name() {
        let e = empty();
        let mut node = Node::new(NodeKind::Element, &e);
        node.local_name = Rc::from("rect");
        assert_eq!(node.qualified_name(), "rect");
        node.prefix = Rc::from("svg");
        assert_eq!(node.qualified_name(), "svg:rect");
    }

    #[test]
    fn test_end_of_copies_identity() {
        let e = empty();
        let mut open = Node::new(NodeKind::Element, &e);
        open.local_name = Rc::from("p");
        open.namespace_uri = Rc::from("http://www.w3.org/1999/xhtml");
        let end = Node::end_of(&open);
        assert_eq!(end.kind, NodeKind::EndElement);
        assert_eq!(end.local_name.as_ref(), "p");
        assert_eq!(end.namespace_uri, open.namespace_uri);
        assert!(end.attributes.is_empty());
    }

    #[test]
    fn test_find_attribute() {
        let e = empty();
        let mut node = Node::new(NodeKind::Element, &e);
        node.attributes.push(HtmlAttribute {
            prefix: Rc::from(""),
            local_name: Rc::from("href"),
            namespace_uri: e.clone(),
            value: "x".to_string(),
        });
        node.attributes.push(HtmlAttribute {
            prefix: Rc::from("xlink"),
            local_name: Rc::from("href"),
            namespace_uri: Rc::from("http://www.w3.org/1999/xlink"),
            value: "y".to_string(),
        });
        assert_eq!(node.find_attribute("href"), Some(0));
        assert_eq!(node.find_attribute("xlink:href"), Some(1));
        assert_eq!(
            node.find_attribute_ns("href", "http://www.w3.org/1999/xlink"),
            Some(1)
        );
        assert_eq!(node.find_attribute("missing"), None);
    }
}
