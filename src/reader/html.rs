//! HTML pull reader.
//!
//! The driver orchestrates the scanners and the tree-construction rules
//! into an XML-reader style cursor. A look-ahead queue holds nodes that
//! have been decided upon but not yet surfaced (implicit closes,
//! synthesized ancestors); the open-element stack tracks nesting; `read`
//! surfaces one node per call and drains the queue before touching the
//! input again.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::cursor::{CharSource, StringSource, EOF_CHAR};
use crate::core::entities::decode_text;
use crate::core::scanner::{is_whitespace, Scanner};
use crate::core::strings::NameTable;
use crate::dom::namespace::{self, ns};
use crate::dom::node::{HtmlAttribute, Node, NodeKind};
use crate::error::{HtmlError, Result};

use super::settings::ReaderSettings;
use super::tree::{can_close, is_void_element, TABLE_SECTIONS};

/// Iterations one `read` may spend without surfacing a node before the
/// input is declared malformed.
const PARSE_LOOP_CAP: usize = 50;

/// Reader lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    /// Before the first `read`.
    Initial,
    /// Nodes are being surfaced.
    Interactive,
    /// The document is exhausted.
    EndOfFile,
    /// `close` was called.
    Closed,
}

/// Open element plus the whitespace-significance flag for its content.
#[derive(Debug, Clone)]
struct Frame {
    element: Node,
    ws_significant: bool,
}

/// Position of the attribute sub-cursor relative to the current element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrPos {
    /// On the element itself.
    Element,
    /// On attribute `i`.
    Attribute(usize),
    /// On the synthetic text child of attribute `i`.
    Value(usize),
}

/// Pull-mode HTML reader.
///
/// Consumes possibly-malformed HTML5 and surfaces a node sequence that is
/// well-formed in the XML sense: balanced element opens and closes,
/// namespace-qualified names, synthesized structural elements, void
/// elements reported self-closing.
pub struct HtmlReader<S: CharSource> {
    scanner: Scanner<S>,
    settings: ReaderSettings,
    names: NameTable,
    stack: Vec<Frame>,
    queue: VecDeque<Node>,
    node: Node,
    state: ReadState,
    attr_pos: AttrPos,
    last_kind: NodeKind,
    doc_ws_significant: bool,
    empty: Rc<str>,
    default_ns: Rc<str>,
}

impl HtmlReader<StringSource> {
    /// Reader over in-memory text with default settings.
    pub fn from_str(input: &str) -> Self {
        HtmlReader::new(StringSource::new(input))
    }
}

impl<S: CharSource> HtmlReader<S> {
    /// Reader with default settings.
    pub fn new(source: S) -> Self {
        Self::with_settings(source, ReaderSettings::default())
    }

    /// Reader with explicit settings.
    pub fn with_settings(source: S, mut settings: ReaderSettings) -> Self {
        let mut names = settings.name_table.take().unwrap_or_default();
        let empty = names.add("");
        let default_ns = if settings.emit_html_namespace {
            names.add(ns::XHTML)
        } else {
            empty.clone()
        };
        let node = Node::new(NodeKind::None, &empty);
        HtmlReader {
            scanner: Scanner::new(source),
            settings,
            names,
            stack: Vec::new(),
            queue: VecDeque::new(),
            node,
            state: ReadState::Initial,
            attr_pos: AttrPos::Element,
            last_kind: NodeKind::None,
            doc_ws_significant: false,
            empty,
            default_ns,
        }
    }

    // ------------------------------------------------------------------
    // Current-node properties
    // ------------------------------------------------------------------

    /// Kind of the current node.
    pub fn node_kind(&self) -> NodeKind {
        match self.attr_pos {
            AttrPos::Element => self.node.kind,
            AttrPos::Attribute(_) => NodeKind::Attribute,
            AttrPos::Value(_) => NodeKind::Text,
        }
    }

    /// Local name of the current node.
    pub fn local_name(&self) -> &str {
        match self.attr_pos {
            AttrPos::Element => &self.node.local_name,
            AttrPos::Attribute(i) => &self.node.attributes[i].local_name,
            AttrPos::Value(_) => "",
        }
    }

    /// Namespace prefix of the current node.
    pub fn prefix(&self) -> &str {
        match self.attr_pos {
            AttrPos::Element => &self.node.prefix,
            AttrPos::Attribute(i) => &self.node.attributes[i].prefix,
            AttrPos::Value(_) => "",
        }
    }

    /// Namespace URI of the current node.
    pub fn namespace_uri(&self) -> &str {
        match self.attr_pos {
            AttrPos::Element => &self.node.namespace_uri,
            AttrPos::Attribute(i) => &self.node.attributes[i].namespace_uri,
            AttrPos::Value(_) => "",
        }
    }

    /// Qualified name of the current node.
    pub fn name(&self) -> String {
        match self.attr_pos {
            AttrPos::Element => self.node.qualified_name(),
            AttrPos::Attribute(i) => self.node.attributes[i].qualified_name(),
            AttrPos::Value(_) => String::new(),
        }
    }

    /// Text value of the current node. For an attribute or its synthetic
    /// text child this is the decoded attribute value.
    pub fn value(&self) -> &str {
        match self.attr_pos {
            AttrPos::Element => &self.node.value,
            AttrPos::Attribute(i) | AttrPos::Value(i) => &self.node.attributes[i].value,
        }
    }

    /// Depth of the current node; attributes sit one level below their
    /// element, attribute values one further.
    pub fn depth(&self) -> usize {
        let offset = match self.attr_pos {
            AttrPos::Element => 0,
            AttrPos::Attribute(_) => 1,
            AttrPos::Value(_) => 2,
        };
        self.node.depth + offset
    }

    /// Whether the current element is self-closing (no EndElement will be
    /// emitted for it).
    pub fn is_empty_element(&self) -> bool {
        self.node.is_empty_element
    }

    /// Number of attributes on the current element.
    pub fn attribute_count(&self) -> usize {
        self.node.attributes.len()
    }

    /// Whether the document has been exhausted.
    pub fn eof(&self) -> bool {
        self.state == ReadState::EndOfFile
    }

    /// Lifecycle state of the reader.
    pub fn read_state(&self) -> ReadState {
        self.state
    }

    // ------------------------------------------------------------------
    // Attribute access and the attribute sub-cursor
    // ------------------------------------------------------------------

    /// Value of the attribute at `index`.
    pub fn get_attribute(&self, index: usize) -> Result<&str> {
        self.node
            .attributes
            .get(index)
            .map(|a| a.value.as_str())
            .ok_or(HtmlError::OutOfRange {
                index,
                count: self.node.attributes.len(),
            })
    }

    /// Value of the attribute with the given qualified name.
    pub fn get_attribute_by_name(&self, name: &str) -> Result<Option<&str>> {
        if name.is_empty() {
            return Err(HtmlError::InvalidArgument("attribute name is empty"));
        }
        Ok(self
            .node
            .find_attribute(name)
            .map(|i| self.node.attributes[i].value.as_str()))
    }

    /// Value of the attribute with the given local name and namespace URI.
    pub fn get_attribute_ns(&self, local: &str, namespace_uri: &str) -> Result<Option<&str>> {
        if local.is_empty() {
            return Err(HtmlError::InvalidArgument("attribute name is empty"));
        }
        Ok(self
            .node
            .find_attribute_ns(local, namespace_uri)
            .map(|i| self.node.attributes[i].value.as_str()))
    }

    /// Move the cursor onto the attribute at `index`.
    pub fn move_to_attribute(&mut self, index: usize) -> Result<()> {
        self.require_element_context()?;
        if index >= self.node.attributes.len() {
            return Err(HtmlError::OutOfRange {
                index,
                count: self.node.attributes.len(),
            });
        }
        self.attr_pos = AttrPos::Attribute(index);
        Ok(())
    }

    /// Move onto the attribute with the given qualified name. Returns false
    /// when no such attribute exists.
    pub fn move_to_attribute_by_name(&mut self, name: &str) -> Result<bool> {
        self.require_element_context()?;
        if name.is_empty() {
            return Err(HtmlError::InvalidArgument("attribute name is empty"));
        }
        match self.node.find_attribute(name) {
            Some(i) => {
                self.attr_pos = AttrPos::Attribute(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move onto the attribute with the given local name and namespace URI.
    pub fn move_to_attribute_ns(&mut self, local: &str, namespace_uri: &str) -> Result<bool> {
        self.require_element_context()?;
        if local.is_empty() {
            return Err(HtmlError::InvalidArgument("attribute name is empty"));
        }
        match self.node.find_attribute_ns(local, namespace_uri) {
            Some(i) => {
                self.attr_pos = AttrPos::Attribute(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move back from an attribute onto its element. Returns false when the
    /// cursor is not on an attribute.
    pub fn move_to_element(&mut self) -> bool {
        if self.attr_pos == AttrPos::Element {
            false
        } else {
            self.attr_pos = AttrPos::Element;
            true
        }
    }

    /// Move onto the first attribute of the current element.
    pub fn move_to_first_attribute(&mut self) -> Result<bool> {
        self.require_element_context()?;
        if self.node.attributes.is_empty() {
            return Ok(false);
        }
        self.attr_pos = AttrPos::Attribute(0);
        Ok(true)
    }

    /// Move onto the next attribute of the current element.
    pub fn move_to_next_attribute(&mut self) -> Result<bool> {
        self.require_element_context()?;
        let next = match self.attr_pos {
            AttrPos::Element => 0,
            AttrPos::Attribute(i) | AttrPos::Value(i) => i + 1,
        };
        if next < self.node.attributes.len() {
            self.attr_pos = AttrPos::Attribute(next);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Surface the attribute's value as a synthetic text child. Each
    /// attribute yields exactly one text node; a second call returns false.
    pub fn read_attribute_value(&mut self) -> bool {
        match self.attr_pos {
            AttrPos::Attribute(i) => {
                self.attr_pos = AttrPos::Value(i);
                true
            }
            _ => false,
        }
    }

    fn require_element_context(&self) -> Result<()> {
        if self.node.kind == NodeKind::Element {
            Ok(())
        } else {
            Err(HtmlError::InvalidState(
                "current node is not an element or attribute",
            ))
        }
    }

    // ------------------------------------------------------------------
    // Namespace queries, entity resolution, shutdown
    // ------------------------------------------------------------------

    /// Resolve a prefix against the declarations currently in scope.
    ///
    /// Answers `None` for undeclared prefixes; the synthetic placeholder
    /// URIs appear only on emitted nodes.
    pub fn lookup_namespace(&self, prefix: &str) -> Option<Rc<str>> {
        let current = (self.node.kind == NodeKind::Element).then_some(&self.node);
        namespace::lookup_in_scope(
            current
                .into_iter()
                .chain(self.stack.iter().rev().map(|f| &f.element)),
            prefix,
            &self.default_ns,
        )
    }

    /// Entity resolution is not supported by this reader.
    pub fn resolve_entity(&self) -> Result<()> {
        Err(HtmlError::NotImplemented("entity resolution"))
    }

    /// Shut the reader down. Further reads surface nothing; the character
    /// source is closed when the close-input setting is on.
    pub fn close(&mut self) {
        self.stack.clear();
        self.queue.clear();
        self.node = Node::new(NodeKind::None, &self.empty);
        self.attr_pos = AttrPos::Element;
        self.state = ReadState::Closed;
        if self.settings.close_input {
            self.scanner.close_source();
        }
    }

    // ------------------------------------------------------------------
    // The read cycle
    // ------------------------------------------------------------------

    /// Advance to the next node.
    ///
    /// Returns false once the document is exhausted (after the EndEntity
    /// sentinel has been surfaced) or the reader has been closed.
    pub fn read(&mut self) -> Result<bool> {
        match self.state {
            ReadState::Closed | ReadState::EndOfFile => return Ok(false),
            ReadState::Initial => self.state = ReadState::Interactive,
            ReadState::Interactive => {}
        }

        self.attr_pos = AttrPos::Element;
        if self.node.kind == NodeKind::Element && !self.node.is_empty_element {
            self.stack.push(Frame {
                element: self.node.clone(),
                ws_significant: false,
            });
        }
        self.last_kind = self.node.kind;

        for _ in 0..PARSE_LOOP_CAP {
            let candidate = match self.queue.pop_front() {
                Some(node) => Some(node),
                None => {
                    let next = self.scanner.peek();
                    if next == EOF_CHAR {
                        match self.handle_eof() {
                            Some(node) => Some(node),
                            None => return Ok(false),
                        }
                    } else if next == '<' {
                        self.scan_markup()
                    } else {
                        self.scan_text()
                    }
                }
            };

            let Some(mut node) = candidate else { continue };

            if self.suppressed(node.kind) {
                // The text scanner still needs to see what preceded it,
                // or filtering would disturb the surviving nodes.
                self.last_kind = node.kind;
                continue;
            }

            if node.kind == NodeKind::EndElement {
                self.stack.pop();
            }
            node.depth = self.stack.len();
            self.node = node;
            return Ok(true);
        }

        Err(HtmlError::MalformedInput {
            position: self.scanner.position(),
        })
    }

    /// Whether a node kind is filtered out by the settings.
    fn suppressed(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Comment => self.settings.ignore_comments,
            NodeKind::ProcessingInstruction => self.settings.ignore_processing_instructions,
            NodeKind::Whitespace => self.settings.ignore_insignificant_whitespace,
            _ => false,
        }
    }

    /// At end of input: close any still-open element one level per call,
    /// then surface the EndEntity sentinel and report exhaustion.
    fn handle_eof(&mut self) -> Option<Node> {
        if let Some(frame) = self.stack.last() {
            log::debug!(
                "auto-closing <{}> at end of input",
                frame.element.local_name
            );
            return Some(Node::end_of(&frame.element));
        }
        self.state = ReadState::EndOfFile;
        self.node = Node::new(NodeKind::EndEntity, &self.empty);
        self.attr_pos = AttrPos::Element;
        None
    }

    // ------------------------------------------------------------------
    // Markup scanning
    // ------------------------------------------------------------------

    /// Dispatch on the character after `<`.
    fn scan_markup(&mut self) -> Option<Node> {
        self.scanner.read(); // consume '<'
        match self.scanner.peek() {
            '/' => {
                self.scanner.read();
                self.scan_end_tag()
            }
            '!' => {
                self.scanner.read();
                Some(self.scan_declaration())
            }
            '?' => {
                self.scanner.read();
                Some(self.scan_pi())
            }
            _ => self.scan_element(),
        }
    }

    /// Markup after `<!`: comment, CDATA section, doctype, or bogus
    /// comment.
    fn scan_declaration(&mut self) -> Node {
        if self.scanner.match_literal("--", false) {
            let text = self.scanner.scan_until_str("-->");
            return Node::with_value(NodeKind::Comment, text, &self.empty);
        }
        if self.scanner.match_literal("[CDATA[", false) {
            let text = self.scanner.scan_until_str("]]>");
            return Node::with_value(NodeKind::CData, text, &self.empty);
        }
        if self.scanner.match_literal("DOCTYPE", true) {
            self.scanner.scan_until_char('>');
            // Doctype content is irrelevant downstream; normalize the node
            // to name "html" with an empty value.
            let mut node = Node::new(NodeKind::DocumentType, &self.empty);
            node.local_name = self.names.add("html");
            return node;
        }
        // Anything else after <! is consumed to the next '>' as a comment.
        let text = self.scanner.scan_until_char('>');
        log::debug!("treating bogus markup <!...> as a comment");
        Node::with_value(NodeKind::Comment, text, &self.empty)
    }

    /// Processing instruction `<?target data?>`.
    fn scan_pi(&mut self) -> Node {
        let (prefix, local) = self.scanner.read_name().unwrap_or_default();
        self.scanner.skip_whitespace();
        let data = self.scanner.scan_until_str("?>");
        let mut node = Node::with_value(NodeKind::ProcessingInstruction, data, &self.empty);
        node.prefix = self.names.add(&prefix);
        node.local_name = self.names.add(&local);
        node
    }

    /// End tag after `</`. Void and unmatched end tags are discarded; a
    /// matching end tag closes through every element above it.
    fn scan_end_tag(&mut self) -> Option<Node> {
        let Some((prefix, local)) = self.scanner.read_name() else {
            let junk = self.scanner.scan_until_char('>');
            log::debug!("discarding malformed end tag </{}>", junk);
            return None;
        };
        // End tags carry nothing else of interest.
        self.scanner.scan_until_char('>');

        if is_void_element(&local) {
            log::trace!("discarding end tag for void element {}", local);
            return None;
        }

        let matching = match self.stack.iter().rposition(|f| {
            f.element.prefix.as_ref() == prefix && f.element.local_name.as_ref() == local
        }) {
            Some(i) => i,
            None => {
                log::debug!("discarding unmatched end tag </{}>", local);
                return None;
            }
        };

        for frame in self.stack[matching..].iter().rev() {
            self.queue.push_back(Node::end_of(&frame.element));
        }
        self.queue.pop_front()
    }

    /// Start tag: parse name and attributes, resolve namespaces, then run
    /// the tree-construction steps before emitting.
    fn scan_element(&mut self) -> Option<Node> {
        let Some((prefix, local)) = self.scanner.read_name() else {
            // Not a tag after all; the '<' is literal text.
            return self.scan_text_with_lead("<".to_string());
        };

        let mut node = Node::new(NodeKind::Element, &self.empty);
        node.prefix = self.names.add(&prefix);
        node.local_name = self.names.add(&local);
        let mut self_closed = false;

        loop {
            self.scanner.skip_whitespace();
            let c = self.scanner.peek();
            if c == '>' {
                self.scanner.read();
                break;
            }
            if c == '/' {
                self.scanner.read();
                if self.scanner.peek() == '>' {
                    self.scanner.read();
                    self_closed = true;
                    break;
                }
                // Stray slash inside the tag.
                continue;
            }
            if c == EOF_CHAR {
                log::debug!("tag <{}> not closed before end of input", local);
                break;
            }
            let Some((attr_prefix, attr_local)) = self.scanner.read_name() else {
                // Junk inside the tag; drop one character and carry on.
                self.scanner.read();
                continue;
            };
            self.scanner.skip_whitespace();
            let value = if self.scanner.peek() == '=' {
                self.scanner.read();
                self.scanner.read_attr_value()
            } else {
                // Attribute without a value.
                String::new()
            };

            if attr_prefix.is_empty() && attr_local == "xmlns" {
                node.ns_decls
                    .push((self.empty.clone(), self.names.add(&value)));
            } else if attr_prefix == "xmlns" {
                node.ns_decls
                    .push((self.names.add(&attr_local), self.names.add(&value)));
            }
            node.attributes.push(HtmlAttribute {
                prefix: self.names.add(&attr_prefix),
                local_name: self.names.add(&attr_local),
                namespace_uri: self.empty.clone(),
                value,
            });
        }

        // An unprefixed math/svg root carries itself and its unprefixed
        // descendants into the foreign namespace.
        if prefix.is_empty()
            && (local == "math" || local == "svg")
            && !node.ns_decls.iter().any(|(p, _)| p.is_empty())
        {
            let uri = if local == "math" { ns::MATHML } else { ns::SVG };
            node.ns_decls.push((self.empty.clone(), self.names.add(uri)));
        }

        // Resolve the element, then its prefixed attributes.
        let element_ns = namespace::resolve_prefix(
            &mut node.ns_decls,
            self.stack.iter().rev().map(|f| &f.element),
            &prefix,
            &self.default_ns,
            &mut self.names,
        );
        node.namespace_uri = element_ns;

        for i in 0..node.attributes.len() {
            let attr_prefix = node.attributes[i].prefix.clone();
            let attr_local = node.attributes[i].local_name.clone();
            let uri = if attr_prefix.as_ref() == "xmlns"
                || (attr_prefix.is_empty() && attr_local.as_ref() == "xmlns")
            {
                self.names.add(ns::XMLNS)
            } else if attr_prefix.is_empty() {
                // Unprefixed attributes are in no namespace.
                self.empty.clone()
            } else {
                namespace::resolve_prefix(
                    &mut node.ns_decls,
                    self.stack.iter().rev().map(|f| &f.element),
                    &attr_prefix,
                    &self.default_ns,
                    &mut self.names,
                )
            };
            node.attributes[i].namespace_uri = uri;
        }

        node.is_empty_element = self_closed;
        if is_void_element(&node.local_name) && self.is_html_ns(&node.namespace_uri) {
            node.is_empty_element = true;
        }

        let virtual_pops = self.apply_sibling_closes(&node);
        self.synthesize_ancestors(&node, virtual_pops);

        if self.queue.is_empty() {
            Some(node)
        } else {
            self.queue.push_back(node);
            self.queue.pop_front()
        }
    }

    /// Step A: close open siblings that the incoming tag implicitly ends.
    ///
    /// The stack itself is only popped when each enqueued EndElement is
    /// surfaced, so the walk tracks virtual pops.
    fn apply_sibling_closes(&mut self, incoming: &Node) -> usize {
        if !self.is_html_ns(&incoming.namespace_uri) {
            return 0;
        }
        let mut pops = 0;
        loop {
            let Some(index) = self.stack.len().checked_sub(1 + pops) else {
                break;
            };
            let top = &self.stack[index].element;
            if !self.is_html_ns(&top.namespace_uri)
                || !can_close(&top.local_name, &incoming.local_name)
            {
                break;
            }
            log::trace!(
                "implicitly closing <{}> before <{}>",
                top.local_name,
                incoming.local_name
            );
            self.queue.push_back(Node::end_of(top));
            pops += 1;
        }
        pops
    }

    /// Step B: synthesize omitted structural ancestors for the incoming
    /// tag.
    fn synthesize_ancestors(&mut self, incoming: &Node, virtual_pops: usize) {
        let live = self.stack.len() - virtual_pops;
        let (need_html, need_body, need_colgroup, need_tbody) = {
            let live_stack = &self.stack[..live];
            let has =
                |name: &str| live_stack.iter().any(|f| f.element.local_name.as_ref() == name);
            let local = incoming.local_name.as_ref();
            (
                live == 0 && local != "html",
                !has("body") && !has("head") && !matches!(local, "html" | "head" | "body"),
                local == "col" && !has("colgroup"),
                local == "tr" && !TABLE_SECTIONS.iter().any(|s| has(s)),
            )
        };

        if need_html {
            let html = self.make_implicit("html");
            self.queue.push_back(html);
        }
        if need_body {
            let body = self.make_implicit("body");
            self.queue.push_back(body);
        }
        if need_colgroup {
            let colgroup = self.make_implicit("colgroup");
            self.queue.push_back(colgroup);
        }
        if need_tbody {
            let tbody = self.make_implicit("tbody");
            self.queue.push_back(tbody);
        }
    }

    /// An implicit structural element in the HTML namespace.
    fn make_implicit(&mut self, name: &str) -> Node {
        log::trace!("synthesizing implicit <{}>", name);
        let mut node = Node::new(NodeKind::Element, &self.empty);
        node.local_name = self.names.add(name);
        node.namespace_uri = self.default_ns.clone();
        node
    }

    /// Whether a URI is the configured HTML namespace.
    fn is_html_ns(&self, uri: &str) -> bool {
        uri == self.default_ns.as_ref()
    }

    // ------------------------------------------------------------------
    // Text scanning
    // ------------------------------------------------------------------

    /// Text content: leading whitespace, then characters up to `<` or EOF.
    fn scan_text(&mut self) -> Option<Node> {
        let ws = self.scanner.collect_whitespace();
        let next = self.scanner.peek();
        if next != '<' {
            // Real text follows inside this context.
            self.mark_ws_significant();
        }
        if !ws.is_empty() && (self.last_kind != NodeKind::Text || next == EOF_CHAR) {
            let kind = if self.ws_significant() {
                NodeKind::SignificantWhitespace
            } else {
                NodeKind::Whitespace
            };
            return Some(Node::with_value(kind, ws, &self.empty));
        }
        self.scan_text_with_lead(ws)
    }

    /// Continue a text run whose lead (possibly empty, possibly a literal
    /// `<`) is already consumed.
    fn scan_text_with_lead(&mut self, lead: String) -> Option<Node> {
        if self.stack.is_empty() {
            // Text cannot float outside all elements; wrap it first. The
            // consumed lead goes back so nothing is lost while the
            // wrappers surface.
            for c in lead.chars().rev() {
                self.scanner.unread(c);
            }
            let html = self.make_implicit("html");
            self.queue.push_back(html);
            let body = self.make_implicit("body");
            self.queue.push_back(body);
            return None;
        }

        let mut text = lead;
        loop {
            let c = self.scanner.peek();
            if c == '<' || c == EOF_CHAR {
                break;
            }
            text.push(self.scanner.read());
        }

        let content_len = text.trim_end_matches(|c| is_whitespace(c)).len();
        if content_len == 0 {
            // Whitespace bridging two text runs stays significant.
            return Some(Node::with_value(
                NodeKind::SignificantWhitespace,
                text,
                &self.empty,
            ));
        }
        if content_len < text.len() {
            // Trailing whitespace is carved off for the next pull.
            let trailing = text.split_off(content_len);
            self.queue.push_back(Node::with_value(
                NodeKind::SignificantWhitespace,
                trailing,
                &self.empty,
            ));
        }
        let decoded = decode_text(&text).into_owned();
        Some(Node::with_value(NodeKind::Text, decoded, &self.empty))
    }

    /// Record that the current context holds real text, making its
    /// whitespace significant.
    fn mark_ws_significant(&mut self) {
        match self.stack.last_mut() {
            Some(frame) => frame.ws_significant = true,
            None => self.doc_ws_significant = true,
        }
    }

    fn ws_significant(&self) -> bool {
        self.stack
            .last()
            .map_or(self.doc_ws_significant, |f| f.ws_significant)
    }
}
