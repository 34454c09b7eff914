//! Reader options.

use crate::core::strings::NameTable;

/// Recognized options for the HTML pull reader.
///
/// Defaults: nothing is filtered, unprefixed HTML elements resolve to the
/// empty namespace, and the character source stays open after `close`.
#[derive(Debug, Default)]
pub struct ReaderSettings {
    /// Close the underlying character source when the reader closes.
    pub close_input: bool,
    /// Resolve unprefixed HTML elements to the XHTML namespace instead of
    /// the empty string.
    pub emit_html_namespace: bool,
    /// Suppress comment nodes before emission.
    pub ignore_comments: bool,
    /// Suppress processing-instruction nodes before emission.
    pub ignore_processing_instructions: bool,
    /// Suppress Whitespace nodes. SignificantWhitespace is always kept.
    pub ignore_insignificant_whitespace: bool,
    /// Interning table shared across readers; the reader creates its own
    /// when absent.
    pub name_table: Option<NameTable>,
}

impl ReaderSettings {
    /// Settings with every option at its default.
    pub fn new() -> Self {
        Self::default()
    }
}
