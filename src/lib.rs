//! rustyhtml - Pull-mode HTML parsing
//!
//! Reads possibly-malformed HTML5 and surfaces it as a linear stream of
//! typed nodes that is well-formed in the XML sense:
//! - every element open is balanced by exactly one close
//! - attribute names are namespace-qualified
//! - omitted structural elements (html, head/body, colgroup, tbody) are
//!   synthesized where the HTML5 rules demand them
//! - void elements are reported self-closing
//!
//! ```
//! use rustyhtml::{HtmlReader, NodeKind};
//!
//! let mut reader = HtmlReader::from_str("<p>hello");
//! while reader.read().unwrap() {
//!     if reader.node_kind() == NodeKind::Element {
//!         println!("<{}> at depth {}", reader.local_name(), reader.depth());
//!     }
//! }
//! ```

pub mod core;
pub mod dom;
mod error;
pub mod reader;

pub use crate::core::cursor::{CharSource, StringSource};
pub use crate::core::strings::NameTable;
pub use crate::dom::namespace::ns;
pub use crate::dom::node::{HtmlAttribute, Node, NodeKind};
pub use crate::error::{HtmlError, Result};
pub use crate::reader::html::{HtmlReader, ReadState};
pub use crate::reader::settings::ReaderSettings;
