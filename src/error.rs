//! Error types for the HTML pull reader.
//!
//! Only hard API misuse and a parse loop that stops making progress surface
//! as errors. Malformed markup itself is absorbed silently by the tolerant
//! parser (stray `<` becomes text, unmatched end tags are dropped, open
//! elements are auto-closed at end of input).

use thiserror::Error;

/// All errors produced by the HTML pull reader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HtmlError {
    /// An argument that can never be valid, such as an empty attribute name.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Attribute index outside the current element's attribute list.
    #[error("attribute index {index} out of range for {count} attributes")]
    OutOfRange { index: usize, count: usize },

    /// A cursor operation that is not valid for the current node kind.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The requested operation is not supported by this reader.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// The parse loop failed to surface a node within its safety cap.
    #[error("malformed input near character {position}")]
    MalformedInput { position: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HtmlError>;
