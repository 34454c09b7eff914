//! Pull reader surface.
//!
//! - Settings: recognized reader options
//! - Tree: static tree-construction tables (void set, can-close pairs)
//! - Html: the pull driver and attribute cursor

pub mod html;
pub mod settings;
pub mod tree;
