//! qd-core: Shared types for the Quivly documentation engine.
//!
//! This crate has zero internal crate dependencies and defines the
//! content model every other qd-* crate reads from.

pub mod content;
pub mod extract;
pub mod package;
pub mod section;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown section key: {0}")]
    UnknownSectionKey(String),
    #[error("unknown package status: {0}")]
    UnknownStatus(String),
    #[error("duplicate section key: {0}")]
    DuplicateSection(String),
}

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::content::{ContentNode, LabeledNode, Leaf, TextAttr};
    pub use crate::extract::{extract, extract_opt};
    pub use crate::package::{Package, PackageStatus};
    pub use crate::section::{PackageDocs, Section, SectionKey};
    pub use crate::CoreError;
}
