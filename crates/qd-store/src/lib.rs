//! qd-store: In-memory, read-only documentation registry.
//!
//! The corpus is loaded and validated once; afterwards the store only
//! answers lookups and can be shared freely between readers.

pub mod corpus;
pub mod store;

pub use corpus::{Corpus, SectionEntry};
pub use store::{ContentStore, LoadLimits, PackageSummary, MAX_NODES};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(String),
    #[error("corpus parse error: {0}")]
    Parse(String),
    #[error("duplicate package id: {0}")]
    DuplicatePackage(String),
    #[error("docs defined for unknown package: {0}")]
    OrphanDocs(String),
    #[error("package {package}: duplicate section {section}")]
    DuplicateSection { package: String, section: String },
    #[error("package {package}: invalid version {version:?}: {reason}")]
    InvalidVersion {
        package: String,
        version: String,
        reason: String,
    },
    #[error("package {package}: section {section} nests deeper than {max_depth} levels")]
    TooDeep {
        package: String,
        section: String,
        max_depth: usize,
    },
    #[error("package {package}: section {section} holds more than {max_nodes} content nodes")]
    TooLarge {
        package: String,
        section: String,
        max_nodes: usize,
    },
}
