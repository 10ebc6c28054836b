//! Corpus file format — package metadata plus ordered section lists.
//!
//! ```json
//! {
//!   "packages": [{ "id": "data-grid", "name": "...", "version": "0.0.1-alpha",
//!                  "status": "proposed", "description": "..." }],
//!   "docs": { "data-grid": [{ "key": "overview", "title": "Overview", "content": [] }] }
//! }
//! ```

use crate::StoreError;
use qd_core::content::ContentNode;
use qd_core::package::Package;
use qd_core::section::SectionKey;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const BUNDLED: &str = include_str!("../corpus/quivly.json");

/// Unvalidated corpus as read from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Corpus {
    /// Authoring order is listing and search order.
    pub packages: Vec<Package>,

    /// Section lists keyed by package id. Packages without an entry have no docs.
    #[serde(default)]
    pub docs: BTreeMap<String, Vec<SectionEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionEntry {
    pub key: SectionKey,
    pub title: String,
    pub content: ContentNode,
}

impl Corpus {
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Parse(e.to_string()))
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, StoreError> {
        serde_json::from_value(value).map_err(|e| StoreError::Parse(e.to_string()))
    }

    /// Read a corpus file from disk.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }

    /// The corpus compiled into this crate.
    pub fn bundled() -> Result<Self, StoreError> {
        Self::from_json_str(BUNDLED)
    }
}
