//! ContentStore — package metadata and section lookup over a validated corpus.

use crate::corpus::Corpus;
use crate::StoreError;
use qd_core::extract::MAX_DEPTH;
use qd_core::package::Package;
use qd_core::section::{PackageDocs, Section, SectionKey};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Default cap on content nodes in one section.
pub const MAX_NODES: usize = 100_000;

/// Size limits enforced on every section's content tree at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadLimits {
    pub max_depth: usize,
    pub max_nodes: usize,
}

impl Default for LoadLimits {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            max_nodes: MAX_NODES,
        }
    }
}

#[derive(Debug, Clone)]
struct PackageEntry {
    package: Package,
    docs: PackageDocs,
}

/// Read-only documentation registry. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct ContentStore {
    entries: Vec<PackageEntry>,
}

/// Package metadata plus the section keys it defines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    #[serde(flatten)]
    pub package: Package,
    pub available_sections: Vec<SectionKey>,
}

impl ContentStore {
    /// Validate a corpus and build the store. Content trees over either
    /// limit are rejected.
    pub fn build(corpus: Corpus, limits: LoadLimits) -> Result<Self, StoreError> {
        let LoadLimits {
            max_depth,
            max_nodes,
        } = limits;
        let Corpus { packages, mut docs } = corpus;

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(packages.len());

        for package in packages {
            if !seen.insert(package.id.clone()) {
                return Err(StoreError::DuplicatePackage(package.id));
            }
            if let Err(e) = semver::Version::parse(&package.version) {
                return Err(StoreError::InvalidVersion {
                    package: package.id,
                    version: package.version,
                    reason: e.to_string(),
                });
            }

            let mut package_docs = PackageDocs::new();
            for entry in docs.remove(&package.id).unwrap_or_default() {
                if entry.content.depth_exceeds(max_depth) {
                    return Err(StoreError::TooDeep {
                        package: package.id,
                        section: entry.key.to_string(),
                        max_depth,
                    });
                }
                if entry.content.node_count_exceeds(max_nodes) {
                    return Err(StoreError::TooLarge {
                        package: package.id,
                        section: entry.key.to_string(),
                        max_nodes,
                    });
                }
                let section = Section {
                    title: entry.title,
                    content: entry.content,
                };
                if package_docs.insert(entry.key, section).is_err() {
                    return Err(StoreError::DuplicateSection {
                        package: package.id,
                        section: entry.key.to_string(),
                    });
                }
            }

            entries.push(PackageEntry {
                package,
                docs: package_docs,
            });
        }

        if let Some(orphan) = docs.into_keys().next() {
            return Err(StoreError::OrphanDocs(orphan));
        }

        let section_count: usize = entries.iter().map(|e| e.docs.len()).sum();
        tracing::info!(
            "Loaded {} packages, {} sections",
            entries.len(),
            section_count
        );

        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Self::build(Corpus::from_json_str(json)?, LoadLimits::default())
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, StoreError> {
        Self::build(Corpus::from_json_value(value)?, LoadLimits::default())
    }

    /// Load and validate a corpus file.
    pub fn load(path: &Path, limits: LoadLimits) -> Result<Self, StoreError> {
        Self::build(Corpus::load(path)?, limits)
    }

    /// Store over the corpus compiled into this crate.
    pub fn bundled() -> Result<Self, StoreError> {
        Self::build(Corpus::bundled()?, LoadLimits::default())
    }

    /// All packages in authoring order, with their defined section keys.
    pub fn list_packages(&self) -> Vec<PackageSummary> {
        self.entries
            .iter()
            .map(|e| PackageSummary {
                package: e.package.clone(),
                available_sections: e.docs.keys().collect(),
            })
            .collect()
    }

    /// Packages and their docs in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = (&Package, &PackageDocs)> + '_ {
        self.entries.iter().map(|e| (&e.package, &e.docs))
    }

    pub fn package(&self, package_id: &str) -> Option<&Package> {
        self.entry(package_id).map(|e| &e.package)
    }

    /// Look up one section. `None` if the package is unknown, the key is not
    /// a recognized section name, or the package does not define it.
    pub fn get_section(&self, package_id: &str, section: &str) -> Option<&Section> {
        let key: SectionKey = section.parse().ok()?;
        self.entry(package_id)?.docs.get(key)
    }

    /// All sections of a package. `None` only if the package is unknown.
    pub fn get_all_sections(&self, package_id: &str) -> Option<&PackageDocs> {
        self.entry(package_id).map(|e| &e.docs)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, package_id: &str) -> Option<&PackageEntry> {
        self.entries.iter().find(|e| e.package.id == package_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qd_core::extract::extract;
    use serde_json::json;

    fn package(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": format!("@quivly/{id}"),
            "version": "1.0.0",
            "status": "prod",
            "description": format!("{id} package")
        })
    }

    fn fixture() -> ContentStore {
        ContentStore::from_json_value(json!({
            "packages": [package("ui-kit"), package("flow"), package("data-grid")],
            "docs": {
                "data-grid": [
                    { "key": "overview", "title": "Overview", "content": "Grid overview" },
                    { "key": "api", "title": "Core API", "content": ["useDataGrid", "DataGridProvider"] }
                ],
                "ui-kit": [
                    { "key": "styles", "title": "Styles", "content": "Tokens" }
                ],
                "flow": [
                    { "key": "hooks", "title": "Hooks", "content": "useWorkflow" },
                    { "key": "plan", "title": "Plan", "content": "Phase 1" }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn list_packages_in_authoring_order() {
        let store = fixture();
        let list = store.list_packages();
        assert_eq!(list.len(), 3);

        let ids: Vec<_> = list.iter().map(|p| p.package.id.as_str()).collect();
        assert_eq!(ids, vec!["ui-kit", "flow", "data-grid"]);
        assert_eq!(list[0].available_sections, vec![SectionKey::Styles]);
        assert_eq!(
            list[1].available_sections,
            vec![SectionKey::Hooks, SectionKey::Plan]
        );
        assert_eq!(
            list[2].available_sections,
            vec![SectionKey::Overview, SectionKey::Api]
        );
    }

    #[test]
    fn summary_serializes_flat() {
        let list = fixture().list_packages();
        let value = serde_json::to_value(&list[2]).unwrap();
        assert_eq!(value["id"], "data-grid");
        assert_eq!(value["status"], "prod");
        assert_eq!(value["availableSections"], json!(["overview", "api"]));
    }

    #[test]
    fn get_section() {
        let store = fixture();
        let section = store.get_section("data-grid", "api").unwrap();
        assert_eq!(section.title, "Core API");
        assert_eq!(extract(&section.content), "useDataGrid\nDataGridProvider");
    }

    #[test]
    fn not_found() {
        let store = fixture();
        assert!(store.get_section("nonexistent-pkg", "overview").is_none());
        assert!(store.get_section("data-grid", "nonexistent-section").is_none());
        assert!(store.get_section("data-grid", "architecture").is_none());
        assert!(store.get_all_sections("nonexistent-pkg").is_none());
        assert!(store.package("nonexistent-pkg").is_none());
    }

    #[test]
    fn package_without_docs() {
        let store = ContentStore::from_json_value(json!({ "packages": [package("solo")] })).unwrap();
        assert!(store.get_all_sections("solo").unwrap().is_empty());
        assert!(store.list_packages()[0].available_sections.is_empty());
    }

    #[test]
    fn rejects_duplicate_package() {
        let err = ContentStore::from_json_value(json!({
            "packages": [package("flow"), package("flow")]
        }))
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicatePackage(id) if id == "flow"));
    }

    #[test]
    fn rejects_duplicate_section() {
        let err = ContentStore::from_json_value(json!({
            "packages": [package("flow")],
            "docs": { "flow": [
                { "key": "overview", "title": "A", "content": "a" },
                { "key": "overview", "title": "B", "content": "b" }
            ]}
        }))
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSection { .. }));
    }

    #[test]
    fn rejects_orphan_docs() {
        let err = ContentStore::from_json_value(json!({
            "packages": [package("flow")],
            "docs": { "ghost": [{ "key": "overview", "title": "A", "content": "a" }] }
        }))
        .unwrap_err();
        assert!(matches!(err, StoreError::OrphanDocs(id) if id == "ghost"));
    }

    #[test]
    fn rejects_bad_version() {
        let mut pkg = package("flow");
        pkg["version"] = json!("one point oh");
        let err = ContentStore::from_json_value(json!({ "packages": [pkg] })).unwrap_err();
        assert!(matches!(err, StoreError::InvalidVersion { .. }));
    }

    #[test]
    fn rejects_deep_content() {
        let mut content = json!("leaf");
        for _ in 0..4 {
            content = json!([content]);
        }
        let corpus = Corpus::from_json_value(json!({
            "packages": [package("flow")],
            "docs": { "flow": [{ "key": "overview", "title": "A", "content": content }] }
        }))
        .unwrap();
        let limits = |max_depth| LoadLimits {
            max_depth,
            ..LoadLimits::default()
        };
        let err = ContentStore::build(corpus.clone(), limits(3)).unwrap_err();
        assert!(matches!(err, StoreError::TooDeep { max_depth: 3, .. }));
        assert!(ContentStore::build(corpus, limits(4)).is_ok());
    }

    #[test]
    fn rejects_wide_content() {
        let corpus = Corpus::from_json_value(json!({
            "packages": [package("flow")],
            "docs": { "flow": [
                { "key": "overview", "title": "A", "content": ["a", "b", "c", "d"] }
            ]}
        }))
        .unwrap();
        let limits = |max_nodes| LoadLimits {
            max_nodes,
            ..LoadLimits::default()
        };
        let err = ContentStore::build(corpus.clone(), limits(4)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::TooLarge { ref package, max_nodes: 4, .. } if package == "flow"
        ));
        assert!(ContentStore::build(corpus, limits(5)).is_ok());
    }

    #[test]
    fn bundled_store() {
        let store = ContentStore::bundled().unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.package("data-grid").unwrap().version, "0.0.1-alpha");
        assert!(store.get_section("data-grid", "plan").is_some());
    }
}
