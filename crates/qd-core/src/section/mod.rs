//! Sections — titled units of documentation belonging to a package.

use crate::content::ContentNode;
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// SectionKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Overview,
    Architecture,
    Api,
    Hooks,
    State,
    Features,
    Styles,
    Plan,
}

impl SectionKey {
    pub const ALL: [SectionKey; 8] = [
        SectionKey::Overview,
        SectionKey::Architecture,
        SectionKey::Api,
        SectionKey::Hooks,
        SectionKey::State,
        SectionKey::Features,
        SectionKey::Styles,
        SectionKey::Plan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Overview => "overview",
            SectionKey::Architecture => "architecture",
            SectionKey::Api => "api",
            SectionKey::Hooks => "hooks",
            SectionKey::State => "state",
            SectionKey::Features => "features",
            SectionKey::Styles => "styles",
            SectionKey::Plan => "plan",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSectionKey(s.into()))
    }
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: ContentNode,
}

// ---------------------------------------------------------------------------
// PackageDocs
// ---------------------------------------------------------------------------

/// Ordered section-key → section mapping for one package.
/// Keys are unique; iteration follows insertion (authoring) order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackageDocs {
    sections: Vec<(SectionKey, Section)>,
}

impl PackageDocs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section. Fails if the key is already present.
    pub fn insert(&mut self, key: SectionKey, section: Section) -> Result<(), CoreError> {
        if self.contains(key) {
            return Err(CoreError::DuplicateSection(key.to_string()));
        }
        self.sections.push((key, section));
        Ok(())
    }

    pub fn get(&self, key: SectionKey) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, s)| s)
    }

    pub fn contains(&self, key: SectionKey) -> bool {
        self.sections.iter().any(|(k, _)| *k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.sections.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &Section)> + '_ {
        self.sections.iter().map(|(k, s)| (*k, s))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str) -> Section {
        Section {
            title: title.into(),
            content: ContentNode::text(title),
        }
    }

    #[test]
    fn key_round_trip() {
        for key in SectionKey::ALL {
            assert_eq!(key.as_str().parse::<SectionKey>(), Ok(key));
        }
        assert!("changelog".parse::<SectionKey>().is_err());
    }

    #[test]
    fn docs_keep_insertion_order() {
        let mut docs = PackageDocs::new();
        docs.insert(SectionKey::Plan, section("Plan")).unwrap();
        docs.insert(SectionKey::Overview, section("Overview")).unwrap();
        docs.insert(SectionKey::Api, section("API")).unwrap();

        let keys: Vec<_> = docs.keys().collect();
        assert_eq!(keys, vec![SectionKey::Plan, SectionKey::Overview, SectionKey::Api]);
        assert_eq!(docs.get(SectionKey::Api).unwrap().title, "API");
        assert!(docs.get(SectionKey::Hooks).is_none());
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut docs = PackageDocs::new();
        docs.insert(SectionKey::Overview, section("a")).unwrap();
        let err = docs.insert(SectionKey::Overview, section("b")).unwrap_err();
        assert_eq!(err, CoreError::DuplicateSection("overview".into()));
        assert_eq!(docs.len(), 1);
    }
}
