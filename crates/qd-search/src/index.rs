//! SearchIndex — ranks sections by literal, case-insensitive query occurrences.
//!
//! Stateless: every call flattens each section afresh.

use crate::snippet::{count_matches, find_from, fold, fold_chars, snippet};
use crate::{SearchError, MIN_QUERY_CHARS};
use qd_core::extract::extract;
use qd_core::section::SectionKey;
use qd_store::ContentStore;
use serde::Serialize;

/// Result limit and snippet window, in chars on each side of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    pub window: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            window: 100,
        }
    }
}

impl SearchOptions {
    /// Narrower, unlimited variant used by the in-app search box.
    pub fn in_app() -> Self {
        Self {
            limit: usize::MAX,
            window: 60,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub package_id: String,
    pub package_name: String,
    pub section_key: SectionKey,
    pub section_title: String,
    pub snippet: String,
    pub match_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHits {
    pub query: String,
    /// Matching sections before truncation to the limit.
    pub total_results: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchIndex<'a> {
    store: &'a ContentStore,
}

impl<'a> SearchIndex<'a> {
    pub fn new(store: &'a ContentStore) -> Self {
        Self { store }
    }

    /// Search every section of every package.
    ///
    /// Each matching section yields one result. Results are ordered by
    /// descending match count; ties keep package then section order.
    pub fn search(&self, query: &str, options: SearchOptions) -> Result<SearchHits, SearchError> {
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            return Err(SearchError::QueryTooShort);
        }

        let needle = fold(query);
        let mut results = Vec::new();

        for (package, docs) in self.store.iter() {
            for (key, section) in docs.iter() {
                let text: Vec<char> = extract(&section.content).chars().collect();
                let folded = fold_chars(&text);

                let Some(first) = find_from(&folded, &needle, 0) else {
                    continue;
                };

                results.push(SearchResult {
                    package_id: package.id.clone(),
                    package_name: package.name.clone(),
                    section_key: key,
                    section_title: section.title.clone(),
                    snippet: snippet(&text, first, needle.len(), options.window),
                    match_count: count_matches(&folded, &needle),
                });
            }
        }

        // Vec::sort_by is stable, so equal counts keep discovery order.
        results.sort_by(|a, b| b.match_count.cmp(&a.match_count));

        let total_results = results.len();
        results.truncate(options.limit);

        tracing::debug!("search {query:?}: {total_results} sections matched");

        Ok(SearchHits {
            query: query.to_string(),
            total_results,
            results,
        })
    }
}
