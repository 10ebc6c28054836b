//! qd-search: Literal substring search over flattened section text.

pub mod index;
pub mod snippet;

pub use index::{SearchHits, SearchIndex, SearchOptions, SearchResult};

use thiserror::Error;

/// Shortest accepted query, counted after trimming.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Query must be at least 2 characters")]
    QueryTooShort,
}
