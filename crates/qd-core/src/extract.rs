//! Text extraction — flattens a content tree into plain text, depth-first.
//!
//! Output is deterministic for a given tree: sequence items in order, then
//! for labeled nodes the children followed by text attributes in
//! [`TextAttr`](crate::content::TextAttr) order. Empty pieces are dropped
//! and the rest are joined with newlines.

use crate::content::ContentNode;

/// Maximum nesting depth walked by [`extract`].
pub const MAX_DEPTH: usize = 64;

const SEPARATOR: &str = "\n";

/// Flatten a content tree to plain text.
pub fn extract(node: &ContentNode) -> String {
    extract_with_limit(node, MAX_DEPTH)
}

/// Flatten an optional node; absent input yields an empty string.
pub fn extract_opt(node: Option<&ContentNode>) -> String {
    node.map(extract).unwrap_or_default()
}

/// Flatten with an explicit depth limit. Nodes deeper than `max_depth`
/// contribute nothing.
pub fn extract_with_limit(node: &ContentNode, max_depth: usize) -> String {
    walk(node, 0, max_depth)
}

fn walk(node: &ContentNode, depth: usize, max_depth: usize) -> String {
    if depth > max_depth {
        tracing::warn!("content nested deeper than {max_depth} levels, truncating");
        return String::new();
    }

    match node {
        ContentNode::Leaf(leaf) => leaf.to_string(),
        ContentNode::Sequence(items) => {
            join(items.iter().map(|item| walk(item, depth + 1, max_depth)))
        }
        ContentNode::Labeled(labeled) => {
            let children = labeled
                .children
                .as_deref()
                .map(|c| walk(c, depth + 1, max_depth));
            let attrs = labeled.attributes.values().cloned();
            join(children.into_iter().chain(attrs))
        }
    }
}

fn join(pieces: impl Iterator<Item = String>) -> String {
    pieces
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
