//! Content tree — the renderer-independent body of a documentation section.
//!
//! JSON form: a string or number is a [`Leaf`], an array is a `Sequence`,
//! and an object is a [`LabeledNode`] whose `children` key holds a nested
//! node. Object keys outside the text-bearing set are accepted and dropped.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// ContentNode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    Leaf(Leaf),
    Sequence(Vec<ContentNode>),
    Labeled(LabeledNode),
}

impl ContentNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Leaf(Leaf::Text(text.into()))
    }

    pub fn number(n: impl Into<serde_json::Number>) -> Self {
        Self::Leaf(Leaf::Number(n.into()))
    }

    pub fn sequence(items: Vec<ContentNode>) -> Self {
        Self::Sequence(items)
    }

    /// True if the tree holds more than `limit` nodes, counting this one.
    /// Counting stops once the limit is crossed.
    pub fn node_count_exceeds(&self, limit: usize) -> bool {
        let mut budget = limit;
        !self.fits(&mut budget)
    }

    fn fits(&self, budget: &mut usize) -> bool {
        if *budget == 0 {
            return false;
        }
        *budget -= 1;
        match self {
            ContentNode::Leaf(_) => true,
            ContentNode::Sequence(items) => items.iter().all(|n| n.fits(budget)),
            ContentNode::Labeled(node) => node
                .children
                .as_deref()
                .map_or(true, |n| n.fits(budget)),
        }
    }

    /// True if some node lies more than `limit` levels below this one.
    /// Recursion stops as soon as the limit is crossed.
    pub fn depth_exceeds(&self, limit: usize) -> bool {
        if limit == 0 {
            return match self {
                ContentNode::Leaf(_) => false,
                ContentNode::Sequence(items) => !items.is_empty(),
                ContentNode::Labeled(node) => node.children.is_some(),
            };
        }
        match self {
            ContentNode::Leaf(_) => false,
            ContentNode::Sequence(items) => items.iter().any(|n| n.depth_exceeds(limit - 1)),
            ContentNode::Labeled(node) => node
                .children
                .as_deref()
                .is_some_and(|n| n.depth_exceeds(limit - 1)),
        }
    }
}

impl From<LabeledNode> for ContentNode {
    fn from(node: LabeledNode) -> Self {
        Self::Labeled(node)
    }
}

// ---------------------------------------------------------------------------
// Leaf
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Leaf {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Text(s) => f.write_str(s),
            Leaf::Number(n) => write!(f, "{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Text-bearing attributes
// ---------------------------------------------------------------------------

/// Attribute names whose values carry readable text.
///
/// Declaration order is extraction order; `Ord` is derived from it so a
/// `BTreeMap<TextAttr, _>` iterates deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextAttr {
    Label,
    Title,
    Description,
    Placeholder,
    Value,
    Content,
}

impl TextAttr {
    pub const ALL: [TextAttr; 6] = [
        TextAttr::Label,
        TextAttr::Title,
        TextAttr::Description,
        TextAttr::Placeholder,
        TextAttr::Value,
        TextAttr::Content,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextAttr::Label => "label",
            TextAttr::Title => "title",
            TextAttr::Description => "description",
            TextAttr::Placeholder => "placeholder",
            TextAttr::Value => "value",
            TextAttr::Content => "content",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }
}

// ---------------------------------------------------------------------------
// LabeledNode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawLabeled")]
pub struct LabeledNode {
    /// Renderer hint (e.g. "FeatureCard"). Never extracted.
    pub tag: Option<String>,
    pub children: Option<Box<ContentNode>>,
    pub attributes: BTreeMap<TextAttr, String>,
}

impl LabeledNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: ContentNode) -> Self {
        self.children = Some(Box::new(children));
        self
    }

    pub fn with_attr(mut self, attr: TextAttr, value: impl Into<String>) -> Self {
        self.attributes.insert(attr, value.into());
        self
    }
}

#[derive(Deserialize)]
struct RawLabeled {
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    children: Option<Box<ContentNode>>,
    #[serde(flatten)]
    props: BTreeMap<String, serde_json::Value>,
}

impl From<RawLabeled> for LabeledNode {
    fn from(raw: RawLabeled) -> Self {
        let attributes = raw
            .props
            .into_iter()
            .filter_map(|(name, value)| {
                let attr = TextAttr::from_name(&name)?;
                match value {
                    serde_json::Value::String(s) => Some((attr, s)),
                    serde_json::Value::Number(n) => Some((attr, n.to_string())),
                    _ => None,
                }
            })
            .collect();
        Self {
            tag: raw.tag,
            children: raw.children,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leaf_and_sequence_from_json() {
        let node: ContentNode = serde_json::from_value(json!(["a", 3, 1.5])).unwrap();
        assert_eq!(
            node,
            ContentNode::sequence(vec![
                ContentNode::text("a"),
                ContentNode::number(3),
                ContentNode::Leaf(Leaf::Number(serde_json::Number::from_f64(1.5).unwrap())),
            ])
        );
    }

    #[test]
    fn labeled_keeps_only_text_attributes() {
        let node: ContentNode = serde_json::from_value(json!({
            "tag": "FeatureCard",
            "title": "Virtualization",
            "desc": "not extracted",
            "className": "p-4",
            "value": 42,
            "label": { "nested": true }
        }))
        .unwrap();

        let ContentNode::Labeled(node) = node else {
            panic!("expected labeled node");
        };
        assert_eq!(node.tag.as_deref(), Some("FeatureCard"));
        assert!(node.children.is_none());
        assert_eq!(node.attributes.len(), 2);
        assert_eq!(node.attributes[&TextAttr::Title], "Virtualization");
        assert_eq!(node.attributes[&TextAttr::Value], "42");
    }

    #[test]
    fn labeled_with_children() {
        let node: ContentNode = serde_json::from_value(json!({
            "tag": "p",
            "children": ["one", { "tag": "strong", "children": "two" }]
        }))
        .unwrap();
        let expected = LabeledNode::new("p").with_children(ContentNode::sequence(vec![
            ContentNode::text("one"),
            LabeledNode::new("strong")
                .with_children(ContentNode::text("two"))
                .into(),
        ]));
        assert_eq!(node, ContentNode::Labeled(expected));
    }

    #[test]
    fn null_children_is_absent() {
        let node: ContentNode =
            serde_json::from_value(json!({ "tag": "br", "children": null })).unwrap();
        assert_eq!(node, ContentNode::Labeled(LabeledNode::new("br")));
    }

    #[test]
    fn attribute_order_is_fixed() {
        let attrs: Vec<_> = LabeledNode::default()
            .with_attr(TextAttr::Content, "c")
            .with_attr(TextAttr::Label, "l")
            .with_attr(TextAttr::Placeholder, "p")
            .attributes
            .into_keys()
            .collect();
        assert_eq!(
            attrs,
            vec![TextAttr::Label, TextAttr::Placeholder, TextAttr::Content]
        );
    }

    #[test]
    fn depth_limit() {
        let mut node = ContentNode::text("deep");
        for _ in 0..5 {
            node = ContentNode::sequence(vec![node]);
        }
        assert!(!node.depth_exceeds(5));
        assert!(node.depth_exceeds(4));
    }

    #[test]
    fn node_count_limit() {
        let wide = ContentNode::sequence(vec![ContentNode::text("x"); 3]);
        assert!(!wide.node_count_exceeds(4));
        assert!(wide.node_count_exceeds(3));

        let labeled: ContentNode = LabeledNode::new("Card")
            .with_children(wide)
            .with_attr(TextAttr::Title, "t")
            .into();
        assert!(!labeled.node_count_exceeds(5));
        assert!(labeled.node_count_exceeds(4));
        assert!(ContentNode::text("x").node_count_exceeds(0));
    }
}
