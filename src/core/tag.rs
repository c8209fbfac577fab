//! Tag tree data model
//!
//! A tag tree models inline markup (bold or emphasis spans inside a sentence)
//! as nested containers of text. Reading order is the order of `children`;
//! `text()` concatenates leaves left to right.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How structural depth is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DepthMode {
    /// `max(child depths)` without counting the current level.
    ///
    /// Any tree whose branches end in leaves has depth 0 under this rule,
    /// so injection never triggers.
    #[default]
    Literal,
    /// `1 + max(child depths)`; an empty container counts as 1.
    Incremented,
}

impl fmt::Display for DepthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthMode::Literal => write!(f, "literal"),
            DepthMode::Incremented => write!(f, "incremented"),
        }
    }
}

/// A node of the tag tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// Plain text
    Leaf(String),
    /// Ordered children plus a translatable flag
    Container(Container),
}

/// A container node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub children: Vec<Node>,
    pub translatable: bool,
}

impl Container {
    /// Create a container
    pub fn new(children: Vec<Node>, translatable: bool) -> Self {
        Self {
            children,
            translatable,
        }
    }

    /// Flattened text of all children in reading order
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text(&mut out);
        }
        out
    }

    /// Structural depth of this container
    pub fn depth(&self, mode: DepthMode) -> usize {
        let deepest = self.children.iter().map(|c| c.depth(mode)).max();
        match mode {
            DepthMode::Literal => deepest.unwrap_or(0),
            DepthMode::Incremented => 1 + deepest.unwrap_or(0),
        }
    }
}

impl Node {
    /// Leaf from anything string-like
    pub fn leaf(text: impl Into<String>) -> Self {
        Node::Leaf(text.into())
    }

    /// Translatable container
    pub fn container(children: Vec<Node>) -> Self {
        Node::Container(Container::new(children, true))
    }

    /// Untranslatable container; copied to the output as-is
    pub fn frozen(children: Vec<Node>) -> Self {
        Node::Container(Container::new(children, false))
    }

    /// Flattened text of this node
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Leaf(text) => out.push_str(text),
            Node::Container(container) => {
                for child in &container.children {
                    child.push_text(out);
                }
            }
        }
    }

    /// Structural depth of this node; leaves are always 0
    pub fn depth(&self, mode: DepthMode) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Container(container) => container.depth(mode),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Leaves are translatable; containers follow their flag
    pub fn is_translatable(&self) -> bool {
        match self {
            Node::Leaf(_) => true,
            Node::Container(container) => container.translatable,
        }
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Node::Container(container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::container(vec![
            Node::leaf("Hello "),
            Node::container(vec![Node::leaf("big "), Node::container(vec![Node::leaf("world")])]),
            Node::leaf("!"),
        ])
    }

    #[test]
    fn test_text_concatenates_in_order() {
        assert_eq!(sample().text(), "Hello big world!");
        assert_eq!(Node::leaf("x").text(), "x");
        assert_eq!(Node::container(vec![]).text(), "");
    }

    #[test]
    fn test_text_is_pure() {
        let node = sample();
        assert_eq!(node.text(), node.text());
    }

    #[test]
    fn test_literal_depth_collapses_to_zero() {
        let node = sample();
        assert_eq!(node.depth(DepthMode::Literal), 0);
        assert_eq!(Node::leaf("a").depth(DepthMode::Literal), 0);
        assert_eq!(Node::container(vec![]).depth(DepthMode::Literal), 0);
        assert_eq!(
            Node::container(vec![Node::container(vec![Node::leaf("a")])]).depth(DepthMode::Literal),
            0
        );
    }

    #[test]
    fn test_incremented_depth_counts_levels() {
        assert_eq!(Node::leaf("a").depth(DepthMode::Incremented), 0);
        assert_eq!(Node::container(vec![]).depth(DepthMode::Incremented), 1);
        assert_eq!(
            Node::container(vec![Node::leaf("a")]).depth(DepthMode::Incremented),
            1
        );
        assert_eq!(sample().depth(DepthMode::Incremented), 3);

        let two = Node::container(vec![
            Node::leaf("Hello "),
            Node::container(vec![Node::leaf("world")]),
        ]);
        assert_eq!(two.depth(DepthMode::Incremented), 2);
    }

    #[test]
    fn test_translatable_flags() {
        assert!(Node::leaf("a").is_translatable());
        assert!(Node::container(vec![]).is_translatable());
        assert!(!Node::frozen(vec![]).is_translatable());
    }

    #[test]
    fn test_serialize_shape() {
        let node = Node::frozen(vec![Node::leaf("a")]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"container": {"children": [{"leaf": "a"}], "translatable": false}})
        );
    }
}
