//! Rich-text document tree
//!
//! Documents arrive as nested JSON objects tagged by `nodeType`:
//!
//! ```json
//! { "nodeType": "document", "content": [
//!     { "nodeType": "paragraph", "content": [
//!         { "nodeType": "text", "value": "Hi", "marks": [{ "type": "bold" }] }
//!     ] }
//! ] }
//! ```
//!
//! Decoding never fails on an unexpected tag; unknown nodes are kept with
//! their children so the renderer can pass them through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inline style applied to a text leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMark", into = "RawMark")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
    Other(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawMark {
    #[serde(rename = "type", default)]
    mark_type: String,
}

impl From<RawMark> for Mark {
    fn from(raw: RawMark) -> Self {
        match raw.mark_type.as_str() {
            "bold" => Mark::Bold,
            "italic" => Mark::Italic,
            "underline" => Mark::Underline,
            "code" => Mark::Code,
            _ => Mark::Other(raw.mark_type),
        }
    }
}

impl From<Mark> for RawMark {
    fn from(mark: Mark) -> Self {
        let mark_type = match mark {
            Mark::Bold => "bold".to_string(),
            Mark::Italic => "italic".to_string(),
            Mark::Underline => "underline".to_string(),
            Mark::Code => "code".to_string(),
            Mark::Other(name) => name,
        };
        Self { mark_type }
    }
}

/// Heading depth, 1 through 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub fn new(level: u8) -> Option<Self> {
        (1..=4).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index for per-level lookup tables
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

/// A node of a rich-text document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum Node {
    Document(Vec<Node>),
    Text { value: String, marks: Vec<Mark> },
    Paragraph(Vec<Node>),
    Heading(HeadingLevel, Vec<Node>),
    UnorderedList(Vec<Node>),
    OrderedList(Vec<Node>),
    ListItem(Vec<Node>),
    Blockquote(Vec<Node>),
    HorizontalRule,
    Hyperlink { uri: Option<String>, content: Vec<Node> },
    Unknown { node_type: String, content: Vec<Node> },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(value: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            value: value.into(),
            marks,
        }
    }

    /// Wire tag of this node
    pub fn node_type(&self) -> &str {
        match self {
            Node::Document(_) => "document",
            Node::Text { .. } => "text",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(level, _) => match level.get() {
                1 => "heading-1",
                2 => "heading-2",
                3 => "heading-3",
                _ => "heading-4",
            },
            Node::UnorderedList(_) => "unordered-list",
            Node::OrderedList(_) => "ordered-list",
            Node::ListItem(_) => "list-item",
            Node::Blockquote(_) => "blockquote",
            Node::HorizontalRule => "hr",
            Node::Hyperlink { .. } => "hyperlink",
            Node::Unknown { node_type, .. } => node_type,
        }
    }

    /// Child nodes; empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(content)
            | Node::Paragraph(content)
            | Node::Heading(_, content)
            | Node::UnorderedList(content)
            | Node::OrderedList(content)
            | Node::ListItem(content)
            | Node::Blockquote(content)
            | Node::Hyperlink { content, .. }
            | Node::Unknown { content, .. } => content,
            Node::Text { .. } | Node::HorizontalRule => &[],
        }
    }

    /// Concatenated text values of the direct children, ignoring marks
    pub fn plain_text(&self) -> String {
        self.children()
            .iter()
            .filter_map(|child| match child {
                Node::Text { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(default)]
    node_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    marks: Vec<Mark>,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    data: Value,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    content: Vec<Node>,
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let RawNode {
            node_type,
            value,
            marks,
            data,
            content,
        } = raw;

        match node_type.as_str() {
            "document" => Node::Document(content),
            "text" => Node::Text {
                value: value.unwrap_or_default(),
                marks,
            },
            "paragraph" => Node::Paragraph(content),
            "unordered-list" => Node::UnorderedList(content),
            "ordered-list" => Node::OrderedList(content),
            "list-item" => Node::ListItem(content),
            "blockquote" => Node::Blockquote(content),
            "hr" | "horizontal-rule" => Node::HorizontalRule,
            "hyperlink" => Node::Hyperlink {
                uri: data
                    .get("uri")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                content,
            },
            tag => match tag
                .strip_prefix("heading-")
                .and_then(|n| n.parse::<u8>().ok())
                .and_then(HeadingLevel::new)
            {
                Some(level) => Node::Heading(level, content),
                None => Node::Unknown {
                    node_type: tag.to_string(),
                    content,
                },
            },
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let node_type = node.node_type().to_string();
        match node {
            Node::Text { value, marks } => RawNode {
                node_type,
                value: Some(value),
                marks,
                ..Default::default()
            },
            Node::HorizontalRule => RawNode {
                node_type,
                ..Default::default()
            },
            Node::Hyperlink { uri, content } => RawNode {
                node_type,
                data: uri
                    .map(|uri| serde_json::json!({ "uri": uri }))
                    .unwrap_or(Value::Null),
                content,
                ..Default::default()
            },
            Node::Document(content)
            | Node::Paragraph(content)
            | Node::Heading(_, content)
            | Node::UnorderedList(content)
            | Node::OrderedList(content)
            | Node::ListItem(content)
            | Node::Blockquote(content)
            | Node::Unknown { content, .. } => RawNode {
                node_type,
                content,
                ..Default::default()
            },
        }
    }
}
