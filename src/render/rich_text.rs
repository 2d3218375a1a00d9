//! Rich-text to HTML rendering
//!
//! Each node is rendered by a pure dispatch on its tag. Nothing here
//! fails: unknown tags pass their children through, and a subtree deeper
//! than the configured limit renders as nothing.

use serde_json::Value;

use super::html::{class_attr, escape_attr, escape_text};
use super::style::{EmptyParagraphs, ListItemContent, StyleTable};
use crate::domain::{from_json_value, Mark, Node};

/// Default bound on nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Renders rich-text trees using one page variant's style table
#[derive(Debug, Clone)]
pub struct RichTextRenderer {
    style: StyleTable,
    max_depth: usize,
}

impl Default for RichTextRenderer {
    fn default() -> Self {
        Self::new(StyleTable::plain())
    }
}

impl RichTextRenderer {
    pub fn new(style: StyleTable) -> Self {
        Self {
            style,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn style(&self) -> &StyleTable {
        &self.style
    }

    /// Renders one node
    pub fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        self.write_node(node, 0, &mut out);
        out
    }

    /// Renders each node in order and concatenates the results
    pub fn render_children(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        self.write_children(nodes, 0, &mut out);
        out
    }

    /// Renders a raw field value
    ///
    /// Null renders as nothing and a bare string as escaped text. Objects
    /// are decoded as a node tree; if that fails the field renders as
    /// nothing.
    pub fn render_value(&self, value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => escape_text(text),
            Some(value @ Value::Object(_)) => match from_json_value::<Node>(value) {
                Ok(node) => self.render(&node),
                Err(e) => {
                    tracing::warn!(error = %e, "undecodable rich-text document");
                    String::new()
                }
            },
            Some(_) => String::new(),
        }
    }

    fn write_children(&self, nodes: &[Node], depth: usize, out: &mut String) {
        for node in nodes {
            self.write_node(node, depth, out);
        }
    }

    fn write_node(&self, node: &Node, depth: usize, out: &mut String) {
        if depth > self.max_depth {
            tracing::warn!(
                max_depth = self.max_depth,
                node_type = node.node_type(),
                "rich-text nesting too deep, skipping subtree"
            );
            return;
        }

        let style = &self.style;
        let next = depth + 1;

        match node {
            Node::Text { value, marks } => out.push_str(&apply_marks(escape_text(value), marks)),
            Node::Document(children) | Node::Unknown { content: children, .. } => {
                self.write_children(children, next, out)
            }
            Node::Paragraph(children) => {
                let start = out.len();
                let open = format!("<p{}>", class_attr(style.paragraph.as_deref()));
                out.push_str(&open);
                let body = out.len();
                self.write_children(children, next, out);
                if out.len() == body && style.empty_paragraphs == EmptyParagraphs::Omit {
                    out.truncate(start);
                } else {
                    out.push_str("</p>");
                }
            }
            Node::Heading(level, children) => {
                let n = level.get();
                self.write_element(&format!("h{}", n), style.heading(n), children, next, out)
            }
            Node::UnorderedList(children) => {
                self.write_element("ul", style.unordered_list.as_deref(), children, next, out)
            }
            Node::OrderedList(children) => {
                self.write_element("ol", style.ordered_list.as_deref(), children, next, out)
            }
            Node::ListItem(children) => self.write_list_item(children, next, out),
            Node::Blockquote(children) => self.write_element(
                &style.blockquote_tag,
                style.blockquote.as_deref(),
                children,
                next,
                out,
            ),
            Node::HorizontalRule => {
                out.push_str(&format!(
                    "<hr{}>",
                    class_attr(style.horizontal_rule.as_deref())
                ));
            }
            Node::Hyperlink { uri, content } => {
                let href = style.links.href(uri.as_deref());
                out.push_str(&format!(
                    "<a href=\"{}\"{}>",
                    escape_attr(href),
                    class_attr(style.hyperlink.as_deref())
                ));
                self.write_children(content, next, out);
                out.push_str("</a>");
            }
        }
    }

    fn write_element(
        &self,
        tag: &str,
        class: Option<&str>,
        children: &[Node],
        depth: usize,
        out: &mut String,
    ) {
        out.push_str(&format!("<{}{}>", tag, class_attr(class)));
        self.write_children(children, depth, out);
        out.push_str(&format!("</{}>", tag));
    }

    fn write_list_item(&self, children: &[Node], depth: usize, out: &mut String) {
        let class = self.style.list_item.as_deref();
        match self.style.list_items {
            ListItemContent::Rich => self.write_element("li", class, children, depth, out),
            ListItemContent::FirstBlockPlain => {
                let text = children
                    .first()
                    .map(|block| escape_text(&block.plain_text()))
                    .unwrap_or_default();
                if !text.is_empty() {
                    out.push_str(&format!("<li{}>{}</li>", class_attr(class), text));
                }
            }
        }
    }
}

/// Wraps `text` once per mark, innermost first, in the order given
fn apply_marks(text: String, marks: &[Mark]) -> String {
    marks.iter().fold(text, |text, mark| match mark {
        Mark::Bold => format!("<strong>{}</strong>", text),
        Mark::Italic => format!("<em>{}</em>", text),
        Mark::Underline => format!("<u>{}</u>", text),
        Mark::Code => format!("<code>{}</code>", text),
        Mark::Other(_) => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeadingLevel;
    use crate::render::style::LinkPolicy;
    use serde_json::json;

    fn plain() -> RichTextRenderer {
        RichTextRenderer::new(StyleTable::plain())
    }

    fn doc(value: Value) -> Node {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn marks_nest_in_input_order() {
        let node = Node::marked("x<y", vec![Mark::Bold, Mark::Code]);
        assert_eq!(plain().render(&node), "<code><strong>x&lt;y</strong></code>");

        let node = Node::marked("v", vec![Mark::Code, Mark::Bold]);
        assert_eq!(plain().render(&node), "<strong><code>v</code></strong>");
    }

    #[test]
    fn all_marks_and_unknown_marks() {
        let node = Node::marked(
            "t",
            vec![
                Mark::Italic,
                Mark::Other("superscript".to_string()),
                Mark::Underline,
            ],
        );
        assert_eq!(plain().render(&node), "<u><em>t</em></u>");
    }

    #[test]
    fn script_text_is_escaped() {
        let html = plain().render(&Node::Paragraph(vec![Node::text(
            "<script>alert(1)</script>",
        )]));
        assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_inputs_render_empty() {
        let renderer = plain();
        assert_eq!(renderer.render_children(&[]), "");
        assert_eq!(renderer.render_value(None), "");
        assert_eq!(renderer.render_value(Some(&Value::Null)), "");
        assert_eq!(renderer.render_value(Some(&json!(42))), "");
        assert_eq!(renderer.render(&Node::Document(vec![])), "");
    }

    #[test]
    fn plain_string_field_falls_back_to_text() {
        assert_eq!(
            plain().render_value(Some(&json!("a & b"))),
            "a &amp; b"
        );
    }

    #[test]
    fn undecodable_document_renders_empty() {
        let value = json!({ "nodeType": "document", "content": "oops" });
        assert_eq!(plain().render_value(Some(&value)), "");
    }

    #[test]
    fn hyperlink_without_uri_uses_fragment() {
        let node = doc(json!({
            "nodeType": "hyperlink",
            "data": {},
            "content": [{ "nodeType": "text", "value": "here", "marks": [] }]
        }));
        assert_eq!(plain().render(&node), "<a href=\"#\">here</a>");
    }

    #[test]
    fn hyperlink_target_is_escaped() {
        let node = Node::Hyperlink {
            uri: Some("https://example.com/?a=1&b=\"2\"".to_string()),
            content: vec![Node::text("x")],
        };
        assert_eq!(
            plain().render(&node),
            "<a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\">x</a>"
        );
    }

    #[test]
    fn unsafe_hyperlink_is_neutralised() {
        let node = Node::Hyperlink {
            uri: Some("javascript:alert(1)".to_string()),
            content: vec![Node::text("x")],
        };
        assert_eq!(plain().render(&node), "<a href=\"#\">x</a>");

        let mut style = StyleTable::plain();
        style.links = LinkPolicy::Permissive;
        assert_eq!(
            RichTextRenderer::new(style).render(&node),
            "<a href=\"javascript:alert(1)\">x</a>"
        );
    }

    #[test]
    fn guide_style_dispatch() {
        let node = doc(json!({
            "nodeType": "document",
            "content": [
                { "nodeType": "heading-1", "content": [{ "nodeType": "text", "value": "H1" }] },
                { "nodeType": "heading-4", "content": [{ "nodeType": "text", "value": "H4" }] },
                { "nodeType": "unordered-list", "content": [
                    { "nodeType": "list-item", "content": [
                        { "nodeType": "paragraph", "content": [
                            { "nodeType": "text", "value": "one", "marks": [{ "type": "italic" }] }
                        ] }
                    ] }
                ] },
                { "nodeType": "ordered-list", "content": [] },
                { "nodeType": "blockquote", "content": [
                    { "nodeType": "paragraph", "content": [{ "nodeType": "text", "value": "q" }] }
                ] },
                { "nodeType": "hr", "content": [] },
                { "nodeType": "paragraph", "content": [
                    { "nodeType": "hyperlink", "data": { "uri": "https://example.com" }, "content": [
                        { "nodeType": "text", "value": "link" }
                    ] }
                ] }
            ]
        }));

        let html = RichTextRenderer::new(StyleTable::guide()).render(&node);
        assert_eq!(
            html,
            concat!(
                "<h1 class=\"bruv-heading-xl\">H1</h1>",
                "<h4 class=\"bruv-heading-s\">H4</h4>",
                "<ul class=\"bruv-list bruv-list--bullet\"><li><p><em>one</em></p></li></ul>",
                "<ol class=\"bruv-list bruv-list--number\"></ol>",
                "<div class=\"bruv-inset-text\"><p>q</p></div>",
                "<hr class=\"bruv-section-break bruv-section-break--visible\">",
                "<p><a href=\"https://example.com\" class=\"bruv-link\">link</a></p>",
            )
        );
    }

    #[test]
    fn unknown_nodes_pass_children_through() {
        let node = doc(json!({
            "nodeType": "embedded-entry-block",
            "content": [{ "nodeType": "text", "value": "inner" }]
        }));
        assert_eq!(plain().render(&node), "inner");

        let leaf = doc(json!({ "nodeType": "embedded-asset-block", "data": {} }));
        assert_eq!(plain().render(&leaf), "");
    }

    #[test]
    fn empty_paragraph_policy() {
        let node = Node::Document(vec![
            Node::Paragraph(vec![]),
            Node::Paragraph(vec![Node::text("")]),
            Node::Paragraph(vec![Node::text("kept")]),
        ]);

        assert_eq!(plain().render(&node), "<p></p><p></p><p>kept</p>");
        assert_eq!(
            RichTextRenderer::new(StyleTable::content_page()).render(&node),
            "<p class=\"bruv-body\">kept</p>"
        );
    }

    #[test]
    fn first_block_plain_list_items() {
        let item = |children: Vec<Node>| Node::ListItem(children);
        let node = Node::UnorderedList(vec![
            item(vec![
                Node::Paragraph(vec![
                    Node::marked("bold", vec![Mark::Bold]),
                    Node::text(" & plain"),
                ]),
                Node::Paragraph(vec![Node::text("second block")]),
            ]),
            item(vec![]),
        ]);

        assert_eq!(
            RichTextRenderer::new(StyleTable::content_page()).render(&node),
            "<ul class=\"bruv-list bruv-list--bullet\"><li>bold &amp; plain</li></ul>"
        );
        assert_eq!(
            plain().render(&node),
            "<ul><li><p><strong>bold</strong> &amp; plain</p><p>second block</p></li><li></li></ul>"
        );
    }

    #[test]
    fn depth_limit_truncates_subtree() {
        let mut node = Node::text("deep");
        for _ in 0..10 {
            node = Node::Blockquote(vec![node]);
        }

        let shallow = plain().with_max_depth(3).render(&node);
        assert!(!shallow.contains("deep"));
        assert_eq!(shallow.matches("<blockquote>").count(), 4);

        let full = plain().render(&node);
        assert!(full.contains("deep"));
    }

    #[test]
    fn heading_levels_use_matching_tags() {
        for level in 1..=4u8 {
            let node = Node::Heading(HeadingLevel::new(level).unwrap(), vec![Node::text("t")]);
            assert_eq!(plain().render(&node), format!("<h{0}>t</h{0}>", level));
        }
    }
}
