//! Lexical document tree to HTML.
//!
//! Lexical editors serialize their state as a tree of nodes rooted at a
//! `root` node. Element nodes (paragraphs, headings, lists, quotes, links)
//! carry `children`; leaf nodes are `text`, `linebreak`, `tab` and
//! `horizontalrule`. Unknown element types render their children only, so a
//! newer editor schema degrades to plain content instead of failing.

use std::fmt::Write;

use serde::Deserialize;

use crate::escape::escape_html;
use crate::link::is_safe_url;

/// Serialized editor state.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LexicalDocument {
    pub root: LexicalNode,
}

/// A node of the document tree.
///
/// Only the attributes used for rendering are kept; everything else
/// (`version`, `direction`, `indent`, `style`, ...) is ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LexicalNode {
    /// Node type (`paragraph`, `text`, `list`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub children: Vec<LexicalNode>,
    /// Text content of `text`, `tab` and `code-highlight` nodes.
    pub text: Option<String>,
    pub format: NodeFormat,
    /// Heading level (`h1`..`h6`) or list tag (`ul`/`ol`).
    pub tag: Option<String>,
    /// `bullet`, `number` or `check`.
    pub list_type: Option<String>,
    /// Link target.
    pub url: Option<String>,
}

/// The `format` attribute: a bit set on text nodes, an alignment keyword on
/// element nodes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NodeFormat {
    Bits(u32),
    Align(String),
}

impl Default for NodeFormat {
    fn default() -> Self {
        Self::Bits(0)
    }
}

/// Text formatting flags of a `text` node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextFormat(pub u32);

impl TextFormat {
    pub const BOLD: u32 = 1;
    pub const ITALIC: u32 = 1 << 1;
    pub const STRIKETHROUGH: u32 = 1 << 2;
    pub const UNDERLINE: u32 = 1 << 3;
    pub const CODE: u32 = 1 << 4;
    pub const SUBSCRIPT: u32 = 1 << 5;
    pub const SUPERSCRIPT: u32 = 1 << 6;

    /// Wrapping tags in opening order.
    const TAGS: [(u32, &'static str); 7] = [
        (Self::BOLD, "strong"),
        (Self::ITALIC, "em"),
        (Self::UNDERLINE, "u"),
        (Self::STRIKETHROUGH, "s"),
        (Self::SUBSCRIPT, "sub"),
        (Self::SUPERSCRIPT, "sup"),
        (Self::CODE, "code"),
    ];

    #[must_use]
    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    fn tags(self) -> impl DoubleEndedIterator<Item = &'static str> {
        Self::TAGS
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, tag)| tag)
    }
}

impl LexicalNode {
    /// Formatting flags of a text node (alignment strings count as none).
    #[must_use]
    pub fn text_format(&self) -> TextFormat {
        match self.format {
            NodeFormat::Bits(bits) => TextFormat(bits),
            NodeFormat::Align(_) => TextFormat::default(),
        }
    }

    /// True if this node or any descendant carries non-whitespace text.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
            || self.children.iter().any(LexicalNode::has_text)
    }
}

/// Render a document to HTML.
pub fn render_document(doc: &LexicalDocument) -> String {
    let mut out = String::new();
    render_children(&doc.root, &mut out);
    out
}

fn render_children(node: &LexicalNode, out: &mut String) {
    for child in &node.children {
        render_node(child, out);
    }
}

fn render_node(node: &LexicalNode, out: &mut String) {
    match node.kind.as_str() {
        "text" | "tab" | "code-highlight" => render_text(node, out),
        "linebreak" => out.push_str("<br>"),
        "horizontalrule" => out.push_str("<hr>"),
        "paragraph" => {
            if node.children.is_empty() {
                out.push_str("<p><br></p>");
            } else {
                wrap("p", node, out);
            }
        }
        "heading" => {
            let tag = match node.tag.as_deref() {
                Some(tag @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6")) => tag,
                _ => "h2",
            };
            wrap(tag, node, out);
        }
        "quote" => wrap("blockquote", node, out),
        "list" => {
            let tag = if node.list_type.as_deref() == Some("number") {
                "ol"
            } else {
                "ul"
            };
            wrap(tag, node, out);
        }
        "listitem" => wrap("li", node, out),
        "code" => {
            out.push_str("<pre><code>");
            render_children(node, out);
            out.push_str("</code></pre>");
        }
        "link" | "autolink" => match node.url.as_deref().filter(|u| is_safe_url(u)) {
            Some(url) => {
                let _ = write!(out, "<a href=\"{}\">", escape_html(url));
                render_children(node, out);
                out.push_str("</a>");
            }
            None => render_children(node, out),
        },
        "root" => render_children(node, out),
        other => {
            tracing::debug!(kind = other, "Unknown rich-text node, rendering children");
            render_children(node, out);
        }
    }
}

fn wrap(tag: &str, node: &LexicalNode, out: &mut String) {
    let _ = write!(out, "<{tag}>");
    render_children(node, out);
    let _ = write!(out, "</{tag}>");
}

fn render_text(node: &LexicalNode, out: &mut String) {
    let Some(text) = node.text.as_deref() else {
        return;
    };
    let format = node.text_format();
    for tag in format.tags() {
        let _ = write!(out, "<{tag}>");
    }
    out.push_str(&escape_html(text));
    for tag in format.tags().rev() {
        let _ = write!(out, "</{tag}>");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn render(value: serde_json::Value) -> String {
        let doc: LexicalDocument = serde_json::from_value(value).unwrap();
        render_document(&doc)
    }

    fn root(children: serde_json::Value) -> serde_json::Value {
        json!({"root": {"type": "root", "format": "", "children": children}})
    }

    #[test]
    fn test_paragraph_with_formatting() {
        let html = render(root(json!([{
            "type": "paragraph",
            "format": "",
            "children": [
                {"type": "text", "text": "Plain ", "format": 0},
                {"type": "text", "text": "bold", "format": 1},
                {"type": "text", "text": " and ", "format": 0},
                {"type": "text", "text": "both", "format": 3}
            ]
        }])));
        assert_eq!(
            html,
            "<p>Plain <strong>bold</strong> and <strong><em>both</em></strong></p>"
        );
    }

    #[test]
    fn test_bullet_and_numbered_lists() {
        let html = render(root(json!([
            {"type": "list", "listType": "bullet", "tag": "ul", "children": [
                {"type": "listitem", "children": [{"type": "text", "text": "One"}]},
                {"type": "listitem", "children": [{"type": "text", "text": "Two"}]}
            ]},
            {"type": "list", "listType": "number", "tag": "ol", "children": [
                {"type": "listitem", "children": [{"type": "text", "text": "First"}]}
            ]}
        ])));
        assert_eq!(
            html,
            "<ul><li>One</li><li>Two</li></ul><ol><li>First</li></ol>"
        );
    }

    #[test]
    fn test_heading_quote_and_linebreak() {
        let html = render(root(json!([
            {"type": "heading", "tag": "h3", "children": [{"type": "text", "text": "Title"}]},
            {"type": "quote", "children": [
                {"type": "text", "text": "Line 1"},
                {"type": "linebreak"},
                {"type": "text", "text": "Line 2"}
            ]}
        ])));
        assert_eq!(
            html,
            "<h3>Title</h3><blockquote>Line 1<br>Line 2</blockquote>"
        );
    }

    #[test]
    fn test_invalid_heading_tag_falls_back_to_h2() {
        let html = render(root(json!([
            {"type": "heading", "tag": "script", "children": [{"type": "text", "text": "T"}]}
        ])));
        assert_eq!(html, "<h2>T</h2>");
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render(root(json!([
            {"type": "paragraph", "children": [{"type": "text", "text": "<b>&</b>"}]}
        ])));
        assert_eq!(html, "<p>&lt;b&gt;&amp;&lt;/b&gt;</p>");
    }

    #[test]
    fn test_link_rendering() {
        let html = render(root(json!([
            {"type": "paragraph", "children": [
                {"type": "link", "url": "https://example.com/?a=1&b=2", "children": [
                    {"type": "text", "text": "site"}
                ]}
            ]}
        ])));
        assert_eq!(
            html,
            "<p><a href=\"https://example.com/?a=1&amp;b=2\">site</a></p>"
        );
    }

    #[test]
    fn test_unsafe_link_renders_text_only() {
        let html = render(root(json!([
            {"type": "paragraph", "children": [
                {"type": "link", "url": "javascript:alert(1)", "children": [
                    {"type": "text", "text": "click"}
                ]}
            ]}
        ])));
        assert_eq!(html, "<p>click</p>");
    }

    #[test]
    fn test_link_with_embedded_newline_in_scheme_is_dropped() {
        let html = render(root(json!([
            {"type": "paragraph", "children": [
                {"type": "link", "url": "java\nscript:alert(1)", "children": [
                    {"type": "text", "text": "x"}
                ]}
            ]}
        ])));
        assert_eq!(html, "<p>x</p>");
    }

    #[test]
    fn test_unknown_node_renders_children() {
        let html = render(root(json!([
            {"type": "paragraph", "children": [
                {"type": "mention", "children": [{"type": "text", "text": "@jane"}]}
            ]}
        ])));
        assert_eq!(html, "<p>@jane</p>");
    }

    #[test]
    fn test_empty_paragraph() {
        let html = render(root(json!([{"type": "paragraph", "children": []}])));
        assert_eq!(html, "<p><br></p>");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(json!({})), "");
    }

    #[test]
    fn test_has_text() {
        let doc: LexicalDocument = serde_json::from_value(root(json!([
            {"type": "paragraph", "children": [{"type": "text", "text": "  "}]}
        ])))
        .unwrap();
        assert!(!doc.root.has_text());

        let doc: LexicalDocument = serde_json::from_value(root(json!([
            {"type": "list", "children": [
                {"type": "listitem", "children": [{"type": "text", "text": "x"}]}
            ]}
        ])))
        .unwrap();
        assert!(doc.root.has_text());
    }
}
