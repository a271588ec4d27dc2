//! Rich-text rendering for advisor profile pages.
//!
//! Long-form profile fields arrive in one of two shapes:
//! - a serialized Lexical document (`{"json": {"root": ...}}`), rendered by
//!   [`render_document`]
//! - a legacy markdown string, rendered by [`render_markdown`]
//!
//! [`RichText`] accepts either shape and picks the right renderer.
//!
//! # Example
//!
//! ```
//! use advisor_richtext::RichText;
//!
//! let field: RichText = serde_json::from_str(r#"{"json": {"root": {"type": "root",
//!     "children": [{"type": "paragraph", "children": [
//!         {"type": "text", "text": "Hello", "format": 1}]}]}}}"#).unwrap();
//! assert_eq!(field.to_html(), "<p><strong>Hello</strong></p>");
//! ```

mod escape;
mod lexical;
mod link;
mod markdown;

use serde::Deserialize;

pub use escape::escape_html;
pub use lexical::{LexicalDocument, LexicalNode, NodeFormat, TextFormat, render_document};
pub use link::is_safe_url;
pub use markdown::render_markdown;

/// A rich-text field value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RichText {
    /// Structured document tree (rich text v2).
    Lexical {
        /// Serialized editor state.
        json: LexicalDocument,
    },
    /// Legacy markdown text (rich text v1).
    Markdown(String),
}

impl RichText {
    /// Render the field to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Lexical { json } => render_document(json),
            Self::Markdown(text) => render_markdown(text),
        }
    }

    /// True when the field carries no visible text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Lexical { json } => !json.root.has_text(),
            Self::Markdown(text) => text.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_variant_from_string() {
        let field: RichText = serde_json::from_str(r#""**Bold** move""#).unwrap();
        assert!(matches!(field, RichText::Markdown(_)));
        assert_eq!(field.to_html(), "<p><strong>Bold</strong> move</p>\n");
    }

    #[test]
    fn test_lexical_variant_from_object() {
        let field: RichText = serde_json::from_value(serde_json::json!({
            "json": {
                "root": {
                    "type": "root",
                    "children": [
                        {"type": "paragraph", "children": [{"type": "text", "text": "Hi"}]}
                    ]
                }
            }
        }))
        .unwrap();
        assert!(matches!(field, RichText::Lexical { .. }));
        assert_eq!(field.to_html(), "<p>Hi</p>");
    }

    #[test]
    fn test_is_blank() {
        assert!(RichText::Markdown("  \n".to_owned()).is_blank());
        assert!(!RichText::Markdown("text".to_owned()).is_blank());

        let empty: RichText = serde_json::from_value(serde_json::json!({
            "json": {"root": {"type": "root", "children": [{"type": "paragraph"}]}}
        }))
        .unwrap();
        assert!(empty.is_blank());
    }
}
