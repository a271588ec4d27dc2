//! Document head metadata.
//!
//! [`build_head`] derives a [`HeadConfig`] from a record. Values are kept
//! verbatim; escaping happens only when [`HeadConfig::render`] serializes the
//! `<head>` contents.

use std::collections::BTreeMap;
use std::fmt::Write;

use advisor_richtext::escape_html;
use serde::Serialize;

use crate::Record;

pub const CHARSET: &str = "UTF-8";
pub const VIEWPORT: &str = "width=device-width, initial-scale=1";

/// Contents of the document `<head>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeadConfig {
    pub title: String,
    pub charset: String,
    pub viewport: String,
    pub tags: Vec<HeadTag>,
}

/// Kind of element emitted for a [`HeadTag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Meta,
    Link,
}

impl TagKind {
    fn element(self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Link => "link",
        }
    }
}

/// A void element in the head with its attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeadTag {
    #[serde(rename = "type")]
    pub kind: TagKind,
    pub attributes: BTreeMap<String, String>,
}

impl HeadTag {
    pub fn meta<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(TagKind::Meta, attributes)
    }

    pub fn link<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(TagKind::Link, attributes)
    }

    fn new<'a>(kind: TagKind, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            kind,
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }

    fn render(&self, html: &mut String) {
        let _ = write!(html, "<{}", self.kind.element());
        for (name, value) in &self.attributes {
            let _ = write!(html, " {}=\"{}\"", escape_html(name), escape_html(value));
        }
        html.push_str(">\n");
    }
}

/// Build head metadata for a record.
pub fn build_head(record: &Record) -> HeadConfig {
    HeadConfig {
        title: record.name.clone(),
        charset: CHARSET.to_owned(),
        viewport: VIEWPORT.to_owned(),
        tags: vec![HeadTag::meta([
            ("name", "description"),
            ("content", record.description.as_deref().unwrap_or_default()),
        ])],
    }
}

impl HeadConfig {
    /// Serialize the head contents, optionally linking a stylesheet.
    pub fn render(&self, stylesheet: Option<&str>) -> String {
        let mut html = String::with_capacity(512);
        let _ = writeln!(html, "<meta charset=\"{}\">", escape_html(&self.charset));
        let _ = writeln!(
            html,
            "<meta name=\"viewport\" content=\"{}\">",
            escape_html(&self.viewport)
        );
        let _ = writeln!(html, "<title>{}</title>", escape_html(&self.title));
        for tag in &self.tags {
            tag.render(&mut html);
        }
        if let Some(href) = stylesheet {
            HeadTag::link([("rel", "stylesheet"), ("href", href)]).render(&mut html);
        }
        html
    }
}
