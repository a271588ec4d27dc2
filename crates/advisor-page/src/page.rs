//! Full page assembly.
//!
//! [`PageRenderer`] runs the path, head and body steps for one record and
//! wraps the result in an HTML document.

use std::fmt::Write;

use advisor_richtext::escape_html;

use crate::head::{HeadConfig, build_head};
use crate::path::{relative_prefix_to_root, resolve_path, resolve_redirects};
use crate::view::{EditLink, RenderContext, render_body};
use crate::Record;

/// Configuration for page rendering.
#[derive(Clone, Debug, Default)]
pub struct PageRendererConfig {
    /// Stylesheet path relative to the site root.
    pub stylesheet: Option<String>,
    pub edit: EditLink,
    /// Render the related-content sections.
    pub related_content: bool,
}

/// A rendered page and where it goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Path the page lives at.
    pub path: String,
    /// Legacy paths redirecting to `path`.
    pub redirects: Vec<String>,
    pub head: HeadConfig,
    /// Complete HTML document.
    pub html: String,
}

/// Renders profile pages.
#[derive(Clone, Debug, Default)]
pub struct PageRenderer {
    config: PageRendererConfig,
}

impl PageRenderer {
    pub fn new(config: PageRendererConfig) -> Self {
        Self { config }
    }

    /// Render one record.
    ///
    /// `page_url` is the URL the page will be viewed at, when known; it only
    /// decides whether the preview edit link is shown.
    pub fn render(&self, record: &Record, page_url: Option<&str>) -> RenderedPage {
        let path = resolve_path(record);
        let redirects = resolve_redirects(record);
        let head = build_head(record);

        let ctx = RenderContext {
            page_url: page_url.map(str::to_owned),
            edit: self.config.edit.clone(),
            related_content: self.config.related_content,
        };
        let body = render_body(record, &ctx);

        let prefix = relative_prefix_to_root(&path);
        let stylesheet = self
            .config
            .stylesheet
            .as_deref()
            .map(|href| format!("{prefix}{}", href.trim_start_matches('/')));

        let mut html = String::with_capacity(body.len() + 1024);
        let _ = writeln!(
            html,
            "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>",
            escape_html(record.locale().unwrap_or("en"))
        );
        html.push_str(&head.render(stylesheet.as_deref()));
        html.push_str("</head>\n<body>\n");
        html.push_str(&body);
        html.push_str("</body>\n</html>\n");

        tracing::debug!(id = %record.id, %path, "Rendered page");

        RenderedPage {
            path,
            redirects,
            head,
            html,
        }
    }
}
