//! Legacy markdown rich text to HTML.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

use crate::link::is_safe_url;

/// Render legacy markdown rich text to HTML.
///
/// Raw HTML in the source is escaped rather than passed through. Links and
/// images with a disallowed target keep their text but lose the element.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    // One entry per open link or image: true when its tags are dropped.
    let mut dropped: Vec<bool> = Vec::new();
    let parser = Parser::new_ext(text, options).filter_map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link { ref dest_url, .. } | Tag::Image { ref dest_url, .. }) => {
            let safe = is_safe_url(dest_url);
            if !safe {
                tracing::debug!(url = %dest_url, "Dropping unsafe markdown link");
            }
            dropped.push(!safe);
            safe.then_some(event)
        }
        Event::End(TagEnd::Link | TagEnd::Image) => {
            let drop = dropped.pop().unwrap_or(false);
            (!drop).then_some(event)
        }
        other => Some(other),
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
