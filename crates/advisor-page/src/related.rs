//! Related-content sections.
//!
//! Each section takes the whole record and renders nothing when its
//! collection is empty. The sections are off unless
//! [`RenderContext::related_content`](crate::RenderContext) is set.

use std::fmt::Write;

use advisor_richtext::escape_html;

use crate::record::{Faq, RelatedItem};
use crate::view::image_tag;
use crate::Record;

/// Render every related-content section in page order.
pub fn render_related(record: &Record) -> String {
    let mut html = String::new();
    html.push_str(&render_blogs(record));
    html.push_str(&render_client_stories(record));
    html.push_str(&render_insights(record));
    html.push_str(&render_faqs(record));
    html.push_str(&render_solutions(record));
    html
}

pub fn render_blogs(record: &Record) -> String {
    render_cards("Related Blogs", "related-blogs", &record.related_blogs)
}

pub fn render_client_stories(record: &Record) -> String {
    render_cards(
        "Client Stories",
        "client-stories",
        &record.related_client_stories,
    )
}

pub fn render_insights(record: &Record) -> String {
    render_cards("Insights", "related-insights", &record.related_insights)
}

pub fn render_solutions(record: &Record) -> String {
    render_cards("Solutions", "related-solutions", &record.related_solutions)
}

/// FAQs from the linked FAQ entities, falling back to the profile's own.
pub fn render_faqs(record: &Record) -> String {
    let faqs: &[Faq] = if record.related_faqs.is_empty() {
        &record.faqs
    } else {
        &record.related_faqs
    };
    let faqs: Vec<&Faq> = faqs.iter().filter(|f| !f.question.is_empty()).collect();
    if faqs.is_empty() {
        return String::new();
    }

    let mut html = String::with_capacity(1024);
    html.push_str("<section class=\"faqs centered-container my-8\">\n");
    html.push_str("<div class=\"text-lg font-bold text-[#003168] mb-4\">FAQs</div>\n");
    for faq in faqs {
        html.push_str("<details class=\"border-b py-2\">\n");
        let _ = writeln!(
            html,
            "<summary class=\"font-semibold cursor-pointer\">{}</summary>",
            escape_html(&faq.question)
        );
        if let Some(answer) = faq.answer.as_ref().filter(|a| !a.is_blank()) {
            let _ = writeln!(html, "<div class=\"mt-2\">{}</div>", answer.to_html());
        }
        html.push_str("</details>\n");
    }
    html.push_str("</section>\n");
    html
}

fn render_cards(title: &str, class: &str, items: &[RelatedItem]) -> String {
    let items: Vec<&RelatedItem> = items.iter().filter(|i| i.heading().is_some()).collect();
    if items.is_empty() {
        return String::new();
    }

    let mut html = String::with_capacity(2048);
    let _ = writeln!(html, "<section class=\"{class} centered-container my-8\">");
    let _ = writeln!(
        html,
        "<div class=\"text-lg font-bold text-[#003168] mb-4\">{}</div>",
        escape_html(title)
    );
    html.push_str("<div class=\"grid grid-cols-1 md:grid-cols-3 gap-4\">\n");
    for item in items {
        render_card(&mut html, item);
    }
    html.push_str("</div>\n</section>\n");
    html
}

fn render_card(html: &mut String, item: &RelatedItem) {
    html.push_str("<div class=\"card flex flex-col gap-2 border p-4\">\n");
    if let Some(photo) = item.photo_gallery.first() {
        html.push_str(&image_tag(photo, "w-full h-40 object-cover"));
    }
    if !item.category.is_empty() {
        let _ = writeln!(
            html,
            "<div class=\"text-sm uppercase text-gray-500\">{}</div>",
            escape_html(&item.category.join(", "))
        );
    }
    let heading = escape_html(item.heading().unwrap_or_default());
    match item.landing_page_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => {
            let _ = writeln!(
                html,
                "<a class=\"font-bold text-[#003168] hover:underline\" href=\"{}\">{heading}</a>",
                escape_html(url)
            );
        }
        None => {
            let _ = writeln!(html, "<div class=\"font-bold text-[#003168]\">{heading}</div>");
        }
    }
    if let Some(date) = item.date().filter(|d| !d.is_empty()) {
        let _ = writeln!(
            html,
            "<div class=\"text-sm text-gray-500\">{}</div>",
            escape_html(date)
        );
    }
    if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(html, "<p>{}</p>", escape_html(description));
    }
    html.push_str("</div>\n");
}
