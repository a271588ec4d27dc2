//! Page body layout.
//!
//! Mirrors the profile template's DOM structure and Tailwind CSS classes.
//! Every optional field maps to one section; an absent or empty field omits
//! that section and nothing else.

use std::fmt::Write;

use advisor_richtext::escape_html;

use crate::format::{format_phone, split_display_name};
use crate::hours::render_hours;
use crate::record::{ImageField, Record, SiteEntity};
use crate::related::render_related;
use crate::schema;

/// Title of the hours widget.
const HOURS_TITLE: &str = "I'm available on";

/// Heading style shared by the profile sections.
const SECTION_HEADING: &str = "text-lg font-bold text-[#003168]";

/// Entity editor link shown on preview deployments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditLink {
    /// Editor URL; the entity uid is appended as `?entityIds=`.
    pub base_url: String,
    /// Substring of the page URL that marks a preview deployment.
    pub preview_marker: String,
}

impl Default for EditLink {
    fn default() -> Self {
        Self {
            base_url: "https://sandbox.yext.com/s/3194448/entity/edit3".to_owned(),
            preview_marker: "preview".to_owned(),
        }
    }
}

/// Inputs supplied alongside the record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// URL the page is viewed at, when known.
    pub page_url: Option<String>,
    pub edit: EditLink,
    /// Render the related blogs, stories, insights, FAQs and solutions.
    pub related_content: bool,
}

impl RenderContext {
    /// True when the page URL marks a preview deployment.
    pub fn is_preview(&self) -> bool {
        self.page_url
            .as_deref()
            .is_some_and(|url| url.contains(&self.edit.preview_marker))
    }
}

/// Render the page body for a record.
pub fn render_body(record: &Record, ctx: &RenderContext) -> String {
    let mut html = String::with_capacity(8192);
    let mut sections: Vec<&str> = Vec::new();

    html.push_str(&schema::render_script(record));

    let no_site = SiteEntity::default();
    let site = record.site.as_ref().unwrap_or(&no_site);
    render_responsive(
        &mut html,
        site.desktop_header.as_ref(),
        site.mobile_header.as_ref(),
        "",
    );

    html.push_str("<div>\n<div class=\"bg-white w-full mb-4\">\n<div>\n");
    render_hero(&mut html, record, site.primary_photo.as_ref());

    html.push_str(
        "<div class=\"w-full flex flex-col md:flex-row mt-4 centered-container gap-4\">\n",
    );
    html.push_str("<div class=\"w-full md:w-2/3\">\n");
    if render_about(&mut html, record) {
        sections.push("about");
    }
    render_attributes(&mut html, record, &mut sections);
    html.push_str("</div>\n");

    html.push_str("<div class=\"w-full md:w-1/3\">\n");
    render_address(&mut html, record);
    html.push_str("<div class=\"mt-8\">\n");
    if let Some(hours) = record.hours.as_ref().filter(|h| !h.is_empty()) {
        html.push_str(&render_hours(HOURS_TITLE, hours));
        sections.push("hours");
    }
    html.push_str("</div>\n</div>\n</div>\n");

    if render_more_about(&mut html, record) {
        sections.push("more-about");
    }
    html.push_str("</div>\n</div>\n");

    if ctx.related_content {
        html.push_str(&render_related(record));
        sections.push("related");
    }
    html.push_str("</div>\n");

    render_responsive(
        &mut html,
        site.desktop_footer.as_ref(),
        site.mobile_footer.as_ref(),
        " mt-8",
    );

    if ctx.is_preview() {
        render_edit_link(&mut html, record, &ctx.edit);
        sections.push("edit");
    }

    tracing::debug!(id = %record.id, ?sections, "Rendered page body");
    html
}

/// An `<img>` element for an image field.
pub(crate) fn image_tag(field: &ImageField, class: &str) -> String {
    styled_image_tag(field, class, None)
}

fn styled_image_tag(field: &ImageField, class: &str, style: Option<&str>) -> String {
    let image = field.image();
    let mut tag = format!(
        "<img src=\"{}\" alt=\"{}\"",
        escape_html(&image.url),
        escape_html(field.alt_text())
    );
    if let Some(style) = style {
        let _ = write!(tag, " style=\"{style}\"");
    }
    if let Some(width) = image.width {
        let _ = write!(tag, " width=\"{width}\"");
    }
    if let Some(height) = image.height {
        let _ = write!(tag, " height=\"{height}\"");
    }
    if !class.is_empty() {
        let _ = write!(tag, " class=\"{class}\"");
    }
    tag.push_str(">\n");
    tag
}

/// Desktop and mobile variants switched at the `md` breakpoint.
fn render_responsive(
    html: &mut String,
    desktop: Option<&ImageField>,
    mobile: Option<&ImageField>,
    extra_class: &str,
) {
    if let Some(image) = desktop {
        let _ = writeln!(html, "<span class=\"hidden md:block{extra_class}\">");
        html.push_str(&image_tag(image, ""));
        html.push_str("</span>\n");
    }
    if let Some(image) = mobile {
        html.push_str("<span class=\"block md:hidden\">\n");
        html.push_str(&image_tag(image, ""));
        html.push_str("</span>\n");
    }
}

fn render_hero(html: &mut String, record: &Record, backdrop: Option<&ImageField>) {
    html.push_str("<div class=\"relative text-center w-full\">\n");
    if let Some(image) = backdrop {
        html.push_str(&styled_image_tag(
            image,
            "w-full object-cover",
            Some("max-height: 470px"),
        ));
    }
    html.push_str(
        "<div class=\"absolute top-1/2 left-1/2 -translate-y-1/2 -translate-x-1/2\">\n",
    );
    html.push_str("<div class=\"text-4xl headColor font-light h-64\">\n");
    html.push_str("<div class=\"flex gap-6\">\n<div>\n");
    if let Some(photo) = record.photo_gallery.first() {
        html.push_str(&image_tag(photo, "inline-block h-32 !w-32 rounded-full"));
    }
    html.push_str("</div>\n<div class=\"flex flex-col gap-3\">\n");

    let name = split_display_name(&record.name);
    let _ = writeln!(html, "<div>{}</div>", escape_html(name.primary));
    let _ = writeln!(
        html,
        "<div class=\"text-3xl\">{}</div>",
        escape_html(&name.secondary)
    );
    let phone = record.main_phone.as_deref().map(format_phone);
    let _ = writeln!(
        html,
        "<div class=\"text-2xl\">{}</div>",
        escape_html(phone.as_deref().unwrap_or_default())
    );

    html.push_str("</div>\n</div>\n</div>\n</div>\n</div>\n");
}

fn render_about(html: &mut String, record: &Record) -> bool {
    let Some(about) = non_empty(record.about_short_description.as_deref()) else {
        return false;
    };
    let _ = writeln!(html, "<div class=\"{SECTION_HEADING} mb-4\">About me</div>");
    let _ = writeln!(html, "<div class=\"px-2\">{}</div>", escape_html(about));
    true
}

fn render_attributes(html: &mut String, record: &Record, sections: &mut Vec<&str>) {
    html.push_str("<div class=\"grid grid-cols-2 w-full mt-8\">\n");

    html.push_str("<div class=\"flex flex-col gap-2 text-lg font-light\">\n");
    if let Some(experience) = non_empty(record.industry_experience.as_deref()) {
        open_block(html, "Experience");
        let _ = writeln!(html, "<div>{}</div>", escape_html(experience));
        html.push_str("</div>\n");
        sections.push("experience");
    }
    if !record.education.is_empty() {
        open_block(html, "Education");
        html.push_str("<div class=\"flex flex-col\">\n");
        for entry in &record.education {
            let _ = writeln!(
                html,
                "<div>{} - {}</div>",
                escape_html(&entry.degree),
                escape_html(&entry.school)
            );
        }
        html.push_str("</div>\n</div>\n");
        sections.push("education");
    }
    let recognition = non_empty(record.recognition_title.as_deref());
    let job_title = non_empty(record.job_title.as_deref());
    if recognition.is_some() || job_title.is_some() {
        open_block(html, "Titles");
        if let Some(title) = recognition {
            let _ = writeln!(html, "<div>Recognition - {}</div>", escape_html(title));
        }
        if let Some(title) = job_title {
            let _ = writeln!(html, "<div>Functional - {}</div>", escape_html(title));
        }
        html.push_str("</div>\n");
        sections.push("titles");
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"flex flex-col gap-2\">\n");
    if render_list(html, "Languages", "font-bold text-[#003168]", &record.languages) {
        sections.push("languages");
    }
    if render_list(html, "Client Focused", SECTION_HEADING, &record.client_focuses) {
        sections.push("client-focuses");
    }
    html.push_str("</div>\n");

    html.push_str("</div>\n");
}

fn open_block(html: &mut String, heading: &str) {
    html.push_str("<div class=\"flex flex-col\">\n");
    let _ = writeln!(html, "<div class=\"{SECTION_HEADING}\">{heading}</div>");
}

fn render_list(html: &mut String, heading: &str, heading_class: &str, items: &[String]) -> bool {
    if items.is_empty() {
        return false;
    }
    html.push_str("<div class=\"flex flex-col\">\n");
    let _ = writeln!(html, "<div class=\"{heading_class}\">{heading}</div>");
    html.push_str("<div class=\"flex flex-col\">\n");
    for item in items {
        let _ = writeln!(html, "<div>{}</div>", escape_html(item));
    }
    html.push_str("</div>\n</div>\n");
    true
}

fn render_address(html: &mut String, record: &Record) {
    let address = &record.address;
    html.push_str("<span class=\"hidden md:block\">\n<div class=\"address gap-y-5\">\n");
    html.push_str("<div class=\"text-xl font-semibold mb-4\">Address</div>\n");
    html.push_str("<div class=\"gap-y-3\">\n");
    let _ = writeln!(html, "<div>{}</div>", escape_html(&address.line1));
    if let Some(line2) = non_empty(address.line2.as_deref()) {
        let _ = writeln!(html, "<div>{}</div>", escape_html(line2));
    }
    let _ = writeln!(
        html,
        "<div>{}, {} {}</div>",
        escape_html(&address.city),
        escape_html(&address.region),
        escape_html(&address.postal_code)
    );
    html.push_str("</div>\n</div>\n</span>\n");
}

fn render_more_about(html: &mut String, record: &Record) -> bool {
    let Some(text) = record.expertise_comments.as_ref().filter(|t| !t.is_blank()) else {
        return false;
    };
    html.push_str("<div class=\"bg-gray-100 p-4 mt-4\">\n");
    html.push_str("<div class=\"w-full flex flex-col centered-container gap-4\">\n");
    let _ = writeln!(html, "<div class=\"{SECTION_HEADING}\">More about me</div>");
    let _ = writeln!(html, "<div class=\"rich-text\">{}</div>", text.to_html());
    html.push_str("</div>\n</div>\n");
    true
}

fn render_edit_link(html: &mut String, record: &Record, edit: &EditLink) {
    let uid = record.uid.as_deref().unwrap_or(&record.id);
    let href = format!("{}?entityIds={uid}", edit.base_url);
    let _ = writeln!(
        html,
        "<a href=\"{}\" class=\"border bg-gray-200 px-4 py-2 fixed bottom-10 right-10\">Edit</a>",
        escape_html(&href)
    );
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record(extra: serde_json::Value) -> Record {
        let mut doc = json!({
            "id": "123",
            "uid": "9876",
            "name": "Jane Doe-RBC Wealth Management Advisor",
            "address": {"line1": "5th Ave", "city": "NYC", "region": "NY", "postalCode": "10001"}
        });
        for (key, value) in extra.as_object().unwrap() {
            doc[key] = value.clone();
        }
        serde_json::from_value(doc).unwrap()
    }

    fn full() -> Record {
        record(json!({
            "address": {
                "line1": "5th Ave", "line2": "Floor 3", "city": "NYC", "region": "NY", "postalCode": "10001"
            },
            "mainPhone": "+14155551234",
            "_site": {
                "primaryPhoto": {"url": "https://img/hero.jpg"},
                "c_deskHeader": {"url": "https://img/desk-header.jpg"},
                "c_mobHeader": {"url": "https://img/mob-header.jpg"},
                "c_deskFooter": {"url": "https://img/desk-footer.jpg"},
                "c_mobFooter": {"url": "https://img/mob-footer.jpg"}
            },
            "photoGallery": [{"image": {"url": "https://img/jane.jpg", "width": 128, "height": 128}}],
            "c_aboutAdvisorShortDescription": "Twenty years of planning.",
            "c_industryLevelOfExperience": "20+ years",
            "c_educationDisplay": [{"degree": "MBA", "school": "NYU"}, {"degree": "BA", "school": "Yale"}],
            "c_recognitionTitle": "Vice President",
            "c_jobTitle": "Wealth Advisor",
            "c_languagesV2": ["English", "Spanish"],
            "c_clientFocuses": ["Retirees", "Business Owners"],
            "hours": {"monday": {"openIntervals": [{"start": "09:00", "end": "17:00"}]}},
            "c_expertiseCommentsRTv2": {"json": {"root": {"type": "root", "children": [
                {"type": "paragraph", "children": [{"type": "text", "text": "I love markets."}]}
            ]}}}
        }))
    }

    fn site(record: &mut Record) -> &mut SiteEntity {
        record.site.as_mut().unwrap()
    }

    /// Section markers and the fields that produce them.
    const SECTIONS: &[(&str, &str)] = &[
        ("c_aboutAdvisorShortDescription", "About me"),
        ("c_industryLevelOfExperience", ">Experience<"),
        ("c_educationDisplay", ">Education<"),
        ("c_languagesV2", ">Languages<"),
        ("c_clientFocuses", ">Client Focused<"),
        ("hours", "I&#x27;m available on"),
        ("c_expertiseCommentsRTv2", "More about me"),
        ("photoGallery", "https://img/jane.jpg"),
        ("mainPhone", "(415) 555-1234"),
        ("titles", ">Titles<"),
        ("address.line2", "Floor 3"),
        ("primaryPhoto", "https://img/hero.jpg"),
        ("c_deskHeader", "https://img/desk-header.jpg"),
        ("c_mobHeader", "https://img/mob-header.jpg"),
        ("c_deskFooter", "https://img/desk-footer.jpg"),
        ("c_mobFooter", "https://img/mob-footer.jpg"),
    ];

    #[test]
    fn test_full_record_renders_every_section() {
        let html = render_body(&full(), &RenderContext::default());
        for (_, marker) in SECTIONS {
            assert!(html.contains(marker), "missing {marker}");
        }
        assert!(html.contains("<div>MBA - NYU</div>"));
        assert!(html.contains("<div>BA - Yale</div>"));
        assert!(html.contains("<div>Recognition - Vice President</div>"));
        assert!(html.contains("<div>Functional - Wealth Advisor</div>"));
        assert!(html.contains("<p>I love markets.</p>"));
        assert!(html.contains("https://img/desk-header.jpg"));
        assert!(html.contains("https://img/mob-footer.jpg"));
        assert!(html.contains("style=\"max-height: 470px\""));
    }

    #[test]
    fn test_omitting_a_field_removes_only_its_section() {
        let ctx = RenderContext::default();
        for (field, marker) in SECTIONS {
            let mut record = full();
            match *field {
                "c_aboutAdvisorShortDescription" => record.about_short_description = None,
                "c_industryLevelOfExperience" => record.industry_experience = None,
                "c_educationDisplay" => record.education.clear(),
                "c_languagesV2" => record.languages.clear(),
                "c_clientFocuses" => record.client_focuses.clear(),
                "hours" => record.hours = None,
                "c_expertiseCommentsRTv2" => record.expertise_comments = None,
                "photoGallery" => record.photo_gallery.clear(),
                "mainPhone" => record.main_phone = None,
                "titles" => {
                    record.recognition_title = None;
                    record.job_title = None;
                }
                "address.line2" => record.address.line2 = None,
                "primaryPhoto" => site(&mut record).primary_photo = None,
                "c_deskHeader" => site(&mut record).desktop_header = None,
                "c_mobHeader" => site(&mut record).mobile_header = None,
                "c_deskFooter" => site(&mut record).desktop_footer = None,
                "c_mobFooter" => site(&mut record).mobile_footer = None,
                other => panic!("unhandled field {other}"),
            }
            let html = render_body(&record, &ctx);
            assert!(!html.contains(marker), "{field} still rendered");
            for (other_field, other_marker) in SECTIONS {
                if other_field != field {
                    assert!(
                        html.contains(other_marker),
                        "removing {field} also removed {other_field}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_hours_without_data_are_omitted() {
        let html = render_body(
            &record(json!({"hours": {"monday": null}})),
            &RenderContext::default(),
        );
        assert!(!html.contains("I&#x27;m available on"));

        let html = render_body(
            &record(json!({"hours": {"holidayHours": [{"date": "2026-12-25", "isClosed": true}]}})),
            &RenderContext::default(),
        );
        assert!(html.contains("I&#x27;m available on"));
        assert!(html.contains("2026-12-25"));
    }

    #[test]
    fn test_empty_about_is_omitted() {
        let html = render_body(
            &record(json!({"c_aboutAdvisorShortDescription": ""})),
            &RenderContext::default(),
        );
        assert!(!html.contains("About me"));
    }

    #[test]
    fn test_titles_render_with_either_field() {
        let html = render_body(
            &record(json!({"c_jobTitle": "Wealth Advisor"})),
            &RenderContext::default(),
        );
        assert!(html.contains(">Titles<"));
        assert!(html.contains("Functional - Wealth Advisor"));
        assert!(!html.contains("Recognition -"));

        let html = render_body(&record(json!({})), &RenderContext::default());
        assert!(!html.contains(">Titles<"));
    }

    #[test]
    fn test_hero_name_lines() {
        let html = render_body(&record(json!({})), &RenderContext::default());
        assert!(html.contains("<div>Jane Doe</div>"));
        assert!(html.contains("<div class=\"text-3xl\">Advisor</div>"));
    }

    #[test]
    fn test_hero_short_phone_shows_digits() {
        let html = render_body(&record(json!({"mainPhone": "555"})), &RenderContext::default());
        assert!(html.contains("<div class=\"text-2xl\">555</div>"));
    }

    #[test]
    fn test_address_block() {
        let html = render_body(
            &record(json!({"address": {
                "line1": "5th Ave", "line2": "Floor 3", "city": "NYC", "region": "NY", "postalCode": "10001"
            }})),
            &RenderContext::default(),
        );
        assert!(html.contains("<div>5th Ave</div>\n<div>Floor 3</div>\n<div>NYC, NY 10001</div>"));
    }

    #[test]
    fn test_missing_site_images_are_omitted() {
        let html = render_body(&record(json!({})), &RenderContext::default());
        assert!(!html.contains("md:hidden"));
        assert!(!html.contains("max-height"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_body(
            &record(json!({"c_languagesV2": ["<script>"]})),
            &RenderContext::default(),
        );
        assert!(html.contains("<div>&lt;script&gt;</div>"));
    }

    #[test]
    fn test_edit_link_only_on_preview() {
        let record = full();
        let mut ctx = RenderContext::default();
        assert!(!render_body(&record, &ctx).contains(">Edit</a>"));

        ctx.page_url = Some("https://example.com/en/NY/NYC/5th Ave-123".to_owned());
        assert!(!render_body(&record, &ctx).contains(">Edit</a>"));

        ctx.page_url = Some("https://preview-site.example.com/page".to_owned());
        let html = render_body(&record, &ctx);
        assert!(html.contains(
            "<a href=\"https://sandbox.yext.com/s/3194448/entity/edit3?entityIds=9876\""
        ));
        assert!(html.contains(">Edit</a>"));
    }

    #[test]
    fn test_related_sections_off_by_default() {
        let record = record(json!({
            "c_associatedBlogs": [{"name": "Saving for College"}]
        }));
        let html = render_body(&record, &RenderContext::default());
        assert!(!html.contains("Saving for College"));

        let ctx = RenderContext {
            related_content: true,
            ..RenderContext::default()
        };
        assert!(render_body(&record, &ctx).contains("Saving for College"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let record = full();
        let ctx = RenderContext::default();
        assert_eq!(render_body(&record, &ctx), render_body(&record, &ctx));
    }

    #[test]
    fn test_image_tag() {
        let field: ImageField = serde_json::from_value(json!({
            "url": "https://img/a.jpg?x=1&y=2",
            "width": 10,
            "alternateText": "A \"photo\""
        }))
        .unwrap();
        assert_eq!(
            image_tag(&field, "rounded"),
            "<img src=\"https://img/a.jpg?x=1&amp;y=2\" alt=\"A &quot;photo&quot;\" width=\"10\" class=\"rounded\">\n"
        );
    }
}
