//! Output and redirect paths for a profile page.

use std::path::PathBuf;

use crate::Record;

/// Prefix of the legacy page paths that redirect to the current one.
const LEGACY_PREFIX: &str = "index-old";

/// Path the generated page lives at.
///
/// An explicit slug wins; otherwise the path is composed as
/// `{locale}/{region}/{city}/{line1}-{id}`. Segments are used verbatim.
///
/// # Examples
///
/// ```
/// # let record: advisor_page::Record = serde_json::from_value(serde_json::json!({
/// #     "id": "123", "name": "Jane Doe", "locale": "en",
/// #     "address": {"line1": "5th Ave", "city": "New York", "region": "NY"}
/// # })).unwrap();
/// assert_eq!(advisor_page::resolve_path(&record), "en/NY/New York/5th Ave-123");
/// ```
pub fn resolve_path(record: &Record) -> String {
    if let Some(slug) = record.slug.as_deref().filter(|s| !s.is_empty()) {
        return slug.to_owned();
    }
    let address = &record.address;
    format!(
        "{}/{}/{}/{}-{}",
        record.locale().unwrap_or_default(),
        address.region,
        address.city,
        address.line1,
        record.id
    )
}

/// Legacy paths that must redirect to [`resolve_path`].
pub fn resolve_redirects(record: &Record) -> Vec<String> {
    vec![format!("{LEGACY_PREFIX}/{}", record.id)]
}

/// Relative prefix from a page at `path` back to the site root.
///
/// # Examples
///
/// ```
/// use advisor_page::relative_prefix_to_root;
///
/// assert_eq!(relative_prefix_to_root("jane-doe"), "");
/// assert_eq!(relative_prefix_to_root("en/NY/NYC/5th Ave-1"), "../../../");
/// ```
pub fn relative_prefix_to_root(path: &str) -> String {
    let depth = path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .count()
        .saturating_sub(1);
    "../".repeat(depth)
}

/// File, relative to the output directory, the page is written to.
///
/// Paths whose last segment has an extension are kept; others get `.html`.
pub fn output_file(path: &str) -> PathBuf {
    let trimmed = path.trim_matches('/');
    let has_extension = trimmed
        .rsplit('/')
        .next()
        .and_then(|last| last.rsplit_once('.'))
        .is_some_and(|(stem, ext)| {
            !stem.is_empty()
                && (1..=5).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });
    if has_extension {
        PathBuf::from(trimmed)
    } else {
        PathBuf::from(format!("{trimmed}.html"))
    }
}
