//! Display formatting for profile fields.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Firm name removed from the secondary title line.
pub const FIRM_PREFIX: &str = "RBC Wealth Management ";

static NON_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D+").unwrap());

static NANP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{3})(\d{3})(\d{4})").unwrap());

/// Reformat a raw phone number as `(XXX) XXX-XXXX`.
///
/// Removes the first `+1`, strips every non-digit, then regroups the first
/// ten-digit run. Numbers with fewer digits come back as the bare digit
/// string; extra digits are kept after the last group.
///
/// # Examples
///
/// ```
/// use advisor_page::format_phone;
///
/// assert_eq!(format_phone("+14155551234"), "(415) 555-1234");
/// assert_eq!(format_phone("555"), "555");
/// ```
pub fn format_phone(raw: &str) -> String {
    let national = raw.replacen("+1", "", 1);
    let digits = NON_DIGITS_RE.replace_all(&national, "");
    NANP_RE.replace(&digits, "(${1}) ${2}-${3}").into_owned()
}

/// A display name split into two title lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayName<'a> {
    pub primary: &'a str,
    pub secondary: Cow<'a, str>,
}

/// Split a display name on `-` into a primary and a secondary line.
///
/// The primary line is the text before the first `-`; the secondary line is
/// the next segment with the firm prefix removed. Without a `-` the primary
/// line is the whole name and the secondary line is empty.
///
/// # Examples
///
/// ```
/// use advisor_page::split_display_name;
///
/// let name = split_display_name("Jane Doe-RBC Wealth Management Advisor");
/// assert_eq!(name.primary, "Jane Doe");
/// assert_eq!(name.secondary, "Advisor");
/// ```
pub fn split_display_name(name: &str) -> DisplayName<'_> {
    let mut parts = name.split('-');
    let primary = parts.next().unwrap_or(name);
    let secondary = match parts.next() {
        Some(segment) if segment.contains(FIRM_PREFIX) => {
            Cow::Owned(segment.replacen(FIRM_PREFIX, "", 1))
        }
        Some(segment) => Cow::Borrowed(segment),
        None => Cow::Borrowed(""),
    };
    DisplayName { primary, secondary }
}
