//! Link target checks shared by the rich-text renderers.

/// Schemes a rendered link or image may use.
const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// True if `url` is a web, mail, phone or relative target.
///
/// Browsers drop tabs, newlines and other control characters while parsing
/// a URL, so they are removed before the scheme is read.
///
/// # Examples
///
/// ```
/// use advisor_richtext::is_safe_url;
///
/// assert!(is_safe_url("https://example.com"));
/// assert!(is_safe_url("../about"));
/// assert!(!is_safe_url("javascript:alert(1)"));
/// ```
pub fn is_safe_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_control() && !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let Some((scheme, _)) = normalized.split_once(':') else {
        return true;
    };
    // A colon after the path, query or fragment starts is not a scheme.
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    ALLOWED_SCHEMES.contains(&scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_targets() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("HTTP://example.com"));
        assert!(is_safe_url("mailto:jane@example.com"));
        assert!(is_safe_url("tel:+14155551234"));
        assert!(is_safe_url("/relative/path"));
        assert!(is_safe_url("page?x=http://a"));
        assert!(is_safe_url("#top"));
    }

    #[test]
    fn test_script_and_data_schemes_rejected() {
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url(" JavaScript:alert(1)"));
        assert!(!is_safe_url("data:text/html,hi"));
        assert!(!is_safe_url("vbscript:msgbox"));
    }

    #[test]
    fn test_control_characters_in_scheme_rejected() {
        assert!(!is_safe_url("java\nscript:alert(1)"));
        assert!(!is_safe_url("java\tscript:alert(1)"));
        assert!(!is_safe_url("\u{0}javascript:alert(1)"));
        assert!(!is_safe_url("jav\r\nascript:alert(1)"));
    }
}
