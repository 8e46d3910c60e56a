//! URL helpers for harvested result links

use url::Url;

/// Check if a URL is an absolute http(s) URL worth visiting
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Turn a result anchor's `href` into an absolute link
///
/// Relative hrefs are resolved against the results page URL when one is
/// known. Anything that does not end up as an http(s) URL is dropped.
#[must_use]
pub fn resolve_result_href(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base?.join(href).ok()?,
        Err(_) => return None,
    };

    let resolved = resolved.to_string();
    is_valid_url(&resolved).then_some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_schemes() {
        assert!(!is_valid_url("javascript:void(0)"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url(""));
        assert!(is_valid_url("https://example.com/a.pdf"));
    }

    #[test]
    fn resolves_relative_href_against_base() {
        let base = Url::parse("https://www.google.com/search?q=rust").unwrap();
        assert_eq!(
            resolve_result_href(Some(&base), "/url?q=x").as_deref(),
            Some("https://www.google.com/url?q=x")
        );
        assert_eq!(
            resolve_result_href(Some(&base), "https://example.org/").as_deref(),
            Some("https://example.org/")
        );
    }

    #[test]
    fn drops_unresolvable_hrefs() {
        assert_eq!(resolve_result_href(None, "/relative/path"), None);
        assert_eq!(resolve_result_href(None, "#top"), None);
        assert_eq!(resolve_result_href(None, "javascript:void(0)"), None);
    }
}
