//! Routing a result link to the PDF or the page-text path

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::debug;

use crate::error::TransportError;

/// Which extractor a link goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Pdf,
    Page,
}

/// Decide the route from a `Content-Type` header
///
/// Absent or non-UTF-8 headers are treated as a web page.
#[must_use]
pub fn kind_from_content_type(header: Option<&HeaderValue>) -> LinkKind {
    let is_pdf = header
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/pdf"));

    if is_pdf { LinkKind::Pdf } else { LinkKind::Page }
}

/// Probe `url` and classify it by the response's content type
///
/// Only the response head is awaited; the body is dropped unread. The
/// status code is not inspected, an error page still routes to the page path.
pub async fn classify(client: &Client, url: &str) -> Result<LinkKind, TransportError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| TransportError::http(url, e))?;

    let kind = kind_from_content_type(response.headers().get(CONTENT_TYPE));
    debug!(
        url,
        status = response.status().as_u16(),
        ?kind,
        "Classified link"
    );
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_detection_is_case_insensitive() {
        let header = HeaderValue::from_static("Application/PDF; charset=binary");
        assert_eq!(kind_from_content_type(Some(&header)), LinkKind::Pdf);
    }

    #[test]
    fn missing_or_garbled_header_is_a_page() {
        assert_eq!(kind_from_content_type(None), LinkKind::Page);

        let garbled = HeaderValue::from_bytes(b"application/\xffpdf").unwrap();
        assert_eq!(kind_from_content_type(Some(&garbled)), LinkKind::Page);

        let html = HeaderValue::from_static("text/html; charset=utf-8");
        assert_eq!(kind_from_content_type(Some(&html)), LinkKind::Page);
    }
}
