//! Visible text of a web page, fetched through the browser

use std::time::Duration;

use tracing::{debug, info};

use super::formatter::format_page;
use crate::browser::PageDriver;
use crate::error::TransportError;

/// Navigate to `url` and return its formatted text
///
/// Waits up to `title_wait` for a `<title>` element as a readiness signal
/// before reading the rendered markup.
pub async fn extract_text<D: PageDriver + ?Sized>(
    driver: &D,
    url: &str,
    title_wait: Duration,
) -> Result<String, TransportError> {
    driver.navigate(url).await?;
    driver.wait_for_element("title", title_wait).await?;

    let html = driver.content().await?;
    let text = format_page(&html);
    debug!(url, chars = text.chars().count(), "Extracted page text");
    info!("Text extracted from the link");
    Ok(text)
}
