//! Result-link extraction from a rendered results page
//!
//! Pure function over markup so it can be exercised without a browser.

use scraper::{Html, Selector};
use url::Url;

use crate::utils::resolve_result_href;

/// What one results page yielded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPage {
    /// Number of result blocks matched, whether or not they held a usable link
    pub result_count: usize,
    /// Absolute links in page order; may contain duplicates
    pub links: Vec<String>,
}

/// Collect the first anchor `href` of every result block
///
/// `base` resolves relative hrefs (the results page URL). Blocks without an
/// anchor, or whose anchor does not resolve to an http(s) URL, still count
/// toward `result_count`.
#[must_use]
pub fn parse_results_page(
    html: &str,
    base: Option<&Url>,
    result_selector: &Selector,
    link_selector: &Selector,
) -> ResultsPage {
    let document = Html::parse_document(html);
    let mut page = ResultsPage::default();

    for block in document.select(result_selector) {
        page.result_count += 1;

        let href = block
            .select(link_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"));

        if let Some(link) = href.and_then(|h| resolve_result_href(base, h)) {
            page.links.push(link);
        }
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> (Selector, Selector) {
        (
            Selector::parse(".g").unwrap(),
            Selector::parse("a[href]").unwrap(),
        )
    }

    #[test]
    fn takes_first_anchor_of_each_block() {
        let html = r#"
            <div id="search">
              <div class="g"><a href="https://one.example/">One</a><a href="https://ignored.example/">x</a></div>
              <div class="g"><span>no link here</span></div>
              <div class="g"><a href="/relative">Two</a></div>
            </div>"#;
        let base = Url::parse("https://search.example/search?q=x").unwrap();
        let (results, links) = selectors();

        let page = parse_results_page(html, Some(&base), &results, &links);

        assert_eq!(page.result_count, 3);
        assert_eq!(
            page.links,
            vec![
                "https://one.example/".to_string(),
                "https://search.example/relative".to_string()
            ]
        );
    }

    #[test]
    fn empty_container_yields_nothing() {
        let (results, links) = selectors();
        let page = parse_results_page("<div id='search'></div>", None, &results, &links);
        assert_eq!(page, ResultsPage::default());
    }
}
