//! Search-result link harvesting
//!
//! Drives the browser through the search engine's own UI: open the home
//! page, type the query, submit it, then read result links from each
//! results page until the page budget runs out or there is no "next" control.
//!
//! Reaching the search engine is best-effort. A failure to open it or to
//! submit the query yields an empty [`LinkSet`], never an error.

mod pacing;
mod results;
mod types;

use tracing::{debug, error, info, warn};
use url::Url;

use crate::browser::PageDriver;
use crate::cancel::CancelFlag;
use crate::error::TransportError;

pub use pacing::{DelayRange, PacingPolicy};
pub use results::{ResultsPage, parse_results_page};
pub(crate) use types::parse_selector;
pub use types::{LinkSet, SearchPlan};

/// Submit `query` and collect the deduplicated result links
pub async fn harvest<D: PageDriver + ?Sized>(
    driver: &D,
    query: &str,
    plan: &SearchPlan,
    pacing: &PacingPolicy,
    cancel: &CancelFlag,
) -> LinkSet {
    let mut links = LinkSet::new();

    if let Err(e) = open_and_submit(driver, query, plan, pacing).await {
        error!("Unable to open the search engine. Kindly check internet connection.");
        debug!(error = %e, "Search submission failed");
        return links;
    }

    let mut page_number = 1;
    loop {
        let html = match driver.content().await {
            Ok(html) => html,
            Err(e) => {
                warn!(page = page_number, error = %e, "Failed to read results page");
                break;
            }
        };
        let base = driver
            .current_url()
            .await
            .and_then(|u| Url::parse(&u).ok());

        info!("Fetching the results from page {}", page_number);
        let page = parse_results_page(
            &html,
            base.as_ref(),
            &plan.result_selector,
            &plan.link_selector,
        );

        if page.result_count == 0 {
            if page_number == 1 {
                info!("No search results found for the query.");
            } else {
                debug!("Results page {} is empty, stopping", page_number);
            }
            break;
        }

        let before = links.len();
        for link in page.links {
            links.insert(link);
        }
        debug!(
            page = page_number,
            blocks = page.result_count,
            new_links = links.len() - before,
            "Results page read"
        );

        if page_number >= plan.max_pages {
            break;
        }
        if cancel.is_cancelled() {
            info!("Stop requested, not reading further result pages");
            break;
        }

        match driver.click_if_present(&plan.next_page_selector).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("No next page control after page {}", page_number);
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to open the next results page");
                break;
            }
        }
        pacing.settle().await;
        page_number += 1;
    }

    info!("Collected {} unique result links", links.len());
    links
}

async fn open_and_submit<D: PageDriver + ?Sized>(
    driver: &D,
    query: &str,
    plan: &SearchPlan,
    pacing: &PacingPolicy,
) -> Result<(), TransportError> {
    driver.navigate(&plan.search_url).await?;
    info!("Search engine opened successfully");
    pacing.settle().await;

    driver.type_into(&plan.input_selector, query).await?;
    info!("Search string entered in the search text field");
    pacing.keystroke().await;

    driver.press_enter(&plan.input_selector).await?;
    pacing.settle().await;
    Ok(())
}
