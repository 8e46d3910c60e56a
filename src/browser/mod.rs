//! Browser session management
//!
//! The pipeline never touches chromiumoxide directly. It talks to a
//! [`PageDriver`], which `BrowserSession` implements over a single Chromium
//! tab and which tests implement with scripted pages.

mod page_timeout;
mod session;
mod stealth;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

pub use page_timeout::with_page_timeout;
pub use session::BrowserSession;

/// The browser operations the harvester and page extractor rely on
///
/// Every failure is reported as a [`TransportError`].
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate the tab and wait for the load to finish
    async fn navigate(&self, url: &str) -> Result<(), TransportError>;

    /// URL the tab is currently showing, if known
    async fn current_url(&self) -> Option<String>;

    /// Focus the element matched by `selector` and type `text` into it
    async fn type_into(&self, selector: &str, text: &str) -> Result<(), TransportError>;

    /// Press Enter on the element matched by `selector` and wait for the
    /// resulting navigation
    async fn press_enter(&self, selector: &str) -> Result<(), TransportError>;

    /// Poll until an element matching `selector` is present in the DOM
    async fn wait_for_element(&self, selector: &str, timeout: Duration)
    -> Result<(), TransportError>;

    /// Full rendered markup of the current document
    async fn content(&self) -> Result<String, TransportError>;

    /// Click the element matched by `selector` if there is one.
    ///
    /// Returns `Ok(false)` when nothing matches.
    async fn click_if_present(&self, selector: &str) -> Result<bool, TransportError>;
}
