//! One Chromium process driving a single tab

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{PageDriver, stealth, with_page_timeout};
use crate::browser_setup::{LaunchOptions, launch_browser};
use crate::config::HarvestConfig;
use crate::error::TransportError;
use crate::utils::constants::ELEMENT_POLL_INTERVAL;

/// RAII owner of the harvesting browser
///
/// `shutdown` closes Chromium gracefully. If the session is dropped instead,
/// the CDP handler task is aborted and a temporary profile directory is
/// removed.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    /// Only set when the profile directory was created for this session
    user_data_dir: Option<PathBuf>,
    page_load_timeout_secs: u64,
}

impl BrowserSession {
    /// Start Chromium and open the tab every operation runs in
    pub async fn launch(config: &HarvestConfig) -> anyhow::Result<Self> {
        let options = LaunchOptions {
            headless: config.headless(),
            request_timeout: Duration::from_secs(config.page_load_timeout_secs()),
            chrome_data_dir: config.chrome_data_dir().cloned(),
        };
        let (browser, handler, data_dir) = launch_browser(&options).await?;

        let user_data_dir = if options.chrome_data_dir.is_some() {
            None
        } else {
            Some(data_dir)
        };

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                if let Some(dir) = &user_data_dir {
                    let _ = std::fs::remove_dir_all(dir);
                }
                return Err(anyhow::anyhow!("Failed to open browser tab: {e}"));
            }
        };

        if let Err(e) = stealth::apply(&page).await {
            warn!("Stealth injection failed, continuing without it: {}", e);
        }

        Ok(Self {
            browser,
            handler,
            page,
            user_data_dir,
            page_load_timeout_secs: config.page_load_timeout_secs(),
        })
    }

    /// Close the browser and wait for the process to exit
    pub async fn shutdown(mut self) {
        info!("Closing browser");
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed waiting for browser process exit: {}", e);
        }
        // Drop aborts the handler and removes the profile
    }

    async fn wait_for_navigation(&self, operation: &str) -> Result<(), TransportError> {
        with_page_timeout(
            async {
                self.page.wait_for_navigation().await?;
                Ok(())
            },
            self.page_load_timeout_secs,
            operation,
        )
        .await
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        debug!("Dropping BrowserSession - aborting handler task");
        self.handler.abort();
        if let Some(path) = self.user_data_dir.take() {
            info!("Cleaning up browser profile directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up profile directory {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }
}

#[async_trait]
impl PageDriver for BrowserSession {
    async fn navigate(&self, url: &str) -> Result<(), TransportError> {
        with_page_timeout(
            async {
                self.page
                    .goto(url)
                    .await
                    .map_err(|e| TransportError::navigation(url, e))?;
                Ok(())
            },
            self.page_load_timeout_secs,
            "Page navigation",
        )
        .await
    }

    async fn current_url(&self) -> Option<String> {
        match self.page.url().await {
            Ok(url) => url,
            Err(e) => {
                debug!("Failed to read page URL: {}", e);
                None
            }
        }
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<(), TransportError> {
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    async fn press_enter(&self, selector: &str) -> Result<(), TransportError> {
        let element = self.page.find_element(selector).await?;
        element.press_key("Enter").await?;
        self.wait_for_navigation("Search submission").await
    }

    async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), TransportError> {
        let start = Instant::now();
        loop {
            if self.page.find_element(selector).await.is_ok() {
                debug!("'{}' present after {:?}", selector, start.elapsed());
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(TransportError::Timeout {
                    operation: format!("Waiting for '{selector}'"),
                    secs: timeout.as_secs(),
                });
            }
            tokio::time::sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    async fn content(&self) -> Result<String, TransportError> {
        Ok(self.page.content().await?)
    }

    async fn click_if_present(&self, selector: &str) -> Result<bool, TransportError> {
        let Ok(element) = self.page.find_element(selector).await else {
            return Ok(false);
        };
        element.click().await?;
        self.wait_for_navigation("Next page navigation").await?;
        Ok(true)
    }
}
