//! Getter methods for `HarvestConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::HarvestConfig;
use crate::harvest::PacingPolicy;

impl HarvestConfig {
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    #[must_use]
    pub fn search_input_selector(&self) -> &str {
        &self.search_input_selector
    }

    #[must_use]
    pub fn result_selector(&self) -> &str {
        &self.result_selector
    }

    #[must_use]
    pub fn link_selector(&self) -> &str {
        &self.link_selector
    }

    #[must_use]
    pub fn next_page_selector(&self) -> &str {
        &self.next_page_selector
    }

    #[must_use]
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    #[must_use]
    pub fn pacing(&self) -> &PacingPolicy {
        &self.pacing
    }

    #[must_use]
    pub fn page_load_timeout_secs(&self) -> u64 {
        self.page_load_timeout_secs
    }

    #[must_use]
    pub fn title_wait(&self) -> Duration {
        Duration::from_secs(self.title_wait_secs)
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }

    /// Full path of the output workbook
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file_name)
    }

    /// Directory downloaded PDFs are archived in
    #[must_use]
    pub fn pdf_dir(&self) -> PathBuf {
        self.output_dir.join(&self.pdf_dir_name)
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(&self.log_file_name)
    }

    /// Host of the search engine, for log lines
    #[must_use]
    pub fn search_engine_name(&self) -> String {
        url::Url::parse(&self.search_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.search_url.clone())
    }
}
