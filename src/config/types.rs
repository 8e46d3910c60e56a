//! Core configuration type for a harvesting run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::harvest::PacingPolicy;
use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LINK_SELECTOR, DEFAULT_MAX_PAGES,
    DEFAULT_NEXT_PAGE_SELECTOR, DEFAULT_PAGE_LOAD_TIMEOUT_SECS, DEFAULT_RESULT_SELECTOR,
    DEFAULT_SEARCH_INPUT_SELECTOR, DEFAULT_SEARCH_URL, DEFAULT_TITLE_WAIT_SECS, LOG_FILE_NAME,
    OUTPUT_FILE_NAME, PDF_DIR_NAME,
};

/// Settings for one search-and-extract run
///
/// Every field except `output_dir` and `query` has a default, so a JSON
/// settings file only needs to name what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Directory holding the workbook, the PDF archive and the log
    pub(crate) output_dir: PathBuf,
    pub(crate) query: String,

    pub(crate) search_url: String,
    pub(crate) search_input_selector: String,
    pub(crate) result_selector: String,
    pub(crate) link_selector: String,
    pub(crate) next_page_selector: String,
    /// Upper bound on result pages read; at least 1
    pub(crate) max_pages: usize,
    pub(crate) pacing: PacingPolicy,

    /// Budget for any browser navigation
    pub(crate) page_load_timeout_secs: u64,
    /// How long a visited page gets to expose its `<title>`
    pub(crate) title_wait_secs: u64,
    /// Budget for content-type probes and PDF downloads
    pub(crate) http_timeout_secs: u64,
    pub(crate) headless: bool,

    pub(crate) output_file_name: String,
    pub(crate) pdf_dir_name: String,
    pub(crate) log_file_name: String,

    /// Chrome profile directory. A throwaway temp directory when unset.
    pub(crate) chrome_data_dir: Option<PathBuf>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            query: String::new(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            search_input_selector: DEFAULT_SEARCH_INPUT_SELECTOR.to_string(),
            result_selector: DEFAULT_RESULT_SELECTOR.to_string(),
            link_selector: DEFAULT_LINK_SELECTOR.to_string(),
            next_page_selector: DEFAULT_NEXT_PAGE_SELECTOR.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            pacing: PacingPolicy::default(),
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            title_wait_secs: DEFAULT_TITLE_WAIT_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            headless: true,
            output_file_name: OUTPUT_FILE_NAME.to_string(),
            pdf_dir_name: PDF_DIR_NAME.to_string(),
            log_file_name: LOG_FILE_NAME.to_string(),
            chrome_data_dir: None,
        }
    }
}
